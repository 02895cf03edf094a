use crate::core::{HorizontalGravity, Rect, VerticalGravity, Viewport};

use super::Padding;

/// Bounds of the largest centered square that fits the viewport, inset by
/// half the widest stroke and the padding, then moved per gravity.
///
/// `Fill` gravity drops the squaring on that axis.
#[must_use]
pub fn resolve_arc_bounds(
    viewport: Viewport,
    widest_line: f64,
    padding: Padding,
    vertical: VerticalGravity,
    horizontal: HorizontalGravity,
) -> Rect {
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let half_line = widest_line / 2.0;

    let mut offset_x = 0.0;
    let mut offset_y = 0.0;
    if width > height {
        offset_x = (width - height) / 2.0;
    } else if height > width {
        offset_y = (height - width) / 2.0;
    }
    if vertical == VerticalGravity::Fill {
        offset_y = 0.0;
    }
    if horizontal == HorizontalGravity::Fill {
        offset_x = 0.0;
    }

    let bounds = Rect::new(
        half_line + offset_x + padding.left,
        half_line + offset_y + padding.top,
        width - half_line - offset_x - padding.right,
        height - half_line - offset_y - padding.bottom,
    );

    let dy = match vertical {
        VerticalGravity::Top => -offset_y,
        VerticalGravity::Bottom => offset_y,
        VerticalGravity::Center | VerticalGravity::Fill => 0.0,
    };
    let dx = match horizontal {
        HorizontalGravity::Left => -offset_x,
        HorizontalGravity::Right => offset_x,
        HorizontalGravity::Center | HorizontalGravity::Fill => 0.0,
    };
    bounds.offset(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_viewport_centers_a_square() {
        let bounds = resolve_arc_bounds(
            Viewport::new(400, 200),
            20.0,
            Padding::default(),
            VerticalGravity::Center,
            HorizontalGravity::Center,
        );
        assert_eq!(bounds, Rect::new(110.0, 10.0, 290.0, 190.0));
    }

    #[test]
    fn left_gravity_moves_square_to_edge() {
        let bounds = resolve_arc_bounds(
            Viewport::new(400, 200),
            0.0,
            Padding::uniform(5.0),
            VerticalGravity::Center,
            HorizontalGravity::Left,
        );
        assert_eq!(bounds, Rect::new(5.0, 5.0, 195.0, 195.0));
    }
}
