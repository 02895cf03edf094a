use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Argb, Rect, Viewport};
use crate::error::{DecoError, DecoResult};

/// Tuning for label boxes drawn on the arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacementConfig {
    /// Estimated glyph advance as a share of the font size.
    pub char_width_ratio: f64,
    pub horizontal_padding_px: f64,
    pub vertical_padding_px: f64,
    pub corner_radius_px: f64,
    /// Vertical gap kept between labels pushed apart by collisions.
    pub collision_gap_px: f64,
}

impl Default for LabelPlacementConfig {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.6,
            horizontal_padding_px: 15.0,
            vertical_padding_px: 15.0,
            corner_radius_px: 10.0,
            collision_gap_px: 2.0,
        }
    }
}

impl LabelPlacementConfig {
    pub fn validate(self) -> DecoResult<Self> {
        if !self.char_width_ratio.is_finite() || self.char_width_ratio <= 0.0 {
            return Err(DecoError::InvalidConfig(
                "label config `char_width_ratio` must be finite and > 0".to_owned(),
            ));
        }
        for (value, name) in [
            (self.horizontal_padding_px, "horizontal_padding_px"),
            (self.vertical_padding_px, "vertical_padding_px"),
            (self.corner_radius_px, "corner_radius_px"),
            (self.collision_gap_px, "collision_gap_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DecoError::InvalidConfig(format!(
                    "label config `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Label visibility inputs for one series, in draw order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSeriesState {
    pub shown: bool,
    pub clockwise: bool,
    /// `(value - min) / (max - min)`.
    pub position_percent: f64,
}

/// Where on the circle the label of `index` goes, as a fraction of a turn
/// from 12 o'clock.
///
/// Only the part of the series not covered by later series is considered;
/// `None` means that part is empty. `origin_angle` is the track origin in
/// degrees.
#[must_use]
pub fn label_angle_fraction(
    states: &[LabelSeriesState],
    index: usize,
    total_angle: f64,
    origin_angle: f64,
) -> Option<f64> {
    let own = states.get(index)?.position_percent;
    let max = states
        .iter()
        .skip(index + 1)
        .filter(|state| state.shown)
        .map(|state| state.position_percent)
        .fold(0.0_f64, f64::max);

    if max >= own || !own.is_finite() {
        return None;
    }

    let adjusted = ((own + max) / 2.0) * (total_angle / 360.0);
    let mut fraction = adjusted + (origin_angle + 90.0) / 360.0;
    while fraction > 1.0 {
        fraction -= 1.0;
    }
    Some(fraction)
}

/// Labels are drawn only when every shown series runs clockwise.
#[must_use]
pub fn labels_supported(states: &[LabelSeriesState]) -> bool {
    states.iter().all(|state| !state.shown || state.clockwise)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelRequest {
    pub series_index: usize,
    pub text: String,
    pub angle_fraction: f64,
    pub font_size_px: f64,
    pub text_color: Argb,
    pub background_color: Argb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLabel {
    pub series_index: usize,
    pub text: String,
    pub center_x: f64,
    pub center_y: f64,
    pub rect: Rect,
    pub corner_radius_px: f64,
    pub font_size_px: f64,
    pub text_color: Argb,
    pub background_color: Argb,
    /// Moved down to avoid an earlier label.
    pub shifted: bool,
}

/// Places label boxes on the circle inscribed in `bounds`.
///
/// Boxes are clamped into the viewport. Requests are handled in order; a
/// box overlapping an already placed one is pushed below it.
pub fn place_labels(
    requests: &[LabelRequest],
    bounds: Rect,
    viewport: Viewport,
    config: LabelPlacementConfig,
) -> DecoResult<Vec<PlacedLabel>> {
    let config = config.validate()?;
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let radius = bounds.width() / 2.0;
    let mut placed: Vec<PlacedLabel> = Vec::with_capacity(requests.len());

    for request in requests {
        if !request.angle_fraction.is_finite() || !request.font_size_px.is_finite() {
            return Err(DecoError::InvalidData(
                "label angle and font size must be finite".to_owned(),
            ));
        }

        let radians = (360.0 * request.angle_fraction - 90.0).to_radians();
        let (sin, cos) = radians.sin_cos();
        let half_width = 0.5 * label_text_width(&request.text, request.font_size_px, config)
            + config.horizontal_padding_px;
        let half_height = 0.5 * request.font_size_px + config.vertical_padding_px;

        let x = clamp_center(cos * radius + bounds.center_x(), half_width, width);
        let mut y = clamp_center(sin * radius + bounds.center_y(), half_height, height);
        let mut rect = Rect::new(x - half_width, y - half_height, x + half_width, y + half_height);

        let shifted = push_below_collisions(&mut rect, &placed, config.collision_gap_px);
        if shifted {
            y = rect.center_y();
        }

        placed.push(PlacedLabel {
            series_index: request.series_index,
            text: request.text.clone(),
            center_x: x,
            center_y: y,
            rect,
            corner_radius_px: config.corner_radius_px,
            font_size_px: request.font_size_px,
            text_color: request.text_color,
            background_color: request.background_color,
            shifted,
        });
    }

    Ok(placed)
}

fn label_text_width(text: &str, font_size_px: f64, config: LabelPlacementConfig) -> f64 {
    text.chars().count() as f64 * font_size_px * config.char_width_ratio
}

fn clamp_center(value: f64, half_extent: f64, extent: f64) -> f64 {
    if extent <= 2.0 * half_extent {
        extent * 0.5
    } else {
        value.clamp(half_extent, extent - half_extent)
    }
}

fn push_below_collisions(rect: &mut Rect, placed: &[PlacedLabel], gap: f64) -> bool {
    let mut others: Vec<Rect> = placed.iter().map(|label| label.rect).collect();
    others.sort_by_key(|other| OrderedFloat(other.top));

    let mut shifted = false;
    for other in others {
        if rect.intersects(other) {
            let dy = other.bottom + gap - rect.top;
            *rect = rect.offset(0.0, dy);
            shifted = true;
        }
    }
    shifted
}
