use crate::core::{
    ArcGeometry, CapStyle, EdgeClip, EffectFrame, GeometryContext, GradientSpec, LineGeometry,
    SeriesGeometry, SeriesRuntime, Viewport,
};
use crate::extensions::PlacedLabel;
use crate::render::{
    ArcPrimitive, ClipOp, Color, Gradient, LineCap, LinePrimitive, OvalClip, PaintStyle,
    RectPrimitive, RenderFrame, TextHAlign, TextPrimitive, TextVAlign,
};

/// Materializes one frame: series in insertion order, then label boxes on top.
pub(super) fn build_render_frame(
    viewport: Viewport,
    series: &[SeriesRuntime],
    ctx: &GeometryContext,
    labels: &[PlacedLabel],
) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport);

    for item in series {
        match item.geometry(ctx) {
            SeriesGeometry::Hidden => {}
            SeriesGeometry::Arc(arc) => push_arc(&mut frame, &arc),
            SeriesGeometry::Line(line) => push_line(&mut frame, &line),
            SeriesGeometry::Effect(effect) => push_effect(&mut frame, effect),
        }
    }

    for label in labels {
        if label.rect.is_empty() || label.font_size_px <= 0.0 || label.text.is_empty() {
            continue;
        }
        frame.rects.push(RectPrimitive::new(
            label.rect,
            label.corner_radius_px,
            Color::from(label.background_color),
        ));
        frame.texts.push(
            TextPrimitive::new(
                label.text.clone(),
                label.center_x,
                label.center_y,
                label.font_size_px,
                Color::from(label.text_color),
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Middle),
        );
    }

    frame
}

fn line_cap(cap: CapStyle) -> LineCap {
    match cap {
        CapStyle::Round => LineCap::Round,
        CapStyle::Flat => LineCap::Butt,
    }
}

fn gradient(spec: &GradientSpec) -> Gradient {
    match spec {
        GradientSpec::Sweep {
            center_x,
            center_y,
            colors,
            positions,
            rotation,
        } => Gradient::Sweep {
            center_x: *center_x,
            center_y: *center_y,
            colors: colors.iter().copied().map(Color::from).collect(),
            positions: positions.clone(),
            rotation_deg: *rotation,
        },
        GradientSpec::Linear {
            x0,
            y0,
            x1,
            y1,
            start,
            end,
        } => Gradient::Linear {
            x0: *x0,
            y0: *y0,
            x1: *x1,
            y1: *y1,
            start: Color::from(*start),
            end: Color::from(*end),
        },
    }
}

fn push_arc(frame: &mut RenderFrame, arc: &ArcGeometry) {
    let mut primitive = ArcPrimitive::new(
        arc.bounds,
        arc.start_angle,
        arc.sweep_angle,
        arc.stroke_width,
        Color::from(arc.color),
    );
    primitive.cap = line_cap(arc.cap);
    if arc.filled {
        primitive.use_center = true;
        primitive.style = PaintStyle::Fill;
    }
    primitive.gradient = arc.gradient.as_ref().map(gradient);

    // Edge bands repaint the same arc, so they follow the base stroke.
    let edges: Vec<ArcPrimitive> = arc
        .edges
        .iter()
        .map(|edge| {
            let mut edge_primitive = primitive.clone();
            edge_primitive.color = Color::from(edge.color);
            edge_primitive.gradient = None;
            edge_primitive.clip = Some(OvalClip {
                bounds: edge.clip_bounds,
                op: match edge.clip {
                    EdgeClip::Inside => ClipOp::Intersect,
                    EdgeClip::Outside => ClipOp::Difference,
                },
            });
            edge_primitive
        })
        .collect();

    frame.arcs.push(primitive);
    frame.arcs.extend(edges);
}

fn push_line(frame: &mut RenderFrame, line: &LineGeometry) {
    if line.stroke_width <= 0.0 {
        return;
    }
    let mut primitive = LinePrimitive::new(
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        line.stroke_width,
        Color::from(line.color),
    )
    .with_cap(line_cap(line.cap));
    primitive.gradient = line.gradient.as_ref().map(gradient);
    frame.lines.push(primitive);
}

fn push_effect(frame: &mut RenderFrame, effect: EffectFrame) {
    if let Some(arc) = effect.arc {
        let mut primitive = ArcPrimitive::new(
            arc.bounds,
            arc.start_angle,
            arc.sweep_angle,
            arc.stroke_width,
            Color::from(arc.color),
        );
        primitive.style = if arc.full_stroke {
            PaintStyle::Stroke
        } else {
            PaintStyle::FillAndStroke
        };
        frame.arcs.push(primitive);
    }

    for line in effect.lines {
        frame.lines.push(LinePrimitive::new(
            line.x1,
            line.y1,
            line.x2,
            line.y2,
            line.stroke_width,
            Color::from(line.color),
        ));
    }

    if let Some(text) = effect.text {
        frame.texts.push(
            TextPrimitive::new(
                text.text,
                text.center_x,
                text.center_y,
                text.font_size,
                Color::from(text.color),
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Middle),
        );
    }
}
