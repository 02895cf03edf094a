//! Non-linear decorative animations (spirals and explode) computed as pure
//! functions of normalized progress.
//!
//! Nothing here keeps state between calls; a series passes everything needed
//! for one frame and receives the shapes to draw.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Argb, Rect};

const MAX_ALPHA: f64 = 255.0;
const EXPLODE_LINE_MIN: f64 = 0.01;
const EXPLODE_LINE_MAX: f64 = 0.1;
pub const EXPLODE_LINE_COUNT: usize = 9;
const MIN_LINE_WIDTH: f64 = 10.0;
const MAX_LINE_WIDTH: f64 = 100.0;
const EXPLODE_LINE_WIDTH_FACTOR: f64 = 0.66;
const SPIRAL_BOUNDS_BUFFER: f64 = 10.0;
const HIGHLIGHT_SWEEP_MIN: f64 = 0.1;
const HIGHLIGHT_SWEEP_MAX: f64 = 30.0;
const SPIRAL_EXPLODE_SPLIT: f64 = 0.6;
const TEXT_MAX_SIZE: f64 = 100.0;
const TEXT_FADE_START: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Outward spiral that keeps turning until the whole track is stroked.
    SpiralOutFill,
    /// From the center to the track in a clockwise spiral.
    SpiralOut,
    /// From the track to the center in a counter-clockwise spiral.
    SpiralIn,
    /// Radial lines bursting from the center, with optional text.
    Explode,
    /// Inward spiral for the first 60%, then explode from the center.
    SpiralExplode,
}

impl EffectKind {
    /// Whether the series stays visible once the effect completes.
    #[must_use]
    pub const fn visible_after(self) -> bool {
        matches!(self, Self::SpiralOut | Self::SpiralOutFill)
    }

    /// Whether the effect brings a hidden series into view.
    #[must_use]
    pub const fn reveals(self) -> bool {
        self.visible_after()
    }

    const fn moves_outward(self) -> bool {
        matches!(self, Self::SpiralOut | Self::SpiralOutFill)
    }

    const fn spins_clockwise(self) -> bool {
        !matches!(self, Self::SpiralIn | Self::SpiralExplode)
    }
}

/// Inputs for one effect frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams<'a> {
    pub kind: EffectKind,
    /// Normalized progress, nominally `0..=1`.
    pub progress: f64,
    /// Series bounds after inset.
    pub bounds: Rect,
    /// Series origin angle in degrees.
    pub start_angle: f64,
    /// Total track sweep in degrees (360 for a full circle).
    pub sweep_angle: f64,
    pub rotations: u32,
    pub text: Option<&'a str>,
    pub color: Argb,
    pub line_width: f64,
}

/// Rotating arc drawn by the spiral family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectArc {
    pub bounds: Rect,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub stroke_width: f64,
    /// `false` while the arc is a moving highlight, `true` once it strokes the track.
    pub full_stroke: bool,
    pub color: Argb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Argb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectText {
    pub text: String,
    pub center_x: f64,
    pub center_y: f64,
    pub font_size: f64,
    pub color: Argb,
}

/// Shapes for one effect frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectFrame {
    pub arc: Option<EffectArc>,
    pub lines: SmallVec<[EffectLine; EXPLODE_LINE_COUNT]>,
    pub text: Option<EffectText>,
}

impl EffectFrame {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arc.is_none() && self.lines.is_empty() && self.text.is_none()
    }
}

/// Computes the shapes of `params.kind` at `params.progress`.
#[must_use]
pub fn render_effect(params: &EffectParams<'_>) -> EffectFrame {
    let progress = if params.progress.is_finite() {
        params.progress
    } else {
        0.0
    };
    let mut frame = EffectFrame::default();

    match params.kind {
        EffectKind::SpiralExplode => {
            if progress <= SPIRAL_EXPLODE_SPLIT {
                frame.arc = Some(spiral_arc(params, progress / SPIRAL_EXPLODE_SPLIT));
            } else {
                let remain = (progress - SPIRAL_EXPLODE_SPLIT) / (1.0 - SPIRAL_EXPLODE_SPLIT);
                frame.lines = explode_lines(params, remain);
                frame.text = explode_text(params, remain);
            }
        }
        EffectKind::Explode => {
            frame.lines = explode_lines(params, progress);
            frame.text = explode_text(params, progress);
        }
        EffectKind::SpiralIn | EffectKind::SpiralOut | EffectKind::SpiralOutFill => {
            frame.arc = Some(spiral_arc(params, progress));
        }
    }

    frame
}

/// Triangular highlight sweep peaking at the midpoint.
#[must_use]
pub fn highlight_sweep(progress: f64) -> f64 {
    if progress < 0.5 {
        HIGHLIGHT_SWEEP_MIN + (HIGHLIGHT_SWEEP_MAX - HIGHLIGHT_SWEEP_MIN) * (progress * 2.0)
    } else {
        HIGHLIGHT_SWEEP_MAX - (HIGHLIGHT_SWEEP_MAX - HIGHLIGHT_SWEEP_MIN) * ((progress - 0.5) * 2.0)
    }
}

fn effect_line_width(line_width: f64, factor: f64) -> f64 {
    let width = if line_width.is_finite() { line_width } else { 0.0 };
    width.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH) * factor
}

fn spiral_arc(params: &EffectParams<'_>, progress: f64) -> EffectArc {
    let kind = params.kind;
    let bounds = params.bounds;
    let half_width = (bounds.width() / 2.0 - SPIRAL_BOUNDS_BUFFER).max(0.0);
    let half_height = (bounds.height() / 2.0 - SPIRAL_BOUNDS_BUFFER).max(0.0);
    let base_rotation = f64::from(params.rotations) * 360.0;

    let rotate_amount = if kind == EffectKind::SpiralOutFill {
        base_rotation + 360.0
    } else {
        base_rotation
    };
    let rotate_offset = rotate_amount * progress;
    let mut angle = if kind.spins_clockwise() {
        (params.start_angle + rotate_offset) % 360.0
    } else {
        (params.start_angle - rotate_offset) % 360.0
    };
    let mut sweep = highlight_sweep(progress);
    let mut spin_bounds = bounds;
    let mut full_stroke = false;

    // Inward spirals contract with progress; outward ones start contracted.
    let contraction = if kind.moves_outward() {
        1.0 - progress
    } else {
        progress
    };

    if kind == EffectKind::SpiralOutFill {
        if rotate_offset > rotate_amount - 360.0 {
            full_stroke = true;
            sweep = rotate_offset % 360.0;
            if sweep <= 0.0 {
                sweep = 360.0;
            }
            sweep = sweep.min(params.sweep_angle);
            angle = params.start_angle;
        } else {
            let min = 1.0 - base_rotation / rotate_amount;
            if contraction > min {
                let adjusted = (contraction - min) / (1.0 - min);
                spin_bounds = bounds.inset(half_width * adjusted, half_height * adjusted);
            }
        }
    } else {
        spin_bounds = bounds.inset(half_width * contraction, half_height * contraction);
    }

    EffectArc {
        bounds: spin_bounds,
        start_angle: angle,
        sweep_angle: sweep,
        stroke_width: effect_line_width(params.line_width, 1.0),
        full_stroke,
        color: params.color,
    }
}

fn explode_lines(
    params: &EffectParams<'_>,
    progress: f64,
) -> SmallVec<[EffectLine; EXPLODE_LINE_COUNT]> {
    let bounds = params.bounds;
    let width = bounds.width();
    let max_length = width * EXPLODE_LINE_MAX;
    let min_length = width * EXPLODE_LINE_MIN;
    let start_position = width * EXPLODE_LINE_MAX;

    let (length, alpha) = if progress > 0.5 {
        let completed = (progress - 0.5) * 2.0;
        (
            max_length - completed * (max_length - min_length),
            MAX_ALPHA - (MAX_ALPHA * completed).trunc(),
        )
    } else {
        (
            min_length + (progress * 2.0) * (max_length - min_length),
            MAX_ALPHA,
        )
    };

    let color = if alpha < MAX_ALPHA {
        params.color.scale_alpha(alpha / MAX_ALPHA)
    } else {
        params.color
    };
    let stroke_width = effect_line_width(params.line_width, EXPLODE_LINE_WIDTH_FACTOR);
    let radius_end = start_position + ((width / 2.0 - start_position) * progress).trunc();
    let radius_start = radius_end - length;
    let (cx, cy) = (bounds.center_x(), bounds.center_y());

    (0..EXPLODE_LINE_COUNT)
        .map(|i| {
            let radians = (i as f64 * 360.0 / EXPLODE_LINE_COUNT as f64).to_radians();
            let (sin, cos) = radians.sin_cos();
            EffectLine {
                x1: radius_start * cos + cx,
                y1: radius_start * sin + cy,
                x2: radius_end * cos + cx,
                y2: radius_end * sin + cy,
                stroke_width,
                color,
            }
        })
        .collect()
}

fn explode_text(params: &EffectParams<'_>, progress: f64) -> Option<EffectText> {
    let text = params.text.filter(|text| !text.is_empty())?;
    let font_size = TEXT_MAX_SIZE * progress;
    if font_size <= 0.0 {
        return None;
    }

    let mut alpha = MAX_ALPHA;
    if progress > TEXT_FADE_START {
        alpha = MAX_ALPHA
            - (MAX_ALPHA * ((progress - TEXT_FADE_START) / (1.0 - TEXT_FADE_START))).trunc();
    }

    Some(EffectText {
        text: text.to_owned(),
        center_x: params.bounds.center_x(),
        center_y: params.bounds.center_y(),
        font_size,
        color: params.color.with_alpha(alpha.clamp(0.0, MAX_ALPHA) as u8),
    })
}
