//! Drawable geometry derived from a series' runtime state.
//!
//! Every style shares the same fill computation and differs only in how the
//! resulting fraction is mapped to an arc, a wedge or a straight line.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    Argb, CapStyle, ChartStyle, EdgeType, EffectFrame, HorizontalGravity, Rect, SeriesConfig,
    VerticalGravity, Viewport,
};

/// Positional differences below this are treated as zero.
pub const POSITION_EPSILON: f64 = 0.01;
/// Minimum visible sweep in degrees for round-capped arcs.
pub const MIN_SWEEP_ROUND: f64 = 0.1;
/// Minimum visible sweep in degrees for flat-capped arcs.
pub const MIN_SWEEP_FLAT: f64 = 0.05;
const MIN_LINE_FILL: f64 = 0.01;

/// Shared drawing context computed by the container for the current viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryContext {
    /// Arc bounds before the per-series inset.
    pub bounds: Rect,
    pub viewport: Viewport,
    pub vertical_gravity: VerticalGravity,
    pub horizontal_gravity: HorizontalGravity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeClip {
    /// Keep only the part of the stroke inside the oval.
    Inside,
    /// Keep only the part of the stroke outside the oval.
    Outside,
}

/// Series stroke redrawn in another color and clipped to an oval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeArc {
    pub clip_bounds: Rect,
    pub clip: EdgeClip,
    pub color: Argb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GradientSpec {
    Sweep {
        center_x: f64,
        center_y: f64,
        colors: SmallVec<[Argb; 3]>,
        positions: SmallVec<[f64; 3]>,
        rotation: f64,
    },
    Linear {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        start: Argb,
        end: Argb,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcGeometry {
    pub bounds: Rect,
    pub start_angle: f64,
    pub sweep_angle: f64,
    /// Pie wedges are filled from the center.
    pub filled: bool,
    pub stroke_width: f64,
    pub cap: CapStyle,
    pub color: Argb,
    pub gradient: Option<GradientSpec>,
    pub edges: SmallVec<[EdgeArc; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub cap: CapStyle,
    pub color: Argb,
    pub gradient: Option<GradientSpec>,
}

/// What a series wants drawn for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesGeometry {
    Hidden,
    Arc(ArcGeometry),
    Line(LineGeometry),
    Effect(EffectFrame),
}

impl SeriesGeometry {
    #[must_use]
    pub fn sweep_angle(&self) -> Option<f64> {
        match self {
            Self::Arc(arc) => Some(arc.sweep_angle),
            _ => None,
        }
    }
}

/// Fraction of the track covered at `progress` of a move from `start` to `end`.
///
/// When `positional` is `false` (reveal and color changes) the move is treated
/// as complete. The near-zero `end` branch keeps the shrink-to-zero curvature
/// of the move formula instead of dividing by `end`.
#[must_use]
pub fn fill_fraction(
    start: f64,
    end: f64,
    min: f64,
    max: f64,
    progress: f64,
    positional: bool,
) -> f64 {
    let start = start - min;
    let end = end - min;
    let max = max - min;

    if (start - end).abs() < POSITION_EPSILON {
        return start / max;
    }

    let percent = if positional { progress } else { 1.0 };

    if end.abs() < POSITION_EPSILON {
        return (start / max) * (start - start * percent) / start;
    }

    (end / max) * (start + percent * (end - start)) / end
}

/// Smallest sweep drawn for an empty series.
#[must_use]
pub fn min_sweep_angle(config: &SeriesConfig) -> f64 {
    if !config.show_point_when_empty() || config.chart_style() == ChartStyle::Pie {
        return 0.0;
    }
    match config.cap_style() {
        CapStyle::Round => MIN_SWEEP_ROUND,
        CapStyle::Flat => MIN_SWEEP_FLAT,
    }
}

/// Raises `sweep` to the minimum visible sweep when the series shows empty values.
#[must_use]
pub fn verify_min_sweep(config: &SeriesConfig, sweep: f64) -> f64 {
    let min = min_sweep_angle(config);
    if sweep.abs() < min && config.show_point_when_empty() {
        return min;
    }
    sweep
}

fn direction(config: &SeriesConfig, sweep: f64) -> f64 {
    if config.is_clockwise() { sweep } else { -sweep }
}

/// Origin angle for a series on a track of `total` degrees rotated by `rotate`.
#[must_use]
pub fn series_start_angle(total: f64, rotate: f64, clockwise: bool) -> f64 {
    let origin = if total >= 360.0 {
        (270.0 + rotate) % 360.0
    } else {
        (90.0 + (360.0 - total) / 2.0 + rotate) % 360.0
    };
    if clockwise {
        origin
    } else {
        (origin + total) % 360.0
    }
}

/// Per-frame inputs taken from the series runtime state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ArcState {
    pub fraction: f64,
    pub angle_start: f64,
    pub angle_sweep: f64,
    pub stroke_width: f64,
    pub color: Argb,
}

pub(crate) fn arc_geometry(config: &SeriesConfig, bounds: Rect, state: ArcState) -> ArcGeometry {
    let inset = config.inset();
    let inset_bounds = bounds.inset(inset.x, inset.y);
    let min_sweep = min_sweep_angle(config);
    let fraction = if state.fraction.is_finite() {
        state.fraction
    } else {
        0.0
    };

    let sweep = direction(config, verify_min_sweep(config, fraction * state.angle_sweep));
    let (start_angle, sweep_angle) = if config.draw_as_point() {
        (
            (state.angle_start + (sweep - min_sweep)) % 360.0,
            direction(config, min_sweep),
        )
    } else {
        (state.angle_start, sweep)
    };

    let filled = config.chart_style() == ChartStyle::Pie;
    let gradient = config
        .secondary_color()
        .map(|secondary| arc_gradient(bounds, state, config.color(), secondary));

    let edges = config
        .edge_details()
        .iter()
        .filter(|edge| !(filled && edge.edge_type == EdgeType::Inner))
        .map(|edge| {
            let mut offset = (edge.ratio - 0.5) * state.stroke_width;
            if edge.edge_type == EdgeType::Inner {
                offset = -offset;
            }
            EdgeArc {
                clip_bounds: inset_bounds.inset(offset, offset),
                clip: match edge.edge_type {
                    EdgeType::Inner => EdgeClip::Inside,
                    EdgeType::Outer => EdgeClip::Outside,
                },
                color: edge.color,
            }
        })
        .collect();

    ArcGeometry {
        bounds: inset_bounds,
        start_angle,
        sweep_angle,
        filled,
        stroke_width: state.stroke_width,
        cap: config.cap_style(),
        color: state.color,
        gradient,
        edges,
    }
}

fn arc_gradient(bounds: Rect, state: ArcState, primary: Argb, secondary: Argb) -> GradientSpec {
    let (center_x, center_y) = (bounds.center_x(), bounds.center_y());
    if state.angle_sweep < 360.0 {
        GradientSpec::Sweep {
            center_x,
            center_y,
            colors: SmallVec::from_slice(&[primary, secondary]),
            positions: SmallVec::from_slice(&[0.0, 1.0]),
            rotation: state.angle_start - (360.0 - state.angle_sweep) / 2.0,
        }
    } else {
        GradientSpec::Sweep {
            center_x,
            center_y,
            colors: SmallVec::from_slice(&[secondary, primary, secondary]),
            positions: SmallVec::from_slice(&[0.0, 0.5 * (state.angle_sweep / 360.0), 1.0]),
            rotation: 0.0,
        }
    }
}

/// Per-frame inputs for straight-line series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LineState {
    pub position: f64,
    pub line_width: f64,
    pub stroke_width: f64,
    pub color: Argb,
}

pub(crate) fn line_geometry(
    config: &SeriesConfig,
    ctx: &GeometryContext,
    state: LineState,
) -> LineGeometry {
    let reverse = !config.is_clockwise();
    let inset = config.inset();
    let half_width = state.line_width / 2.0;
    let width = f64::from(ctx.viewport.width);
    let height = f64::from(ctx.viewport.height);

    let mut position = if state.position.is_finite() {
        state.position
    } else {
        0.0
    };
    if config.show_point_when_empty() && position.abs() < MIN_LINE_FILL {
        position = MIN_LINE_FILL;
    }

    let (x1, y1, x2, y2) = match config.chart_style() {
        ChartStyle::VerticalLine => {
            let length = position * (height - 2.0 * half_width);
            let x = match ctx.horizontal_gravity {
                HorizontalGravity::Left => half_width + inset.x,
                HorizontalGravity::Right => width - half_width - inset.x,
                HorizontalGravity::Center | HorizontalGravity::Fill => width / 2.0 + inset.x,
            };
            // Top-down unless reversed.
            let (y1, y2) = if reverse {
                (height - half_width, height - half_width - length)
            } else {
                (half_width, half_width + length)
            };
            (x, y1, x, y2)
        }
        _ => {
            let length = position * (width - 2.0 * half_width);
            let y = match ctx.vertical_gravity {
                VerticalGravity::Top => half_width + inset.y,
                VerticalGravity::Bottom => height - half_width - inset.y,
                VerticalGravity::Center | VerticalGravity::Fill => height / 2.0 + inset.y,
            };
            let (x1, x2) = if reverse {
                (width - half_width, width - half_width - length)
            } else {
                (half_width, half_width + length)
            };
            (x1, y, x2, y)
        }
    };

    let gradient = config.secondary_color().map(|secondary| {
        let (start, end) = if reverse {
            (secondary, config.color())
        } else {
            (config.color(), secondary)
        };
        let bounds = ctx.bounds;
        GradientSpec::Linear {
            x0: bounds.left,
            y0: bounds.top,
            x1: bounds.right,
            y1: bounds.bottom,
            start,
            end,
        }
    });

    LineGeometry {
        x1,
        y1,
        x2,
        y2,
        stroke_width: state.stroke_width,
        cap: config.cap_style(),
        color: state.color,
        gradient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_move_reports_end_fraction() {
        let fraction = fill_fraction(0.0, 25.0, 0.0, 50.0, 1.0, true);
        assert!((fraction - 0.5).abs() <= 1e-12);
    }

    #[test]
    fn shrink_to_zero_branch_interpolates_from_start() {
        let fraction = fill_fraction(40.0, 0.0, 0.0, 100.0, 0.25, true);
        assert!((fraction - 0.3).abs() <= 1e-12);
        assert!(fill_fraction(40.0, 0.0, 0.0, 100.0, 1.0, true).abs() <= 1e-12);
    }

    #[test]
    fn non_positional_modes_read_as_complete() {
        let fraction = fill_fraction(10.0, 30.0, 0.0, 100.0, 0.0, false);
        assert!((fraction - 0.3).abs() <= 1e-12);
    }

    #[test]
    fn negligible_moves_report_start() {
        let fraction = fill_fraction(20.0, 20.005, 0.0, 100.0, 0.0, true);
        assert!((fraction - 0.2).abs() <= 1e-12);
    }

    #[test]
    fn start_angle_depends_on_track_and_direction() {
        assert!((series_start_angle(360.0, 0.0, true) - 270.0).abs() <= 1e-12);
        assert!((series_start_angle(360.0, 90.0, true) - 0.0).abs() <= 1e-12);
        assert!((series_start_angle(300.0, 0.0, true) - 120.0).abs() <= 1e-12);
        assert!((series_start_angle(300.0, 0.0, false) - 60.0).abs() <= 1e-12);
    }
}
