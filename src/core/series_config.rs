use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Argb, Easing, Inset, SeriesLabel};
use crate::error::{DecoError, DecoResult};

/// Shape used to draw a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartStyle {
    /// Stroked arc with a hole in the middle.
    #[default]
    Donut,
    /// Filled wedge drawn from the center point.
    Pie,
    HorizontalLine,
    VerticalLine,
}

impl ChartStyle {
    #[must_use]
    pub const fn is_line(self) -> bool {
        matches!(self, Self::HorizontalLine | Self::VerticalLine)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapStyle {
    #[default]
    Round,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeType {
    Inner,
    Outer,
}

/// Colored band drawn over the inner or outer part of a series stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeDetail {
    pub edge_type: EdgeType,
    pub color: Argb,
    /// Portion of the stroke width covered by the band, in `0..=1`.
    pub ratio: f64,
}

impl EdgeDetail {
    pub fn new(edge_type: EdgeType, color: Argb, ratio: f64) -> DecoResult<Self> {
        let detail = Self {
            edge_type,
            color,
            ratio,
        };
        detail.validate()?;
        Ok(detail)
    }

    fn validate(self) -> DecoResult<()> {
        if !self.ratio.is_finite() || !(0.0..=1.0).contains(&self.ratio) {
            return Err(DecoError::InvalidConfig(format!(
                "edge detail ratio must be in [0, 1], got {}",
                self.ratio
            )));
        }
        Ok(())
    }
}

/// Unvalidated option bag for one series.
///
/// Serializable so hosts can keep chart definitions in data files. Turn it
/// into a [`SeriesConfig`] with [`SeriesConfig::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    pub color: Argb,
    pub secondary_color: Option<Argb>,
    /// `None` uses the chart default line width.
    pub line_width: Option<f64>,
    pub min_value: f64,
    pub max_value: f64,
    pub initial_value: f64,
    pub initially_visible: bool,
    pub spin_direction: SpinDirection,
    pub cap_style: CapStyle,
    pub draw_as_point: bool,
    pub chart_style: ChartStyle,
    /// Time for a move across the full range when an event does not set a duration.
    pub spin_duration_ms: u64,
    pub show_point_when_empty: bool,
    pub inset: Inset,
    pub edge_details: Vec<EdgeDetail>,
    pub label: Option<SeriesLabel>,
    #[serde(skip)]
    pub easing: Option<Easing>,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            color: Argb::default(),
            secondary_color: None,
            line_width: None,
            min_value: 0.0,
            max_value: 100.0,
            initial_value: 0.0,
            initially_visible: true,
            spin_direction: SpinDirection::Clockwise,
            cap_style: CapStyle::Round,
            draw_as_point: false,
            chart_style: ChartStyle::Donut,
            spin_duration_ms: 5000,
            show_point_when_empty: true,
            inset: Inset::default(),
            edge_details: Vec::new(),
            label: None,
            easing: None,
        }
    }
}

impl SeriesOptions {
    #[must_use]
    pub fn new(color: Argb) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_secondary_color(mut self, color: Argb) -> Self {
        self.secondary_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    #[must_use]
    pub fn with_range(mut self, min_value: f64, max_value: f64, initial_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self.initial_value = initial_value;
        self
    }

    #[must_use]
    pub fn with_initial_visibility(mut self, visible: bool) -> Self {
        self.initially_visible = visible;
        self
    }

    #[must_use]
    pub fn with_spin_direction(mut self, direction: SpinDirection) -> Self {
        self.spin_direction = direction;
        self
    }

    #[must_use]
    pub fn with_cap_style(mut self, cap_style: CapStyle) -> Self {
        self.cap_style = cap_style;
        self
    }

    #[must_use]
    pub fn with_draw_as_point(mut self, draw_as_point: bool) -> Self {
        self.draw_as_point = draw_as_point;
        self
    }

    #[must_use]
    pub fn with_chart_style(mut self, chart_style: ChartStyle) -> Self {
        self.chart_style = chart_style;
        self
    }

    #[must_use]
    pub fn with_spin_duration_ms(mut self, spin_duration_ms: u64) -> Self {
        self.spin_duration_ms = spin_duration_ms;
        self
    }

    #[must_use]
    pub fn with_show_point_when_empty(mut self, show: bool) -> Self {
        self.show_point_when_empty = show;
        self
    }

    #[must_use]
    pub fn with_inset(mut self, inset: Inset) -> Self {
        self.inset = inset;
        self
    }

    #[must_use]
    pub fn with_edge_detail(mut self, edge_detail: EdgeDetail) -> Self {
        self.edge_details.push(edge_detail);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: SeriesLabel) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }
}

/// Validated, immutable configuration of one series.
#[derive(Debug, Clone)]
pub struct SeriesConfig {
    options: SeriesOptions,
}

impl SeriesConfig {
    /// Validates `options` once. Invalid ranges are rejected, never clamped.
    pub fn new(options: SeriesOptions) -> DecoResult<Self> {
        let SeriesOptions {
            min_value,
            max_value,
            initial_value,
            ..
        } = options;

        for (name, value) in [
            ("min_value", min_value),
            ("max_value", max_value),
            ("initial_value", initial_value),
        ] {
            if !value.is_finite() {
                return Err(DecoError::InvalidConfig(format!(
                    "series `{name}` must be finite"
                )));
            }
        }
        if min_value >= max_value {
            return Err(DecoError::InvalidConfig(format!(
                "series minimum value must be less than maximum value (min={min_value}, max={max_value})"
            )));
        }
        if initial_value < min_value || initial_value > max_value {
            return Err(DecoError::InvalidConfig(format!(
                "series initial value {initial_value} must be within [{min_value}, {max_value}]"
            )));
        }
        if let Some(width) = options.line_width {
            if !width.is_finite() || width < 0.0 {
                return Err(DecoError::InvalidConfig(
                    "series line width must be finite and >= 0".to_owned(),
                ));
            }
        }
        if options.spin_duration_ms <= 100 {
            return Err(DecoError::InvalidConfig(format!(
                "series spin duration must be > 100 ms, got {}",
                options.spin_duration_ms
            )));
        }
        if !options.inset.x.is_finite() || !options.inset.y.is_finite() {
            return Err(DecoError::InvalidConfig(
                "series inset must be finite".to_owned(),
            ));
        }
        for edge in &options.edge_details {
            edge.validate()?;
            if options.chart_style == ChartStyle::Pie && edge.edge_type == EdgeType::Inner {
                warn!("inner edge detail has no effect on a pie series and is skipped");
            }
        }
        if let Some(label) = &options.label {
            label.validate()?;
        }

        Ok(Self { options })
    }

    #[must_use]
    pub fn color(&self) -> Argb {
        self.options.color
    }

    /// Gradient partner; a fully transparent secondary color counts as absent.
    #[must_use]
    pub fn secondary_color(&self) -> Option<Argb> {
        self.options
            .secondary_color
            .filter(|color| !color.is_transparent())
    }

    #[must_use]
    pub fn line_width(&self) -> Option<f64> {
        self.options.line_width
    }

    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.options.min_value
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.options.max_value
    }

    #[must_use]
    pub fn range(&self) -> f64 {
        self.options.max_value - self.options.min_value
    }

    #[must_use]
    pub fn initial_value(&self) -> f64 {
        self.options.initial_value
    }

    #[must_use]
    pub fn initially_visible(&self) -> bool {
        self.options.initially_visible
    }

    #[must_use]
    pub fn spin_direction(&self) -> SpinDirection {
        self.options.spin_direction
    }

    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.options.spin_direction == SpinDirection::Clockwise
    }

    #[must_use]
    pub fn cap_style(&self) -> CapStyle {
        self.options.cap_style
    }

    #[must_use]
    pub fn draw_as_point(&self) -> bool {
        self.options.draw_as_point
    }

    #[must_use]
    pub fn chart_style(&self) -> ChartStyle {
        self.options.chart_style
    }

    #[must_use]
    pub fn spin_duration_ms(&self) -> u64 {
        self.options.spin_duration_ms
    }

    #[must_use]
    pub fn show_point_when_empty(&self) -> bool {
        self.options.show_point_when_empty
    }

    #[must_use]
    pub fn inset(&self) -> Inset {
        self.options.inset
    }

    #[must_use]
    pub fn edge_details(&self) -> &[EdgeDetail] {
        &self.options.edge_details
    }

    #[must_use]
    pub fn label(&self) -> Option<&SeriesLabel> {
        self.options.label.as_ref()
    }

    #[must_use]
    pub fn easing(&self) -> Option<&Easing> {
        self.options.easing.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> &SeriesOptions {
        &self.options
    }
}

impl TryFrom<SeriesOptions> for SeriesConfig {
    type Error = DecoError;

    fn try_from(options: SeriesOptions) -> DecoResult<Self> {
        Self::new(options)
    }
}
