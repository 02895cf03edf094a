use serde::{Deserialize, Serialize};

use crate::core::{HorizontalGravity, VerticalGravity, Viewport};
use crate::error::{DecoError, DecoResult};
use crate::extensions::LabelPlacementConfig;

/// Extra space kept between the viewport edge and the arc bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Padding {
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    fn is_valid(self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .into_iter()
            .all(|value| value.is_finite() && value >= 0.0)
    }
}

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can persist chart setup next to their own state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub viewport: Viewport,
    /// Degrees covered by a full track, in `(0, 360]`.
    #[serde(default = "default_total_angle")]
    pub total_angle: f64,
    /// Extra rotation of the track origin, in `[0, 360]`.
    #[serde(default)]
    pub rotate_angle: f64,
    /// Line width for series that do not set one.
    #[serde(default = "default_line_width")]
    pub default_line_width: f64,
    /// Pixel density applied to label font sizes.
    #[serde(default = "default_display_scale")]
    pub display_scale: f64,
    #[serde(default)]
    pub vertical_gravity: VerticalGravity,
    #[serde(default)]
    pub horizontal_gravity: HorizontalGravity,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub label_placement: LabelPlacementConfig,
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            total_angle: default_total_angle(),
            rotate_angle: 0.0,
            default_line_width: default_line_width(),
            display_scale: default_display_scale(),
            vertical_gravity: VerticalGravity::default(),
            horizontal_gravity: HorizontalGravity::default(),
            padding: Padding::default(),
            label_placement: LabelPlacementConfig::default(),
        }
    }

    #[must_use]
    pub fn with_angles(mut self, total_angle: f64, rotate_angle: f64) -> Self {
        self.total_angle = total_angle;
        self.rotate_angle = rotate_angle;
        self
    }

    #[must_use]
    pub fn with_default_line_width(mut self, line_width: f64) -> Self {
        self.default_line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f64) -> Self {
        self.display_scale = display_scale;
        self
    }

    #[must_use]
    pub fn with_gravity(mut self, vertical: VerticalGravity, horizontal: HorizontalGravity) -> Self {
        self.vertical_gravity = vertical;
        self.horizontal_gravity = horizontal;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_label_placement(mut self, label_placement: LabelPlacementConfig) -> Self {
        self.label_placement = label_placement;
        self
    }

    pub fn validate(&self) -> DecoResult<()> {
        if !self.viewport.is_valid() {
            return Err(DecoError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        validate_angles(self.total_angle, self.rotate_angle)?;
        if !self.default_line_width.is_finite() || self.default_line_width < 0.0 {
            return Err(DecoError::InvalidConfig(
                "default line width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.display_scale.is_finite() || self.display_scale <= 0.0 {
            return Err(DecoError::InvalidConfig(
                "display scale must be finite and > 0".to_owned(),
            ));
        }
        if !self.padding.is_valid() {
            return Err(DecoError::InvalidConfig(
                "padding must be finite and >= 0".to_owned(),
            ));
        }
        self.label_placement.validate()?;
        Ok(())
    }
}

pub(super) fn validate_angles(total_angle: f64, rotate_angle: f64) -> DecoResult<()> {
    if !total_angle.is_finite() || total_angle <= 0.0 || total_angle > 360.0 {
        return Err(DecoError::InvalidConfig(format!(
            "total angle must be in (0, 360], got {total_angle}"
        )));
    }
    if !rotate_angle.is_finite() || !(0.0..=360.0).contains(&rotate_angle) {
        return Err(DecoError::InvalidConfig(format!(
            "rotate angle must be in [0, 360], got {rotate_angle}"
        )));
    }
    Ok(())
}

fn default_total_angle() -> f64 {
    360.0
}

fn default_line_width() -> f64 {
    30.0
}

fn default_display_scale() -> f64 {
    1.0
}
