use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Argb, Rect};
use crate::error::{DecoError, DecoResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> DecoResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DecoError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl From<Argb> for Color {
    fn from(value: Argb) -> Self {
        Self::rgba(
            f64::from(value.red()) / 255.0,
            f64::from(value.green()) / 255.0,
            f64::from(value.blue()) / 255.0,
            f64::from(value.alpha()) / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    Round,
    Butt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaintStyle {
    Stroke,
    Fill,
    FillAndStroke,
}

/// Shader attached to a stroke instead of its flat color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gradient {
    /// Angular gradient around a center; `rotation_deg` turns the color origin.
    Sweep {
        center_x: f64,
        center_y: f64,
        colors: SmallVec<[Color; 3]>,
        positions: SmallVec<[f64; 3]>,
        rotation_deg: f64,
    },
    Linear {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        start: Color,
        end: Color,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipOp {
    /// Draw only inside the oval.
    Intersect,
    /// Draw only outside the oval.
    Difference,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvalClip {
    pub bounds: Rect,
    pub op: ClipOp,
}

/// Draw command for an arc (or pie wedge) inscribed in `bounds`.
///
/// Angles are degrees, 0 at 3 o'clock, growing clockwise. A negative sweep
/// draws counter-clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcPrimitive {
    pub bounds: Rect,
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub use_center: bool,
    pub style: PaintStyle,
    pub stroke_width: f64,
    pub cap: LineCap,
    pub color: Color,
    pub gradient: Option<Gradient>,
    pub clip: Option<OvalClip>,
}

impl ArcPrimitive {
    #[must_use]
    pub fn new(
        bounds: Rect,
        start_angle: f64,
        sweep_angle: f64,
        stroke_width: f64,
        color: Color,
    ) -> Self {
        Self {
            bounds,
            start_angle,
            sweep_angle,
            use_center: false,
            style: PaintStyle::Stroke,
            stroke_width,
            cap: LineCap::Round,
            color,
            gradient: None,
            clip: None,
        }
    }

    pub fn validate(&self) -> DecoResult<()> {
        if !self.bounds.is_finite() {
            return Err(DecoError::InvalidData(
                "arc bounds must be finite".to_owned(),
            ));
        }
        if !self.start_angle.is_finite() || !self.sweep_angle.is_finite() {
            return Err(DecoError::InvalidData(
                "arc angles must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(DecoError::InvalidData(
                "arc stroke width must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(clip) = self.clip {
            if !clip.bounds.is_finite() {
                return Err(DecoError::InvalidData(
                    "arc clip bounds must be finite".to_owned(),
                ));
            }
        }
        self.color.validate()
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub cap: LineCap,
    pub gradient: Option<Gradient>,
}

impl LinePrimitive {
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            cap: LineCap::Round,
            gradient: None,
        }
    }

    #[must_use]
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn validate(&self) -> DecoResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(DecoError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(DecoError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextVAlign {
    Baseline,
    Middle,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            v_align: TextVAlign::Baseline,
        }
    }

    #[must_use]
    pub fn with_v_align(mut self, v_align: TextVAlign) -> Self {
        self.v_align = v_align;
        self
    }

    pub fn validate(&self) -> DecoResult<()> {
        if self.text.is_empty() {
            return Err(DecoError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(DecoError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(DecoError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Filled rectangle with optional rounded corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub corner_radius: f64,
    pub color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(rect: Rect, corner_radius: f64, color: Color) -> Self {
        Self {
            rect,
            corner_radius,
            color,
        }
    }

    pub fn validate(self) -> DecoResult<()> {
        if !self.rect.is_finite() || self.rect.is_empty() {
            return Err(DecoError::InvalidData(
                "rect must be finite and non-empty".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(DecoError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
