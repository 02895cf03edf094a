use serde::{Deserialize, Serialize};

use crate::core::Argb;
use crate::error::{DecoError, DecoResult};

/// Optional text badge attached to a series and placed next to its arc end.
///
/// The text is a template. A `%%` anywhere switches it to percent mode, where
/// the numeric specifier receives the fill percentage (`0..=100`). Otherwise a
/// numeric specifier receives the current series value. Templates without a
/// specifier are static.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesLabel {
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_text_color")]
    pub text_color: Argb,
    #[serde(default = "default_background_color")]
    pub background_color: Argb,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_font_size() -> f64 {
    16.0
}

fn default_text_color() -> Argb {
    Argb::WHITE
}

fn default_background_color() -> Argb {
    Argb(0xAA00_0000)
}

fn default_visible() -> bool {
    true
}

impl SeriesLabel {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: default_font_size(),
            text_color: default_text_color(),
            background_color: default_background_color(),
            visible: default_visible(),
        }
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: Argb) -> Self {
        self.text_color = color;
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, color: Argb) -> Self {
        self.background_color = color;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub(crate) fn validate(&self) -> DecoResult<()> {
        if self.text.is_empty() {
            return Err(DecoError::InvalidConfig(
                "series label text must not be empty".to_owned(),
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(DecoError::InvalidConfig(
                "series label font size must be finite and > 0".to_owned(),
            ));
        }
        if format_template(&self.text, 0.0).1 {
            return Err(DecoError::InvalidConfig(format!(
                "series label width and precision must be <= {MAX_FORMAT_FIELD}"
            )));
        }
        Ok(())
    }

    /// Resolves the template for a series at `fill_fraction` holding `value`.
    #[must_use]
    pub fn display_text(&self, fill_fraction: f64, value: f64) -> String {
        if self.text.contains("%%") {
            format_template(&self.text, fill_fraction * 100.0).0
        } else if self.text.contains('%') {
            format_template(&self.text, value).0
        } else {
            self.text.clone()
        }
    }
}

/// Widest width or precision a specifier may carry.
const MAX_FORMAT_FIELD: usize = 64;

fn push_digit(field: Option<usize>, digit: u32) -> Option<usize> {
    field?
        .checked_mul(10)?
        .checked_add(digit as usize)
        .filter(|value| *value <= MAX_FORMAT_FIELD)
}

/// Returns the rendered text and whether any specifier exceeded
/// [`MAX_FORMAT_FIELD`]. Oversized specifiers are kept as literal text.
fn format_template(template: &str, number: f64) -> (String, bool) {
    let mut out = String::with_capacity(template.len() + 8);
    let mut oversized = false;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut spec = String::from("%");
        let mut width = Some(0usize);
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            spec.push(chars.next().unwrap_or('0'));
            width = push_digit(width, digit);
        }
        let mut precision = None;
        let mut precision_fits = true;
        if chars.peek() == Some(&'.') {
            spec.push(chars.next().unwrap_or('.'));
            let mut value = Some(0usize);
            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                spec.push(chars.next().unwrap_or('0'));
                value = push_digit(value, digit);
            }
            precision_fits = value.is_some();
            precision = value;
        }

        let Some(width) = width.filter(|_| precision_fits) else {
            oversized = true;
            out.push_str(&spec);
            continue;
        };

        let rendered = match chars.peek() {
            Some('f') => Some(format!("{:.*}", precision.unwrap_or(6), number)),
            Some('d') => Some(format!("{}", number.round() as i64)),
            Some('s') | Some('g') => Some(format!("{number}")),
            _ => None,
        };
        match rendered {
            Some(rendered) => {
                chars.next();
                out.push_str(&format!("{rendered:>width$}"));
            }
            None => out.push_str(&spec),
        }
    }

    (out, oversized)
}
