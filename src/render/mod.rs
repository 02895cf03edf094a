mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    ArcPrimitive, ClipOp, Color, Gradient, LineCap, LinePrimitive, OvalClip, PaintStyle,
    RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};

use crate::error::DecoResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from series state and event scheduling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> DecoResult<()>;
}
