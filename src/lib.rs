//! deco-rs: animated arc, pie and line series driven by scheduled events.
//!
//! The crate computes what to draw and when; hosts provide the clock, the
//! redraw/wake-up hooks and a [`render::Renderer`] that turns
//! [`render::RenderFrame`]s into pixels.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod scheduler;
pub mod telemetry;

pub use api::{ChartConfig, DecoChart, SeriesListener};
pub use error::{DecoError, DecoResult};
pub use scheduler::{DecoEvent, EventListener, EventTarget};
