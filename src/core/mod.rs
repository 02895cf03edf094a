pub mod color;
pub mod easing;
pub mod effect;
pub mod geometry;
pub mod label;
pub mod series;
pub mod series_config;
pub mod types;

pub use color::{Argb, ChannelMask, ColorAnimate, ColorChannel};
pub use easing::Easing;
pub use effect::{EffectArc, EffectFrame, EffectKind, EffectLine, EffectParams, EffectText, render_effect};
pub use geometry::{
    ArcGeometry, EdgeArc, EdgeClip, GeometryContext, GradientSpec, LineGeometry, SeriesGeometry,
};
pub use label::SeriesLabel;
pub use series::{OperationMode, SeriesNotice, SeriesRuntime};
pub use series_config::{
    CapStyle, ChartStyle, EdgeDetail, EdgeType, SeriesConfig, SeriesOptions, SpinDirection,
};
pub use types::{HorizontalGravity, Inset, Rect, VerticalGravity, Viewport};
