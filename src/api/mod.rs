mod chart;
mod chart_config;
mod chart_events;
mod chart_series;
mod label_layout;
mod layout;
mod listeners;
mod render_frame_builder;
mod snapshot;

pub use chart::DecoChart;
pub use chart_config::{ChartConfig, Padding};
pub use layout::resolve_arc_bounds;
pub use listeners::{ListenerId, SeriesListener};
pub use snapshot::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1, SeriesSnapshot,
};
