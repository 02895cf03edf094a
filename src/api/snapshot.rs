use serde::{Deserialize, Serialize};

use crate::core::{Argb, OperationMode, Rect, SeriesRuntime, Viewport};
use crate::error::{DecoError, DecoResult};
use crate::render::Renderer;
use crate::scheduler::Clock;

use super::DecoChart;

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub index: usize,
    pub value: f64,
    pub fill_fraction: f64,
    pub position_percent: f64,
    pub mode: OperationMode,
    pub progress: f64,
    pub visible: bool,
    pub paused: bool,
    pub animating: bool,
    pub color: Argb,
}

impl SeriesSnapshot {
    fn capture(index: usize, series: &SeriesRuntime) -> Self {
        Self {
            index,
            value: series.value(),
            fill_fraction: series.fill_fraction(),
            position_percent: series.position_percent(),
            mode: series.mode(),
            progress: series.progress(),
            visible: series.is_visible(),
            paused: series.is_paused(),
            animating: series.is_animating(),
            color: series.draw_color(),
        }
    }
}

/// Serializable view of the chart used for debugging and regression tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub now_ms: u64,
    pub viewport: Viewport,
    pub arc_bounds: Rect,
    pub total_angle: f64,
    pub rotate_angle: f64,
    pub pending_events: usize,
    pub next_event_due_ms: Option<u64>,
    pub series: Vec<SeriesSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> DecoResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DecoError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_contract_v1_str(input: &str) -> DecoResult<Self> {
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DecoError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(DecoError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer, C: Clock> DecoChart<R, C> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            now_ms: self.clock.now_ms(),
            viewport: self.config.viewport,
            arc_bounds: self.arc_bounds,
            total_angle: self.config.total_angle,
            rotate_angle: self.config.rotate_angle,
            pending_events: self.scheduler.len(),
            next_event_due_ms: self.scheduler.next_due_ms(),
            series: self
                .series
                .iter()
                .enumerate()
                .map(|(index, series)| SeriesSnapshot::capture(index, series))
                .collect(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> DecoResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
