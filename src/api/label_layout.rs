use tracing::trace;

use crate::core::geometry::series_start_angle;
use crate::error::DecoResult;
use crate::extensions::{
    LabelRequest, LabelSeriesState, PlacedLabel, label_angle_fraction, labels_supported,
    place_labels,
};
use crate::render::Renderer;
use crate::scheduler::Clock;

use super::DecoChart;

pub(super) fn resolve_labels<R: Renderer, C: Clock>(
    chart: &DecoChart<R, C>,
) -> DecoResult<Vec<PlacedLabel>> {
    let states: Vec<LabelSeriesState> = chart
        .series
        .iter()
        .map(|series| LabelSeriesState {
            shown: series.is_shown(),
            clockwise: series.config().is_clockwise(),
            position_percent: series.position_percent(),
        })
        .collect();

    if !labels_supported(&states) {
        trace!("labels suppressed: a shown series runs counter-clockwise");
        return Ok(Vec::new());
    }

    let config = &chart.config;
    let origin = series_start_angle(config.total_angle, config.rotate_angle, true);
    let mut requests = Vec::new();

    for (index, series) in chart.series.iter().enumerate() {
        let Some(label) = series.config().label().filter(|label| label.visible) else {
            continue;
        };
        if !states[index].shown || series.config().chart_style().is_line() {
            continue;
        }
        let Some(angle_fraction) =
            label_angle_fraction(&states, index, config.total_angle, origin)
        else {
            continue;
        };

        requests.push(LabelRequest {
            series_index: index,
            text: label.display_text(states[index].position_percent, series.value()),
            angle_fraction,
            font_size_px: label.font_size * config.display_scale,
            text_color: label.text_color,
            background_color: label.background_color,
        });
    }

    place_labels(
        &requests,
        chart.arc_bounds,
        config.viewport,
        config.label_placement,
    )
}
