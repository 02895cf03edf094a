use deco_rs::api::{ChartConfig, DecoChart};
use deco_rs::core::{
    Argb, ChartStyle, Rect, SeriesLabel, SeriesOptions, SpinDirection, Viewport,
};
use deco_rs::extensions::{LabelPlacementConfig, LabelRequest, place_labels};
use deco_rs::render::NullRenderer;
use deco_rs::scheduler::{DecoEvent, EventTarget, ManualClock};

fn labeled_chart(config: ChartConfig) -> DecoChart<NullRenderer, ManualClock> {
    DecoChart::new(NullRenderer::default(), ManualClock::new(0), config).expect("chart init")
}

fn labeled(value: f64, text: &str) -> SeriesOptions {
    SeriesOptions::new(Argb::rgb(30, 144, 255))
        .with_range(0.0, 100.0, value)
        .with_label(SeriesLabel::new(text))
}

#[test]
fn labels_track_uncovered_part_of_each_series() {
    let mut chart = labeled_chart(ChartConfig::new(Viewport::new(400, 400)));
    chart.add_series_options(labeled(80.0, "%.0f%%")).expect("outer");
    chart.add_series_options(labeled(40.0, "%.0f%%")).expect("inner");

    let labels = chart.label_placements().expect("labels");
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].series_index, 0);
    assert_eq!(labels[0].text, "80%");
    assert_eq!(labels[1].text, "40%");

    // 60% of a turn from 12 o'clock.
    assert!(labels[0].center_x < 200.0);
    assert!(labels[0].center_y > 200.0);
    for label in &labels {
        assert!(label.rect.left >= 0.0 && label.rect.right <= 400.0);
        assert!(label.rect.top >= 0.0 && label.rect.bottom <= 400.0);
    }
}

#[test]
fn covered_series_gets_no_label() {
    let mut chart = labeled_chart(ChartConfig::new(Viewport::new(400, 400)));
    chart.add_series_options(labeled(30.0, "low")).expect("covered");
    chart.add_series_options(labeled(70.0, "high")).expect("cover");

    let labels = chart.label_placements().expect("labels");
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].text, "high");
}

#[test]
fn counter_clockwise_series_suppresses_all_labels() {
    let mut chart = labeled_chart(ChartConfig::new(Viewport::new(400, 400)));
    chart.add_series_options(labeled(80.0, "cw")).expect("cw");
    chart
        .add_series_options(
            labeled(20.0, "ccw").with_spin_direction(SpinDirection::CounterClockwise),
        )
        .expect("ccw");
    assert!(chart.label_placements().expect("labels").is_empty());

    let mut hidden_ccw = labeled_chart(ChartConfig::new(Viewport::new(400, 400)));
    hidden_ccw.add_series_options(labeled(80.0, "cw")).expect("cw");
    hidden_ccw
        .add_series_options(
            labeled(20.0, "ccw")
                .with_spin_direction(SpinDirection::CounterClockwise)
                .with_initial_visibility(false),
        )
        .expect("hidden ccw");
    assert_eq!(hidden_ccw.label_placements().expect("labels").len(), 1);
}

#[test]
fn line_and_hidden_series_have_no_label() {
    let mut chart = labeled_chart(ChartConfig::new(Viewport::new(400, 400)));
    chart
        .add_series_options(labeled(50.0, "line").with_chart_style(ChartStyle::HorizontalLine))
        .expect("line");
    chart
        .add_series_options(labeled(50.0, "hidden").with_initial_visibility(false))
        .expect("hidden");
    assert!(chart.label_placements().expect("labels").is_empty());
}

#[test]
fn labels_follow_value_and_visibility_changes() {
    let clock = ManualClock::new(0);
    let mut chart = DecoChart::new(
        NullRenderer::default(),
        clock.clone(),
        ChartConfig::new(Viewport::new(400, 400)),
    )
    .expect("chart init");
    chart.add_series_options(labeled(0.0, "%.0f%%")).expect("series");
    assert!(chart.label_placements().expect("labels").is_empty());

    chart.move_to_now(0, 25.0).expect("move");
    assert_eq!(chart.label_placements().expect("labels")[0].text, "25%");

    chart
        .add_event(DecoEvent::hide(EventTarget::All).with_duration(100))
        .expect("hide");
    clock.set(100);
    chart.tick().expect("tick");
    assert!(chart.label_placements().expect("labels").is_empty());
}

#[test]
fn display_scale_enlarges_label_font() {
    let mut chart =
        labeled_chart(ChartConfig::new(Viewport::new(400, 400)).with_display_scale(2.0));
    chart.add_series_options(labeled(50.0, "x")).expect("series");
    let labels = chart.label_placements().expect("labels");
    assert_eq!(labels[0].font_size_px, 32.0);
}

#[test]
fn rendered_labels_sit_above_the_arcs() {
    let mut chart = labeled_chart(ChartConfig::new(Viewport::new(400, 400)));
    chart.add_series_options(labeled(60.0, "%.0f%%")).expect("series");
    chart.render().expect("render");

    let frame = chart
        .renderer()
        .last_frame
        .clone()
        .expect("rendered frame");
    assert_eq!(frame.rects.len(), 1);
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, "60%");
    assert_eq!(frame.rects[0].corner_radius, 10.0);
}

#[test]
fn colliding_boxes_are_pushed_below() {
    let request = |index: usize| LabelRequest {
        series_index: index,
        text: "same spot".to_owned(),
        angle_fraction: 0.25,
        font_size_px: 16.0,
        text_color: Argb::WHITE,
        background_color: Argb::BLACK,
    };
    let bounds = Rect::new(0.0, 0.0, 400.0, 400.0);
    let placed = place_labels(
        &[request(0), request(1)],
        bounds,
        Viewport::new(400, 400),
        LabelPlacementConfig::default(),
    )
    .expect("placed labels");

    assert!(!placed[0].shifted);
    assert!(placed[1].shifted);
    assert!(placed[1].rect.top >= placed[0].rect.bottom);
    assert!(!placed[1].rect.intersects(placed[0].rect));
}

#[test]
fn invalid_placement_config_is_rejected() {
    let config = LabelPlacementConfig {
        char_width_ratio: 0.0,
        ..LabelPlacementConfig::default()
    };
    let result = place_labels(
        &[],
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Viewport::new(10, 10),
        config,
    );
    assert!(result.is_err());
}
