use deco_rs::api::{ChartConfig, DecoChart};
use deco_rs::core::{Argb, OperationMode, SeriesLabel, SeriesOptions, Viewport};
use deco_rs::render::NullRenderer;
use deco_rs::scheduler::{DecoEvent, EventTarget, ManualClock};

#[test]
fn chart_smoke_flow() {
    let clock = ManualClock::new(0);
    let config = ChartConfig::new(Viewport::new(400, 400));
    let mut chart =
        DecoChart::new(NullRenderer::default(), clock.clone(), config).expect("chart init");

    let track = chart
        .add_series_options(
            SeriesOptions::new(Argb::rgb(0xEE, 0xEE, 0xEE))
                .with_range(0.0, 100.0, 100.0)
                .with_initial_visibility(false),
        )
        .expect("track series");
    let progress = chart
        .add_series_options(
            SeriesOptions::new(Argb::rgb(0x40, 0x80, 0xFF))
                .with_range(0.0, 100.0, 0.0)
                .with_label(SeriesLabel::new("%.0f%%")),
        )
        .expect("progress series");
    assert_eq!((track, progress), (0, 1));

    chart
        .add_event(DecoEvent::show(EventTarget::Series(track)).with_duration(500))
        .expect("show event");
    chart
        .add_event(
            DecoEvent::move_to(progress, 60.0)
                .with_delay(500)
                .with_duration(1000),
        )
        .expect("move event");
    assert_eq!(chart.pending_events(), 2);
    assert_eq!(chart.next_event_due_ms(), Some(0));

    chart.tick().expect("tick at 0");
    assert_eq!(chart.series(track).expect("track").mode(), OperationMode::Show);
    assert!(chart.series(track).expect("track").is_visible());

    clock.set(2000);
    assert!(chart.tick().expect("tick at 2000"));
    assert!(!chart.is_animating());
    let moved = chart.series(progress).expect("progress");
    assert!((moved.value() - 60.0).abs() <= 1e-9);
    assert!((moved.fill_fraction() - 0.6).abs() <= 1e-9);

    chart.render().expect("render should succeed");
    let renderer = chart.into_renderer();
    assert_eq!(renderer.render_count, 1);
    let frame = renderer.last_frame.expect("rendered frame");
    assert_eq!(frame.arcs.len(), 2);
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, "60%");
}

#[test]
fn new_chart_reports_its_layout() {
    let chart = DecoChart::new(
        NullRenderer::default(),
        ManualClock::new(10),
        ChartConfig::new(Viewport::new(600, 400)),
    )
    .expect("chart init");

    assert_eq!(chart.series_count(), 0);
    assert_eq!(chart.now_ms(), 10);
    assert_eq!(chart.viewport(), Viewport::new(600, 400));
    let bounds = chart.arc_bounds();
    assert_eq!(bounds.width(), 400.0);
    assert_eq!(bounds.height(), 400.0);
    assert_eq!(bounds.center_x(), 300.0);
    assert!(chart.redraw_pending());
    assert!(!chart.is_animating());
}

#[test]
fn arc_bounds_follow_the_widest_series() {
    let mut chart = DecoChart::new(
        NullRenderer::default(),
        ManualClock::new(0),
        ChartConfig::new(Viewport::new(200, 200)).with_default_line_width(10.0),
    )
    .expect("chart init");

    chart
        .add_series_options(SeriesOptions::new(Argb::BLACK))
        .expect("default width series");
    assert_eq!(chart.arc_bounds().left, 5.0);

    chart
        .add_series_options(SeriesOptions::new(Argb::BLACK).with_line_width(40.0))
        .expect("wide series");
    assert_eq!(chart.arc_bounds().left, 20.0);
    assert_eq!(chart.arc_bounds().right, 180.0);

    chart.clear();
    assert_eq!(chart.series_count(), 0);
    assert_eq!(chart.arc_bounds().left, 0.0);
}
