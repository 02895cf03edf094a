use std::cell::Cell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use deco_rs::api::{ChartConfig, DecoChart};
use deco_rs::core::{
    Argb, EffectKind, EffectParams, OperationMode, Rect, SeriesOptions, Viewport, render_effect,
};
use deco_rs::render::{NullRenderer, PaintStyle};
use deco_rs::scheduler::{DecoEvent, EventListener, ManualClock};

fn params(kind: EffectKind, progress: f64) -> EffectParams<'static> {
    EffectParams {
        kind,
        progress,
        bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
        start_angle: 270.0,
        sweep_angle: 360.0,
        rotations: 2,
        text: None,
        color: Argb::rgb(0, 128, 255),
        line_width: 30.0,
    }
}

#[derive(Default)]
struct Counter {
    starts: Cell<usize>,
    ends: Cell<usize>,
}

impl EventListener for Counter {
    fn on_event_start(&self, _event: &DecoEvent) {
        self.starts.set(self.starts.get() + 1);
    }

    fn on_event_end(&self, _event: &DecoEvent) {
        self.ends.set(self.ends.get() + 1);
    }
}

fn effect_chart(clock: &ManualClock, series: usize) -> DecoChart<NullRenderer, ManualClock> {
    let mut chart = DecoChart::new(
        NullRenderer::default(),
        clock.clone(),
        ChartConfig::new(Viewport::new(400, 400)),
    )
    .expect("chart init");
    for _ in 0..series {
        chart
            .add_series_options(
                SeriesOptions::new(Argb::rgb(200, 40, 40))
                    .with_range(0.0, 100.0, 60.0)
                    .with_initial_visibility(false),
            )
            .expect("series");
    }
    chart
}

#[test]
fn spiral_in_contracts_towards_center() {
    let start = render_effect(&params(EffectKind::SpiralIn, 0.0))
        .arc
        .expect("arc at start");
    assert_eq!(start.bounds, Rect::new(0.0, 0.0, 200.0, 200.0));
    assert!(!start.full_stroke);

    let end = render_effect(&params(EffectKind::SpiralIn, 1.0))
        .arc
        .expect("arc at end");
    assert_eq!(end.bounds, Rect::new(90.0, 90.0, 110.0, 110.0));
}

#[test]
fn spiral_out_expands_to_track() {
    let start = render_effect(&params(EffectKind::SpiralOut, 0.0))
        .arc
        .expect("arc at start");
    assert_eq!(start.bounds, Rect::new(90.0, 90.0, 110.0, 110.0));

    let end = render_effect(&params(EffectKind::SpiralOut, 1.0))
        .arc
        .expect("arc at end");
    assert_eq!(end.bounds, Rect::new(0.0, 0.0, 200.0, 200.0));
}

#[test]
fn spiral_direction_depends_on_kind() {
    let inward = render_effect(&params(EffectKind::SpiralIn, 0.125))
        .arc
        .expect("inward arc");
    let outward = render_effect(&params(EffectKind::SpiralOut, 0.125))
        .arc
        .expect("outward arc");

    assert_abs_diff_eq!(inward.start_angle, 180.0, epsilon = 1e-9);
    assert_abs_diff_eq!(outward.start_angle, 0.0, epsilon = 1e-9);
}

#[test]
fn spiral_out_fill_strokes_track_in_last_turn() {
    let turning = render_effect(&params(EffectKind::SpiralOutFill, 0.5))
        .arc
        .expect("turning arc");
    assert!(!turning.full_stroke);
    assert_abs_diff_eq!(turning.bounds.left, 22.5, epsilon = 1e-9);
    assert_abs_diff_eq!(turning.bounds.right, 177.5, epsilon = 1e-9);

    let filling = render_effect(&params(EffectKind::SpiralOutFill, 0.9))
        .arc
        .expect("filling arc");
    assert!(filling.full_stroke);
    assert_eq!(filling.start_angle, 270.0);
    assert_abs_diff_eq!(filling.sweep_angle, 252.0, epsilon = 1e-9);
    assert_eq!(filling.bounds, Rect::new(0.0, 0.0, 200.0, 200.0));
}

#[test]
fn explode_lines_move_outwards() {
    let frame = render_effect(&params(EffectKind::Explode, 0.25));
    assert!(frame.arc.is_none());
    assert_eq!(frame.lines.len(), 9);

    let first = frame.lines[0];
    assert_abs_diff_eq!(first.x1, 129.0, epsilon = 1e-9);
    assert_abs_diff_eq!(first.x2, 140.0, epsilon = 1e-9);
    assert_abs_diff_eq!(first.y1, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(first.stroke_width, 19.8, epsilon = 1e-9);
    assert_eq!(first.color, Argb::rgb(0, 128, 255));

    let lengths: Vec<f64> = frame
        .lines
        .iter()
        .map(|line| (line.x2 - line.x1).hypot(line.y2 - line.y1))
        .collect();
    assert!(lengths.iter().all(|length| (length - 11.0).abs() <= 1e-9));
}

#[test]
fn explode_text_grows_then_fades() {
    let mut with_text = params(EffectKind::Explode, 0.5);
    with_text.text = Some("Goal!");
    let text = render_effect(&with_text).text.expect("text at midpoint");
    assert_eq!(text.text, "Goal!");
    assert_abs_diff_eq!(text.font_size, 50.0, epsilon = 1e-9);
    assert_eq!(text.color.alpha(), 255);
    assert_eq!((text.center_x, text.center_y), (100.0, 100.0));

    with_text.progress = 0.85;
    let fading = render_effect(&with_text).text.expect("fading text");
    assert_eq!(fading.color.alpha(), 128);

    with_text.text = Some("");
    assert!(render_effect(&with_text).text.is_none());
    assert!(render_effect(&params(EffectKind::Explode, 0.5)).text.is_none());
}

#[test]
fn spiral_explode_switches_at_sixty_percent() {
    let spiral = render_effect(&params(EffectKind::SpiralExplode, 0.3));
    assert!(spiral.arc.is_some());
    assert!(spiral.lines.is_empty());

    let mut late = params(EffectKind::SpiralExplode, 0.8);
    late.text = Some("x");
    let explode = render_effect(&late);
    assert!(explode.arc.is_none());
    assert_eq!(explode.lines.len(), 9);
    let text = explode.text.expect("text");
    assert_abs_diff_eq!(text.font_size, 50.0, epsilon = 1e-9);
}

#[test]
fn non_finite_progress_draws_the_first_frame() {
    let broken = render_effect(&params(EffectKind::SpiralIn, f64::NAN));
    let first = render_effect(&params(EffectKind::SpiralIn, 0.0));
    assert_eq!(broken, first);
}

#[test]
fn spiral_out_leaves_series_visible() {
    let clock = ManualClock::new(0);
    let mut chart = effect_chart(&clock, 1);
    let counter = Rc::new(Counter::default());

    chart
        .add_event(
            DecoEvent::effect(0, EffectKind::SpiralOut)
                .with_duration(1000)
                .with_listener(counter.clone()),
        )
        .expect("effect event");
    chart.tick().expect("tick at 0");
    clock.set(500);
    chart.tick().expect("tick at 500");

    assert_eq!(chart.series(0).expect("series").mode(), OperationMode::Effect);
    let frame = chart.build_render_frame().expect("effect frame");
    assert_eq!(frame.arcs.len(), 1);
    assert_eq!(frame.arcs[0].style, PaintStyle::FillAndStroke);

    clock.set(1000);
    chart.tick().expect("tick at 1000");
    let series = chart.series(0).expect("series");
    assert_eq!(series.mode(), OperationMode::Move);
    assert!(series.is_visible());
    assert_eq!(series.value(), 60.0);
    assert_eq!((counter.starts.get(), counter.ends.get()), (1, 1));
}

#[test]
fn explode_hides_series_when_done() {
    let clock = ManualClock::new(0);
    let mut chart = effect_chart(&clock, 1);

    chart
        .add_event(
            DecoEvent::effect(0, EffectKind::Explode)
                .with_duration(800)
                .with_display_text("100%"),
        )
        .expect("effect event");
    chart.tick().expect("tick at 0");
    clock.set(400);
    chart.tick().expect("tick at 400");

    let frame = chart.build_render_frame().expect("explode frame");
    assert_eq!(frame.lines.len(), 9);
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, "100%");

    clock.set(800);
    chart.tick().expect("tick at 800");
    assert!(!chart.series(0).expect("series").is_visible());
    let frame = chart.build_render_frame().expect("final frame");
    assert!(frame.is_empty());
}

#[test]
fn spiral_explode_hides_other_series_silently() {
    let clock = ManualClock::new(0);
    let mut chart = effect_chart(&clock, 3);
    let counter = Rc::new(Counter::default());

    chart
        .add_event(
            DecoEvent::effect(1, EffectKind::SpiralExplode)
                .with_duration(1000)
                .with_listener(counter.clone()),
        )
        .expect("effect event");
    chart.tick().expect("tick at 0");

    assert_eq!(chart.series(0).expect("series").mode(), OperationMode::Hide);
    assert_eq!(chart.series(1).expect("series").mode(), OperationMode::Effect);
    assert_eq!(chart.series(2).expect("series").mode(), OperationMode::Hide);

    clock.set(1000);
    chart.tick().expect("tick at 1000");
    assert_eq!((counter.starts.get(), counter.ends.get()), (1, 1));
    for index in 0..3 {
        assert!(!chart.series(index).expect("series").is_shown());
    }
}

#[test]
fn new_move_interrupts_an_effect() {
    let clock = ManualClock::new(0);
    let mut chart = effect_chart(&clock, 1);
    let counter = Rc::new(Counter::default());

    chart
        .add_event(
            DecoEvent::effect(0, EffectKind::SpiralIn)
                .with_duration(1000)
                .with_listener(counter.clone()),
        )
        .expect("effect event");
    chart
        .add_event(DecoEvent::move_to(0, 10.0).with_delay(300).with_duration(0))
        .expect("move event");

    clock.set(300);
    chart.tick().expect("tick at 300");
    let series = chart.series(0).expect("series");
    assert_eq!(series.mode(), OperationMode::Move);
    assert!(series.is_visible());
    assert_eq!(series.value(), 10.0);
    assert_eq!((counter.starts.get(), counter.ends.get()), (1, 0));
}
