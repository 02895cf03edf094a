use std::cell::{Cell, RefCell};
use std::rc::Rc;

use deco_rs::api::{ChartConfig, DecoChart, SeriesListener};
use deco_rs::core::{Argb, Easing, SeriesOptions, Viewport};
use deco_rs::render::NullRenderer;
use deco_rs::scheduler::{DecoEvent, EventListener, EventScheduler, EventTarget, ManualClock};
use deco_rs::DecoError;

#[derive(Default)]
struct OrderLog {
    ended: RefCell<Vec<String>>,
}

impl EventListener for OrderLog {
    fn on_event_end(&self, event: &DecoEvent) {
        self.ended
            .borrow_mut()
            .push(event.event_id().unwrap_or("-").to_owned());
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

#[derive(Clone, Default)]
struct ValueLog(Rc<RefCell<Vec<f64>>>);

impl SeriesListener for ValueLog {
    fn on_animation_progress(&mut self, _progress: f64, value: f64) {
        self.0.borrow_mut().push(value);
    }
}

fn chart(clock: &ManualClock, series: usize) -> DecoChart<NullRenderer, ManualClock> {
    let mut chart = DecoChart::new(
        NullRenderer::default(),
        clock.clone(),
        ChartConfig::new(Viewport::new(300, 300)),
    )
    .expect("chart init");
    for _ in 0..series {
        chart
            .add_series_options(SeriesOptions::new(Argb::BLACK).with_range(0.0, 50.0, 0.0))
            .expect("series");
    }
    chart
}

#[test]
fn events_fire_in_due_order_not_insertion_order() {
    let clock = ManualClock::new(0);
    let mut chart = chart(&clock, 3);
    let log = Rc::new(OrderLog::default());

    for (index, delay) in [500_u64, 100, 300].into_iter().enumerate() {
        chart
            .add_event(
                DecoEvent::move_to(index, 10.0)
                    .with_delay(delay)
                    .with_duration(0)
                    .with_event_id(format!("d{delay}"))
                    .with_listener(log.clone()),
            )
            .expect("event");
    }
    assert_eq!(chart.next_event_due_ms(), Some(100));

    clock.set(1000);
    chart.tick().expect("tick");
    assert_eq!(*log.ended.borrow(), vec!["d100", "d300", "d500"]);
    assert_eq!(chart.pending_events(), 0);
}

#[test]
fn events_with_equal_due_time_keep_insertion_order() {
    let clock = ManualClock::new(0);
    let mut chart = chart(&clock, 1);
    let log = Rc::new(OrderLog::default());

    for (id, value) in [("a", 10.0), ("b", 20.0), ("c", 30.0)] {
        chart
            .add_event(
                DecoEvent::move_to(0, value)
                    .with_delay(200)
                    .with_duration(0)
                    .with_event_id(id)
                    .with_listener(log.clone()),
            )
            .expect("event");
    }
    clock.set(200);
    chart.tick().expect("tick");

    assert_eq!(*log.ended.borrow(), vec!["a", "b", "c"]);
    assert_eq!(chart.series(0).expect("series").value(), 30.0);
}

#[test]
fn delayed_moves_run_back_to_back() {
    let clock = ManualClock::new(0);
    let mut chart = chart(&clock, 1);
    let values = ValueLog::default();
    chart.subscribe(0, values.clone()).expect("subscribe");
    let first = Rc::new(Counter::default());
    let second = Rc::new(Counter::default());

    chart
        .add_event(
            DecoEvent::move_to(0, 25.0)
                .with_duration(1000)
                .with_listener(first.clone()),
        )
        .expect("first move");
    chart
        .add_event(
            DecoEvent::move_to(0, 0.0)
                .with_delay(2000)
                .with_duration(500)
                .with_listener(second.clone()),
        )
        .expect("second move");

    chart.tick().expect("tick at 0");
    clock.set(1000);
    chart.tick().expect("tick at 1000");
    assert_eq!(chart.series(0).expect("series").value(), 25.0);
    assert_eq!(first.ends.get(), 1);

    let seen = values.0.borrow().len();
    for now in [1200, 1500, 1999] {
        clock.set(now);
        assert!(!chart.tick().expect("idle tick"));
    }
    assert_eq!(values.0.borrow().len(), seen);
    assert_eq!(second.starts.get(), 0);

    clock.set(2500);
    chart.tick().expect("tick at 2500");
    assert_eq!(chart.series(0).expect("series").value(), 0.0);
    assert_eq!(second.starts.get(), 1);
    assert_eq!(second.ends.get(), 1);
    assert_eq!(first.ends.get(), 1);
}

#[test]
fn late_tick_starts_event_at_its_due_time() {
    let clock = ManualClock::new(0);
    let mut chart = chart(&clock, 1);

    chart
        .add_event(
            DecoEvent::move_to(0, 50.0)
                .with_delay(100)
                .with_duration(1000)
                .with_easing(Easing::Linear),
        )
        .expect("move event");

    clock.set(600);
    chart.tick().expect("late tick");
    assert!((chart.series(0).expect("series").value() - 25.0).abs() <= 1e-9);
}

#[test]
fn missing_series_is_reported_when_event_fires() {
    let clock = ManualClock::new(0);
    let mut chart = chart(&clock, 1);

    chart
        .add_event(DecoEvent::move_to(3, 10.0).with_duration(0))
        .expect("enqueue is deferred");
    chart
        .add_event(DecoEvent::move_to(0, 20.0).with_delay(50).with_duration(0))
        .expect("valid event");

    clock.set(100);
    let err = chart.tick().expect_err("index 3 does not exist");
    assert!(matches!(
        err,
        DecoError::SeriesIndexOutOfRange { index: 3, len: 1 }
    ));
    assert_eq!(chart.pending_events(), 1);

    chart.tick().expect("remaining event fires");
    assert_eq!(chart.series(0).expect("series").value(), 20.0);
}

#[test]
fn event_may_target_series_added_later() {
    let clock = ManualClock::new(0);
    let mut chart = chart(&clock, 1);

    chart
        .add_event(DecoEvent::move_to(1, 40.0).with_delay(100).with_duration(0))
        .expect("event");
    clock.set(50);
    chart
        .add_series_options(SeriesOptions::new(Argb::WHITE).with_range(0.0, 50.0, 0.0))
        .expect("late series");

    clock.set(100);
    chart.tick().expect("tick");
    assert_eq!(chart.series(1).expect("series").value(), 40.0);
}

#[test]
fn invalid_events_are_rejected_at_enqueue() {
    let clock = ManualClock::new(0);
    let mut chart = chart(&clock, 2);

    chart
        .add_event(DecoEvent::hide(EventTarget::All).with_duration(10))
        .expect("hide may target every series");

    let err = chart
        .add_event(DecoEvent::move_to(0, f64::INFINITY))
        .expect_err("non-finite target");
    assert!(matches!(err, DecoError::InvalidEvent(_)));
    assert_eq!(chart.pending_events(), 1);
}

#[test]
fn hide_all_reaches_every_series() {
    let clock = ManualClock::new(0);
    let mut chart = chart(&clock, 3);
    let counter = Rc::new(Counter::default());

    chart
        .add_event(
            DecoEvent::hide(EventTarget::All)
                .with_duration(200)
                .with_listener(counter.clone()),
        )
        .expect("hide event");
    chart.tick().expect("tick at 0");
    clock.set(200);
    chart.tick().expect("tick at 200");

    assert_eq!(counter.starts.get(), 3);
    assert_eq!(counter.ends.get(), 3);
    for index in 0..3 {
        assert!(!chart.series(index).expect("series").is_shown());
    }
}

#[test]
fn reset_drops_pending_events() {
    let clock = ManualClock::new(0);
    let mut chart = chart(&clock, 1);
    let counter = Rc::new(Counter::default());

    chart
        .add_event(
            DecoEvent::move_to(0, 40.0)
                .with_delay(500)
                .with_listener(counter.clone()),
        )
        .expect("event");
    chart.reset();
    assert_eq!(chart.pending_events(), 0);

    clock.set(5000);
    chart.tick().expect("tick");
    assert_eq!(counter.starts.get(), 0);
    assert_eq!(chart.series(0).expect("series").value(), 0.0);
}

#[test]
fn hooks_report_redraws_and_wakeups() {
    let clock = ManualClock::new(0);
    let mut chart = chart(&clock, 1);
    let redraws = Rc::new(Cell::new(0_usize));
    let wakeups = Rc::new(RefCell::new(Vec::new()));
    {
        let redraws = Rc::clone(&redraws);
        chart.set_redraw_hook(move || redraws.set(redraws.get() + 1));
        let wakeups = Rc::clone(&wakeups);
        chart.set_wakeup_hook(move |due| wakeups.borrow_mut().push(due));
    }

    chart
        .add_event(DecoEvent::move_to(0, 30.0).with_delay(250).with_duration(100))
        .expect("event");
    assert_eq!(*wakeups.borrow(), vec![250]);

    clock.set(100);
    assert!(!chart.tick().expect("early tick"));
    assert_eq!(redraws.get(), 0);

    clock.set(300);
    assert!(chart.tick().expect("due tick"));
    assert_eq!(redraws.get(), 1);

    clock.set(400);
    assert!(chart.tick().expect("final tick"));
    assert_eq!(redraws.get(), 2);
    assert!(!chart.tick().expect("idle tick"));
    assert_eq!(redraws.get(), 2);
}

#[test]
fn scheduler_queue_pops_by_due_time() {
    let mut scheduler = EventScheduler::new();
    scheduler.schedule(DecoEvent::move_to(0, 1.0).with_delay(30), 10);
    scheduler.schedule(DecoEvent::move_to(0, 2.0).with_delay(5), 10);
    assert_eq!(scheduler.len(), 2);
    assert_eq!(scheduler.next_due_ms(), Some(15));

    assert!(scheduler.pop_due(14).is_none());
    let first = scheduler.pop_due(100).expect("first due");
    assert_eq!(first.due_ms, 15);
    let second = scheduler.pop_due(100).expect("second due");
    assert_eq!(second.due_ms, 40);
    assert!(scheduler.is_empty());
}
