use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::effect::{EffectParams, render_effect};
use crate::core::geometry::{
    self, ArcState, GeometryContext, LineState, POSITION_EPSILON, SeriesGeometry,
};
use crate::core::{Argb, ColorAnimate, Easing, EffectKind, SeriesConfig};
use crate::error::{DecoError, DecoResult};
use crate::scheduler::{DecoEvent, EventDuration, EventKind};

/// Duration used by reveal, color and effect operations without an explicit one.
pub const DEFAULT_OPERATION_DURATION_MS: u64 = 1000;

/// What the series geometry currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OperationMode {
    /// Idle or moving between values.
    #[default]
    Move,
    Show,
    Hide,
    ColorChange,
    Effect,
}

/// Observable outcome of a state transition or tick.
///
/// The series never calls user code; the container drains these and routes
/// them to the registered listeners.
#[derive(Debug, Clone)]
pub enum SeriesNotice {
    AnimationProgress { progress: f64, value: f64 },
    DisplayProgress { percent: f64 },
    EventStarted(Rc<DecoEvent>),
    EventEnded(Rc<DecoEvent>),
}

#[derive(Debug, Clone)]
struct Tween {
    started_at_ms: u64,
    duration_ms: u64,
    easing: Easing,
    last_step_ms: Option<u64>,
}

impl Tween {
    fn new(started_at_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            started_at_ms,
            duration_ms,
            easing,
            last_step_ms: None,
        }
    }

    fn time_fraction(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        (elapsed as f64 / self.duration_ms as f64).min(1.0)
    }

    fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_at_ms) >= self.duration_ms
    }

    /// Returns `false` when `now_ms` was already processed.
    fn step(&mut self, now_ms: u64) -> bool {
        if self.last_step_ms == Some(now_ms) {
            return false;
        }
        self.last_step_ms = Some(now_ms);
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Move,
    Reveal { show: bool },
    ColorChange,
    Effect,
}

#[derive(Debug, Clone)]
struct ActiveOperation {
    operation: Operation,
    tween: Tween,
    event: Rc<DecoEvent>,
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveEffect {
    kind: EffectKind,
    rotations: u32,
    text: Option<String>,
}

/// Runtime state of one series and the transitions that drive it.
///
/// At most one operation is in flight. Starting another one cancels it and
/// keeps whatever value had been reached.
#[derive(Debug, Clone)]
pub struct SeriesRuntime {
    config: SeriesConfig,
    line_width: f64,
    angle_start: f64,
    angle_sweep: f64,
    mode: OperationMode,
    position_start: f64,
    position_end: f64,
    position_current_end: f64,
    percent_complete: f64,
    visible: bool,
    paused: bool,
    active: Option<ActiveOperation>,
    paused_event: Option<Rc<DecoEvent>>,
    color: Argb,
    color_animate: Option<ColorAnimate>,
    effect: Option<ActiveEffect>,
}

impl SeriesRuntime {
    /// `default_line_width` applies when the configuration leaves it unset.
    #[must_use]
    pub fn new(config: SeriesConfig, default_line_width: f64) -> Self {
        let line_width = config.line_width().unwrap_or(default_line_width);
        let angle_start = geometry::series_start_angle(360.0, 0.0, config.is_clockwise());
        Self {
            line_width,
            angle_start,
            angle_sweep: 360.0,
            mode: OperationMode::Move,
            position_start: config.min_value(),
            position_end: config.initial_value(),
            position_current_end: config.initial_value(),
            percent_complete: 1.0,
            visible: config.initially_visible(),
            paused: false,
            active: None,
            paused_event: None,
            color: config.color(),
            color_animate: None,
            effect: None,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    #[must_use]
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    #[must_use]
    pub fn mode(&self) -> OperationMode {
        self.mode
    }

    /// Last committed value; updated on every move tick.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.position_current_end
    }

    /// Progress of the current (or last) operation.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.percent_complete
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Visible and not fully faded out by a completed hide.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.visible && !(self.mode == OperationMode::Hide && self.percent_complete >= 1.0)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn angle_start(&self) -> f64 {
        self.angle_start
    }

    #[must_use]
    pub fn angle_sweep(&self) -> f64 {
        self.angle_sweep
    }

    /// Color the series draws with right now.
    #[must_use]
    pub fn draw_color(&self) -> Argb {
        match self.color_animate {
            Some(animate) => animate.color_at(self.percent_complete),
            None => self.color,
        }
    }

    /// Share of the track currently drawn.
    #[must_use]
    pub fn fill_fraction(&self) -> f64 {
        geometry::fill_fraction(
            self.position_start,
            self.position_end,
            self.config.min_value(),
            self.config.max_value(),
            self.percent_complete,
            self.mode == OperationMode::Move,
        )
    }

    /// `(value - min) / (max - min)` for the committed value.
    #[must_use]
    pub fn position_percent(&self) -> f64 {
        (self.position_current_end - self.config.min_value()) / self.config.range()
    }

    /// Applies the chart's track angles.
    pub fn setup_view(&mut self, total_angle: f64, rotate_angle: f64) -> DecoResult<()> {
        if !total_angle.is_finite() || total_angle <= 0.0 || total_angle > 360.0 {
            return Err(DecoError::InvalidConfig(format!(
                "total angle must be in (0, 360], got {total_angle}"
            )));
        }
        if !rotate_angle.is_finite() || !(0.0..=360.0).contains(&rotate_angle) {
            return Err(DecoError::InvalidConfig(format!(
                "rotate angle must be in [0, 360], got {rotate_angle}"
            )));
        }
        self.angle_sweep = total_angle;
        self.angle_start =
            geometry::series_start_angle(total_angle, rotate_angle, self.config.is_clockwise());
        Ok(())
    }

    pub fn start_move(&mut self, event: Rc<DecoEvent>, now_ms: u64, out: &mut Vec<SeriesNotice>) {
        let EventKind::Move { target } = event.kind() else {
            warn!(kind = event.kind().name(), "move requested with a non-move event");
            return;
        };

        self.cancel();
        self.mode = OperationMode::Move;
        self.visible = true;
        self.effect = None;

        if let Some(color) = event.color().filter(|color| !color.is_transparent()) {
            self.color_animate = Some(ColorAnimate::new(self.color, color));
            self.color = color;
        }

        out.push(SeriesNotice::EventStarted(Rc::clone(&event)));

        self.position_start = self.position_current_end;
        self.position_end = target;
        let distance = (target - self.position_start).abs();
        let duration_ms = match event.duration() {
            EventDuration::Millis(ms) => ms,
            EventDuration::Default => {
                (self.config.spin_duration_ms() as f64 * distance / self.config.range()) as u64
            }
        };

        if duration_ms == 0 || distance < POSITION_EPSILON {
            self.position_current_end = target;
            self.percent_complete = 1.0;
            self.color_animate = None;
            out.push(SeriesNotice::AnimationProgress {
                progress: 1.0,
                value: target,
            });
            debug!(target, "move completed synchronously");
            out.push(SeriesNotice::EventEnded(event));
            return;
        }

        let easing = event
            .easing()
            .or(self.config.easing())
            .cloned()
            .unwrap_or_default();
        self.percent_complete = 0.0;
        debug!(from = self.position_start, target, duration_ms, "move started");
        self.active = Some(ActiveOperation {
            operation: Operation::Move,
            tween: Tween::new(now_ms, duration_ms, easing),
            event,
        });
    }

    /// Fades the series in (`show`) or out without touching its value.
    ///
    /// Reveals driven by an effect event report neither start nor end.
    pub fn start_reveal(
        &mut self,
        event: Rc<DecoEvent>,
        show: bool,
        now_ms: u64,
        out: &mut Vec<SeriesNotice>,
    ) {
        self.cancel();
        if !matches!(event.kind(), EventKind::Effect(_)) {
            out.push(SeriesNotice::EventStarted(Rc::clone(&event)));
        }

        self.mode = if show {
            OperationMode::Show
        } else {
            OperationMode::Hide
        };
        self.percent_complete = if show { 1.0 } else { 0.0 };
        self.visible = true;
        self.effect = None;

        let duration_ms = operation_duration(&event);
        trace!(show, duration_ms, "reveal started");
        self.begin(Operation::Reveal { show }, event, Easing::Linear, duration_ms, now_ms, out);
    }

    /// Animates the draw color towards the event color.
    ///
    /// A missing or transparent color leaves the series untouched.
    pub fn start_color_change(
        &mut self,
        event: Rc<DecoEvent>,
        now_ms: u64,
        out: &mut Vec<SeriesNotice>,
    ) {
        let Some(color) = event.color().filter(|color| !color.is_transparent()) else {
            warn!("color change ignored: event has no visible color");
            return;
        };

        self.cancel();
        out.push(SeriesNotice::EventStarted(Rc::clone(&event)));

        self.visible = true;
        self.mode = OperationMode::ColorChange;
        self.percent_complete = 0.0;
        self.color_animate = Some(ColorAnimate::new(self.color, color));
        self.color = color;

        let easing = event.easing().cloned().unwrap_or(Easing::Linear);
        let duration_ms = operation_duration(&event);
        self.begin(Operation::ColorChange, event, easing, duration_ms, now_ms, out);
    }

    pub fn start_effect(&mut self, event: Rc<DecoEvent>, now_ms: u64, out: &mut Vec<SeriesNotice>) {
        let EventKind::Effect(kind) = event.kind() else {
            warn!(kind = event.kind().name(), "effect requested with a non-effect event");
            return;
        };

        self.cancel();
        out.push(SeriesNotice::EventStarted(Rc::clone(&event)));

        self.visible = true;
        self.mode = OperationMode::Effect;
        self.percent_complete = 0.0;
        self.effect = Some(ActiveEffect {
            kind,
            rotations: event.rotations(),
            text: event.display_text().map(str::to_owned),
        });

        let easing = event.easing().cloned().unwrap_or(Easing::Linear);
        let duration_ms = operation_duration(&event);
        debug!(?kind, duration_ms, "effect started");
        self.begin(Operation::Effect, event, easing, duration_ms, now_ms, out);
    }

    fn begin(
        &mut self,
        operation: Operation,
        event: Rc<DecoEvent>,
        easing: Easing,
        duration_ms: u64,
        now_ms: u64,
        out: &mut Vec<SeriesNotice>,
    ) {
        self.active = Some(ActiveOperation {
            operation,
            tween: Tween::new(now_ms, duration_ms, easing),
            event,
        });
        if duration_ms == 0 {
            self.tick(now_ms, out);
        }
    }

    /// Advances the in-flight operation to `now_ms`.
    ///
    /// Returns `true` when anything visible changed.
    pub fn tick(&mut self, now_ms: u64, out: &mut Vec<SeriesNotice>) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if !active.tween.step(now_ms) {
            return false;
        }

        let operation = active.operation;
        let finished = active.tween.is_finished(now_ms);
        let fraction = active.tween.time_fraction(now_ms);
        let eased = active.tween.easing.apply(fraction);

        match operation {
            Operation::Move => {
                if finished {
                    self.position_current_end = self.position_end;
                    self.percent_complete = 1.0;
                    if let Some(animate) = self.color_animate.take() {
                        self.color = animate.end();
                    }
                } else {
                    self.position_current_end =
                        self.position_start + eased * (self.position_end - self.position_start);
                    self.percent_complete = eased;
                }
                out.push(SeriesNotice::AnimationProgress {
                    progress: self.percent_complete,
                    value: self.position_current_end,
                });
            }
            Operation::Reveal { show } => {
                self.percent_complete = if show { 1.0 - fraction } else { fraction };
                out.push(SeriesNotice::DisplayProgress {
                    percent: self.percent_complete,
                });
            }
            Operation::ColorChange => {
                self.percent_complete = if finished { 1.0 } else { eased };
                if finished {
                    self.color_animate = None;
                }
                out.push(SeriesNotice::DisplayProgress {
                    percent: self.percent_complete,
                });
            }
            Operation::Effect => {
                self.percent_complete = if finished { 1.0 } else { eased };
                out.push(SeriesNotice::DisplayProgress {
                    percent: self.percent_complete,
                });
            }
        }

        if finished {
            self.finish(out);
        }
        true
    }

    fn finish(&mut self, out: &mut Vec<SeriesNotice>) {
        let Some(active) = self.active.take() else {
            return;
        };

        match active.operation {
            Operation::Reveal { .. } if matches!(active.event.kind(), EventKind::Effect(_)) => {
                return;
            }
            Operation::Effect => {
                if let Some(effect) = self.effect.take() {
                    self.visible = effect.kind.visible_after();
                }
                self.mode = OperationMode::Move;
            }
            _ => {}
        }

        trace!(kind = active.event.kind().name(), "operation completed");
        out.push(SeriesNotice::EventEnded(active.event));
    }

    /// Stops the in-flight operation, keeping the value and color reached so far.
    ///
    /// The cancelled event never reports its end.
    pub fn cancel(&mut self) {
        if let Some(animate) = self.color_animate.take() {
            self.color = animate.color_at(self.percent_complete);
        }
        if let Some(active) = self.active.take() {
            if active.operation == Operation::Move {
                self.commit_current();
            }
            trace!(kind = active.event.kind().name(), "operation cancelled");
        }
        self.paused = false;
        self.paused_event = None;
    }

    fn commit_current(&mut self) {
        self.position_start = self.position_current_end;
        self.position_end = self.position_current_end;
        self.percent_complete = 1.0;
    }

    /// Freezes a running move; the event is kept for `resume`.
    pub fn pause(&mut self, now_ms: u64, out: &mut Vec<SeriesNotice>) -> bool {
        let moving = matches!(
            &self.active,
            Some(ActiveOperation {
                operation: Operation::Move,
                ..
            })
        );
        if self.paused || !moving {
            return false;
        }

        self.tick(now_ms, out);
        let Some(active) = self
            .active
            .take_if(|active| active.operation == Operation::Move)
        else {
            return false;
        };

        if let Some(animate) = self.color_animate.take() {
            self.color = animate.color_at(self.percent_complete);
        }
        self.commit_current();
        self.paused = true;
        self.paused_event = Some(active.event);
        debug!(value = self.position_current_end, "move paused");
        true
    }

    /// Restarts the paused move from the value it reached.
    pub fn resume(&mut self, now_ms: u64, out: &mut Vec<SeriesNotice>) -> bool {
        if !self.paused {
            return false;
        }
        let Some(event) = self.paused_event.take() else {
            self.paused = false;
            return false;
        };
        debug!(value = self.position_current_end, "move resumed");
        self.start_move(event, now_ms, out);
        true
    }

    /// Restores the configured initial state and reports it once.
    pub fn reset(&mut self, out: &mut Vec<SeriesNotice>) {
        self.cancel();
        self.mode = OperationMode::Move;
        self.visible = self.config.initially_visible();
        self.position_start = self.config.min_value();
        self.position_end = self.config.initial_value();
        self.position_current_end = self.config.initial_value();
        self.percent_complete = 1.0;
        self.color = self.config.color();
        self.color_animate = None;
        self.effect = None;
        out.push(SeriesNotice::AnimationProgress {
            progress: 1.0,
            value: self.position_current_end,
        });
    }

    /// Jumps to `value` without animating.
    ///
    /// Any running or paused operation is cancelled first and never reports its end.
    pub fn set_position(&mut self, value: f64) {
        self.cancel();
        self.mode = OperationMode::Move;
        self.effect = None;
        self.position_start = value;
        self.position_end = value;
        self.position_current_end = value;
        self.percent_complete = 1.0;
    }

    /// Geometry to draw for the current state. Never mutates the series.
    #[must_use]
    pub fn geometry(&self, ctx: &GeometryContext) -> SeriesGeometry {
        if !self.visible {
            return SeriesGeometry::Hidden;
        }

        if self.mode == OperationMode::Effect {
            let Some(effect) = &self.effect else {
                return SeriesGeometry::Hidden;
            };
            let inset = self.config.inset();
            return SeriesGeometry::Effect(render_effect(&EffectParams {
                kind: effect.kind,
                progress: self.percent_complete,
                bounds: ctx.bounds.inset(inset.x, inset.y),
                start_angle: self.angle_start,
                sweep_angle: self.angle_sweep,
                rotations: effect.rotations,
                text: effect.text.as_deref(),
                color: self.draw_color(),
                line_width: self.line_width,
            }));
        }

        let (stroke_width, color) = self.reveal_adjusted();
        if self.config.chart_style().is_line() {
            SeriesGeometry::Line(geometry::line_geometry(
                &self.config,
                ctx,
                LineState {
                    position: self.position_percent(),
                    line_width: self.line_width,
                    stroke_width,
                    color,
                },
            ))
        } else {
            SeriesGeometry::Arc(geometry::arc_geometry(
                &self.config,
                ctx.bounds,
                ArcState {
                    fraction: self.fill_fraction(),
                    angle_start: self.angle_start,
                    angle_sweep: self.angle_sweep,
                    stroke_width,
                    color,
                },
            ))
        }
    }

    fn reveal_adjusted(&self) -> (f64, Argb) {
        let color = self.draw_color();
        let revealing = matches!(self.mode, OperationMode::Show | OperationMode::Hide);
        if !revealing || self.percent_complete <= 0.0 {
            return (self.line_width, color);
        }

        let remaining = (1.0 - self.percent_complete).clamp(0.0, 1.0);
        let alpha = f64::from(self.config.color().alpha()) * remaining;
        (self.line_width * remaining, color.with_alpha(alpha as u8))
    }
}

fn operation_duration(event: &DecoEvent) -> u64 {
    match event.duration() {
        EventDuration::Millis(ms) => ms,
        EventDuration::Default => DEFAULT_OPERATION_DURATION_MS,
    }
}
