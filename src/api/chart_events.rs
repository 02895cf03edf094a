use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::EffectKind;
use crate::error::{DecoError, DecoResult};
use crate::render::Renderer;
use crate::scheduler::{Clock, DecoEvent, EventKind, EventTarget};

use super::DecoChart;

impl<R: Renderer, C: Clock> DecoChart<R, C> {
    /// Queues `event` to fire after its delay and returns the due time.
    ///
    /// The series index is resolved when the event fires, so events may
    /// target series that are added later.
    pub fn add_event(&mut self, event: DecoEvent) -> DecoResult<u64> {
        if let Err(err) = event.validate() {
            warn!(error = %err, "event rejected");
            return Err(err);
        }
        let now_ms = self.clock.now_ms();
        let due_ms = self.scheduler.schedule(event, now_ms);
        debug!(due_ms, pending = self.scheduler.len(), "event enqueued");
        self.request_wakeup();
        Ok(due_ms)
    }

    /// Fires due events and advances every running operation to the clock's
    /// current time.
    ///
    /// Due events fire in due-time order; each one starts at its own due time
    /// even when the tick arrives late. An event naming a missing series is
    /// consumed and reported as an error; later events stay queued for the
    /// next tick. Returns whether anything visible changed.
    pub fn tick(&mut self) -> DecoResult<bool> {
        let now_ms = self.clock.now_ms();
        let mut changed = false;

        while let Some(due) = self.scheduler.pop_due(now_ms) {
            changed |= self.advance_series(due.due_ms);
            let event = Rc::new(due.event);
            debug!(
                due_ms = due.due_ms,
                now_ms,
                kind = event.kind().name(),
                "event fired"
            );
            if let Err(err) = self.dispatch(event, due.due_ms) {
                warn!(error = %err, "event dispatch failed");
                if changed {
                    self.request_redraw();
                }
                self.request_wakeup();
                return Err(err);
            }
            changed = true;
        }

        changed |= self.advance_series(now_ms);
        if changed {
            self.request_redraw();
        }
        self.request_wakeup();
        Ok(changed)
    }

    fn advance_series(&mut self, now_ms: u64) -> bool {
        let mut changed = false;
        for index in 0..self.series.len() {
            changed |= self.with_series(index, |series, out| series.tick(now_ms, out));
        }
        changed
    }

    fn resolve_index(&self, target: EventTarget) -> DecoResult<usize> {
        let len = self.series.len();
        match target {
            EventTarget::Series(index) if index < len => Ok(index),
            EventTarget::Series(index) => Err(DecoError::SeriesIndexOutOfRange { index, len }),
            EventTarget::All => Err(DecoError::InvalidEvent(
                "event requires a single series target".to_owned(),
            )),
        }
    }

    fn dispatch(&mut self, event: Rc<DecoEvent>, at_ms: u64) -> DecoResult<()> {
        match event.kind() {
            EventKind::Move { .. } => {
                let index = self.resolve_index(event.target())?;
                self.with_series(index, |series, out| series.start_move(event, at_ms, out));
            }
            EventKind::ColorChange => {
                let index = self.resolve_index(event.target())?;
                self.with_series(index, |series, out| {
                    series.start_color_change(event, at_ms, out);
                });
            }
            EventKind::Show | EventKind::Hide => {
                let show = event.kind() == EventKind::Show;
                let targets = match event.target() {
                    EventTarget::All => 0..self.series.len(),
                    target => {
                        let index = self.resolve_index(target)?;
                        index..index + 1
                    }
                };
                for index in targets {
                    let event = Rc::clone(&event);
                    self.with_series(index, |series, out| {
                        series.start_reveal(event, show, at_ms, out);
                    });
                }
            }
            EventKind::Effect(kind) => {
                let index = self.resolve_index(event.target())?;
                if kind == EffectKind::SpiralExplode {
                    for other in (0..self.series.len()).filter(|other| *other != index) {
                        let event = Rc::clone(&event);
                        self.with_series(other, |series, out| {
                            series.start_reveal(event, false, at_ms, out);
                        });
                    }
                }
                self.with_series(index, |series, out| series.start_effect(event, at_ms, out));
            }
        }
        Ok(())
    }
}
