use tracing::debug;

use crate::core::{SeriesConfig, SeriesOptions, SeriesRuntime, Viewport};
use crate::error::{DecoError, DecoResult};
use crate::render::Renderer;
use crate::scheduler::Clock;

use super::chart_config::validate_angles;
use super::{DecoChart, ListenerId, SeriesListener};

impl<R: Renderer, C: Clock> DecoChart<R, C> {
    /// Adds a series and returns its index.
    ///
    /// Indices are assigned from 0 in insertion order and stay stable until
    /// [`DecoChart::clear`].
    pub fn add_series(&mut self, config: SeriesConfig) -> DecoResult<usize> {
        let mut series = SeriesRuntime::new(config, self.config.default_line_width);
        series.setup_view(self.config.total_angle, self.config.rotate_angle)?;
        let index = self.series.len();
        self.series.push(series);
        self.relayout();
        debug!(index, "series added");
        self.request_redraw();
        Ok(index)
    }

    /// Validates `options` and adds the resulting series.
    pub fn add_series_options(&mut self, options: SeriesOptions) -> DecoResult<usize> {
        self.add_series(SeriesConfig::new(options)?)
    }

    fn check_index(&self, index: usize) -> DecoResult<()> {
        if index < self.series.len() {
            Ok(())
        } else {
            Err(DecoError::SeriesIndexOutOfRange {
                index,
                len: self.series.len(),
            })
        }
    }

    /// Cancels pending events and running operations, then restores every
    /// series to its configured initial state.
    pub fn reset(&mut self) {
        let dropped = self.scheduler.cancel_all();
        for index in 0..self.series.len() {
            self.with_series(index, |series, out| series.reset(out));
        }
        debug!(dropped, series = self.series.len(), "chart reset");
        self.request_redraw();
    }

    /// Drops every series, listener and pending event.
    pub fn clear(&mut self) {
        let dropped = self.scheduler.cancel_all();
        let removed = self.series.len();
        self.series.clear();
        self.listeners.clear();
        self.relayout();
        debug!(dropped, removed, "chart cleared");
        self.request_redraw();
    }

    /// Pauses the running move of series `index`; `false` when nothing was moving.
    pub fn pause(&mut self, index: usize) -> DecoResult<bool> {
        self.check_index(index)?;
        let now_ms = self.clock.now_ms();
        let paused = self.with_series(index, |series, out| series.pause(now_ms, out));
        if paused {
            self.request_redraw();
        }
        Ok(paused)
    }

    /// Continues a paused move from the value it reached.
    pub fn resume(&mut self, index: usize) -> DecoResult<bool> {
        self.check_index(index)?;
        let now_ms = self.clock.now_ms();
        let resumed = self.with_series(index, |series, out| series.resume(now_ms, out));
        if resumed {
            self.request_redraw();
        }
        Ok(resumed)
    }

    /// Sets the value of series `index` immediately, bypassing the queue.
    pub fn move_to_now(&mut self, index: usize, value: f64) -> DecoResult<()> {
        self.check_index(index)?;
        if !value.is_finite() {
            return Err(DecoError::InvalidEvent(
                "move target value must be finite".to_owned(),
            ));
        }
        self.series[index].set_position(value);
        self.request_redraw();
        Ok(())
    }

    /// Changes the track angles of the chart and every series.
    pub fn configure_angles(&mut self, total_angle: f64, rotate_angle: f64) -> DecoResult<()> {
        validate_angles(total_angle, rotate_angle)?;
        for series in &mut self.series {
            series.setup_view(total_angle, rotate_angle)?;
        }
        self.config.total_angle = total_angle;
        self.config.rotate_angle = rotate_angle;
        self.request_redraw();
        Ok(())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> DecoResult<()> {
        if !viewport.is_valid() {
            return Err(DecoError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.config.viewport = viewport;
        self.relayout();
        self.request_redraw();
        Ok(())
    }

    /// Registers progress callbacks for series `index`.
    pub fn subscribe(
        &mut self,
        index: usize,
        listener: impl SeriesListener + 'static,
    ) -> DecoResult<ListenerId> {
        self.check_index(index)?;
        Ok(self.listeners.subscribe(index, Box::new(listener)))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    #[must_use]
    pub fn listener_count(&self, index: usize) -> usize {
        self.listeners.count_for(index)
    }
}
