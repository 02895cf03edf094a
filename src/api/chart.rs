use tracing::trace;

use crate::core::{GeometryContext, Rect, SeriesNotice, SeriesRuntime, Viewport};
use crate::error::DecoResult;
use crate::extensions::PlacedLabel;
use crate::render::{RenderFrame, Renderer};
use crate::scheduler::{Clock, EventScheduler};

use super::listeners::ListenerRegistry;
use super::{ChartConfig, layout, render_frame_builder};

type RedrawHook = Box<dyn FnMut()>;
type WakeupHook = Box<dyn FnMut(u64)>;

/// Container of animated series driven by a shared event scheduler.
///
/// Everything runs on the caller's thread: the host calls [`DecoChart::tick`]
/// whenever its clock may have advanced (a frame callback or the wake-up it
/// was asked for) and draws with [`DecoChart::render`].
pub struct DecoChart<R: Renderer, C: Clock> {
    pub(super) renderer: R,
    pub(super) clock: C,
    pub(super) config: ChartConfig,
    pub(super) series: Vec<SeriesRuntime>,
    pub(super) scheduler: EventScheduler,
    pub(super) listeners: ListenerRegistry,
    pub(super) arc_bounds: Rect,
    pub(super) redraw_pending: bool,
    pub(super) redraw_hook: Option<RedrawHook>,
    pub(super) wakeup_hook: Option<WakeupHook>,
    notice_buffer: Vec<SeriesNotice>,
}

impl<R: Renderer, C: Clock> DecoChart<R, C> {
    pub fn new(renderer: R, clock: C, config: ChartConfig) -> DecoResult<Self> {
        config.validate()?;
        let arc_bounds = layout::resolve_arc_bounds(
            config.viewport,
            0.0,
            config.padding,
            config.vertical_gravity,
            config.horizontal_gravity,
        );
        Ok(Self {
            renderer,
            clock,
            config,
            series: Vec::new(),
            scheduler: EventScheduler::new(),
            listeners: ListenerRegistry::default(),
            arc_bounds,
            redraw_pending: true,
            redraw_hook: None,
            wakeup_hook: None,
            notice_buffer: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Arc bounds shared by every series before its own inset.
    #[must_use]
    pub fn arc_bounds(&self) -> Rect {
        self.arc_bounds
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn series(&self, index: usize) -> Option<&SeriesRuntime> {
        self.series.get(index)
    }

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    #[must_use]
    pub fn next_event_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    /// Whether further ticks can still change anything.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_empty() || self.series.iter().any(SeriesRuntime::is_animating)
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Called at most once per tick that changed visible state.
    pub fn set_redraw_hook(&mut self, hook: impl FnMut() + 'static) {
        self.redraw_hook = Some(Box::new(hook));
    }

    /// Called with the due time of the earliest pending event whenever it may
    /// have changed, so the host can schedule a tick for it.
    pub fn set_wakeup_hook(&mut self, hook: impl FnMut(u64) + 'static) {
        self.wakeup_hook = Some(Box::new(hook));
    }

    #[must_use]
    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    pub(super) fn request_redraw(&mut self) {
        self.redraw_pending = true;
        if let Some(hook) = self.redraw_hook.as_mut() {
            hook();
        }
    }

    pub(super) fn request_wakeup(&mut self) {
        let Some(due_ms) = self.scheduler.next_due_ms() else {
            return;
        };
        if let Some(hook) = self.wakeup_hook.as_mut() {
            hook(due_ms);
        }
    }

    /// Runs `f` on series `index` and delivers its notices in order.
    ///
    /// `index` must be in range.
    pub(super) fn with_series<T>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut SeriesRuntime, &mut Vec<SeriesNotice>) -> T,
    ) -> T {
        let mut notices = std::mem::take(&mut self.notice_buffer);
        let result = f(&mut self.series[index], &mut notices);
        for notice in notices.drain(..) {
            self.listeners.deliver(index, notice);
        }
        self.notice_buffer = notices;
        result
    }

    pub(super) fn geometry_context(&self) -> GeometryContext {
        GeometryContext {
            bounds: self.arc_bounds,
            viewport: self.config.viewport,
            vertical_gravity: self.config.vertical_gravity,
            horizontal_gravity: self.config.horizontal_gravity,
        }
    }

    pub(super) fn relayout(&mut self) {
        let widest = self
            .series
            .iter()
            .map(SeriesRuntime::line_width)
            .fold(0.0_f64, f64::max);
        self.arc_bounds = layout::resolve_arc_bounds(
            self.config.viewport,
            widest,
            self.config.padding,
            self.config.vertical_gravity,
            self.config.horizontal_gravity,
        );
        trace!(bounds = ?self.arc_bounds, widest, "arc bounds resolved");
    }

    /// Builds the frame for the current state without touching it.
    pub fn build_render_frame(&self) -> DecoResult<RenderFrame> {
        let labels = self.label_placements()?;
        Ok(render_frame_builder::build_render_frame(
            self.config.viewport,
            &self.series,
            &self.geometry_context(),
            &labels,
        ))
    }

    pub fn render(&mut self) -> DecoResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        self.redraw_pending = false;
        Ok(())
    }

    /// Renders only when something changed since the last render.
    pub fn render_if_invalidated(&mut self) -> DecoResult<bool> {
        if !self.redraw_pending {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Label boxes for the current state, in series order.
    pub fn label_placements(&self) -> DecoResult<Vec<PlacedLabel>> {
        super::label_layout::resolve_labels(self)
    }
}
