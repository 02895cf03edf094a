use std::fmt;
use std::rc::Rc;

use crate::core::{Argb, Easing, EffectKind};
use crate::error::{DecoError, DecoResult};

/// Default spiral turns for effect events.
pub const DEFAULT_ROTATIONS: u32 = 2;

/// Series addressed by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Series(usize),
    /// Every series present when the event fires (show and hide only).
    All,
}

/// How long the operation runs once the event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventDuration {
    /// Moves derive it from the series spin duration; other operations use one second.
    #[default]
    Default,
    Millis(u64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    Move { target: f64 },
    Show,
    Hide,
    ColorChange,
    Effect(EffectKind),
}

impl EventKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Move { .. } => "move",
            Self::Show => "show",
            Self::Hide => "hide",
            Self::ColorChange => "color_change",
            Self::Effect(_) => "effect",
        }
    }
}

/// Start/end callbacks attached to a single event.
///
/// Callbacks run synchronously inside `DecoChart::tick`.
pub trait EventListener {
    fn on_event_start(&self, _event: &DecoEvent) {}
    fn on_event_end(&self, _event: &DecoEvent) {}
}

/// Operation scheduled against one or all series.
#[derive(Clone)]
pub struct DecoEvent {
    kind: EventKind,
    target: EventTarget,
    delay_ms: u64,
    duration: EventDuration,
    easing: Option<Easing>,
    color: Option<Argb>,
    rotations: u32,
    display_text: Option<String>,
    event_id: Option<String>,
    listener: Option<Rc<dyn EventListener>>,
}

impl DecoEvent {
    fn new(kind: EventKind, target: EventTarget) -> Self {
        Self {
            kind,
            target,
            delay_ms: 0,
            duration: EventDuration::Default,
            easing: None,
            color: None,
            rotations: DEFAULT_ROTATIONS,
            display_text: None,
            event_id: None,
            listener: None,
        }
    }

    #[must_use]
    pub fn move_to(index: usize, value: f64) -> Self {
        Self::new(EventKind::Move { target: value }, EventTarget::Series(index))
    }

    #[must_use]
    pub fn show(target: EventTarget) -> Self {
        Self::new(EventKind::Show, target)
    }

    #[must_use]
    pub fn hide(target: EventTarget) -> Self {
        Self::new(EventKind::Hide, target)
    }

    #[must_use]
    pub fn color_change(index: usize, color: Argb) -> Self {
        Self::new(EventKind::ColorChange, EventTarget::Series(index)).with_color(color)
    }

    #[must_use]
    pub fn effect(index: usize, effect: EffectKind) -> Self {
        Self::new(EventKind::Effect(effect), EventTarget::Series(index))
    }

    #[must_use]
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration = EventDuration::Millis(duration_ms);
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Color for a color change, or the color a move animates towards.
    #[must_use]
    pub fn with_color(mut self, color: Argb) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_rotations(mut self, rotations: u32) -> Self {
        self.rotations = rotations;
        self
    }

    #[must_use]
    pub fn with_display_text(mut self, text: impl Into<String>) -> Self {
        self.display_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }

    #[must_use]
    pub fn with_listener(mut self, listener: Rc<dyn EventListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    #[must_use]
    pub fn target(&self) -> EventTarget {
        self.target
    }

    #[must_use]
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    #[must_use]
    pub fn duration(&self) -> EventDuration {
        self.duration
    }

    #[must_use]
    pub fn easing(&self) -> Option<&Easing> {
        self.easing.as_ref()
    }

    #[must_use]
    pub fn color(&self) -> Option<Argb> {
        self.color
    }

    #[must_use]
    pub fn rotations(&self) -> u32 {
        self.rotations
    }

    #[must_use]
    pub fn display_text(&self) -> Option<&str> {
        self.display_text.as_deref()
    }

    #[must_use]
    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    pub(crate) fn notify_start(&self) {
        if let Some(listener) = &self.listener {
            listener.on_event_start(self);
        }
    }

    pub(crate) fn notify_end(&self) {
        if let Some(listener) = &self.listener {
            listener.on_event_end(self);
        }
    }

    /// Checks everything that can be known before the event fires.
    ///
    /// The series index itself is only resolved at dispatch, because series
    /// may still be added in between.
    pub fn validate(&self) -> DecoResult<()> {
        match self.kind {
            EventKind::Move { target } if !target.is_finite() => {
                return Err(DecoError::InvalidEvent(
                    "move target value must be finite".to_owned(),
                ));
            }
            EventKind::Move { .. } | EventKind::ColorChange | EventKind::Effect(_)
                if self.target == EventTarget::All =>
            {
                return Err(DecoError::InvalidEvent(format!(
                    "`{}` events must target a single series",
                    self.kind.name()
                )));
            }
            _ => {}
        }
        Ok(())
    }
}

impl fmt::Debug for DecoEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoEvent")
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("delay_ms", &self.delay_ms)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("color", &self.color)
            .field("rotations", &self.rotations)
            .field("display_text", &self.display_text)
            .field("event_id", &self.event_id)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}
