mod clock;
mod event;
mod queue;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event::{
    DEFAULT_ROTATIONS, DecoEvent, EventDuration, EventKind, EventListener, EventTarget,
};
pub use queue::{DueEvent, EventScheduler};
