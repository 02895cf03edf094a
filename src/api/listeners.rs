use indexmap::IndexMap;

use crate::core::SeriesNotice;

/// Progress callbacks for one series, invoked synchronously from `DecoChart::tick`.
pub trait SeriesListener {
    /// Move progress and the value reached.
    fn on_animation_progress(&mut self, _progress: f64, _value: f64) {}

    /// Progress of reveal, color change and effect operations.
    fn on_display_progress(&mut self, _percent: f64) {}
}

/// Handle returned by `DecoChart::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Series listeners keyed by series index, kept in registration order.
#[derive(Default)]
pub(super) struct ListenerRegistry {
    by_series: IndexMap<usize, Vec<(ListenerId, Box<dyn SeriesListener>)>>,
    next_id: u64,
}

impl ListenerRegistry {
    pub(super) fn subscribe(
        &mut self,
        series_index: usize,
        listener: Box<dyn SeriesListener>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.by_series
            .entry(series_index)
            .or_default()
            .push((id, listener));
        id
    }

    pub(super) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        for listeners in self.by_series.values_mut() {
            if let Some(position) = listeners.iter().position(|(entry, _)| *entry == id) {
                listeners.remove(position);
                return true;
            }
        }
        false
    }

    pub(super) fn count_for(&self, series_index: usize) -> usize {
        self.by_series.get(&series_index).map_or(0, Vec::len)
    }

    pub(super) fn clear(&mut self) {
        self.by_series.clear();
    }

    /// Delivers `notice` from `series_index` to its listeners and event callbacks.
    pub(super) fn deliver(&mut self, series_index: usize, notice: SeriesNotice) {
        match notice {
            SeriesNotice::AnimationProgress { progress, value } => {
                if let Some(listeners) = self.by_series.get_mut(&series_index) {
                    for (_, listener) in listeners.iter_mut() {
                        listener.on_animation_progress(progress, value);
                    }
                }
            }
            SeriesNotice::DisplayProgress { percent } => {
                if let Some(listeners) = self.by_series.get_mut(&series_index) {
                    for (_, listener) in listeners.iter_mut() {
                        listener.on_display_progress(percent);
                    }
                }
            }
            SeriesNotice::EventStarted(event) => event.notify_start(),
            SeriesNotice::EventEnded(event) => event.notify_end(),
        }
    }
}
