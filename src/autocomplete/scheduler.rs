/// Per-field debounce bookkeeping.
///
/// The host owns the actual browser timer; this only tracks which timer
/// generation is still allowed to fire. Rescheduling bumps the generation, so a
/// callback from a superseded timer that slipped past `clearTimeout` is a no-op.
#[derive(Clone, Debug, Default)]
pub(crate) struct DebounceScheduler {
    generation: u64,
    pending: Option<u64>,
}

impl DebounceScheduler {
    /// Supersede any pending timer and return the generation of the new one.
    pub fn schedule(&mut self) -> u64 {
        self.generation = self.generation.saturating_add(1);
        self.pending = Some(self.generation);
        self.generation
    }

    /// Drop the pending timer, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Called when a timer fires. True only for the latest, still-pending timer.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.pending == Some(generation) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
