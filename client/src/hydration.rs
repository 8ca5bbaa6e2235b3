//! Hydration lifecycle gate.

/// Where the store is in its load-from-persistence lifecycle.
///
/// Starts at `Hydrating`; moves to `Ready` exactly once, after the
/// first successful rehydrate. There is no way back within a store's
/// lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Hydrating,
    Ready,
}

/// Tracks whether the session store has finished loading persisted
/// state. While `Hydrating`, session-dependent UI must render the
/// state-independent placeholder.
#[derive(Debug)]
pub struct HydrationCoordinator {
    phase: Phase,
}

impl HydrationCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self { phase: Phase::Hydrating }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Fire the one-time `Hydrating -> Ready` transition. Calling it
    /// again is a no-op.
    pub fn mark_ready(&mut self) {
        self.phase = Phase::Ready;
    }
}

impl Default for HydrationCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "hydration_test.rs"]
mod tests;
