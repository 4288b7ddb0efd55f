use std::time::Duration;

use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingLoad {
    level: usize,
    remaining: Duration,
}

/// Single-slot deferred level load, ticked by the frame loop.
#[derive(Debug, Clone, Default)]
pub struct TransitionTimer {
    pending: Option<PendingLoad>,
}

impl TransitionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer. Returns `false` and leaves the pending load untouched
    /// if one is already armed.
    pub fn arm(&mut self, level: usize, delay: Duration) -> bool {
        if let Some(pending) = self.pending {
            warn!(
                "level load to {} already pending, ignoring request for {level}",
                pending.level
            );
            return false;
        }
        self.pending = Some(PendingLoad {
            level,
            remaining: delay,
        });
        true
    }

    /// Advance by `delta`; yields the target level on the tick the delay
    /// runs out and never again for the same arming.
    pub fn tick(&mut self, delta: Duration) -> Option<usize> {
        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(delta);
        if pending.remaining.is_zero() {
            return self.pending.take().map(|p| p.level);
        }
        None
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn target(&self) -> Option<usize> {
        self.pending.map(|p| p.level)
    }

    /// Drop any pending load; used when the craft that armed it is replaced.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
