// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/scheduler.rs
//
// Coalescing repaint scheduler: at most one repaint per display tick.

/// One pending flag per display tick.
///
/// Any number of requests between two ticks collapse into a single repaint.
/// Nothing is captured at request time; the repaint reads the model when the
/// tick fires.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: bool,
    requests: u64,
    frames: u64,
}

impl FrameScheduler {
    /// Ask for a repaint on the next tick.
    pub fn request(&mut self) {
        self.requests += 1;
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending flag at tick time.
    pub fn take(&mut self) -> bool {
        let pending = std::mem::take(&mut self.pending);
        if pending {
            self.frames += 1;
        }
        pending
    }

    /// Drop a pending repaint without running it.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    /// Total requests and frames actually run, for diagnostics.
    pub fn stats(&self) -> (u64, u64) {
        (self.requests, self.frames)
    }
}
