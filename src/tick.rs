//! The one-second tick and the external-reference synchronization window.
//!
//! Two interrupt sources feed this module:
//!
//! - the asynchronous second timer, which calls
//!   [`TickSource::on_timer_overflow`] once per second, and
//! - the external reference input (the receiver's second pulse), which calls
//!   [`TickSource::on_reference_edge`] on every rising edge.
//!
//! The foreground loop consumes ticks with [`TickSource::take_tick`]. Ticks
//! are coalesced: the flag holds at most one pending second.

use crate::peripherals::TickTimer;
use crate::shared::Flag;

/// Timer reload applied on a reference edge: overflow on the next count.
pub const EDGE_RELOAD: u8 = 255;

/// Pending-tick and sync-armed flags, shared with the interrupt handlers.
///
/// Place it in a `static` and hand a reference to the foreground
/// controller.
pub struct TickSource {
    pending: Flag,
    sync_armed: Flag,
}

impl TickSource {
    /// No tick pending, window disarmed.
    pub const fn new() -> Self {
        Self {
            pending: Flag::cleared(),
            sync_armed: Flag::cleared(),
        }
    }

    /// Timer interrupt: one second elapsed.
    pub fn on_timer_overflow(&self) {
        self.pending.raise();
    }

    /// Consumes the pending tick, if any.
    pub fn take_tick(&self) -> bool {
        self.pending.take_raised()
    }

    /// Arms the window: the next reference edge will snap the second
    /// boundary.
    pub fn arm_sync(&self) {
        self.sync_armed.raise();
    }

    /// Whether a reference edge is currently awaited.
    pub fn is_sync_armed(&self) -> bool {
        self.sync_armed.peek()
    }

    /// Reference-edge interrupt.
    ///
    /// If the window is armed, disarms it and reloads the timer so the next
    /// tick fires right away. Returns whether the timer was reloaded.
    pub fn on_reference_edge<T: TickTimer>(&self, timer: &mut T) -> bool {
        if self.sync_armed.take_raised() {
            timer.reload(EDGE_RELOAD);
            true
        } else {
            false
        }
    }
}

impl Default for TickSource {
    fn default() -> Self {
        Self::new()
    }
}
