//! Time/date engine with radio synchronization.
//!
//! [`Clock`] owns the running [`TimeDate`] and the synchronization health
//! ([`SyncState`]). It advances once per tick, re-reads the radio receiver
//! at the top of every hour and retries on every tick while the last attempt
//! failed.

use crate::peripherals::{PeripheralError, RadioClock, TickTimer};
use crate::tick::TickSource;
use crate::types::{TimeDate, days_in_month, wrap_increment};

/// Health of the radio synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncState {
    /// The most recent attempt failed.
    pub failed: bool,
    /// Minutes spent without a valid radio time. Saturates; reset on success.
    pub failed_minutes: u32,
}

impl SyncState {
    /// Whether the clock is currently running on its own.
    #[inline]
    pub fn is_unsynchronized(&self) -> bool {
        self.failed
    }
}

/// The clock's time/date and synchronization state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clock {
    now: TimeDate,
    sync: SyncState,
}

impl Clock {
    /// Creates a clock running from `now`, considered synchronized.
    pub const fn new(now: TimeDate) -> Self {
        Self {
            now,
            sync: SyncState {
                failed: false,
                failed_minutes: 0,
            },
        }
    }

    /// Startup: takes the radio time if the receiver already has one,
    /// otherwise starts from [`TimeDate::EPOCH`] flagged as unsynchronized.
    pub fn boot<R: RadioClock>(radio: &mut R, ticks: &TickSource) -> Self {
        let mut clock = Self::new(TimeDate::EPOCH);
        // A failed read leaves the epoch in place and the failure flag set,
        // which makes the tick policy retry every second.
        let _ = clock.synchronize(radio, ticks);
        clock
    }

    /// Current time and date.
    pub fn now(&self) -> &TimeDate {
        &self.now
    }

    /// Synchronization health.
    pub fn sync_state(&self) -> &SyncState {
        &self.sync
    }

    /// One second elapsed.
    pub fn advance(&mut self) {
        self.now.advance();
    }

    /// Reads the radio receiver and, on success, adopts its time.
    ///
    /// Success overwrites time and date (including the pass-through fields),
    /// arms the reference-edge window so the next second pulse snaps the
    /// tick, and clears the failure state. Failure sets the failure flag and
    /// leaves time and date untouched. A reading with any field out of range
    /// (including the receiver's `day == 0` sentinel) counts as
    /// [`PeripheralError::NoData`].
    pub fn synchronize<R: RadioClock>(
        &mut self,
        radio: &mut R,
        ticks: &TickSource,
    ) -> Result<(), PeripheralError> {
        let reading = radio.read_radio_time().and_then(|raw| {
            if raw.is_valid() {
                Ok(raw)
            } else {
                Err(PeripheralError::NoData)
            }
        });

        match reading {
            Ok(raw) => {
                self.now = raw.into();
                ticks.arm_sync();
                if self.sync.failed {
                    info!("radio sync restored after {=u32} min", self.sync.failed_minutes);
                }
                self.sync = SyncState::default();
                Ok(())
            }
            Err(e) => {
                if !self.sync.failed {
                    warn!("radio sync failed: {}", e);
                }
                self.sync.failed = true;
                Err(e)
            }
        }
    }

    /// Per-tick synchronization policy.
    ///
    /// Attempts a sync at the top of every hour and on every tick while
    /// unsynchronized. A failed attempt on a tick with zero seconds adds one
    /// to the failed-minutes counter. Returns the attempt's result, or `None`
    /// when no attempt was due.
    pub fn sync_if_due<R: RadioClock>(
        &mut self,
        radio: &mut R,
        ticks: &TickSource,
    ) -> Option<Result<(), PeripheralError>> {
        if !(self.now.is_top_of_hour() || self.sync.failed) {
            return None;
        }

        let on_minute = self.now.seconds == 0;
        let result = self.synchronize(radio, ticks);
        if result.is_err() && on_minute {
            self.sync.failed_minutes = self.sync.failed_minutes.saturating_add(1);
        }
        Some(result)
    }

    pub fn add_hour(&mut self) {
        self.now.hours = wrap_increment(self.now.hours, 0, 23);
        debug!("hours set to {=u8}", self.now.hours);
    }

    pub fn add_minute(&mut self) {
        self.now.minutes = wrap_increment(self.now.minutes, 0, 59);
        debug!("minutes set to {=u8}", self.now.minutes);
    }

    /// Wraps to 1 after the last day of the current month.
    pub fn add_day(&mut self) {
        self.now.day = wrap_increment(self.now.day, 1, days_in_month(self.now.month));
        debug!("day set to {=u8}", self.now.day);
    }

    /// Does not re-clamp the day; an out-of-range day rolls over at the next
    /// midnight.
    pub fn add_month(&mut self) {
        self.now.month = wrap_increment(self.now.month, 1, 12);
        debug!("month set to {=u8}", self.now.month);
    }

    pub fn add_year(&mut self) {
        self.now.year = wrap_increment(self.now.year, 0, 99);
        debug!("year set to {=u8}", self.now.year);
    }

    /// Zeroes the seconds and restarts the running second from here.
    ///
    /// Reloads the tick timer with `reload` and re-arms the reference-edge
    /// window so the next radio second pulse realigns the boundary.
    pub fn reset_seconds<T: TickTimer>(&mut self, timer: &mut T, ticks: &TickSource, reload: u8) {
        self.now.seconds = 0;
        timer.reload(reload);
        ticks.arm_sync();
        debug!("seconds reset");
    }

    /// Replaces the time and date, e.g. when restoring from a host.
    pub fn set(&mut self, now: TimeDate) {
        self.now = now;
    }
}
