//! Display-mode state machine.
//!
//! ```text
//!        Key4          Key4              Key4             Key4
//!  Time ─────▶ Date ─────▶ Temperature ─────▶ SyncFault ─────▶ Time
//!   ▲           │              │
//!   └───────────┴──────────────┘  timeout (ticks without a key)
//! ```
//!
//! Key1-Key3 never change the mode; they map to time/date adjustments in
//! Time and Date view and do nothing elsewhere. Entering Date or Temperature,
//! and every adjustment made in Date view, arms the timeout.
//!
//! `Scroll` is entered and left within a single tick by
//! [`DisplayState::play_scroll`], so key handling never observes it.

use crate::clock::Clock;
use crate::peripherals::{DisplaySink, TemperatureSensor};
use crate::render::{
    DisplayBuffer, render_date, render_scroll, render_sync_fault, render_temperature, render_time,
};
use crate::types::{DisplayMode, KeyEvent};
use embedded_hal::delay::DelayNs;

/// What a key press asks the clock engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// Nothing beyond a redraw.
    None,
    /// The display moved to another mode.
    ModeChanged(DisplayMode),
    ResetSeconds,
    AddMinute,
    AddHour,
    AddYear,
    AddMonth,
    AddDay,
}

/// Mode, timeout and blanking state of the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    mode: DisplayMode,
    saved_mode: DisplayMode,
    timeout: u8,
    dark: bool,
    scroll_frame: u8,
}

impl DisplayState {
    /// Time view, no timeout, not blanked.
    pub const fn new() -> Self {
        Self {
            mode: DisplayMode::Time,
            saved_mode: DisplayMode::Time,
            timeout: 0,
            dark: false,
            scroll_frame: 0,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Ticks left before the view falls back to Time.
    pub fn timeout(&self) -> u8 {
        self.timeout
    }

    /// Whether the last ambient sample blanked the display.
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Records an ambient light sample. Returns whether the display is now
    /// blanked.
    pub fn update_ambient(&mut self, level: u8, dark_threshold: u8) -> bool {
        let dark = level < dark_threshold;
        if dark != self.dark {
            debug!("ambient {=u8}: blanked={=bool}", level, dark);
        }
        self.dark = dark;
        dark
    }

    /// Starts (or restarts) the fallback countdown.
    pub fn arm_timeout(&mut self, ticks: u8) {
        self.timeout = ticks;
    }

    /// Interprets a key for the current mode.
    ///
    /// Mode changes and timeout arming happen here; adjustments are returned
    /// for the caller to apply to the [`Clock`].
    pub fn handle_key(&mut self, key: KeyEvent, timeout_ticks: u8) -> KeyAction {
        match (key, self.mode) {
            (KeyEvent::Key4, _) => {
                let next = self.mode.next();
                if matches!(next, DisplayMode::Date | DisplayMode::Temperature) {
                    self.arm_timeout(timeout_ticks);
                }
                info!("display mode {} -> {}", self.mode, next);
                self.mode = next;
                KeyAction::ModeChanged(next)
            }
            (KeyEvent::Key1, DisplayMode::Time) => KeyAction::ResetSeconds,
            (KeyEvent::Key2, DisplayMode::Time) => KeyAction::AddMinute,
            (KeyEvent::Key3, DisplayMode::Time) => KeyAction::AddHour,
            (KeyEvent::Key1, DisplayMode::Date) => {
                self.arm_timeout(timeout_ticks);
                KeyAction::AddYear
            }
            (KeyEvent::Key2, DisplayMode::Date) => {
                self.arm_timeout(timeout_ticks);
                KeyAction::AddMonth
            }
            (KeyEvent::Key3, DisplayMode::Date) => {
                self.arm_timeout(timeout_ticks);
                KeyAction::AddDay
            }
            _ => KeyAction::None,
        }
    }

    /// Per-tick timeout handling: counts down while armed, otherwise forces
    /// Time view.
    pub fn on_tick(&mut self) {
        if self.timeout > 0 {
            self.timeout -= 1;
        } else if self.mode != DisplayMode::Time {
            debug!("display timeout, back to time");
            self.mode = DisplayMode::Time;
        }
    }

    /// Draws the current mode.
    ///
    /// Only the Temperature view talks to hardware (one sensor read). With
    /// the same state, clock and sensor result the output is always the
    /// same.
    pub fn render<S: TemperatureSensor>(&self, clock: &Clock, sensor: &mut S) -> DisplayBuffer {
        if self.dark {
            return DisplayBuffer::BLANK;
        }

        match self.mode {
            DisplayMode::Time => render_time(clock.now(), clock.sync_state()),
            DisplayMode::Date => render_date(clock.now(), clock.sync_state()),
            DisplayMode::SyncFault => render_sync_fault(clock.sync_state()),
            DisplayMode::Temperature => {
                let reading = sensor.read_temperature();
                if let Err(e) = reading {
                    warn!("temperature read failed: {}", e);
                }
                render_temperature(reading)
            }
            DisplayMode::Scroll => render_scroll(self.scroll_frame),
        }
    }

    /// Plays the scroll animation: `frames` frames, each followed by a
    /// `frame_delay_ms` pause, then restores the previous mode.
    pub fn play_scroll<B>(&mut self, clock: &Clock, board: &mut B, frames: u8, frame_delay_ms: u32)
    where
        B: TemperatureSensor + DisplaySink + DelayNs,
    {
        debug!("scroll: {=u8} frames", frames);
        self.saved_mode = self.mode;
        self.mode = DisplayMode::Scroll;

        for frame in 0..frames {
            self.scroll_frame = frame;
            let buffer = self.render(clock, board);
            board.transmit_display(&buffer);
            board.delay_ms(frame_delay_ms);
        }

        self.mode = self.saved_mode;
        self.scroll_frame = 0;
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}
