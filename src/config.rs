//! Tunable behavior of the clock.

// Factory defaults, as shipped.
const DARK_THRESHOLD_DEFAULT: u8 = 50;
const MODE_TIMEOUT_TICKS_DEFAULT: u8 = 5;
const SCROLL_FRAMES_DEFAULT: u8 = 10;
const SCROLL_FRAME_DELAY_MS_DEFAULT: u32 = 20;
const DEBOUNCE_MS_DEFAULT: u32 = 100;
// The second timer counts 256 per second, so this skips the ~100 ms lost to
// debouncing the key that reset the seconds.
const MANUAL_RELOAD_DEFAULT: u8 = (DEBOUNCE_MS_DEFAULT / 4) as u8;

/// Runtime configuration for [`NixieClock`](crate::NixieClock).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Ambient light readings below this blank the display.
    pub dark_threshold: u8,
    /// Ticks before Date or Temperature view falls back to Time.
    pub mode_timeout_ticks: u8,
    /// Frames shown by the ten-minute scroll animation.
    pub scroll_frames: u8,
    /// Delay after each scroll frame.
    pub scroll_frame_delay_ms: u32,
    /// Confirmation delay for a button press.
    pub debounce_ms: u32,
    /// Timer reload used when the seconds are reset by hand.
    pub manual_reload: u8,
}

impl ClockConfig {
    pub const fn new() -> Self {
        Self {
            dark_threshold: DARK_THRESHOLD_DEFAULT,
            mode_timeout_ticks: MODE_TIMEOUT_TICKS_DEFAULT,
            scroll_frames: SCROLL_FRAMES_DEFAULT,
            scroll_frame_delay_ms: SCROLL_FRAME_DELAY_MS_DEFAULT,
            debounce_ms: DEBOUNCE_MS_DEFAULT,
            manual_reload: MANUAL_RELOAD_DEFAULT,
        }
    }

    pub const fn with_dark_threshold(mut self, threshold: u8) -> Self {
        self.dark_threshold = threshold;
        self
    }

    pub const fn with_mode_timeout_ticks(mut self, ticks: u8) -> Self {
        self.mode_timeout_ticks = ticks;
        self
    }

    /// Scroll frames are drawn as a single digit, so counts above 16 wrap.
    pub const fn with_scroll(mut self, frames: u8, frame_delay_ms: u32) -> Self {
        self.scroll_frames = frames;
        self.scroll_frame_delay_ms = frame_delay_ms;
        self
    }

    pub const fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub const fn with_manual_reload(mut self, count: u8) -> Self {
        self.manual_reload = count;
        self
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::new()
    }
}
