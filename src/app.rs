//! The foreground control loop.

use crate::clock::Clock;
use crate::config::ClockConfig;
use crate::display::{DisplayState, KeyAction};
use crate::input::InputArbiter;
use crate::peripherals::Board;
use crate::shared::Rc5Mailbox;
use crate::tick::TickSource;
use crate::types::KeyEvent;

/// Ties the clock engine, display state machine and input arbiter to a
/// [`Board`].
///
/// Interrupt handlers only touch the [`TickSource`] and the [`Rc5Mailbox`];
/// everything else runs here, from [`poll`](Self::poll).
///
/// # Example
///
/// ```ignore
/// static TICKS: TickSource = TickSource::new();
/// static RC5: Rc5Mailbox = Rc5Mailbox::empty();
///
/// let mut clock = NixieClock::new(board, &TICKS, &RC5, ClockConfig::default());
/// clock.run()
/// ```
pub struct NixieClock<'a, H: Board> {
    hw: H,
    ticks: &'a TickSource,
    input: InputArbiter<'a>,
    clock: Clock,
    display: DisplayState,
    config: ClockConfig,
}

impl<'a, H: Board> NixieClock<'a, H> {
    /// Boots the clock: one radio synchronization attempt, then Time view.
    ///
    /// Nothing is drawn until the first tick or key.
    pub fn new(
        mut hw: H,
        ticks: &'a TickSource,
        mailbox: &'a Rc5Mailbox,
        config: ClockConfig,
    ) -> Self {
        let clock = Clock::boot(&mut hw, ticks);
        info!(
            "nixie clock up, radio {}",
            if clock.sync_state().failed {
                "unavailable"
            } else {
                "synchronized"
            }
        );

        Self {
            hw,
            ticks,
            input: InputArbiter::new(mailbox, config.debounce_ms),
            clock,
            display: DisplayState::new(),
            config,
        }
    }

    /// One pass of the foreground loop.
    ///
    /// Handles a pending tick first, then at most one key.
    pub fn poll(&mut self) {
        if self.ticks.take_tick() {
            self.on_tick();
        }

        if let Some(key) = self.input.poll(&mut self.hw) {
            self.handle_key(key);
        }
    }

    /// Runs the foreground loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// Everything that happens once per second, in order: advance, radio
    /// sync, ambient light, scroll animation, mode timeout, redraw.
    pub fn on_tick(&mut self) {
        self.clock.advance();
        let _ = self.clock.sync_if_due(&mut self.hw, self.ticks);

        let level = self.hw.sample_ambient_light();
        self.display.update_ambient(level, self.config.dark_threshold);

        if self.clock.now().is_ten_minute_mark() {
            self.display.play_scroll(
                &self.clock,
                &mut self.hw,
                self.config.scroll_frames,
                self.config.scroll_frame_delay_ms,
            );
        }

        self.display.on_tick();
        self.refresh();
    }

    /// Applies a key to the current view and redraws.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.display.handle_key(key, self.config.mode_timeout_ticks) {
            KeyAction::ResetSeconds => {
                self.clock
                    .reset_seconds(&mut self.hw, self.ticks, self.config.manual_reload)
            }
            KeyAction::AddMinute => self.clock.add_minute(),
            KeyAction::AddHour => self.clock.add_hour(),
            KeyAction::AddYear => self.clock.add_year(),
            KeyAction::AddMonth => self.clock.add_month(),
            KeyAction::AddDay => self.clock.add_day(),
            KeyAction::ModeChanged(_) | KeyAction::None => {}
        }
        self.refresh();
    }

    /// Renders the current view and shifts it out.
    pub fn refresh(&mut self) {
        let buffer = self.display.render(&self.clock, &mut self.hw);
        self.hw.transmit_display(&buffer);
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    /// Consumes the controller, handing back the board.
    pub fn into_hardware(self) -> H {
        self.hw
    }
}
