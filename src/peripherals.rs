//! Hardware collaborator traits.
//!
//! The clock core never touches registers. Implement these traits for your
//! board (I²C sensor drivers, ADC, GPIO, shift-register output, timer) and
//! hand the implementation to [`NixieClock`](crate::NixieClock).
//!
//! All calls are synchronous. Implementations that need settling delays
//! (sensor conversion time, bus retries) perform them internally and must
//! return within a bounded time.

use crate::render::DisplayBuffer;
use crate::types::{KeyEvent, TimeDateRaw};
use embedded_hal::delay::DelayNs;

/// Errors reported by peripheral transactions.
///
/// None of these are fatal to the clock: the caller falls back to stale
/// state or a fault glyph and retries on the next scheduled attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralError {
    /// Bus transaction failed (no acknowledge, arbitration lost, ...).
    Bus,
    /// The device answered but has no valid data yet.
    NoData,
    /// The device did not answer within its retry budget.
    Timeout,
}

impl core::fmt::Display for PeripheralError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PeripheralError::Bus => write!(f, "peripheral bus transaction failed"),
            PeripheralError::NoData => write!(f, "peripheral has no valid data"),
            PeripheralError::Timeout => write!(f, "peripheral did not respond"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PeripheralError {}

/// Raw temperature register pair.
///
/// `integer` is the two's-complement whole-degree byte, `fraction` carries
/// the half-degree flag in its top bit (LM75 layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureReading {
    pub integer: u8,
    pub fraction: u8,
}

impl TemperatureReading {
    pub const fn new(integer: u8, fraction: u8) -> Self {
        Self { integer, fraction }
    }
}

/// Temperature sensor on the board.
pub trait TemperatureSensor {
    /// Triggers a conversion and reads the result.
    fn read_temperature(&mut self) -> Result<TemperatureReading, PeripheralError>;
}

/// Radio time receiver (DCF77 module).
pub trait RadioClock {
    /// Reads the receiver's current time and date.
    ///
    /// Implementations may return `Ok` with `day == 0` or garbage fields; the
    /// clock engine range-checks the reading and treats a bad one as
    /// [`PeripheralError::NoData`].
    fn read_radio_time(&mut self) -> Result<TimeDateRaw, PeripheralError>;
}

/// Ambient light sensor (photoresistor on an ADC input).
pub trait AmbientLight {
    /// Returns the current brightness, 0 (dark) to 255 (bright).
    fn sample_ambient_light(&mut self) -> u8;
}

/// Local push-buttons.
pub trait ButtonSampler {
    /// Returns the raw, unfiltered pressed state of the button for `key`.
    fn sample_button(&mut self, key: KeyEvent) -> bool;
}

/// Shift-register chain driving the tubes and indicator lamps.
pub trait DisplaySink {
    /// Shifts the buffer out and latches it. Fire-and-forget.
    fn transmit_display(&mut self, buffer: &DisplayBuffer);
}

/// The asynchronous one-second timer.
pub trait TickTimer {
    /// Reloads the timer's countdown with `count` and waits until the new
    /// value has taken effect.
    ///
    /// On a 256-count-per-second timer, 255 makes the next tick fire almost
    /// immediately and 25 skips the first ~100 ms of the second.
    fn reload(&mut self, count: u8);
}

/// Everything the foreground loop needs from the board.
///
/// Blanket-implemented for any type that implements all collaborator traits,
/// so a board crate usually implements them on a single struct.
pub trait Board:
    TemperatureSensor + RadioClock + AmbientLight + ButtonSampler + DisplaySink + TickTimer + DelayNs
{
}

impl<T> Board for T where
    T: TemperatureSensor
        + RadioClock
        + AmbientLight
        + ButtonSampler
        + DisplaySink
        + TickTimer
        + DelayNs
{
}
