//! RC5 infrared remote-control decoder.
//!
//! RC5 sends 14 biphase-coded bits, 1.778 ms each:
//!
//! ```text
//!  S1 S2 T  A4 A3 A2 A1 A0 C5 C4 C3 C2 C1 C0
//!   1  ~C6  toggle  address       command
//! ```
//!
//! A "1" is a space-to-mark transition in the middle of the bit cell, a "0"
//! is mark-to-space. The receiver output is active low, so a low pin level
//! is a mark.
//!
//! The decoder is driven by a fixed-rate sampling interrupt. It only looks at
//! edges: an edge more than 0.8 bit periods after the last recorded edge is a
//! mid-bit transition and yields one bit; edges closer than that are cell
//! boundaries between equal bits and are skipped; edges closer than
//! 0.4 bit periods are noise and abort the frame. After 1.2 bit periods
//! without a recorded edge the accumulated bits are checked and, if they form
//! exactly 14 bits with the start bit set, published.

use crate::shared::Rc5Mailbox;

/// Duration of one RC5 bit cell in nanoseconds.
pub const RC5_BIT_NS: u64 = 1_778_000;

/// Sample rate of the firmware's sampling interrupt: 8 MHz / 512.
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 15_625;

/// Edge-age thresholds, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rc5Thresholds {
    /// Edges younger than this are noise.
    pub min: u8,
    /// Edges older than this start a new bit.
    pub half: u8,
    /// No recorded edge for longer than this ends the frame.
    pub max: u8,
}

impl Rc5Thresholds {
    /// Computes the thresholds for a sampling interrupt running at `hz`.
    ///
    /// The rate must give at least 8 samples per half bit (about 9 kHz) for
    /// the three thresholds to be distinct; results are rounded to nearest
    /// and saturate at 255.
    pub const fn for_sample_rate(hz: u32) -> Self {
        Self {
            min: scaled(hz, 4),
            half: scaled(hz, 8),
            max: scaled(hz, 12),
        }
    }
}

impl Default for Rc5Thresholds {
    fn default() -> Self {
        Self::for_sample_rate(DEFAULT_SAMPLE_RATE_HZ)
    }
}

/// `hz * RC5_BIT * tenths / 10`, in samples, rounded.
const fn scaled(hz: u32, tenths: u64) -> u8 {
    let samples = (hz as u64 * RC5_BIT_NS * tenths + 5_000_000_000) / 10_000_000_000;
    if samples > u8::MAX as u64 {
        u8::MAX
    } else {
        samples as u8
    }
}

const START_BIT: u16 = 1 << 13;
const OVERFLOW_BIT: u16 = 1 << 14;

/// Sampling RC5 demodulator.
///
/// Owned by the sampling interrupt. Call [`sample`](Self::sample) once per
/// sampling period with the raw pin level.
#[derive(Debug, Clone)]
pub struct Rc5Decoder {
    thresholds: Rc5Thresholds,
    last_level: bool,
    edge_age: u8,
    shift: u16,
}

impl Rc5Decoder {
    /// Creates an idle decoder. The line is assumed to rest high (space).
    pub const fn new(thresholds: Rc5Thresholds) -> Self {
        Self {
            thresholds,
            last_level: true,
            edge_age: 0,
            shift: 0,
        }
    }

    /// Feeds one sample of the receiver pin (`true` = high = space).
    ///
    /// Returns the 14-bit frame word when a frame completes on this sample.
    pub fn sample(&mut self, level: bool) -> Option<u16> {
        let mut completed = None;

        self.edge_age = self.edge_age.saturating_add(1);
        if self.edge_age > self.thresholds.max {
            if self.shift & OVERFLOW_BIT == 0 && self.shift & START_BIT != 0 {
                completed = Some(self.shift);
            }
            self.shift = 0;
        }

        if level != self.last_level {
            self.last_level = level;

            if self.edge_age < self.thresholds.min {
                self.shift = 0;
            }

            if self.shift == 0 || self.edge_age > self.thresholds.half {
                if self.shift & OVERFLOW_BIT == 0 {
                    self.shift <<= 1;
                }
                if !level {
                    self.shift |= 1;
                }
                // Only recorded edges restart the count; cell-boundary
                // edges must not, or the next mid-bit edge looks too young.
                self.edge_age = 0;
            }
        }

        completed
    }

    /// Feeds one sample and publishes a completed frame into `mailbox`.
    ///
    /// Intended to be the whole body of the sampling interrupt handler.
    pub fn sample_into(&mut self, level: bool, mailbox: &Rc5Mailbox) {
        if let Some(frame) = self.sample(level) {
            mailbox.publish(Some(frame));
        }
    }

    /// Bits accumulated for the frame in progress.
    pub fn pending_bits(&self) -> u16 {
        self.shift
    }
}

impl Default for Rc5Decoder {
    fn default() -> Self {
        Self::new(Rc5Thresholds::default())
    }
}

/// Fields of a received RC5 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rc5Frame {
    /// Toggles on every new key press, constant while a key is held.
    pub toggle: bool,
    /// Device address, 0-31.
    pub address: u8,
    /// Command, 0-127. Bit 6 is the inverted second start bit (RC5X).
    pub command: u8,
}

impl Rc5Frame {
    /// Splits a 14-bit frame word into its fields.
    pub fn from_word(word: u16) -> Self {
        Self {
            toggle: word & (1 << 11) != 0,
            address: ((word >> 6) & 0x1F) as u8,
            command: ((word & 0x3F) | (!word >> 6 & 0x40)) as u8,
        }
    }

    /// Builds the 14-bit word for these fields, with the given toggle state.
    ///
    /// Inverse of [`from_word`](Self::from_word); used to synthesize frames.
    pub fn to_word(&self) -> u16 {
        let command = self.command as u16 & 0x7F;
        let field = if command & 0x40 == 0 { 1 << 12 } else { 0 };
        START_BIT
            | field
            | if self.toggle { 1 << 11 } else { 0 }
            | ((self.address as u16 & 0x1F) << 6)
            | (command & 0x3F)
    }
}
