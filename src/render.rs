//! Display buffer and the per-mode renderers.
//!
//! The tubes are fed through four daisy-chained 8-bit shift registers: six
//! BCD digits (a 4-to-10 decoder per tube, code 15 blanks the tube) and eight
//! indicator lamps.
//!
//! # Wire format
//!
//! [`DisplayBuffer::to_bytes`] produces the four bytes in transmission order,
//! each shifted out most significant bit first:
//!
//! | byte | bits 7..4 | bits 3..0 |
//! |------|-----------|-----------|
//! | 0    | p7..p4    | p3..p0    |
//! | 1    | d4        | d5        |
//! | 2    | d2        | d3        |
//! | 3    | d0        | d1        |
//!
//! Read as a little-endian `u32` ([`DisplayBuffer::to_word`]) the indicators
//! are the low byte and `d0` is the most significant nibble.

use crate::clock::SyncState;
use crate::peripherals::{PeripheralError, TemperatureReading};
use crate::types::TimeDate;

/// Digit code that turns a tube off.
pub const BLANK_DIGIT: u8 = 15;

/// Eight independent indicator lamps, bit `n` is `p<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indicators(u8);

impl Indicators {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0xFF);

    pub const P0: Self = Self(1 << 0);
    pub const P1: Self = Self(1 << 1);
    pub const P2: Self = Self(1 << 2);
    pub const P3: Self = Self(1 << 3);
    pub const P4: Self = Self(1 << 4);
    pub const P5: Self = Self(1 << 5);
    pub const P6: Self = Self(1 << 6);
    pub const P7: Self = Self(1 << 7);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `self` with `other` added when `on` is true.
    pub const fn with_if(self, other: Self, on: bool) -> Self {
        if on { self.union(other) } else { self }
    }

    /// Whether indicator `p<index>` is lit. Indices above 7 are never lit.
    pub const fn is_lit(self, index: u8) -> bool {
        index < 8 && self.0 & (1 << index) != 0
    }
}

impl core::ops::BitOr for Indicators {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Everything the shift-register chain shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    /// `d0..d5`, each 0-15.
    pub digits: [u8; 6],
    pub indicators: Indicators,
}

impl DisplayBuffer {
    /// All tubes and lamps off.
    pub const BLANK: Self = Self {
        digits: [BLANK_DIGIT; 6],
        indicators: Indicators::NONE,
    };

    /// Creates a buffer; digit values are masked to four bits.
    pub const fn new(digits: [u8; 6], indicators: Indicators) -> Self {
        let mut masked = [0u8; 6];
        let mut i = 0;
        while i < 6 {
            masked[i] = digits[i] & 0x0F;
            i += 1;
        }
        Self {
            digits: masked,
            indicators,
        }
    }

    /// Digit slot `d<index>`.
    pub fn digit(&self, index: usize) -> u8 {
        self.digits[index]
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }

    /// Serializes to the four shift-register bytes, in transmission order.
    pub const fn to_bytes(&self) -> [u8; 4] {
        let d = &self.digits;
        [
            self.indicators.bits(),
            (d[4] & 0x0F) << 4 | (d[5] & 0x0F),
            (d[2] & 0x0F) << 4 | (d[3] & 0x0F),
            (d[0] & 0x0F) << 4 | (d[1] & 0x0F),
        ]
    }

    /// The same bits as [`to_bytes`](Self::to_bytes), as one word.
    pub const fn to_word(&self) -> u32 {
        u32::from_le_bytes(self.to_bytes())
    }
}

// Time and date views share the colon lamps; p0 flags a lost radio sync.
const CLOCK_INDICATORS: Indicators = Indicators::P2.union(Indicators::P4);

/// `hh:mm:ss`. Each field occupies a pair of slots, tens first: seconds in
/// d0/d1, minutes in d2/d3, hours in d4/d5.
pub fn render_time(now: &TimeDate, sync: &SyncState) -> DisplayBuffer {
    DisplayBuffer::new(
        pairs(now.hours, now.minutes, now.seconds),
        CLOCK_INDICATORS.with_if(Indicators::P0, sync.failed),
    )
}

/// `dd.mm.yy` using the same slot pairing as the time view: year in
/// d0/d1, month in d2/d3, day in d4/d5.
pub fn render_date(now: &TimeDate, sync: &SyncState) -> DisplayBuffer {
    DisplayBuffer::new(
        pairs(now.day, now.month, now.year),
        CLOCK_INDICATORS.with_if(Indicators::P0, sync.failed),
    )
}

fn pairs(high: u8, middle: u8, low: u8) -> [u8; 6] {
    [
        low / 10,
        low % 10,
        middle / 10,
        middle % 10,
        high / 10,
        high % 10,
    ]
}

/// Failed-minutes counter, read across the tubes as d4 d5 d2 d3 d0 d1.
///
/// d4 holds everything from the hundred-thousands up, truncated to a nibble,
/// so from 1,000,000 minutes on it shows codes 10-15 (blank on the tube)
/// and wraps every 1,600,000.
pub fn render_sync_fault(sync: &SyncState) -> DisplayBuffer {
    let n = sync.failed_minutes;
    let place = |power: u32| (n / power % 10) as u8;
    DisplayBuffer::new(
        [
            place(10),
            place(1),
            place(1_000),
            place(100),
            ((n / 100_000) & 0x0F) as u8,
            place(10_000),
        ],
        Indicators::P0,
    )
}

/// Temperature view.
///
/// A failed read lights every lamp over six zeros. Otherwise p1 is the
/// decimal point, p4 and p5 together mean "negative", the whole degrees sit
/// in d0 (hundreds), d2 (tens) and d3 (units), and d1 holds the tenths
/// (0 or 5). d4 and d5 are always zero.
pub fn render_temperature(reading: Result<TemperatureReading, PeripheralError>) -> DisplayBuffer {
    let reading = match reading {
        Ok(reading) => reading,
        Err(_) => return DisplayBuffer::new([0; 6], Indicators::ALL),
    };

    let negative = reading.integer & 0x80 != 0;
    let magnitude = if negative {
        (!reading.integer).wrapping_add(1)
    } else {
        reading.integer
    };
    let tenths = if reading.fraction & 0x80 != 0 { 5 } else { 0 };

    DisplayBuffer::new(
        [
            magnitude / 100,
            tenths,
            magnitude / 10 % 10,
            magnitude % 10,
            0,
            0,
        ],
        Indicators::P1.with_if(Indicators::P4 | Indicators::P5, negative),
    )
}

/// One frame of the scroll animation: every lamp lit, every tube showing
/// `frame`.
pub fn render_scroll(frame: u8) -> DisplayBuffer {
    DisplayBuffer::new([frame; 6], Indicators::ALL)
}
