//! Shared test infrastructure for nixie-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use embedded_hal::delay::DelayNs;
use nixie_clock::{
    AmbientLight, ButtonSampler, DisplayBuffer, DisplaySink, KeyEvent, PeripheralError,
    RadioClock, TemperatureReading, TemperatureSensor, TickTimer, TimeDateRaw,
};

// ============================================================================
// Mock Board
// ============================================================================

/// Board double that records everything the clock does to it.
pub struct MockBoard {
    pub radio: Result<TimeDateRaw, PeripheralError>,
    pub radio_reads: u32,
    pub temperature: Result<TemperatureReading, PeripheralError>,
    pub temperature_reads: u32,
    pub light: u8,
    pub held: [bool; 4],
    pub reloads: heapless::Vec<u8, 16>,
    pub delay_ns_total: u64,
    transmitted: heapless::Vec<DisplayBuffer, 128>,
    transmit_count: usize,
    last_frame: Option<DisplayBuffer>,
}

impl MockBoard {
    /// Bright room, no radio, sensor reading 20.0 degrees.
    pub fn new() -> Self {
        Self {
            radio: Err(PeripheralError::NoData),
            radio_reads: 0,
            temperature: Ok(TemperatureReading::new(20, 0)),
            temperature_reads: 0,
            light: 200,
            held: [false; 4],
            reloads: heapless::Vec::new(),
            delay_ns_total: 0,
            transmitted: heapless::Vec::new(),
            transmit_count: 0,
            last_frame: None,
        }
    }

    pub fn with_radio(mut self, raw: TimeDateRaw) -> Self {
        self.radio = Ok(raw);
        self
    }

    pub fn last_frame(&self) -> Option<DisplayBuffer> {
        self.last_frame
    }

    pub fn transmit_count(&self) -> usize {
        self.transmit_count
    }

    /// Buffers transmitted since the last [`clear_history`](Self::clear_history),
    /// up to the history capacity.
    pub fn history(&self) -> &[DisplayBuffer] {
        &self.transmitted
    }

    pub fn clear_history(&mut self) {
        self.transmitted.clear();
        self.transmit_count = 0;
        self.delay_ns_total = 0;
    }

    pub fn delay_ms_total(&self) -> u64 {
        self.delay_ns_total / 1_000_000
    }
}

impl TemperatureSensor for MockBoard {
    fn read_temperature(&mut self) -> Result<TemperatureReading, PeripheralError> {
        self.temperature_reads += 1;
        self.temperature
    }
}

impl RadioClock for MockBoard {
    fn read_radio_time(&mut self) -> Result<TimeDateRaw, PeripheralError> {
        self.radio_reads += 1;
        self.radio
    }
}

impl AmbientLight for MockBoard {
    fn sample_ambient_light(&mut self) -> u8 {
        self.light
    }
}

impl ButtonSampler for MockBoard {
    fn sample_button(&mut self, key: KeyEvent) -> bool {
        self.held[key as usize]
    }
}

impl DisplaySink for MockBoard {
    fn transmit_display(&mut self, buffer: &DisplayBuffer) {
        self.transmit_count += 1;
        self.last_frame = Some(*buffer);
        let _ = self.transmitted.push(*buffer);
    }
}

impl TickTimer for MockBoard {
    fn reload(&mut self, count: u8) {
        let _ = self.reloads.push(count);
    }
}

impl DelayNs for MockBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ns_total += u64::from(ns);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// A radio reading with neutral weekday and offsets.
pub fn radio_time(hours: u8, minutes: u8, seconds: u8, day: u8, month: u8, year: u8) -> TimeDateRaw {
    TimeDateRaw {
        seconds,
        minutes,
        hours,
        day,
        month,
        year,
        weekday: 1,
        standard_offset: 1,
        daylight_offset: 0,
    }
}

/// Samples per RC5 half bit at 15625 Hz (889 us is 13.9 samples).
pub const RC5_HALF_BIT_SAMPLES: usize = 14;

/// Samples of idle line before and after a synthesized frame.
pub const RC5_IDLE_SAMPLES: usize = 64;

/// Receiver pin levels (`true` = high = space) for one RC5 frame, framed
/// by idle line on both sides.
pub fn rc5_samples(word: u16) -> heapless::Vec<bool, 1024> {
    let mut samples = heapless::Vec::new();
    for _ in 0..RC5_IDLE_SAMPLES {
        let _ = samples.push(true);
    }
    for bit in (0..14).rev() {
        // A one is space then mark, a zero is mark then space.
        let one = word & (1 << bit) != 0;
        for _ in 0..RC5_HALF_BIT_SAMPLES {
            let _ = samples.push(one);
        }
        for _ in 0..RC5_HALF_BIT_SAMPLES {
            let _ = samples.push(!one);
        }
    }
    for _ in 0..RC5_IDLE_SAMPLES {
        let _ = samples.push(true);
    }
    samples
}
