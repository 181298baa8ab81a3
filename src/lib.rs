#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`NixieClock`**: The foreground controller. Call `poll()` from the main loop
//! - **`TickSource`**: One-second tick flag and radio sync window, fed by interrupts
//! - **`Rc5Decoder`**: Sampling IR decoder, runs inside a periodic interrupt
//! - **`Rc5Mailbox`**: Hands completed RC5 frames to the foreground
//! - **`Clock`**: Time/date engine with radio synchronization and manual adjustment
//! - **`DisplayState`**: Mode state machine (Time, Date, Temperature, SyncFault)
//! - **`DisplayBuffer`**: Six BCD digits plus eight indicator lamps
//! - **`Board`**: The peripheral traits to implement for your hardware
//! - **`ClockConfig`**: Thresholds, timeouts and animation timing
//!
//! The crate never touches registers. Everything hardware-specific sits behind
//! the traits in [`peripherals`], so the whole control core runs on the host in
//! tests.

#[macro_use]
mod fmt;

pub mod app;
pub mod clock;
pub mod config;
pub mod display;
pub mod input;
pub mod peripherals;
pub mod rc5;
pub mod render;
pub mod shared;
pub mod tick;
pub mod types;

pub use app::NixieClock;
pub use clock::{Clock, SyncState};
pub use config::ClockConfig;
pub use display::{DisplayState, KeyAction};
pub use input::{InputArbiter, key_for_command};
pub use peripherals::{
    AmbientLight, Board, ButtonSampler, DisplaySink, PeripheralError, RadioClock,
    TemperatureReading, TemperatureSensor, TickTimer,
};
pub use rc5::{Rc5Decoder, Rc5Frame, Rc5Thresholds};
pub use render::{
    BLANK_DIGIT, DisplayBuffer, Indicators, render_date, render_scroll, render_sync_fault,
    render_temperature, render_time,
};
pub use shared::{Flag, Rc5Mailbox, SharedCell};
pub use tick::{EDGE_RELOAD, TickSource};
pub use types::{DisplayMode, KeyEvent, TimeDate, TimeDateRaw, days_in_month};
