//! Integration tests for the display state machine and renderers

mod common;
use common::*;

use nixie_clock::{
    Clock, DisplayBuffer, DisplayMode, DisplayState, Indicators, KeyEvent, PeripheralError,
    SyncState, TemperatureReading, TimeDate,
};

const TIMEOUT: u8 = 5;

fn state_in(mode: DisplayMode) -> DisplayState {
    let mut state = DisplayState::new();
    while state.mode() != mode {
        state.handle_key(KeyEvent::Key4, TIMEOUT);
    }
    state
}

#[test]
fn rendering_is_repeatable() {
    let clock = Clock::new(TimeDate::new(7, 8, 9, 10, 11, 12));
    let mut board = MockBoard::new();
    for mode in [
        DisplayMode::Time,
        DisplayMode::Date,
        DisplayMode::Temperature,
        DisplayMode::SyncFault,
    ] {
        let state = state_in(mode);
        assert_eq!(
            state.render(&clock, &mut board),
            state.render(&clock, &mut board)
        );
    }
}

#[test]
fn only_temperature_view_reads_the_sensor() {
    let clock = Clock::default();
    let mut board = MockBoard::new();

    state_in(DisplayMode::Time).render(&clock, &mut board);
    state_in(DisplayMode::Date).render(&clock, &mut board);
    state_in(DisplayMode::SyncFault).render(&clock, &mut board);
    assert_eq!(board.temperature_reads, 0);

    state_in(DisplayMode::Temperature).render(&clock, &mut board);
    assert_eq!(board.temperature_reads, 1);
}

#[test]
fn dark_room_blanks_every_view() {
    let clock = Clock::new(TimeDate::new(7, 8, 9, 10, 11, 12));
    let mut board = MockBoard::new();
    for mode in [
        DisplayMode::Time,
        DisplayMode::Date,
        DisplayMode::Temperature,
        DisplayMode::SyncFault,
    ] {
        let mut state = state_in(mode);
        state.update_ambient(10, 50);
        assert_eq!(state.render(&clock, &mut board), DisplayBuffer::BLANK);
    }
}

#[test]
fn key4_cycles_through_all_views() {
    let mut state = DisplayState::new();
    let mut seen = [DisplayMode::Time; 5];
    for slot in seen.iter_mut().skip(1) {
        state.handle_key(KeyEvent::Key4, TIMEOUT);
        *slot = state.mode();
    }
    assert_eq!(
        seen,
        [
            DisplayMode::Time,
            DisplayMode::Date,
            DisplayMode::Temperature,
            DisplayMode::SyncFault,
            DisplayMode::Time,
        ]
    );
}

#[test]
fn fourteen_and_a_half_degrees() {
    let clock = Clock::default();
    let mut board = MockBoard::new();
    board.temperature = Ok(TemperatureReading::new(0x0E, 0x80));

    let buffer = state_in(DisplayMode::Temperature).render(&clock, &mut board);

    assert_eq!(buffer.digit(2), 1);
    assert_eq!(buffer.digit(3), 4);
    assert_eq!(buffer.digit(1), 5);
    assert_eq!(buffer.digit(4), 0);
    assert_eq!(buffer.digit(5), 0);
    assert!(buffer.indicators.is_lit(1));
    assert!(!buffer.indicators.is_lit(4));
}

#[test]
fn sensor_failure_shows_fault_glyph() {
    let clock = Clock::default();
    let mut board = MockBoard::new();
    board.temperature = Err(PeripheralError::Bus);

    let buffer = state_in(DisplayMode::Temperature).render(&clock, &mut board);
    assert_eq!(buffer, DisplayBuffer::new([0; 6], Indicators::ALL));
}

#[test]
fn sync_fault_view_shows_counter() {
    let mut board = MockBoard::new();
    let ticks = nixie_clock::TickSource::new();
    let mut clock = Clock::boot(&mut board, &ticks);
    for _ in 0..(12 * 60) {
        clock.advance();
        let _ = clock.sync_if_due(&mut board, &ticks);
    }
    assert_eq!(
        *clock.sync_state(),
        SyncState {
            failed: true,
            failed_minutes: 12,
        }
    );

    let buffer = state_in(DisplayMode::SyncFault).render(&clock, &mut board);
    assert_eq!(buffer.digits, [1, 2, 0, 0, 0, 0]);
}

#[test]
fn time_view_on_the_wire() {
    let clock = Clock::new(TimeDate::new(12, 34, 56, 1, 1, 0));
    let mut board = MockBoard::new();
    let buffer = state_in(DisplayMode::Time).render(&clock, &mut board);
    assert_eq!(buffer.to_bytes(), [0x14, 0x12, 0x34, 0x56]);
}
