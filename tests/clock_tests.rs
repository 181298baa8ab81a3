//! Integration tests for the clock engine and its radio synchronization

mod common;
use common::*;

use nixie_clock::{Clock, PeripheralError, TickSource, TimeDate, days_in_month};

#[test]
fn a_day_of_ticks_returns_to_midnight_next_day() {
    let mut clock = Clock::new(TimeDate::new(0, 0, 0, 15, 6, 24));
    for _ in 0..86_400 {
        clock.advance();
        let now = clock.now();
        assert!(now.seconds <= 59);
        assert!(now.minutes <= 59);
        assert!(now.hours <= 23);
        assert!(now.day >= 1 && now.day <= days_in_month(now.month));
        assert!(now.month >= 1 && now.month <= 12);
        assert!(now.year <= 99);
    }
    assert_eq!(*clock.now(), TimeDate::new(0, 0, 0, 16, 6, 24));
}

#[test]
fn end_of_month_rollover() {
    let mut clock = Clock::new(TimeDate::new(23, 59, 59, 30, 4, 24));
    clock.advance();
    assert_eq!(*clock.now(), TimeDate::new(0, 0, 0, 1, 5, 24));
}

#[test]
fn february_runs_to_the_twenty_ninth() {
    let mut clock = Clock::new(TimeDate::new(23, 59, 59, 28, 2, 23));
    clock.advance();
    assert_eq!(*clock.now(), TimeDate::new(0, 0, 0, 29, 2, 23));

    clock.set(TimeDate::new(23, 59, 59, 29, 2, 23));
    clock.advance();
    assert_eq!(*clock.now(), TimeDate::new(0, 0, 0, 1, 3, 23));
}

#[test]
fn new_year_wraps_century() {
    let mut clock = Clock::new(TimeDate::new(23, 59, 59, 31, 12, 99));
    clock.advance();
    assert_eq!(*clock.now(), TimeDate::new(0, 0, 0, 1, 1, 0));
}

#[test]
fn successful_sync_adopts_radio_time() {
    let ticks = TickSource::new();
    let mut board = MockBoard::new().with_radio(radio_time(13, 14, 15, 3, 4, 25));
    let mut clock = Clock::new(TimeDate::new(1, 2, 3, 4, 5, 6));

    assert_eq!(clock.synchronize(&mut board, &ticks), Ok(()));
    assert_eq!(clock.now().hours, 13);
    assert_eq!(clock.now().standard_offset, 1);
    assert!(!clock.sync_state().failed);
    assert_eq!(clock.sync_state().failed_minutes, 0);
    assert!(ticks.is_sync_armed());
}

#[test]
fn failed_sync_keeps_time() {
    let ticks = TickSource::new();
    let mut board = MockBoard::new();
    board.radio = Err(PeripheralError::Timeout);
    let mut clock = Clock::new(TimeDate::new(1, 2, 3, 4, 5, 6));

    assert_eq!(
        clock.synchronize(&mut board, &ticks),
        Err(PeripheralError::Timeout)
    );
    assert_eq!(*clock.now(), TimeDate::new(1, 2, 3, 4, 5, 6));
    assert!(clock.sync_state().failed);
    assert!(!ticks.is_sync_armed());
}

#[test]
fn sync_is_attempted_only_at_top_of_hour_while_healthy() {
    let ticks = TickSource::new();
    let mut board = MockBoard::new().with_radio(radio_time(10, 0, 0, 1, 1, 25));
    let mut clock = Clock::new(TimeDate::new(9, 59, 0, 1, 1, 25));

    for _ in 0..59 {
        clock.advance();
        assert_eq!(clock.sync_if_due(&mut board, &ticks), None);
    }
    clock.advance();
    assert_eq!(clock.sync_if_due(&mut board, &ticks), Some(Ok(())));
    assert_eq!(board.radio_reads, 1);
}

#[test]
fn failed_minutes_grow_at_most_once_per_minute() {
    let ticks = TickSource::new();
    let mut board = MockBoard::new();
    let mut clock = Clock::boot(&mut board, &ticks);
    assert!(clock.sync_state().failed);

    // Three minutes of one-second ticks.
    for _ in 0..180 {
        clock.advance();
        assert!(clock.sync_if_due(&mut board, &ticks).is_some());
    }
    assert_eq!(clock.sync_state().failed_minutes, 3);
    assert_eq!(board.radio_reads, 181);

    board.radio = Ok(radio_time(8, 30, 0, 2, 2, 25));
    clock.advance();
    assert_eq!(clock.sync_if_due(&mut board, &ticks), Some(Ok(())));
    assert_eq!(clock.sync_state().failed_minutes, 0);
    assert!(!clock.sync_state().failed);
}

#[test]
fn reset_seconds_reloads_timer_and_arms_window() {
    let ticks = TickSource::new();
    let mut board = MockBoard::new();
    let mut clock = Clock::new(TimeDate::new(12, 0, 42, 1, 1, 25));

    clock.reset_seconds(&mut board, &ticks, 25);

    assert_eq!(clock.now().seconds, 0);
    assert_eq!(board.reloads.as_slice(), &[25]);
    assert!(ticks.is_sync_armed());
}

#[test]
fn day_adjustment_respects_leap_february() {
    let mut clock = Clock::new(TimeDate::new(0, 0, 0, 28, 2, 25));
    clock.add_day();
    assert_eq!(clock.now().day, 29);
    clock.add_day();
    assert_eq!(clock.now().day, 1);
}
