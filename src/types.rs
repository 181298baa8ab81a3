//! Core value types shared by the clock engine, input arbiter and display.

/// Days per month, indexed by `month - 1`.
///
/// February always has 29 days. The table is not leap-year aware; this
/// matches the behavior of the deployed clocks and is kept for compatibility.
const DAYS_IN_MONTH: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Returns the number of days in `month` (1-12) according to the fixed table.
///
/// Out-of-range months are clamped into 1-12 so the result is always a
/// usable upper bound.
#[inline]
pub fn days_in_month(month: u8) -> u8 {
    let index = month.clamp(1, 12) - 1;
    DAYS_IN_MONTH[index as usize]
}

/// Wall-clock time and date as kept by the clock engine.
///
/// Invariants maintained by [`Clock`](crate::Clock): `seconds` and `minutes`
/// in 0-59, `hours` in 0-23, `day` in 1-[`days_in_month`], `month` in 1-12,
/// `year` in 0-99.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeDate {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub day: u8,
    pub month: u8,
    /// Two-digit year.
    pub year: u8,
    /// Weekday as last reported by the radio receiver. Not advanced locally.
    pub weekday: u8,
    /// Standard-time offset byte from the receiver, carried through unchanged.
    pub standard_offset: u8,
    /// Daylight-saving offset byte from the receiver, carried through unchanged.
    pub daylight_offset: u8,
}

impl TimeDate {
    /// Midnight on day 1 of month 1, year 00. Used when no radio time is
    /// available at startup.
    pub const EPOCH: Self = Self {
        seconds: 0,
        minutes: 0,
        hours: 0,
        day: 1,
        month: 1,
        year: 0,
        weekday: 0,
        standard_offset: 0,
        daylight_offset: 0,
    };

    /// Creates a time/date with zeroed pass-through fields.
    pub const fn new(hours: u8, minutes: u8, seconds: u8, day: u8, month: u8, year: u8) -> Self {
        Self {
            seconds,
            minutes,
            hours,
            day,
            month,
            year,
            weekday: 0,
            standard_offset: 0,
            daylight_offset: 0,
        }
    }

    /// Advances by one second, cascading through the calendar.
    ///
    /// A field already past its bound wraps to its minimum.
    pub fn advance(&mut self) {
        if self.seconds < 59 {
            self.seconds += 1;
            return;
        }
        self.seconds = 0;
        if self.minutes < 59 {
            self.minutes += 1;
            return;
        }
        self.minutes = 0;
        if self.hours < 23 {
            self.hours += 1;
            return;
        }
        self.hours = 0;
        if self.day < days_in_month(self.month) {
            self.day += 1;
            return;
        }
        self.day = 1;
        if self.month < 12 {
            self.month += 1;
            return;
        }
        self.month = 1;
        self.year = wrap_increment(self.year, 0, 99);
    }

    /// True at the start of every hour.
    #[inline]
    pub fn is_top_of_hour(&self) -> bool {
        self.minutes == 0 && self.seconds == 0
    }

    /// True at hh:m0:00, the moments the scroll animation runs.
    #[inline]
    pub fn is_ten_minute_mark(&self) -> bool {
        self.seconds == 0 && self.minutes % 10 == 0
    }
}

impl Default for TimeDate {
    fn default() -> Self {
        Self::EPOCH
    }
}

/// Increments `value`, wrapping to `min` once it exceeds `max`.
#[inline]
pub(crate) fn wrap_increment(value: u8, min: u8, max: u8) -> u8 {
    if value >= max { min } else { value + 1 }
}

/// A reading from the radio time receiver, before validation.
///
/// `day == 0` is the receiver's "no valid data" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeDateRaw {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub day: u8,
    pub month: u8,
    pub year: u8,
    pub weekday: u8,
    pub standard_offset: u8,
    pub daylight_offset: u8,
}

impl TimeDateRaw {
    /// Whether every field is in range for a [`TimeDate`].
    ///
    /// `day == 0` is the receiver's "no data" answer; an all-ones bus read
    /// fails the range checks.
    pub fn is_valid(&self) -> bool {
        self.seconds <= 59
            && self.minutes <= 59
            && self.hours <= 23
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.month)
            && self.year <= 99
    }
}

impl From<TimeDateRaw> for TimeDate {
    fn from(raw: TimeDateRaw) -> Self {
        Self {
            seconds: raw.seconds,
            minutes: raw.minutes,
            hours: raw.hours,
            day: raw.day,
            month: raw.month,
            year: raw.year,
            weekday: raw.weekday,
            standard_offset: raw.standard_offset,
            daylight_offset: raw.daylight_offset,
        }
    }
}

/// Logical key produced by the input arbiter.
///
/// Remote-control commands and local push-buttons both map onto these four
/// keys. "No key" is represented as `Option::None` by the arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEvent {
    Key1,
    Key2,
    Key3,
    /// Mode key.
    Key4,
}

impl KeyEvent {
    /// Button scan order. Only the first confirmed key is reported per poll.
    pub const SCAN_ORDER: [KeyEvent; 4] = [
        KeyEvent::Key1,
        KeyEvent::Key2,
        KeyEvent::Key3,
        KeyEvent::Key4,
    ];
}

/// What the display is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// hh:mm:ss. The initial and fallback mode.
    #[default]
    Time,
    /// yy.mm.dd.
    Date,
    /// Sensor temperature.
    Temperature,
    /// Number of minutes without a valid radio time.
    SyncFault,
    /// Transient ten-minute animation. Never observed by key handling.
    Scroll,
}

impl DisplayMode {
    /// Next mode in the Key4 cycle.
    ///
    /// `Scroll` is not part of the cycle and maps to `Time`.
    pub fn next(&self) -> Self {
        match self {
            DisplayMode::Time => DisplayMode::Date,
            DisplayMode::Date => DisplayMode::Temperature,
            DisplayMode::Temperature => DisplayMode::SyncFault,
            DisplayMode::SyncFault => DisplayMode::Time,
            DisplayMode::Scroll => DisplayMode::Time,
        }
    }
}
