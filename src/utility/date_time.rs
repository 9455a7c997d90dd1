//! # Date and time
//! The wall-clock snapshot the core works with, the weekday type that keys the alarm schedule
//! and the calendar arithmetic needed to turn relative adjustments ("one hour later", "one month
//! back") into the absolute time the clock source is set to.
use crate::error::{Error, Result};
use core::fmt;
use time::macros::datetime;
use time::{Date, Duration, Month, PrimitiveDateTime, Time};

/// Earliest year the clock supports
pub const MIN_YEAR: u16 = 2000;

/// Latest year the clock supports
pub const MAX_YEAR: u16 = 2099;

/// Supplies the current wall-clock time and accepts new absolute times.
///
/// Relative adjustments are made by computing the target time and handing it to [`adjust`].
///
/// [`adjust`]: ClockSource::adjust
pub trait ClockSource {
    /// The current date and time
    fn now(&mut self) -> TimeSnapshot;

    /// Sets the clock to the given date and time
    fn adjust(&mut self, to: TimeSnapshot);
}

/// A day of the week, 0 = Sunday up to 6 = Saturday. The only key into the alarm schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Weekday(u8);

impl Weekday {
    /// Sunday, the first day of the week
    pub const SUNDAY: Self = Self(0);
    /// Monday
    pub const MONDAY: Self = Self(1);
    /// Tuesday
    pub const TUESDAY: Self = Self(2);
    /// Wednesday
    pub const WEDNESDAY: Self = Self(3);
    /// Thursday
    pub const THURSDAY: Self = Self(4);
    /// Friday
    pub const FRIDAY: Self = Self(5);
    /// Saturday
    pub const SATURDAY: Self = Self(6);

    /// Number of days in a week
    pub const COUNT: u8 = 7;

    /// Creates a weekday, rejecting anything outside `0..=6`
    ///
    /// # Errors
    /// [`Error::InvalidWeekday`] if `day` is greater than 6.
    pub const fn new(day: u8) -> Result<Self> {
        if day < Self::COUNT {
            Ok(Self(day))
        } else {
            Err(Error::InvalidWeekday(day))
        }
    }

    /// The weekday as a number, 0 = Sunday
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// The weekday `days` days later (or earlier, for negative `days`), wrapping around the week
    #[must_use]
    pub const fn shifted(self, days: i8) -> Self {
        // always in 0..7, so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let day = (self.0 as i16 + days as i16).rem_euclid(Self::COUNT as i16) as u8;
        Self(day)
    }

    /// Iterates over all weekdays, starting with Sunday
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }
}

impl TryFrom<u8> for Weekday {
    type Error = Error;

    fn try_from(day: u8) -> Result<Self> {
        Self::new(day)
    }
}

impl From<Weekday> for u8 {
    fn from(weekday: Weekday) -> Self {
        weekday.0
    }
}

/// An immutable capture of the clock source's date and time.
///
/// A snapshot is always a valid calendar date inside `MIN_YEAR..=MAX_YEAR`. Snapshots order
/// chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSnapshot(PrimitiveDateTime);

impl TimeSnapshot {
    /// Creates a snapshot from its date and time components. The weekday is computed.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if any component is not a valid date or time, or the year is
    /// outside `MIN_YEAR..=MAX_YEAR`.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self> {
        let month = Month::try_from(month).map_err(|_| Error::OutOfRange)?;
        let date = Date::from_calendar_date(i32::from(year), month, day)
            .map_err(|_| Error::OutOfRange)?;
        let time = Time::from_hms(hour, minute, second).map_err(|_| Error::OutOfRange)?;
        Self::from_date_time(PrimitiveDateTime::new(date, time))
    }

    /// Wraps a date and time, rejecting years the clock does not support
    fn from_date_time(date_time: PrimitiveDateTime) -> Result<Self> {
        if (i32::from(MIN_YEAR)..=i32::from(MAX_YEAR)).contains(&date_time.year()) {
            Ok(Self(date_time))
        } else {
            Err(Error::OutOfRange)
        }
    }

    /// Year
    #[must_use]
    pub const fn year(&self) -> u16 {
        // always inside MIN_YEAR..=MAX_YEAR
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let year = self.0.year() as u16;
        year
    }

    /// Month, 1 to 12
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.0.month() as u8
    }

    /// Day of the month
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.0.day()
    }

    /// Day of the week
    #[must_use]
    pub const fn weekday(&self) -> Weekday {
        Weekday(self.0.weekday().number_days_from_sunday())
    }

    /// Hour, 0 to 23
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.0.hour()
    }

    /// Minute
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.0.minute()
    }

    /// Second
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.0.second()
    }

    /// Seconds elapsed since midnight of the snapshot's day
    #[must_use]
    pub fn seconds_since_midnight(&self) -> u32 {
        u32::from(self.hour()) * 3600 + u32::from(self.minute()) * 60 + u32::from(self.second())
    }

    /// The snapshot moved by `seconds` of wall-clock time, rolling over days, months and years.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if the result would leave the supported years.
    pub fn checked_add_seconds(&self, seconds: i64) -> Result<Self> {
        let moved = self
            .0
            .checked_add(Duration::seconds(seconds))
            .ok_or(Error::OutOfRange)?;
        Self::from_date_time(moved)
    }

    /// The snapshot moved by `months` calendar months. The day of the month is clamped to the
    /// length of the target month (31 January plus one month is 28 or 29 February).
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if the result would leave the supported years.
    pub fn checked_add_months(&self, months: i32) -> Result<Self> {
        let month_index = i32::from(self.year()) * 12 + i32::from(self.month()) - 1 + months;
        let year = u16::try_from(month_index.div_euclid(12)).map_err(|_| Error::OutOfRange)?;
        let month = u8::try_from(month_index.rem_euclid(12) + 1).map_err(|_| Error::OutOfRange)?;
        let day = self.day().min(get_days_in_month(month, year));
        let month = Month::try_from(month).map_err(|_| Error::OutOfRange)?;
        let date = Date::from_calendar_date(i32::from(year), month, day)
            .map_err(|_| Error::OutOfRange)?;
        Self::from_date_time(self.0.replace_date(date))
    }

    /// The snapshot moved by `years` calendar years, clamping 29 February to 28 February.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if the result would leave the supported years.
    pub fn checked_add_years(&self, years: i32) -> Result<Self> {
        self.checked_add_months(years.saturating_mul(12))
    }
}

impl Default for TimeSnapshot {
    /// Midnight of 1 January 2000, a Saturday
    fn default() -> Self {
        Self(datetime!(2000-01-01 0:00))
    }
}

impl fmt::Display for TimeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimeSnapshot {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{}-{}-{} {}:{}:{}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.second()
        );
    }
}

/// Get the number of days in a given month and year
#[must_use]
pub const fn get_days_in_month(month: u8, year: u16) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30, // all other months
    }
}

/// Check if a year is a leap year
/// A year is a leap year if it is divisible by 4, but not by 100, unless it is also divisible by 400.
#[must_use]
pub const fn is_leap_year(year: u16) -> bool {
    year.is_multiple_of(4) && !year.is_multiple_of(100) || year.is_multiple_of(400)
}
