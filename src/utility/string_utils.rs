//! # StringUtils
//! Text the display shows for times, dates and weekdays.

use crate::utility::date_time::Weekday;
use core::fmt::Write;
use heapless::String;

/// Capacity of a single piece of display text
pub const TEXT_CAPACITY: usize = 12;

/// A single piece of display text
pub type DisplayText = String<TEXT_CAPACITY>;

/// Full weekday names, indexed by [`Weekday::index`]
const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Text helpers for the display
pub struct StringUtils;

impl StringUtils {
    /// The full English name of a weekday
    #[must_use]
    pub fn weekday_name(weekday: Weekday) -> &'static str {
        WEEKDAY_NAMES[usize::from(weekday.index())]
    }

    /// Converts a 24 hour value to the 12 hour clock, where both midnight and noon are 12
    #[must_use]
    pub const fn hour_12(hour: u8) -> u8 {
        if hour.is_multiple_of(12) { 12 } else { hour % 12 }
    }

    /// `AM` before noon, `PM` from noon on
    #[must_use]
    pub const fn meridiem(hour: u8) -> &'static str {
        if hour % 24 < 12 { "AM" } else { "PM" }
    }

    /// A number padded with zeros to `width` digits, e.g. `07` or `2024`
    #[must_use]
    pub fn padded(value: u16, width: usize) -> DisplayText {
        let mut s = DisplayText::new();
        // 5 digits at most, always fits
        let _ = write!(s, "{value:0width$}");
        s
    }

    /// Copies a `&str` into display text, cutting it off at the capacity
    #[must_use]
    pub fn text(value: &str) -> DisplayText {
        let mut s = DisplayText::new();
        for c in value.chars() {
            if s.push(c).is_err() {
                break;
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_hour_clock() {
        assert_eq!(StringUtils::hour_12(0), 12);
        assert_eq!(StringUtils::hour_12(7), 7);
        assert_eq!(StringUtils::hour_12(12), 12);
        assert_eq!(StringUtils::hour_12(23), 11);
        assert_eq!(StringUtils::meridiem(0), "AM");
        assert_eq!(StringUtils::meridiem(11), "AM");
        assert_eq!(StringUtils::meridiem(12), "PM");
    }

    #[test]
    fn padding_and_names() {
        assert_eq!(StringUtils::padded(7, 2).as_str(), "07");
        assert_eq!(StringUtils::padded(2024, 4).as_str(), "2024");
        assert_eq!(StringUtils::weekday_name(Weekday::WEDNESDAY), "Wednesday");
        assert_eq!(
            StringUtils::text("a very long piece of text").as_str(),
            "a very long "
        );
    }
}
