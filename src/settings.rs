//! # Settings
//! Navigation over the editable fields in setup mode and the change each field applies.
//!
//! The fields form a ring: eight for the current date and time (the weekday selector among
//! them), then three for the alarm of the selected weekday. Time fields adjust the clock
//! source, the weekday selector moves the alarm weekday cursor and the alarm fields rewrite
//! the persisted alarm entry of that weekday.
use crate::alarm_settings::{AlarmStore, ByteStore};
use crate::error::Result;
use crate::utility::date_time::{ClockSource, TimeSnapshot, Weekday};

/// Seconds in half a day, the distance between AM and PM
const HALF_DAY_SECONDS: i64 = 12 * 3600;

/// The editable fields, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingField {
    /// Hour of the current time
    Hour,
    /// Minute of the current time
    Minute,
    /// Second of the current time
    Second,
    /// AM or PM of the current time
    AmPmHalf,
    /// Current year
    Year,
    /// Current month
    Month,
    /// Current day of the month
    Day,
    /// Which weekday's alarm the alarm fields edit
    WeekdaySelector,
    /// Hour of the selected alarm
    AlarmHour,
    /// Minute of the selected alarm
    AlarmMinute,
    /// AM or PM of the selected alarm
    AlarmHalf,
}

impl SettingField {
    /// All fields in navigation order
    pub const ALL: [Self; 11] = [
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::AmPmHalf,
        Self::Year,
        Self::Month,
        Self::Day,
        Self::WeekdaySelector,
        Self::AlarmHour,
        Self::AlarmMinute,
        Self::AlarmHalf,
    ];

    /// Number of fields
    pub const COUNT: usize = Self::ALL.len();

    /// The field edits the alarm schedule rather than the clock
    #[must_use]
    pub const fn is_alarm_field(self) -> bool {
        matches!(self, Self::AlarmHour | Self::AlarmMinute | Self::AlarmHalf)
    }
}

/// What a field change touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Change {
    /// The clock was set, the data is the time read back from the clock afterwards
    Clock(TimeSnapshot),
    /// The alarm entry of the data's weekday was rewritten
    Alarm(Weekday),
    /// The alarm weekday cursor moved to the data's weekday
    AlarmWeekday(Weekday),
}

/// The change a field applies to the clock for one step in `direction` (+1 or -1)
fn adjusted_time(field: SettingField, now: &TimeSnapshot, direction: i8) -> Result<TimeSnapshot> {
    let steps = i64::from(direction);
    match field {
        SettingField::Hour => now.checked_add_seconds(steps * 3600),
        SettingField::Minute => now.checked_add_seconds(steps * 60),
        SettingField::Second => now.checked_add_seconds(steps),
        SettingField::AmPmHalf => now.checked_add_seconds(steps * HALF_DAY_SECONDS),
        SettingField::Year => now.checked_add_years(i32::from(direction)),
        SettingField::Month => now.checked_add_months(i32::from(direction)),
        SettingField::Day => now.checked_add_seconds(steps * 86_400),
        SettingField::WeekdaySelector
        | SettingField::AlarmHour
        | SettingField::AlarmMinute
        | SettingField::AlarmHalf => Ok(*now),
    }
}

/// `value` moved by `delta`, wrapping around `modulus`
fn wrapped(value: u8, delta: i16, modulus: i16) -> u8 {
    // rem_euclid keeps the result in 0..modulus, modulus is at most 60
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let result = (i16::from(value) + delta).rem_euclid(modulus) as u8;
    result
}

/// The cursors of setup mode: the active field and the alarm weekday
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsNavigator {
    /// Index of the active field in [`SettingField::ALL`]
    active: usize,
    /// Weekday whose alarm the alarm fields edit
    alarm_weekday: Weekday,
}

impl SettingsNavigator {
    /// Create a new `SettingsNavigator` on the first field, editing Sunday's alarm
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: 0,
            alarm_weekday: Weekday::SUNDAY,
        }
    }

    /// The field button presses currently change
    #[must_use]
    pub const fn active_field(&self) -> SettingField {
        SettingField::ALL[self.active % SettingField::COUNT]
    }

    /// The weekday whose alarm the alarm fields edit
    #[must_use]
    pub const fn alarm_weekday(&self) -> Weekday {
        self.alarm_weekday
    }

    /// Starts a setup session: back to the first field, editing today's alarm
    pub fn begin(&mut self, today: Weekday) {
        self.active = 0;
        self.alarm_weekday = today;
    }

    /// Moves to the next (or previous) field, wrapping around
    pub fn advance_field(&mut self, forward: bool) {
        self.active = if forward {
            (self.active + 1) % SettingField::COUNT
        } else {
            (self.active + SettingField::COUNT - 1) % SettingField::COUNT
        };
        debug!("Active field: {}", self.active_field());
    }

    /// Increments the active field
    ///
    /// # Errors
    /// [`crate::Error::OutOfRange`] if a clock field would leave the supported years, the
    /// clock is left untouched then.
    pub fn increment<C: ClockSource, S: ByteStore>(
        &mut self,
        clock: &mut C,
        alarms: &mut AlarmStore<S>,
    ) -> Result<Change> {
        self.step(1, clock, alarms)
    }

    /// Decrements the active field
    ///
    /// # Errors
    /// [`crate::Error::OutOfRange`] if a clock field would leave the supported years, the
    /// clock is left untouched then.
    pub fn decrement<C: ClockSource, S: ByteStore>(
        &mut self,
        clock: &mut C,
        alarms: &mut AlarmStore<S>,
    ) -> Result<Change> {
        self.step(-1, clock, alarms)
    }

    /// Applies one step in `direction` to the active field
    fn step<C: ClockSource, S: ByteStore>(
        &mut self,
        direction: i8,
        clock: &mut C,
        alarms: &mut AlarmStore<S>,
    ) -> Result<Change> {
        let field = self.active_field();
        let weekday = self.alarm_weekday;
        match field {
            SettingField::Hour
            | SettingField::Minute
            | SettingField::Second
            | SettingField::AmPmHalf
            | SettingField::Year
            | SettingField::Month
            | SettingField::Day => {
                let now = clock.now();
                let target = adjusted_time(field, &now, direction).inspect_err(|_| {
                    warn!("Adjusting {} would leave the supported range", field);
                })?;
                clock.adjust(target);
                info!("Clock adjusted via {}", field);
                Ok(Change::Clock(clock.now()))
            }
            SettingField::WeekdaySelector => {
                self.alarm_weekday = weekday.shifted(direction);
                Ok(Change::AlarmWeekday(self.alarm_weekday))
            }
            SettingField::AlarmHour => {
                let entry = alarms.get(weekday);
                alarms.set_hour(weekday, wrapped(entry.hour(), i16::from(direction), 24));
                Ok(Change::Alarm(weekday))
            }
            SettingField::AlarmMinute => {
                let entry = alarms.get(weekday);
                alarms.set_minute(weekday, wrapped(entry.minute(), i16::from(direction), 60));
                Ok(Change::Alarm(weekday))
            }
            SettingField::AlarmHalf => {
                // the meridiem flip is its own inverse, direction does not matter
                let entry = alarms.get(weekday);
                alarms.set_hour(weekday, wrapped(entry.hour(), 12, 24));
                Ok(Change::Alarm(weekday))
            }
        }
    }
}

impl Default for SettingsNavigator {
    fn default() -> Self {
        Self::new()
    }
}
