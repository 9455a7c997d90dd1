//! # State of the system
//! The operation mode of the device and the rules that move it between modes.
//!
//! Clock, Sunrise and Sleep are derived every tick from the current time and today's alarm
//! entry, so the mode never depends on how much time passed between ticks and a clock that
//! is set backwards simply yields the mode of the new time. Setup is toggled by the user and
//! sits on top: while it is active the derived mode keeps being updated, so leaving setup
//! lands in the mode that is right for that moment.
use crate::alarm_settings::AlarmEntry;
use crate::utility::date_time::TimeSnapshot;
use embassy_time::Duration;

/// The operation mode of the system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// The regular operation mode, showing the time with the LEDs off.
    Clock,
    /// Today's alarm time has been reached and the LED strip ramps up.
    Sunrise,
    /// The user dismissed today's sunrise, the LEDs stay off until the window has passed.
    Sleep,
    /// The user edits the time or the alarm schedule.
    Setup,
}

/// Seconds from today's alarm time to `now`, negative before the alarm.
///
/// Only the wall-clock time of day is compared, a window reaching past midnight is not
/// carried over into the next day.
#[must_use]
pub fn seconds_since_alarm(now: &TimeSnapshot, alarm: AlarmEntry) -> i64 {
    i64::from(now.seconds_since_midnight()) - i64::from(alarm.seconds_since_midnight())
}

/// The mode the schedule asks for, never [`OperationMode::Setup`].
///
/// - before the alarm: Clock
/// - from the alarm time to the end of the window: Sunrise, or Sleep if the user has
///   dismissed it
/// - after the window: Clock
///
/// A pure function of its inputs, `sleeping` being whether the previous derived mode was Sleep.
#[must_use]
pub fn derive_mode(
    now: &TimeSnapshot,
    alarm: AlarmEntry,
    sleeping: bool,
    sunrise_window: Duration,
) -> OperationMode {
    let delta = seconds_since_alarm(now, alarm);
    let window = i64::try_from(sunrise_window.as_secs()).unwrap_or(i64::MAX);
    if delta < 0 || delta > window {
        OperationMode::Clock
    } else if sleeping {
        OperationMode::Sleep
    } else {
        OperationMode::Sunrise
    }
}

/// Keeps the current operation mode
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeController {
    /// The mode derived from the schedule, kept up to date even during setup
    scheduled: OperationMode,
    /// Setup is active
    setup: bool,
}

impl ModeController {
    /// Create a new `ModeController` in clock mode
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scheduled: OperationMode::Clock,
            setup: false,
        }
    }

    /// The active mode
    #[must_use]
    pub const fn mode(&self) -> OperationMode {
        if self.setup {
            OperationMode::Setup
        } else {
            self.scheduled
        }
    }

    /// The mode the schedule asks for, which becomes active once setup is left
    #[must_use]
    pub const fn scheduled_mode(&self) -> OperationMode {
        self.scheduled
    }

    /// The current sunrise has been dismissed
    #[must_use]
    pub const fn is_sleeping(&self) -> bool {
        matches!(self.scheduled, OperationMode::Sleep)
    }

    /// Setup is active
    #[must_use]
    pub const fn is_setup(&self) -> bool {
        self.setup
    }

    /// Re-derives the scheduled mode from the current time and today's alarm and returns the
    /// active mode
    pub fn update(
        &mut self,
        now: &TimeSnapshot,
        alarm: AlarmEntry,
        sunrise_window: Duration,
    ) -> OperationMode {
        let scheduled = derive_mode(now, alarm, self.is_sleeping(), sunrise_window);
        if scheduled != self.scheduled {
            info!(
                "Scheduled mode {} -> {} at {}:{}:{}",
                self.scheduled,
                scheduled,
                now.hour(),
                now.minute(),
                now.second()
            );
            self.scheduled = scheduled;
        }
        self.mode()
    }

    /// The user dismisses the light: Clock and Sunrise switch to Sleep, returns whether the
    /// mode changed. Has no effect in Sleep and Setup.
    pub fn dismiss(&mut self) -> bool {
        match self.mode() {
            OperationMode::Clock | OperationMode::Sunrise => {
                info!("Dismissed, going to sleep mode");
                self.scheduled = OperationMode::Sleep;
                true
            }
            OperationMode::Sleep | OperationMode::Setup => false,
        }
    }

    /// Enters setup, forgetting a dismissed sunrise
    pub fn enter_setup(&mut self) {
        info!("Entering setup");
        self.setup = true;
        if self.is_sleeping() {
            self.scheduled = OperationMode::Clock;
        }
    }

    /// Leaves setup and derives the mode fresh from the current time
    pub fn exit_setup(
        &mut self,
        now: &TimeSnapshot,
        alarm: AlarmEntry,
        sunrise_window: Duration,
    ) -> OperationMode {
        info!("Leaving setup");
        self.setup = false;
        self.update(now, alarm, sunrise_window)
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60 * 60);

    fn at(hour: u8, minute: u8) -> TimeSnapshot {
        TimeSnapshot::new(2024, 6, 26, hour, minute, 0).unwrap()
    }

    #[test]
    fn window_boundaries() {
        let alarm = AlarmEntry::new(6, 30);
        assert_eq!(derive_mode(&at(6, 29), alarm, false, WINDOW), OperationMode::Clock);
        assert_eq!(derive_mode(&at(6, 30), alarm, false, WINDOW), OperationMode::Sunrise);
        assert_eq!(derive_mode(&at(7, 30), alarm, false, WINDOW), OperationMode::Sunrise);
        assert_eq!(derive_mode(&at(7, 31), alarm, false, WINDOW), OperationMode::Clock);
    }

    #[test]
    fn sleeping_only_sticks_inside_the_window() {
        let alarm = AlarmEntry::new(6, 30);
        assert_eq!(derive_mode(&at(7, 0), alarm, true, WINDOW), OperationMode::Sleep);
        assert_eq!(derive_mode(&at(6, 0), alarm, true, WINDOW), OperationMode::Clock);
        assert_eq!(derive_mode(&at(8, 0), alarm, true, WINDOW), OperationMode::Clock);
    }

    #[test]
    fn derivation_is_deterministic() {
        let alarm = AlarmEntry::new(6, 30);
        for hour in 0..24 {
            for sleeping in [false, true] {
                let first = derive_mode(&at(hour, 45), alarm, sleeping, WINDOW);
                let second = derive_mode(&at(hour, 45), alarm, sleeping, WINDOW);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn dismiss_then_window_closes() {
        let alarm = AlarmEntry::new(6, 30);
        let mut modes = ModeController::new();
        assert_eq!(modes.update(&at(6, 45), alarm, WINDOW), OperationMode::Sunrise);
        assert!(modes.dismiss());
        assert_eq!(modes.update(&at(7, 0), alarm, WINDOW), OperationMode::Sleep);
        assert!(!modes.dismiss());
        assert_eq!(modes.update(&at(7, 31), alarm, WINDOW), OperationMode::Clock);
        assert!(!modes.is_sleeping());
    }

    #[test]
    fn clock_set_backwards_recomputes_from_scratch() {
        let alarm = AlarmEntry::new(6, 30);
        let mut modes = ModeController::new();
        modes.update(&at(6, 40), alarm, WINDOW);
        modes.dismiss();
        assert_eq!(modes.update(&at(5, 0), alarm, WINDOW), OperationMode::Clock);
        assert_eq!(modes.update(&at(6, 40), alarm, WINDOW), OperationMode::Sunrise);
    }

    #[test]
    fn setup_overrides_and_clears_sleep() {
        let alarm = AlarmEntry::new(6, 30);
        let mut modes = ModeController::new();
        modes.update(&at(6, 40), alarm, WINDOW);
        modes.dismiss();
        modes.enter_setup();
        assert_eq!(modes.mode(), OperationMode::Setup);
        assert!(!modes.dismiss());
        assert_eq!(modes.update(&at(6, 41), alarm, WINDOW), OperationMode::Setup);
        assert_eq!(modes.scheduled_mode(), OperationMode::Sunrise);
        assert_eq!(modes.exit_setup(&at(8, 0), alarm, WINDOW), OperationMode::Clock);
    }
}
