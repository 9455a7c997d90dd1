//! # RTC clock
//! The RP2040 real time clock as the clock source of the core.
use defmt::{Debug2Format, info, warn};
use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc};
use sunrise_alarmclock::{ClockSource, TimeSnapshot, Weekday};

/// Wraps the RTC peripheral. Remembers the last good reading so a failing RTC freezes the
/// clock instead of stopping the device.
pub struct RtcClock {
    /// The RTC peripheral
    rtc: Rtc<'static, RTC>,
    /// The last snapshot read from or written to the RTC
    last: TimeSnapshot,
}

impl RtcClock {
    /// Create a new `RtcClock`. An RTC that is not running yet is started at the default time.
    pub fn new(rtc: Rtc<'static, RTC>) -> Self {
        let mut clock = Self {
            rtc,
            last: TimeSnapshot::default(),
        };
        if clock.rtc.is_running() {
            clock.now();
        } else {
            info!("RTC not running, starting it at the default time");
            clock.adjust(TimeSnapshot::default());
        }
        clock
    }
}

impl ClockSource for RtcClock {
    fn now(&mut self) -> TimeSnapshot {
        match self.rtc.now() {
            Ok(dt) => match to_snapshot(&dt) {
                Ok(snapshot) => self.last = snapshot,
                Err(e) => warn!("RTC holds an unsupported date: {}", e),
            },
            Err(e) => warn!("RTC not readable: {:?}", Debug2Format(&e)),
        }
        self.last
    }

    fn adjust(&mut self, to: TimeSnapshot) {
        match self.rtc.set_datetime(to_date_time(&to)) {
            Ok(()) => {
                info!("RTC set to {}", to);
                self.last = to;
            }
            Err(e) => warn!("RTC not set: {:?}", Debug2Format(&e)),
        }
    }
}

/// Converts an RTC reading, the weekday is recomputed from the date
fn to_snapshot(dt: &DateTime) -> sunrise_alarmclock::Result<TimeSnapshot> {
    TimeSnapshot::new(dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second)
}

/// Converts a snapshot into what the RTC expects
fn to_date_time(snapshot: &TimeSnapshot) -> DateTime {
    DateTime {
        year: snapshot.year(),
        month: snapshot.month(),
        day: snapshot.day(),
        day_of_week: day_of_week(snapshot.weekday()),
        hour: snapshot.hour(),
        minute: snapshot.minute(),
        second: snapshot.second(),
    }
}

/// Maps a weekday onto the RTC's day of week
const fn day_of_week(weekday: Weekday) -> DayOfWeek {
    match weekday.index() {
        0 => DayOfWeek::Sunday,
        1 => DayOfWeek::Monday,
        2 => DayOfWeek::Tuesday,
        3 => DayOfWeek::Wednesday,
        4 => DayOfWeek::Thursday,
        5 => DayOfWeek::Friday,
        _ => DayOfWeek::Saturday,
    }
}
