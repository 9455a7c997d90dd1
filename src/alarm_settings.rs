//! # Alarm Settings
//! The per-weekday wake times, persisted in a byte-addressable non-volatile store.
//!
//! Each weekday owns two bytes: the hour at address `weekday` and the minute at address
//! `weekday + 7`. Both are written independently and immediately, there is no transaction
//! across the pair. Reads reduce whatever byte is stored into range (`hour % 24`,
//! `minute % 60`), so uninitialized or corrupted storage heals itself instead of handing
//! invalid times to the rest of the system.
use crate::utility::date_time::Weekday;

/// First address of the alarm hours, one byte per weekday
pub const HOUR_BASE_ADDRESS: u8 = 0;

/// First address of the alarm minutes, one byte per weekday
pub const MINUTE_BASE_ADDRESS: u8 = 7;

/// Number of addresses used by the alarm schedule
pub const ADDRESS_COUNT: usize = 14;

/// Byte-addressable non-volatile storage.
///
/// A write must be durable when it returns.
pub trait ByteStore {
    /// Reads the byte at `address`
    fn read(&mut self, address: u8) -> u8;

    /// Writes `value` to `address`
    fn write(&mut self, address: u8, value: u8);
}

/// A store kept in RAM, e.g. as a mirror of the real one or in tests.
/// Addresses beyond the array read as 0 and ignore writes.
impl<const N: usize> ByteStore for [u8; N] {
    fn read(&mut self, address: u8) -> u8 {
        self.get(usize::from(address)).copied().unwrap_or(0)
    }

    fn write(&mut self, address: u8, value: u8) {
        if let Some(slot) = self.get_mut(usize::from(address)) {
            *slot = value;
        }
    }
}

/// The wake time of one weekday. Hour and minute are always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmEntry {
    /// Hour, 0 to 23
    hour: u8,
    /// Minute, 0 to 59
    minute: u8,
}

impl AlarmEntry {
    /// Create a new `AlarmEntry`, reducing out-of-range values into range
    #[must_use]
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
        }
    }

    /// Get the alarm hour
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Get the alarm minute
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Seconds from midnight to the alarm time
    #[must_use]
    pub fn seconds_since_midnight(&self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60
    }
}

/// Maps each weekday to its persisted alarm entry
#[derive(Debug)]
pub struct AlarmStore<S> {
    /// The non-volatile bytes behind the schedule
    store: S,
}

impl<S: ByteStore> AlarmStore<S> {
    /// Create a new `AlarmStore` on top of a byte store
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the alarm entry of a weekday. Never fails, stored bytes out of range are reduced
    /// into range.
    pub fn get(&mut self, weekday: Weekday) -> AlarmEntry {
        let raw_hour = self.store.read(hour_address(weekday));
        let raw_minute = self.store.read(minute_address(weekday));
        if raw_hour >= 24 || raw_minute >= 60 {
            warn!(
                "Stored alarm for weekday {} out of range ({}:{}), normalizing",
                weekday.index(),
                raw_hour,
                raw_minute
            );
        }
        AlarmEntry::new(raw_hour, raw_minute)
    }

    /// Persists the alarm hour of a weekday
    pub fn set_hour(&mut self, weekday: Weekday, hour: u8) {
        let hour = hour % 24;
        self.store.write(hour_address(weekday), hour);
        info!(
            "Alarm hour of weekday {} stored: {}",
            weekday.index(),
            hour
        );
    }

    /// Persists the alarm minute of a weekday
    pub fn set_minute(&mut self, weekday: Weekday, minute: u8) {
        let minute = minute % 60;
        self.store.write(minute_address(weekday), minute);
        info!(
            "Alarm minute of weekday {} stored: {}",
            weekday.index(),
            minute
        );
    }

    /// Get the underlying byte store
    pub const fn byte_store(&self) -> &S {
        &self.store
    }

    /// Get the underlying byte store for raw access
    pub const fn byte_store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

/// Address of the alarm hour of a weekday
const fn hour_address(weekday: Weekday) -> u8 {
    HOUR_BASE_ADDRESS + weekday.index()
}

/// Address of the alarm minute of a weekday
const fn minute_address(weekday: Weekday) -> u8 {
    MINUTE_BASE_ADDRESS + weekday.index()
}
