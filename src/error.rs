//! # Errors
//! Inputs the core refuses. Everything else that can go wrong (corrupt persisted bytes, a clock
//! that jumps backwards) is recovered where it happens and only logged.
use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The errors of the alarm clock core
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A weekday outside `0..=6`, the data is the rejected value
    #[display("weekday {_0} is outside 0..=6 (0 = Sunday)")]
    InvalidWeekday(#[error(not(source))] u8),
    /// A date or time outside the range the clock supports (years 2000 to 2099)
    #[display("date or time outside the supported range")]
    OutOfRange,
}
