//! # Configuration
//! Compile-time defaults come from `config/sunrise_config.json`, turned into constants by the
//! build script. [`Config`] carries the ones the core needs at runtime so they can be changed
//! without touching the logic, e.g. in tests.
use embassy_time::Duration;
use smart_leds::RGB8;

/// Constants generated by `build.rs` from `config/sunrise_config.json`
#[allow(clippy::missing_docs_in_private_items)]
mod generated {
    include!(concat!(env!("OUT_DIR"), "/sunrise_config.rs"));
}

pub use generated::{
    LONG_PRESS_MILLIS, NUM_LEDS, RAMP_MINUTES, SUNRISE_WINDOW_MINUTES, TICK_MILLIS, WARM_COLOR,
};

/// Runtime configuration of the alarm clock core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How long after the alarm time the device stays in sunrise mode
    pub sunrise_window: Duration,
    /// How long the brightness takes to go from dimmest to full. After that the strip holds
    /// full brightness until the window closes.
    pub ramp: Duration,
    /// Minimum hold duration of a long button press
    pub long_press: Duration,
    /// Color of the sunrise light
    pub warm_color: RGB8,
}

impl Config {
    /// Returns the config with the given sunrise window and ramp, both in minutes.
    /// The ramp is capped at the window.
    #[must_use]
    pub const fn with_sunrise_minutes(mut self, window_minutes: u16, ramp_minutes: u16) -> Self {
        let ramp_minutes = if ramp_minutes > window_minutes {
            window_minutes
        } else {
            ramp_minutes
        };
        self.sunrise_window = Duration::from_secs(window_minutes as u64 * 60);
        self.ramp = Duration::from_secs(ramp_minutes as u64 * 60);
        self
    }

    /// Length of the sunrise window in whole seconds
    #[must_use]
    pub const fn sunrise_window_secs(&self) -> u64 {
        self.sunrise_window.as_secs()
    }

    /// Length of the brightness ramp in whole seconds
    #[must_use]
    pub const fn ramp_secs(&self) -> u64 {
        self.ramp.as_secs()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sunrise_window: Duration::from_secs(0),
            ramp: Duration::from_secs(0),
            long_press: Duration::from_millis(u64::from(LONG_PRESS_MILLIS)),
            warm_color: WARM_COLOR,
        }
        .with_sunrise_minutes(SUNRISE_WINDOW_MINUTES, RAMP_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_never_exceeds_window() {
        let config = Config::default().with_sunrise_minutes(20, 45);
        assert_eq!(config.sunrise_window_secs(), 20 * 60);
        assert_eq!(config.ramp_secs(), 20 * 60);
    }

    #[test]
    fn defaults_come_from_the_config_file() {
        let config = Config::default();
        assert_eq!(
            config.sunrise_window_secs(),
            u64::from(SUNRISE_WINDOW_MINUTES) * 60
        );
        assert_eq!(config.ramp_secs(), u64::from(RAMP_MINUTES) * 60);
        assert_eq!(config.long_press.as_millis(), u64::from(LONG_PRESS_MILLIS));
    }
}
