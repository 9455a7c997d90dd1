//! # Sunrise alarm clock
//! The hardware independent core of a bedside alarm clock that wakes you with light.
//!
//! Every weekday has its own alarm time. When today's alarm time is reached a WS2812 strip
//! ramps from dim to full warm white, until the user dismisses it or the sunrise window
//! closes. Three buttons (OK, Left, Right) set the clock and the alarm schedule.
//!
//! The core owns no hardware. The time comes from a [`ClockSource`], alarms persist through a
//! [`ByteStore`], light goes to a [`LedStrip`] and text to a [`DisplaySurface`]. The firmware
//! in `main.rs` wires these to the RP2040 peripherals and calls [`AlarmClock::tick`] in a loop.
#![cfg_attr(not(test), no_std)]

// must come first so the logging macros are visible in all other modules
#[macro_use]
mod fmt;

pub mod alarm_settings;
pub mod buttons;
pub mod config;
pub mod display;
pub mod error;
pub mod event;
pub mod light_effects;
pub mod orchestrate;
pub mod settings;
pub mod state;
pub mod utility;

pub use alarm_settings::{AlarmEntry, AlarmStore, ByteStore};
pub use buttons::{ButtonClassifier, Monotonic};
pub use config::Config;
pub use display::{DisplayItem, DisplaySurface, DrawRequest, Frame};
pub use error::{Error, Result};
pub use event::{Button, ButtonEvent, Press};
pub use light_effects::{LedStrip, LightOutput};
pub use orchestrate::AlarmClock;
pub use settings::{Change, SettingField, SettingsNavigator};
pub use state::{ModeController, OperationMode};
pub use utility::date_time::{ClockSource, TimeSnapshot, Weekday};
