//! # Hardware
//! Adapters between the RP2040 peripherals and the traits of the alarm clock core.
//!
//! The core is synchronous. The RTC and the flash are driven in place (the flash through
//! `block_on`), while the LED strip and the display only record what the core asked for so
//! the main loop can push it out with the async drivers after the tick.
pub mod flash_store;
pub mod neopixel;
pub mod oled;
pub mod rtc_clock;
