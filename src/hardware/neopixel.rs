//! # Neopixel
//! Records what the core wants the WS2812 strip to show until the main loop writes it.
use smart_leds::RGB8;
use sunrise_alarmclock::LedStrip;

/// The pending state of the strip
#[derive(Debug, Default)]
pub struct NeopixelStrip {
    /// Global brightness
    level: u8,
    /// Color of every pixel
    color: RGB8,
    /// `show` was called since the last `take_pending`
    pending: bool,
}

impl NeopixelStrip {
    /// Color and brightness to write, if the core asked for an update
    pub fn take_pending(&mut self) -> Option<(RGB8, u8)> {
        if core::mem::take(&mut self.pending) {
            Some((self.color, self.level))
        } else {
            None
        }
    }
}

impl LedStrip for NeopixelStrip {
    fn set_brightness(&mut self, level: u8) {
        self.level = level;
    }

    fn fill(&mut self, color: RGB8) {
        self.color = color;
    }

    fn show(&mut self) {
        self.pending = true;
    }
}
