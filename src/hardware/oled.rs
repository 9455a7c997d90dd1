//! # OLED
//! Draws the core's text requests into the buffer of the SSD1306 display.
use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X13},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use sunrise_alarmclock::{DisplaySurface, DrawRequest};

/// Borrows the display buffer for one tick
pub struct OledSurface<'a, T> {
    /// The buffered display
    target: &'a mut T,
    /// The core asked for a flush
    flush: bool,
}

impl<'a, T: DrawTarget<Color = BinaryColor>> OledSurface<'a, T> {
    /// Create a new `OledSurface`
    pub const fn new(target: &'a mut T) -> Self {
        Self {
            target,
            flush: false,
        }
    }

    /// The buffer changed and must be sent to the display
    pub const fn needs_flush(&self) -> bool {
        self.flush
    }
}

impl<T: DrawTarget<Color = BinaryColor>> DisplaySurface for OledSurface<'_, T> {
    fn draw(&mut self, request: &DrawRequest) {
        let color = if request.blank {
            BinaryColor::Off
        } else {
            BinaryColor::On
        };
        let style = MonoTextStyle::new(&FONT_6X13, color);
        let position = Point::new(request.x, request.y);
        // the buffered display draws into RAM
        let _ = Text::with_baseline(&request.text, position, style, Baseline::Top)
            .draw(&mut *self.target);
    }

    fn flush(&mut self) {
        self.flush = true;
    }
}
