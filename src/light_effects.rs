//! # Light effects
//! The sunrise brightness ramp and what the LED strip is told to do.
//!
//! The strip only ever shows one color on all pixels: the warm sunrise color at the ramp
//! brightness while the device is in sunrise mode, and nothing otherwise.
use smart_leds::RGB8;

/// Brightness at the start of the sunrise, just enough to be noticed
pub const MIN_BRIGHTNESS: u8 = 5;

/// Brightness at the end of the ramp
pub const MAX_BRIGHTNESS: u8 = 255;

/// Drives an addressable LED strip as a whole
pub trait LedStrip {
    /// Sets the global brightness, 0 is off
    fn set_brightness(&mut self, level: u8);

    /// Sets every pixel to `color`
    fn fill(&mut self, color: RGB8);

    /// Sends the pixel buffer to the strip
    fn show(&mut self);
}

/// What the strip currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightOutput {
    /// All LEDs off
    Off,
    /// All LEDs on in the sunrise color, the data is the brightness
    Sunrise(u8),
}

/// Brightness of the sunrise after `elapsed` out of `total`, both in the same unit.
///
/// Goes linearly from [`MIN_BRIGHTNESS`] at 0 to [`MAX_BRIGHTNESS`] at `total`. Values of
/// `elapsed` outside `0..=total` are clamped to the nearest end, a `total` of 0 means the
/// ramp is already complete.
#[must_use]
pub fn brightness(elapsed: i64, total: u64) -> u8 {
    if total == 0 {
        return MAX_BRIGHTNESS;
    }
    let elapsed = u64::try_from(elapsed).unwrap_or(0).min(total);
    let span = u64::from(MAX_BRIGHTNESS - MIN_BRIGHTNESS);
    let level = u64::from(MIN_BRIGHTNESS) + span * elapsed / total;
    u8::try_from(level).unwrap_or(MAX_BRIGHTNESS)
}

/// Writes `output` to the strip
pub fn show<L: LedStrip>(strip: &mut L, output: LightOutput, color: RGB8) {
    match output {
        LightOutput::Off => turn_off_all_leds(strip),
        LightOutput::Sunrise(level) => {
            strip.set_brightness(level);
            strip.fill(color);
            strip.show();
        }
    }
}

/// Turns off all LEDs
pub fn turn_off_all_leds<L: LedStrip>(strip: &mut L) {
    strip.set_brightness(0);
    strip.fill(RGB8::default());
    strip.show();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_ends() {
        assert_eq!(brightness(0, 1800), MIN_BRIGHTNESS);
        assert_eq!(brightness(1800, 1800), MAX_BRIGHTNESS);
        assert_eq!(brightness(900, 1800), 130);
    }

    #[test]
    fn ramp_is_monotonic() {
        let total = 3600;
        let mut last = 0;
        for elapsed in 0..=3600 {
            let level = brightness(elapsed, total);
            assert!(level >= last, "dropped at {elapsed}");
            last = level;
        }
    }

    #[test]
    fn outside_the_ramp_is_clamped() {
        assert_eq!(brightness(-60, 1800), MIN_BRIGHTNESS);
        assert_eq!(brightness(i64::MIN, 1800), MIN_BRIGHTNESS);
        assert_eq!(brightness(5000, 1800), MAX_BRIGHTNESS);
        assert_eq!(brightness(0, 0), MAX_BRIGHTNESS);
    }

    #[derive(Default)]
    struct Recorder {
        brightness: Option<u8>,
        color: Option<RGB8>,
        shows: usize,
    }

    impl LedStrip for Recorder {
        fn set_brightness(&mut self, level: u8) {
            self.brightness = Some(level);
        }

        fn fill(&mut self, color: RGB8) {
            self.color = Some(color);
        }

        fn show(&mut self) {
            self.shows += 1;
        }
    }

    #[test]
    fn off_is_dark_and_flushed() {
        let mut strip = Recorder::default();
        show(&mut strip, LightOutput::Off, RGB8::new(255, 147, 41));
        assert_eq!(strip.brightness, Some(0));
        assert_eq!(strip.color, Some(RGB8::default()));
        assert_eq!(strip.shows, 1);
    }

    #[test]
    fn sunrise_fills_with_the_warm_color() {
        let mut strip = Recorder::default();
        let warm = RGB8::new(255, 147, 41);
        show(&mut strip, LightOutput::Sunrise(42), warm);
        assert_eq!(strip.brightness, Some(42));
        assert_eq!(strip.color, Some(warm));
        assert_eq!(strip.shows, 1);
    }
}
