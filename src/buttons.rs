//! # Buttons
//! Turns the raw "is the button held" signal into a [`Press`].
//!
//! Sampling blocks the caller for as long as the button is held, which is the accepted latency
//! of the tick loop. Time comes from an injected [`Monotonic`] clock so the classification can
//! be driven without hardware.
use crate::event::{Button, ButtonEvent, Press};
use embassy_time::{Duration, Instant};

/// A monotonic time source
pub trait Monotonic {
    /// The current instant
    fn now(&self) -> Instant;
}

impl<F: Fn() -> Instant> Monotonic for F {
    fn now(&self) -> Instant {
        self()
    }
}

/// Classifies the presses of one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonClassifier {
    /// The button being classified
    button: Button,
    /// Minimum hold duration of a long press
    long_press: Duration,
}

impl ButtonClassifier {
    /// Create a new `ButtonClassifier`
    #[must_use]
    pub const fn new(button: Button, long_press: Duration) -> Self {
        Self { button, long_press }
    }

    /// The button being classified
    #[must_use]
    pub const fn button(&self) -> Button {
        self.button
    }

    /// Samples the button once. If it is not held the result is [`Press::NotPressed`] right
    /// away, otherwise this waits for the release and classifies the hold duration.
    pub fn classify<M: Monotonic, H: FnMut() -> bool>(&self, clock: &M, mut is_held: H) -> Press {
        if !is_held() {
            return Press::NotPressed;
        }
        let pressed_at = clock.now();
        while is_held() {
            core::hint::spin_loop();
        }
        let held_for = clock
            .now()
            .checked_duration_since(pressed_at)
            .unwrap_or(Duration::from_ticks(0));

        let press = if held_for >= self.long_press {
            Press::Long
        } else {
            Press::Short
        };
        debug!(
            "{} held for {} ms: {}",
            self.button,
            held_for.as_millis(),
            press
        );
        press
    }

    /// Samples the button and wraps an actual press into an event
    pub fn sample<M: Monotonic, H: FnMut() -> bool>(
        &self,
        clock: &M,
        is_held: H,
    ) -> Option<ButtonEvent> {
        match self.classify(clock, is_held) {
            Press::NotPressed => None,
            press => Some(ButtonEvent::new(self.button, press)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// A clock that moves forward by `step` every time it is read
    struct SteppingClock {
        ticks: Cell<u64>,
        step: Duration,
    }

    impl SteppingClock {
        fn new(step: Duration) -> Self {
            Self {
                ticks: Cell::new(0),
                step,
            }
        }
    }

    impl Monotonic for SteppingClock {
        fn now(&self) -> Instant {
            let now = self.ticks.get();
            self.ticks.set(now + self.step.as_ticks());
            Instant::from_ticks(now)
        }
    }

    /// A button held for `samples` reads of the pin and released afterwards
    fn held_for(samples: usize) -> impl FnMut() -> bool {
        let mut remaining = samples;
        move || {
            if remaining == 0 {
                false
            } else {
                remaining -= 1;
                true
            }
        }
    }

    const LONG: Duration = Duration::from_secs(2);

    #[test]
    fn released_button_is_not_pressed() {
        let classifier = ButtonClassifier::new(Button::Ok, LONG);
        let clock = SteppingClock::new(Duration::from_millis(10));
        assert_eq!(classifier.classify(&clock, held_for(0)), Press::NotPressed);
        assert_eq!(classifier.sample(&clock, held_for(0)), None);
    }

    #[test]
    fn quick_release_is_short() {
        let classifier = ButtonClassifier::new(Button::Left, LONG);
        let clock = SteppingClock::new(Duration::from_millis(300));
        assert_eq!(classifier.classify(&clock, held_for(5)), Press::Short);
    }

    #[test]
    fn hold_past_threshold_is_long() {
        let classifier = ButtonClassifier::new(Button::Right, LONG);
        let clock = SteppingClock::new(Duration::from_millis(2500));
        assert_eq!(
            classifier.sample(&clock, held_for(3)),
            Some(ButtonEvent::long(Button::Right))
        );
    }

    #[test]
    fn threshold_is_configurable() {
        let clock = SteppingClock::new(Duration::from_millis(600));
        let quick = ButtonClassifier::new(Button::Ok, Duration::from_millis(500));
        assert_eq!(quick.classify(&clock, held_for(2)), Press::Long);
        let slow = ButtonClassifier::new(Button::Ok, Duration::from_secs(5));
        assert_eq!(slow.classify(&clock, held_for(2)), Press::Short);
    }

    #[test]
    fn closures_are_clocks() {
        let classifier = ButtonClassifier::new(Button::Ok, LONG);
        let clock = || Instant::from_ticks(0);
        assert_eq!(classifier.classify(&clock, held_for(4)), Press::Short);
    }
}
