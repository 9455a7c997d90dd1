//! Button events, the only user input the core consumes

/// The buttons of the system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Toggles setup (long press), dismisses the sunrise or moves to the next field (short press)
    Ok,
    /// Decrements the active field (short press) or moves to the previous field (long press)
    Left,
    /// Increments the active field (short press) or moves to the next field (long press)
    Right,
}

/// How a button was pressed, as classified from how long it was held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    /// The button was not held when sampled
    NotPressed,
    /// The button was released before the long press threshold
    Short,
    /// The button was held for at least the long press threshold
    Long,
}

/// A classified press of one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    /// The button that was pressed
    pub button: Button,
    /// How it was pressed
    pub press: Press,
}

impl ButtonEvent {
    /// Create a new `ButtonEvent`
    #[must_use]
    pub const fn new(button: Button, press: Press) -> Self {
        Self { button, press }
    }

    /// A short press of `button`
    #[must_use]
    pub const fn short(button: Button) -> Self {
        Self::new(button, Press::Short)
    }

    /// A long press of `button`
    #[must_use]
    pub const fn long(button: Button) -> Self {
        Self::new(button, Press::Long)
    }
}
