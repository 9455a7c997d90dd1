//! # Orchestrate
//! The tick loop of the device.
//!
//! One [`AlarmClock::tick`] takes a fresh snapshot from the clock source, applies the button
//! events sampled for this tick, re-derives the mode from the now-current time and today's
//! alarm, updates the LED strip and sends the display whatever changed since the last tick.
//! All state lives in the [`AlarmClock`] value, the clock source and the alarm store are only
//! ever touched from here.
use crate::alarm_settings::{AlarmEntry, AlarmStore, ByteStore};
use crate::config::Config;
use crate::display::{DisplaySurface, Frame, redraw};
use crate::event::{Button, ButtonEvent, Press};
use crate::light_effects::{self, LedStrip, LightOutput, brightness};
use crate::settings::{Change, SettingsNavigator};
use crate::state::{ModeController, OperationMode, seconds_since_alarm};
use crate::utility::date_time::{ClockSource, TimeSnapshot};

/// The alarm clock core and everything it owns between ticks
#[derive(Debug)]
pub struct AlarmClock<C, S> {
    /// Source of the current time
    clock: C,
    /// The persisted alarm schedule
    alarms: AlarmStore<S>,
    /// Durations and colors
    config: Config,
    /// The operation mode
    modes: ModeController,
    /// Cursors of setup mode
    settings: SettingsNavigator,
    /// The latest snapshot of the clock
    current: TimeSnapshot,
    /// What the display showed after the last tick, including the previous snapshot
    shown: Option<Frame>,
    /// What the LED strip showed after the last tick
    lights: Option<LightOutput>,
}

impl<C: ClockSource, S: ByteStore> AlarmClock<C, S> {
    /// Create a new `AlarmClock` in clock mode
    pub fn new(mut clock: C, store: S, config: Config) -> Self {
        let current = clock.now();
        info!(
            "Alarm clock starting at {}-{}-{} {}:{}:{}",
            current.year(),
            current.month(),
            current.day(),
            current.hour(),
            current.minute(),
            current.second()
        );
        Self {
            clock,
            alarms: AlarmStore::new(store),
            config,
            modes: ModeController::new(),
            settings: SettingsNavigator::new(),
            current,
            shown: None,
            lights: None,
        }
    }

    /// Runs one iteration of the device loop and returns the mode it ends in
    pub fn tick<L: LedStrip, D: DisplaySurface>(
        &mut self,
        events: &[ButtonEvent],
        strip: &mut L,
        display: &mut D,
    ) -> OperationMode {
        self.current = self.clock.now();
        if self.previous().is_some_and(|previous| self.current < *previous) {
            debug!("Clock went backwards, deriving the mode from the new time");
        }

        for event in events {
            self.handle_button(*event);
        }

        let today = self.todays_alarm();
        let mode = self
            .modes
            .update(&self.current, today, self.config.sunrise_window);

        self.update_lights(strip, today);
        self.update_display(display);
        mode
    }

    /// Applies one button event to the mode and the settings
    pub fn handle_button(&mut self, event: ButtonEvent) {
        let setup = self.modes.is_setup();
        match (event.button, event.press, setup) {
            (_, Press::NotPressed, _) => {}
            (Button::Ok, Press::Long, false) => {
                self.modes.enter_setup();
                self.settings.begin(self.current.weekday());
            }
            (Button::Ok, Press::Long, true) => {
                let today = self.todays_alarm();
                self.modes
                    .exit_setup(&self.current, today, self.config.sunrise_window);
            }
            (Button::Ok, Press::Short, false) => {
                self.modes.dismiss();
            }
            (Button::Ok, Press::Short, true) | (Button::Right, Press::Long, true) => {
                self.settings.advance_field(true);
            }
            (Button::Left, Press::Long, true) => self.settings.advance_field(false),
            (Button::Left, Press::Short, true) => {
                let change = self.settings.decrement(&mut self.clock, &mut self.alarms);
                self.apply_change(change);
            }
            (Button::Right, Press::Short, true) => {
                let change = self.settings.increment(&mut self.clock, &mut self.alarms);
                self.apply_change(change);
            }
            (Button::Left | Button::Right, _, false) => {
                debug!("{} ignored outside setup", event.button);
            }
        }
    }

    /// Makes the result of a field change visible in this tick
    fn apply_change(&mut self, change: crate::Result<Change>) {
        match change {
            Ok(Change::Clock(now)) => self.current = now,
            Ok(Change::Alarm(_) | Change::AlarmWeekday(_)) => {}
            Err(e) => {
                warn!("Setting not changed: {}", e);
            }
        }
    }

    /// Today's alarm entry
    fn todays_alarm(&mut self) -> AlarmEntry {
        self.alarms.get(self.current.weekday())
    }

    /// What the LED strip should show for the current mode
    fn light_output(&self, today: AlarmEntry) -> LightOutput {
        match self.modes.mode() {
            OperationMode::Sunrise => {
                let elapsed = seconds_since_alarm(&self.current, today);
                LightOutput::Sunrise(brightness(elapsed, self.config.ramp_secs()))
            }
            OperationMode::Clock | OperationMode::Sleep | OperationMode::Setup => LightOutput::Off,
        }
    }

    /// Pushes the light output to the strip if it changed
    fn update_lights<L: LedStrip>(&mut self, strip: &mut L, today: AlarmEntry) {
        let output = self.light_output(today);
        if self.lights != Some(output) {
            light_effects::show(strip, output, self.config.warm_color);
            self.lights = Some(output);
        }
    }

    /// The frame that should be on the display now
    fn frame(&mut self) -> Frame {
        let alarm_weekday = if self.modes.is_setup() {
            self.settings.alarm_weekday()
        } else {
            self.current.weekday()
        };
        Frame {
            snapshot: self.current,
            mode: self.modes.mode(),
            alarm_weekday,
            alarm: self.alarms.get(alarm_weekday),
            active_field: self.settings.active_field(),
        }
    }

    /// Sends the display what changed since the last tick
    fn update_display<D: DisplaySurface>(&mut self, display: &mut D) {
        let frame = self.frame();
        redraw(display, self.shown.as_ref(), &frame);
        self.shown = Some(frame);
    }

    /// The active mode
    pub const fn mode(&self) -> OperationMode {
        self.modes.mode()
    }

    /// The snapshot of the latest tick
    pub const fn current(&self) -> &TimeSnapshot {
        &self.current
    }

    /// The snapshot the previous tick ended with, `None` before the first tick
    pub fn previous(&self) -> Option<&TimeSnapshot> {
        self.shown.as_ref().map(|frame| &frame.snapshot)
    }

    /// The cursors of setup mode
    pub const fn settings(&self) -> &SettingsNavigator {
        &self.settings
    }

    /// The alarm schedule
    pub const fn alarms(&mut self) -> &mut AlarmStore<S> {
        &mut self.alarms
    }

    /// The clock source
    pub const fn clock(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The configuration
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
