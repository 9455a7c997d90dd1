//! # Sunrise alarm clock firmware
//! Wires the alarm clock core to the Raspberry Pi Pico: RTC, flash, a WS2812 strip on SPI0,
//! an SSD1306 display on I2C0 and three buttons with pull-ups.
#![no_std]
#![no_main]

mod hardware;

use crate::hardware::flash_store::{FLASH_SIZE, FlashByteStore};
use crate::hardware::neopixel::NeopixelStrip;
use crate::hardware::oled::OledSurface;
use crate::hardware::rtc_clock::RtcClock;
use core::iter::repeat_n;
use defmt::{Debug2Format, error, info, warn};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::I2C0;
use embassy_rp::rtc::Rtc;
use embassy_rp::spi::{self, Spi};
use embassy_time::{Duration, Instant, Ticker};
use heapless::Vec;
use smart_leds::{SmartLedsWriteAsync, brightness};
use ssd1306_async::{I2CDisplayInterface, Ssd1306, prelude::*};
use sunrise_alarmclock::config::{NUM_LEDS, TICK_MILLIS};
use sunrise_alarmclock::{AlarmClock, Button, ButtonClassifier, ButtonEvent, Config};
use ws2812_async::{Grb, Ws2812};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Program start");
    let p = embassy_rp::init(Default::default());
    let config = Config::default();

    // buttons, pressed pulls the pin low
    let ok_button = Input::new(p.PIN_20, Pull::Up);
    let left_button = Input::new(p.PIN_21, Pull::Up);
    let right_button = Input::new(p.PIN_22, Pull::Up);
    let buttons = [
        (ButtonClassifier::new(Button::Ok, config.long_press), &ok_button),
        (ButtonClassifier::new(Button::Left, config.long_press), &left_button),
        (ButtonClassifier::new(Button::Right, config.long_press), &right_button),
    ];

    // neopixel strip
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 3_800_000;
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH1, spi_config);
    let mut np: Ws2812<_, Grb, { 12 * NUM_LEDS }> = Ws2812::new(spi);
    let mut strip = NeopixelStrip::default();

    // display
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(p.I2C0, p.PIN_13, p.PIN_12, Irqs, i2c_config);
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if let Err(e) = display.init().await {
        error!("Failed to initialize display: {}", Debug2Format(&e));
    }

    let clock = RtcClock::new(Rtc::new(p.RTC));
    let flash = Flash::<_, Async, { FLASH_SIZE }>::new(p.FLASH, p.DMA_CH0);
    let store = FlashByteStore::new(flash);
    let mut alarm_clock = AlarmClock::new(clock, store, config);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(TICK_MILLIS)));
    loop {
        let mut events: Vec<ButtonEvent, 3> = Vec::new();
        for (classifier, input) in &buttons {
            if let Some(event) = classifier.sample(&Instant::now, || input.is_low()) {
                // capacity matches the number of buttons
                let _ = events.push(event);
            }
        }

        let mut surface = OledSurface::new(&mut display);
        alarm_clock.tick(&events, &mut strip, &mut surface);
        let flush = surface.needs_flush();

        if let Some((color, level)) = strip.take_pending() {
            if np.write(brightness(repeat_n(color, NUM_LEDS), level)).await.is_err() {
                warn!("Failed to write to the LED strip");
            }
        }
        if flush {
            if let Err(e) = display.flush().await {
                warn!("Failed to flush the display: {}", Debug2Format(&e));
            }
        }

        ticker.next().await;
    }
}
