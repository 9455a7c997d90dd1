//! This build script does two things:
//! - it turns `config/sunrise_config.json` into `sunrise_config.rs` in `OUT_DIR`, which
//!   `src/config.rs` includes as the compile-time defaults of the device.
//! - when building for the RP2040 (a `thumb*` target) it copies `memory.x` to a place where
//!   the linker always finds it and passes the linker scripts the firmware needs.
//!   Host builds (`cargo test`) skip this, so the library and its tests link normally.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::print_stdout)]

use serde::Deserialize;
use std::{
    env, fs,
    fs::File,
    io,
    io::Write,
    path::{Path, PathBuf},
};

/// Contents of the default config file, written when no config exists yet
const DEFAULT_CONFIG: &str = r#"{
  "sunrise_window_minutes": 60,
  "ramp_minutes": 30,
  "long_press_millis": 2000,
  "num_leds": 150,
  "warm_color": [255, 147, 41],
  "tick_millis": 200
}
"#;

/// Shape of `config/sunrise_config.json`
#[derive(Deserialize)]
struct SunriseConfig {
    /// Minutes after the alarm time during which the device is in sunrise mode
    sunrise_window_minutes: u16,
    /// Minutes the brightness ramp takes from dimmest to full
    ramp_minutes: u16,
    /// Button hold duration that counts as a long press
    long_press_millis: u32,
    /// Number of pixels on the strip
    num_leds: usize,
    /// Color of the sunrise light
    warm_color: [u8; 3],
    /// Period of the main loop
    tick_millis: u32,
}

fn main() {
    println!("cargo:rerun-if-changed=config/sunrise_config.json");
    sunrise_config().unwrap();

    let target = env::var("TARGET").unwrap_or_default();
    if target.starts_with("thumb") {
        memory_x();
    }
}

/// Generate `sunrise_config.rs` from `config/sunrise_config.json`
fn sunrise_config() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR environment variable not set");
    let dest_path = Path::new(&out_dir).join("sunrise_config.rs");
    let mut f = File::create(dest_path).expect("Could not create sunrise_config.rs file");

    // Read the config file, or create it with the defaults if it doesn't exist
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR environment variable not set");
    let config_path = Path::new(&manifest_dir).join("config/sunrise_config.json");
    let config_contents = if config_path.exists() {
        fs::read_to_string(&config_path).expect("Could not read sunrise_config.json file")
    } else {
        println!("sunrise_config.json not found, creating with default values");
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&config_path, DEFAULT_CONFIG)
            .expect("Could not write default sunrise_config.json file");
        DEFAULT_CONFIG.to_string()
    };

    let config: SunriseConfig =
        serde_json::from_str(&config_contents).expect("Could not parse sunrise_config.json file");
    assert!(
        config.ramp_minutes <= config.sunrise_window_minutes,
        "ramp_minutes must not exceed sunrise_window_minutes"
    );
    assert!(
        config.long_press_millis > 0,
        "long_press_millis must be greater than zero"
    );

    let [r, g, b] = config.warm_color;
    writeln!(
        f,
        "pub const SUNRISE_WINDOW_MINUTES: u16 = {};",
        config.sunrise_window_minutes
    )?;
    writeln!(f, "pub const RAMP_MINUTES: u16 = {};", config.ramp_minutes)?;
    writeln!(
        f,
        "pub const LONG_PRESS_MILLIS: u32 = {};",
        config.long_press_millis
    )?;
    writeln!(f, "pub const NUM_LEDS: usize = {};", config.num_leds)?;
    writeln!(
        f,
        "pub const WARM_COLOR: smart_leds::RGB8 = smart_leds::RGB8::new({r}, {g}, {b});"
    )?;
    writeln!(f, "pub const TICK_MILLIS: u32 = {};", config.tick_millis)?;
    Ok(())
}

/// Handle the `memory.x` linker script
fn memory_x() {
    // Put `memory.x` in our output directory and ensure it's
    // on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // Only re-run when `memory.x` changes, not on every file in the project.
    println!("cargo:rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
