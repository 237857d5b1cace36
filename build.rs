use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
struct Config {
    application: Application,
    stream: Stream,
    meter: Meter,
    display: Display,
}

#[derive(Deserialize)]
struct Application {
    name: String,
    version: String,
}

#[derive(Deserialize)]
struct Stream {
    mime_type: String,
    input: String,
    read_buffer_size: usize,
}

#[derive(Deserialize)]
struct Meter {
    window_ms: u64,
    observe_every_ms: u64,
    observe_peak: bool,
}

#[derive(Deserialize)]
struct Display {
    format: String,
    bar_scale: f64,
    max_bar_width: usize,
}

// Read config.toml at compile time and export it as environment variables
fn main() {
    println!("cargo:rerun-if-changed=config.toml");

    let config_path = Path::new("config.toml");
    if !config_path.exists() {
        panic!("config.toml not found!");
    }

    let config_str = fs::read_to_string(config_path).expect("Failed to read config.toml");
    let config: Config = toml::from_str(&config_str).expect("Failed to parse config.toml");

    println!("cargo:rustc-env=APP_NAME={}", config.application.name);
    println!("cargo:rustc-env=APP_VERSION={}", config.application.version);

    println!("cargo:rustc-env=STREAM_MIME_TYPE={}", config.stream.mime_type);
    println!("cargo:rustc-env=STREAM_INPUT={}", config.stream.input);
    println!("cargo:rustc-env=STREAM_READ_BUFFER_SIZE={}", config.stream.read_buffer_size);

    println!("cargo:rustc-env=METER_WINDOW_MS={}", config.meter.window_ms);
    println!("cargo:rustc-env=METER_OBSERVE_EVERY_MS={}", config.meter.observe_every_ms);
    println!("cargo:rustc-env=METER_OBSERVE_PEAK={}", config.meter.observe_peak);

    println!("cargo:rustc-env=DISPLAY_FORMAT={}", config.display.format);
    println!("cargo:rustc-env=DISPLAY_BAR_SCALE={}", config.display.bar_scale);
    println!("cargo:rustc-env=DISPLAY_MAX_BAR_WIDTH={}", config.display.max_bar_width);
}
