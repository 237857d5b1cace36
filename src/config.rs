use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::display::DisplayFormat;
use crate::input::InputSource;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,

    // Input stream
    pub mime_type: String,
    pub input: InputSource,
    pub read_buffer_size: usize,

    // Meter timing
    pub window: Duration,
    pub observe_every: Duration,
    pub observe_peak: bool,

    // Console output
    pub display_format: DisplayFormat,
    pub bar_scale: f64,
    pub max_bar_width: usize,
}

impl Config {
    /// Built-in defaults, baked in from config.toml by build.rs.
    pub fn new() -> Result<Self, &'static str> {
        Ok(Self {
            app_name: env!("APP_NAME").to_string(),
            app_version: env!("APP_VERSION").to_string(),

            mime_type: env!("STREAM_MIME_TYPE").to_string(),
            input: env!("STREAM_INPUT")
                .parse()
                .map_err(|_| "Failed to parse STREAM_INPUT")?,
            read_buffer_size: env!("STREAM_READ_BUFFER_SIZE")
                .parse()
                .map_err(|_| "Failed to parse STREAM_READ_BUFFER_SIZE")?,

            window: Duration::from_millis(
                env!("METER_WINDOW_MS")
                    .parse()
                    .map_err(|_| "Failed to parse METER_WINDOW_MS")?,
            ),
            observe_every: Duration::from_millis(
                env!("METER_OBSERVE_EVERY_MS")
                    .parse()
                    .map_err(|_| "Failed to parse METER_OBSERVE_EVERY_MS")?,
            ),
            observe_peak: env!("METER_OBSERVE_PEAK")
                .parse()
                .map_err(|_| "Failed to parse METER_OBSERVE_PEAK")?,

            display_format: env!("DISPLAY_FORMAT")
                .parse()
                .map_err(|_| "Failed to parse DISPLAY_FORMAT")?,
            bar_scale: env!("DISPLAY_BAR_SCALE")
                .parse()
                .map_err(|_| "Failed to parse DISPLAY_BAR_SCALE")?,
            max_bar_width: env!("DISPLAY_MAX_BAR_WIDTH")
                .parse()
                .map_err(|_| "Failed to parse DISPLAY_MAX_BAR_WIDTH")?,
        })
    }

    /// Built-in defaults overlaid with the TOML file at `path`, if any.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = Self::new().map_err(anyhow::Error::msg)?;
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
                config
                    .overlay(&text)
                    .with_context(|| format!("Failed to parse config file '{}'", path.display()))
            }
            None => Ok(config),
        }
    }

    /// Apply every key present in `toml_text` on top of `self`.
    pub fn overlay(mut self, toml_text: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(toml_text)?;

        if let Some(mime_type) = file.stream.mime_type {
            self.mime_type = mime_type;
        }
        if let Some(input) = file.stream.input {
            self.input = input.parse()?;
        }
        if let Some(size) = file.stream.read_buffer_size {
            anyhow::ensure!(size > 0, "read_buffer_size must be positive");
            self.read_buffer_size = size;
        }

        if let Some(ms) = file.meter.window_ms {
            self.window = Duration::from_millis(ms);
        }
        if let Some(ms) = file.meter.observe_every_ms {
            self.observe_every = Duration::from_millis(ms);
        }
        if let Some(observe_peak) = file.meter.observe_peak {
            self.observe_peak = observe_peak;
        }

        if let Some(format) = file.display.format {
            self.display_format = format;
        }
        if let Some(scale) = file.display.bar_scale {
            self.bar_scale = scale;
        }
        if let Some(width) = file.display.max_bar_width {
            self.max_bar_width = width;
        }

        Ok(self)
    }
}

// Runtime override file: same sections as config.toml, every key optional

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    stream: StreamSection,
    meter: MeterSection,
    display: DisplaySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StreamSection {
    mime_type: Option<String>,
    input: Option<String>,
    read_buffer_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MeterSection {
    window_ms: Option<u64>,
    observe_every_ms: Option<u64>,
    observe_peak: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DisplaySection {
    format: Option<DisplayFormat>,
    bar_scale: Option<f64>,
    max_bar_width: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_defaults() {
        let config = Config::new().unwrap();
        assert_eq!(config.app_name, "pcm-meter");
        assert_eq!(config.mime_type, "audio/L16; rate=44100; channels=2");
        assert_eq!(config.input, InputSource::Stdin);
        assert_eq!(config.window, Duration::from_millis(400));
        assert_eq!(config.observe_every, Duration::from_millis(400));
        assert_eq!(config.display_format, DisplayFormat::Bar);
    }

    #[test]
    fn test_overlay_replaces_only_given_keys() {
        let base = Config::new().unwrap();
        let config = base
            .clone()
            .overlay(
                r#"
                [stream]
                input = "udp:5005"

                [meter]
                window_ms = 3000
                observe_peak = true

                [display]
                format = "json"
                "#,
            )
            .unwrap();

        assert_eq!(config.input, InputSource::Udp { port: 5005 });
        assert_eq!(config.window, Duration::from_millis(3000));
        assert!(config.observe_peak);
        assert_eq!(config.display_format, DisplayFormat::Json);
        assert_eq!(config.observe_every, base.observe_every);
        assert_eq!(config.mime_type, base.mime_type);
    }

    #[test]
    fn test_overlay_rejects_bad_values() {
        let base = Config::new().unwrap();
        assert!(base.clone().overlay("[stream]\ninput = \"tcp:1\"").is_err());
        assert!(base.clone().overlay("[stream]\nread_buffer_size = 0").is_err());
        assert!(base.clone().overlay("[display]\nformat = \"sparkline\"").is_err());
        assert!(base.overlay("not toml [").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[stream]\nmime_type = \"audio/L16; rate=8000; channels=1\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.mime_type, "audio/L16; rate=8000; channels=1");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
