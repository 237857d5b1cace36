//! Console rendering of meter reports.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pcm_meter::Observer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    /// `|` padded further right the quieter the signal, then the value
    Bar,
    /// One JSON object per report
    Json,
}

impl FromStr for DisplayFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim() {
            "bar" => Ok(DisplayFormat::Bar),
            "json" => Ok(DisplayFormat::Json),
            other => anyhow::bail!("unknown display format {:?}", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Rms,
    Peak,
}

#[derive(Serialize)]
struct Reading {
    kind: Kind,
    db: f64,
}

/// Prints every report to stdout.
#[derive(Debug)]
pub struct ConsoleObserver {
    format: DisplayFormat,
    bar_scale: f64,
    max_bar_width: usize,
    observe_peak: bool,
}

impl ConsoleObserver {
    pub fn new(format: DisplayFormat, bar_scale: f64, max_bar_width: usize, observe_peak: bool) -> Self {
        Self {
            format,
            bar_scale,
            max_bar_width,
            observe_peak,
        }
    }

    fn render(&self, kind: Kind, db: f64) -> String {
        match self.format {
            DisplayFormat::Bar => {
                let marker = match kind {
                    Kind::Rms => "|",
                    Kind::Peak => "^",
                };
                let width = self.bar_width(db);
                format!("{:<width$}{:.6}", marker, db, width = width)
            }
            // Non-finite levels (silence) serialize as null
            DisplayFormat::Json => serde_json::to_string(&Reading { kind, db })
                .unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e)),
        }
    }

    fn bar_width(&self, db: f64) -> usize {
        let width = (db * self.bar_scale).abs();
        if width.is_finite() {
            (width as usize).min(self.max_bar_width)
        } else {
            self.max_bar_width
        }
    }
}

impl Observer for ConsoleObserver {
    fn on_rms(&mut self, db: f64) {
        println!("{}", self.render(Kind::Rms, db));
    }

    fn on_peak(&mut self, db: f64) {
        println!("{}", self.render(Kind::Peak, db));
    }

    fn wants_peak(&self) -> bool {
        self.observe_peak
    }
}
