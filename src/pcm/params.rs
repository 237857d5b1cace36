//! Analyzer configuration and the constants derived from it.

use std::time::Duration;

use super::error::AnalyzerError;
use super::format::{ByteOrder, SampleFormat};
use super::window::WindowMode;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Decode and report parameters.
///
/// Fill this in, then call [`open`](AnalyzerConfig::open). The analyzer takes
/// ownership of the configuration, so it cannot change once decoding starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Samples per second per channel
    pub sample_rate: u32,
    /// Bits per sample: a multiple of 8 below 64
    pub word_size: u32,
    pub channels: u32,
    pub byte_order: ByteOrder,
    pub signed: bool,
    /// Duration of the loudness window. Typical values are 400ms (momentary)
    /// and 3s (short term).
    pub window: Duration,
    /// Interval between reports, in audio time
    pub observe_every: Duration,
}

impl Default for AnalyzerConfig {
    /// 16-bit little-endian signed, 400ms window and cadence. Sample rate and
    /// channel count are left at 0 and must be set.
    fn default() -> Self {
        Self {
            sample_rate: 0,
            word_size: 16,
            channels: 0,
            byte_order: ByteOrder::Little,
            signed: true,
            window: Duration::from_millis(400),
            observe_every: Duration::from_millis(400),
        }
    }
}

/// Constants fixed when the analyzer is opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derived {
    pub format: SampleFormat,
    pub channels: usize,
    /// Bytes per interleaved frame
    pub frame_bytes: usize,
    /// Full-scale amplitude, the 0 dB reference
    pub word_max: f64,
    /// Squared-sample slots in the window, across all channels
    pub window_samples: usize,
    /// Frames between reports, minus one
    pub report_period: u64,
    pub mode: WindowMode,
}

impl AnalyzerConfig {
    /// Check the parameters and derive the run-time constants.
    pub fn validate(&self) -> Result<Derived, AnalyzerError> {
        let bad = |reason: &str| AnalyzerError::BadParameters(reason.to_string());

        if self.channels < 1 {
            return Err(bad("channels must be at least 1"));
        }
        if self.word_size == 0 || self.word_size % 8 != 0 || self.word_size >= 64 {
            return Err(bad("word size must be a non-zero multiple of 8 below 64"));
        }
        if self.sample_rate < 1 {
            return Err(bad("sample rate must be at least 1"));
        }

        let rate = u128::from(self.sample_rate);
        let frames_per_report = rate
            .checked_mul(self.observe_every.as_nanos())
            .ok_or_else(|| bad("report interval is too long"))?
            / NANOS_PER_SEC;
        if frames_per_report < 1 {
            return Err(bad("report interval is shorter than one sample period"));
        }
        let report_period = u64::try_from(frames_per_report - 1)
            .map_err(|_| bad("report interval is too long"))?;

        let window_samples = u128::from(self.channels)
            .checked_mul(rate)
            .and_then(|n| n.checked_mul(self.window.as_nanos()))
            .ok_or_else(|| bad("window is too long"))?
            / NANOS_PER_SEC;
        let window_samples =
            usize::try_from(window_samples).map_err(|_| bad("window is too long"))?;

        let mode = if self.window != self.observe_every {
            WindowMode::Sliding
        } else {
            WindowMode::Resetting
        };
        if mode == WindowMode::Sliding {
            if window_samples == 0 {
                return Err(bad("window is shorter than one frame"));
            }
            // The arena must stay addressable
            let arena_bytes = window_samples.checked_mul(size_of::<u128>());
            if arena_bytes.is_none_or(|bytes| bytes > isize::MAX as usize) {
                return Err(bad("window is too long"));
            }
        }

        let word_bytes = (self.word_size / 8) as usize;
        let channels = self.channels as usize;

        Ok(Derived {
            format: SampleFormat {
                word_bytes,
                byte_order: self.byte_order,
                signed: self.signed,
            },
            channels,
            frame_bytes: word_bytes * channels,
            word_max: (1u64 << (self.word_size - 1)) as f64,
            window_samples,
            report_period,
            mode,
        })
    }
}
