//! pcm - streaming PCM decoding and loudness reporting
//!
//! Decodes interleaved fixed-width integer samples from byte chunks of any
//! size and reports RMS and peak levels in dB relative to full scale at a
//! cadence measured in audio time.
//!
//! The levels are an approximation: no weighting, no DC offset removal, and
//! not a standardized loudness measurement.

mod analyzer;
mod decoder;
mod error;
mod format;
mod mime;
mod observer;
mod params;
mod peak;
mod scheduler;
mod window;

pub use analyzer::Analyzer;
pub use decoder::FrameDecoder;
pub use error::{AnalyzerError, MimeError};
pub use format::{ByteOrder, SampleFormat, decode_word};
pub use mime::{StreamFormat, parse_mime_type};
pub use observer::{Callbacks, Observer};
pub use params::{AnalyzerConfig, Derived};
pub use peak::PeakTracker;
pub use scheduler::{ReportScheduler, decibels};
pub use window::{RollingWindow, WindowMode};
