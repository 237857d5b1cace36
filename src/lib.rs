//! Live loudness metering for raw PCM streams.
//!
//! ```
//! use std::time::Duration;
//! use pcm_meter::pcm::{AnalyzerConfig, Callbacks};
//!
//! let mut config = AnalyzerConfig {
//!     window: Duration::from_millis(400),
//!     observe_every: Duration::from_millis(100),
//!     ..Default::default()
//! };
//! config.use_mime_type("audio/L16; rate=8000; channels=1").unwrap();
//!
//! let mut reports = 0;
//! let mut analyzer = config
//!     .open(Callbacks::new().with_rms(|_db| reports += 1))
//!     .unwrap();
//! analyzer.write(&[0x00, 0x40].repeat(8000));
//! drop(analyzer);
//! assert_eq!(reports, 10);
//! ```

pub mod pcm;

pub use pcm::{Analyzer, AnalyzerConfig, AnalyzerError, Callbacks, Observer, parse_mime_type};
