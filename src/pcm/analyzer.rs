//! The streaming decode-and-report engine.
//!
//! Bytes go through the frame decoder; every decoded sample is squared into
//! the rolling window and checked against the peak; every decoded frame
//! advances the report countdown. Reports are delivered to the observer
//! synchronously, before `write` returns.

use std::io;

use super::decoder::FrameDecoder;
use super::error::AnalyzerError;
use super::observer::Observer;
use super::params::{AnalyzerConfig, Derived};
use super::peak::PeakTracker;
use super::scheduler::{ReportScheduler, decibels};
use super::window::RollingWindow;

impl AnalyzerConfig {
    /// Validate the configuration and build a ready analyzer.
    ///
    /// * `observer` - receives the reports; pass `()` to only decode
    pub fn open<O: Observer>(self, observer: O) -> Result<Analyzer<O>, AnalyzerError> {
        let derived = self.validate().inspect_err(|e| {
            log::warn!("Rejected analyzer config {:?}: {}", self, e);
        })?;

        log::debug!(
            "Analyzer opened, rate: {}Hz, ch: {}, word: {} bits, frame: {} bytes, window: {} samples ({:?}), report every {} frames",
            self.sample_rate,
            derived.channels,
            self.word_size,
            derived.frame_bytes,
            derived.window_samples,
            derived.mode,
            derived.report_period + 1,
        );

        let window = RollingWindow::new(derived.mode, derived.window_samples).map_err(|e| {
            log::warn!("Cannot allocate a {} sample window: {}", derived.window_samples, e);
            AnalyzerError::BadParameters("window is too long".to_string())
        })?;

        Ok(Analyzer {
            decoder: FrameDecoder::new(derived.format, derived.channels),
            meter: Meter {
                window,
                peak: PeakTracker::default(),
                scheduler: ReportScheduler::new(derived.report_period),
                track_peak: observer.wants_peak(),
                word_max: derived.word_max,
                observer,
            },
            config: self,
            derived,
        })
    }
}

/// Decodes PCM audio, computes RMS loudness over a window, and reports it at
/// fixed intervals of audio time.
///
/// The configuration is frozen by [`AnalyzerConfig::open`]. `write` accepts
/// chunks of any length; incomplete frames are carried to the next call.
/// Calls must be serialized, which `&mut self` already enforces.
#[derive(Debug)]
pub struct Analyzer<O> {
    config: AnalyzerConfig,
    derived: Derived,
    decoder: FrameDecoder,
    meter: Meter<O>,
}

#[derive(Debug)]
struct Meter<O> {
    window: RollingWindow,
    peak: PeakTracker,
    scheduler: ReportScheduler,
    track_peak: bool,
    word_max: f64,
    observer: O,
}

impl<O: Observer> Analyzer<O> {
    /// Decode and analyze `chunk`, calling the observer as report boundaries
    /// are crossed. Always consumes the whole chunk.
    pub fn write(&mut self, chunk: &[u8]) -> usize {
        self.decoder.push(chunk, |frame| self.meter.fold_frame(frame));
        chunk.len()
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    /// Bytes held back because they do not complete a frame yet.
    pub fn pending(&self) -> &[u8] {
        self.decoder.pending()
    }

    /// Current running sum of squares in the window.
    pub fn window_sum(&self) -> u128 {
        self.meter.window.sum()
    }

    /// Peak amplitude since the last report.
    pub fn peak(&self) -> u64 {
        self.meter.peak.value()
    }

    /// Frames left until the next report.
    pub fn countdown(&self) -> u64 {
        self.meter.scheduler.countdown()
    }

    pub fn observer(&self) -> &O {
        &self.meter.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.meter.observer
    }

    pub fn into_observer(self) -> O {
        self.meter.observer
    }
}

impl<O: Observer> Meter<O> {
    #[inline]
    fn fold_frame(&mut self, frame: &[i64]) {
        for &sample in frame {
            let magnitude = u128::from(sample.unsigned_abs());
            self.window.push(magnitude * magnitude);
            if self.track_peak {
                self.peak.observe(sample);
            }
        }

        if self.scheduler.tick() {
            self.report();
        }
    }

    fn report(&mut self) {
        if self.observer.wants_rms() {
            let rms = decibels(self.window.mean_square().sqrt(), self.word_max);
            log::trace!("rms {:.6} dB over {} samples", rms, self.window.span());
            self.observer.on_rms(rms);
        }
        if self.track_peak {
            let peak = decibels(self.peak.take() as f64, self.word_max);
            log::trace!("peak {:.6} dB", peak);
            self.observer.on_peak(peak);
        }
        self.window.after_report();
    }
}

impl<O: Observer> io::Write for Analyzer<O> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Analyzer::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
