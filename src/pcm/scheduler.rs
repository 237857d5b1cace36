//! Report cadence in audio time and the decibel conversion.

/// Counts decoded frames down to the next report boundary.
#[derive(Debug)]
pub struct ReportScheduler {
    period: u64,
    countdown: u64,
}

impl ReportScheduler {
    /// `period` is the countdown reloaded after every report.
    pub fn new(period: u64) -> Self {
        Self {
            period,
            countdown: period,
        }
    }

    pub fn countdown(&self) -> u64 {
        self.countdown
    }

    /// Advance by one frame. Returns true when a report is due, in which
    /// case the countdown has already been reloaded.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.countdown = self.period;
            true
        } else {
            false
        }
    }
}

/// Convert an amplitude to decibels relative to `full_scale`.
///
/// This is `10 * log10(amplitude / full_scale)`: an amplitude ratio on the
/// power scale, half the conventional `20 * log10` dBFS reading. Meter
/// output stays on this scale; do not use it where standard dBFS is expected.
#[inline]
pub fn decibels(amplitude: f64, full_scale: f64) -> f64 {
    10.0 * (amplitude / full_scale).log10()
}
