/// Largest absolute sample value seen since the last report.
#[derive(Debug, Default)]
pub struct PeakTracker {
    peak: u64,
}

impl PeakTracker {
    #[inline]
    pub fn observe(&mut self, sample: i64) {
        self.peak = self.peak.max(sample.unsigned_abs());
    }

    pub fn value(&self) -> u64 {
        self.peak
    }

    /// Return the current peak and start over from 0.
    pub fn take(&mut self) -> u64 {
        std::mem::take(&mut self.peak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_absolute_maximum() {
        let mut tracker = PeakTracker::default();
        for s in [3, -7, 5, 0] {
            tracker.observe(s);
        }
        assert_eq!(tracker.value(), 7);
    }

    #[test]
    fn test_take_resets() {
        let mut tracker = PeakTracker::default();
        tracker.observe(-32768);
        assert_eq!(tracker.take(), 32768);
        assert_eq!(tracker.value(), 0);
        tracker.observe(2);
        assert_eq!(tracker.take(), 2);
    }
}
