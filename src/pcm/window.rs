//! Rolling sum of squared samples.

use std::collections::TryReserveError;

/// How the running sum is maintained between reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Circular arena over the most recent `window_samples` squares
    Sliding,
    /// Plain accumulator, zeroed after every report
    Resetting,
}

/// Running sum of squared sample values over a fixed number of samples.
///
/// In sliding mode the squares live in an arena allocated once at
/// construction. Until the arena has filled for the first time, new squares
/// are appended; afterwards each new square replaces the oldest one. Both
/// phases update the sum by `+new - evicted`.
#[derive(Debug)]
pub struct RollingWindow {
    mode: WindowMode,
    window_samples: usize,
    squares: Vec<u128>,
    /// Next slot to overwrite once the arena is full
    cursor: usize,
    sum: u128,
}

impl RollingWindow {
    /// * `mode`           - sliding or resetting
    /// * `window_samples` - logical window size across all channels, at least 1
    ///
    /// Fails when the sliding arena cannot be allocated.
    pub fn new(mode: WindowMode, window_samples: usize) -> Result<Self, TryReserveError> {
        let mut squares = Vec::new();
        if mode == WindowMode::Sliding {
            squares.try_reserve_exact(window_samples)?;
        }
        Ok(Self {
            mode,
            window_samples,
            squares,
            cursor: 0,
            sum: 0,
        })
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    /// Current running sum of squares.
    pub fn sum(&self) -> u128 {
        self.sum
    }

    /// Fold one squared sample into the window.
    #[inline]
    pub fn push(&mut self, square: u128) {
        self.sum += square;
        if self.mode == WindowMode::Resetting {
            return;
        }

        if self.squares.len() < self.window_samples {
            self.squares.push(square);
        } else {
            let slot = &mut self.squares[self.cursor];
            self.sum -= *slot;
            *slot = square;
            self.cursor += 1;
            if self.cursor == self.window_samples {
                self.cursor = 0;
            }
        }
    }

    /// Number of samples the sum is averaged over.
    pub fn span(&self) -> usize {
        match self.mode {
            WindowMode::Sliding => self.squares.len(),
            WindowMode::Resetting => self.window_samples,
        }
    }

    /// Mean of the squares in the window, 0 when nothing has been pushed.
    pub fn mean_square(&self) -> f64 {
        match self.span() {
            0 => 0.0,
            span => self.sum as f64 / span as f64,
        }
    }

    /// Called after each report; clears the accumulator in resetting mode.
    pub fn after_report(&mut self) {
        if self.mode == WindowMode::Resetting {
            self.sum = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_reserved_up_front() {
        let window = RollingWindow::new(WindowMode::Sliding, 8).unwrap();
        assert_eq!(window.mode(), WindowMode::Sliding);
        assert!(window.squares.capacity() >= 8);

        let window = RollingWindow::new(WindowMode::Resetting, 1 << 40).unwrap();
        assert_eq!(window.mode(), WindowMode::Resetting);
        assert_eq!(window.squares.capacity(), 0);
    }

    #[test]
    fn test_oversized_arena_is_an_error() {
        assert!(RollingWindow::new(WindowMode::Sliding, usize::MAX / 16).is_err());
    }

    #[test]
    fn test_growth_phase_is_not_diluted() {
        let mut window = RollingWindow::new(WindowMode::Sliding, 4).unwrap();
        window.push(9);
        assert_eq!(window.span(), 1);
        assert_eq!(window.mean_square(), 9.0);
        window.push(1);
        assert_eq!(window.span(), 2);
        assert_eq!(window.mean_square(), 5.0);
    }

    #[test]
    fn test_sliding_sum_matches_recent_squares() {
        let capacity = 5;
        let mut window = RollingWindow::new(WindowMode::Sliding, capacity).unwrap();
        let squares: Vec<u128> = (1..=23).map(|n| (n * n) as u128).collect();

        for (seen, &sq) in squares.iter().enumerate() {
            window.push(sq);
            let seen = seen + 1;
            let recent = &squares[seen.saturating_sub(capacity)..seen];
            assert_eq!(window.sum(), recent.iter().sum::<u128>(), "after {seen} samples");
            assert_eq!(window.span(), seen.min(capacity));
        }
    }

    #[test]
    fn test_after_report_keeps_sliding_sum() {
        let mut window = RollingWindow::new(WindowMode::Sliding, 2).unwrap();
        window.push(4);
        window.push(16);
        window.after_report();
        assert_eq!(window.sum(), 20);
        window.push(36);
        assert_eq!(window.sum(), 52);
    }

    #[test]
    fn test_resetting_mode() {
        let mut window = RollingWindow::new(WindowMode::Resetting, 4).unwrap();
        window.push(4);
        window.push(4);
        assert_eq!(window.sum(), 8);
        // Divides by the full window even before it has filled
        assert_eq!(window.mean_square(), 2.0);
        window.after_report();
        assert_eq!(window.sum(), 0);
        window.push(16);
        assert_eq!(window.sum(), 16);
    }

    #[test]
    fn test_wide_squares_do_not_overflow() {
        let big = (1u128 << 55) * (1u128 << 55);
        let mut window = RollingWindow::new(WindowMode::Sliding, 3).unwrap();
        for _ in 0..10 {
            window.push(big);
        }
        assert_eq!(window.sum(), big * 3);
    }
}
