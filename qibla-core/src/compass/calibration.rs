//! Calibration Estimation
//!
//! ## Overview
//!
//! A magnetometer that is settled and free of nearby interference gives
//! nearly the same heading sample after sample while the device is held
//! still. The estimator keeps the most recent headings in a fixed window
//! and calls the compass calibrated once their spread is small:
//!
//! ```text
//! window (N = 10) ──→ unwrap around oldest ──→ population σ
//!                                                  │
//!                        len ≥ 5 and σ < threshold ─┴─→ calibrated
//! ```
//!
//! ## Wraparound
//!
//! Headings are angles, so 359° and 1° are 2° apart, not 358°. Before the
//! statistics each heading is replaced by the oldest sample plus its
//! signed difference from it in `(-180, 180]`. A needle jittering across
//! north then has a small σ like any other.
//!
//! ## Memory
//!
//! The window is a [`CircularBuffer`]; no allocation, `N × 8` bytes.

use crate::{
    buffer::CircularBuffer,
    constants::compass::{CALIBRATION_MIN_SAMPLES, CALIBRATION_WINDOW_SIZE},
    utils::normalize_to_180,
};

/// Calibration verdict and window fill
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationStatus {
    /// Heading spread below the threshold
    pub is_calibrated: bool,
    /// Window fill in `[0, 1]`
    pub progress: f64,
}

/// Rolling heading-spread estimator over the last `N` headings
#[derive(Debug, Clone)]
pub struct CalibrationEstimator<const N: usize = CALIBRATION_WINDOW_SIZE> {
    window: CircularBuffer<f64, N>,
    threshold_deg: f64,
    calibrated: bool,
}

impl<const N: usize> CalibrationEstimator<N> {
    /// Empty estimator, calibrated once σ drops under `threshold_deg`
    pub const fn new(threshold_deg: f64) -> Self {
        Self {
            window: CircularBuffer::new(),
            threshold_deg,
            calibrated: false,
        }
    }

    /// Add a heading and re-evaluate
    ///
    /// Returns `true` when the verdict changed.
    pub fn push(&mut self, heading_deg: f64) -> bool {
        self.window.push(heading_deg);

        if self.window.len() < CALIBRATION_MIN_SAMPLES.min(N) {
            return false;
        }

        let calibrated = self
            .std_dev()
            .is_some_and(|sigma| sigma < self.threshold_deg);
        let changed = calibrated != self.calibrated;
        self.calibrated = calibrated;
        changed
    }

    /// Population standard deviation of the window, headings unwrapped
    /// around the oldest sample
    pub fn std_dev(&self) -> Option<f64> {
        let reference = *self.window.first()?;
        let count = self.window.len() as f64;

        let unwrapped = |h: &f64| reference + normalize_to_180(*h - reference);
        let mean = self.window.iter().map(unwrapped).sum::<f64>() / count;
        let variance = self
            .window
            .iter()
            .map(|h| {
                let d = unwrapped(h) - mean;
                d * d
            })
            .sum::<f64>()
            / count;

        Some(libm::sqrt(variance))
    }

    /// Current verdict
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Verdict plus `min(len / N, 1)`
    pub fn status(&self) -> CalibrationStatus {
        CalibrationStatus {
            is_calibrated: self.calibrated,
            progress: (self.window.len() as f64 / N as f64).min(1.0),
        }
    }

    /// Headings currently in the window
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Window is empty
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Forget all headings and the verdict
    pub fn reset(&mut self) {
        self.window.clear();
        self.calibrated = false;
    }
}
