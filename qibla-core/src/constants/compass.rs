//! Compass Fusion Parameters
//!
//! Limits for turning raw magnetometer samples into a trustworthy heading.
//! Values match what phone magnetometers report (microtesla, ~25-65 µT
//! Earth field) polled at 10 Hz.

// ===== SAMPLING =====

/// Magnetometer polling interval (milliseconds).
///
/// 10 Hz keeps the needle smooth without draining the battery.
pub const COMPASS_SAMPLE_INTERVAL_MS: u32 = 100;

/// Horizontal field components below this are treated as noise.
///
/// A sample with both |x| and |y| under the floor carries no usable
/// direction (sensor idle, saturated or pointing straight down).
pub const MAGNETIC_NOISE_FLOOR: f64 = 0.01;

// ===== CALIBRATION =====

/// Number of recent headings kept for the calibration estimate.
pub const CALIBRATION_WINDOW_SIZE: usize = 10;

/// Samples needed before the calibration verdict is evaluated.
pub const CALIBRATION_MIN_SAMPLES: usize = 5;

/// Heading standard deviation under which the compass counts as
/// calibrated (degrees).
///
/// Interference from nearby metal or an unsettled sensor shows up as
/// several degrees of jitter between consecutive readings.
pub const CALIBRATION_THRESHOLD_DEG: f64 = 5.0;

// ===== ALIGNMENT =====

/// Maximum Qibla offset still counted as facing the Qibla (degrees).
pub const ALIGNMENT_THRESHOLD_DEG: f64 = 3.0;

/// Width of one sector of the eight-point compass rose (degrees).
pub const CARDINAL_SECTOR_DEG: f64 = 45.0;
