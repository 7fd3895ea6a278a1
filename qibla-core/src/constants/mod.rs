//! Constants for Qibla Core
//!
//! Centralized, documented constants used throughout the crate. Every
//! numeric value lives here with its unit in the name and a note on where
//! it comes from.
//!
//! ## Organization
//!
//! - **Astronomy**: epochs, series coefficients, horizon corrections
//! - **Geodesy**: Earth radius, Kaaba coordinates
//! - **Compass**: magnetometer noise floor, calibration and alignment limits
//! - **Time**: clock and day conversions
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include units in new constant names
//! 3. Reference the source of each value

/// Astronomical epochs and solar-position series coefficients.
pub mod astronomy;

/// Earth model and fixed geographic points.
pub mod geodesy;

/// Magnetometer and compass fusion parameters.
pub mod compass;

/// Clock and calendar conversions.
pub mod time;

// Re-export commonly used constants for convenience
pub use astronomy::{J2000_JD, SUNRISE_ELEVATION_DEG, UNIX_EPOCH_JD};

pub use geodesy::{EARTH_MEAN_RADIUS_KM, KAABA_LATITUDE_DEG, KAABA_LONGITUDE_DEG};

pub use compass::{
    ALIGNMENT_THRESHOLD_DEG, CALIBRATION_MIN_SAMPLES, CALIBRATION_THRESHOLD_DEG,
    CALIBRATION_WINDOW_SIZE, COMPASS_SAMPLE_INTERVAL_MS, MAGNETIC_NOISE_FLOOR,
};

pub use time::{MINUTES_PER_DAY, SECONDS_PER_DAY, SECONDS_PER_HOUR};
