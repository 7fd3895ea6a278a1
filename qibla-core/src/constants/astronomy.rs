//! Astronomical Constants
//!
//! Epochs and low-order series coefficients for the solar position. The
//! series are the ones published in the Astronomical Almanac "low precision"
//! formulas and the NOAA/Wikipedia sunrise equation. They are good to a
//! fraction of a degree between 1950 and 2050, which is plenty for prayer
//! times rounded to the minute.

// ===== EPOCHS =====

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Fractional-day correction in the sunrise equation for leap seconds and
/// the terrestrial time offset at J2000.
pub const TRANSIT_EPOCH_CORRECTION_DAYS: f64 = 0.0008;

// ===== DECLINATION SERIES =====
//
// Source: Astronomical Almanac, "Low precision formulas for the Sun"

/// Mean longitude of the Sun at J2000 (degrees).
pub const MEAN_LONGITUDE_DEG: f64 = 280.460;

/// Daily motion of the mean longitude (degrees/day).
pub const MEAN_LONGITUDE_RATE_DEG_PER_DAY: f64 = 0.985_647_4;

/// Mean anomaly of the Sun at J2000 (degrees).
pub const MEAN_ANOMALY_DEG: f64 = 357.528;

/// Daily motion of the mean anomaly (degrees/day).
pub const MEAN_ANOMALY_RATE_DEG_PER_DAY: f64 = 0.985_600_3;

/// First equation-of-center term (degrees).
pub const CENTER_TERM_1_DEG: f64 = 1.915;

/// Second equation-of-center term (degrees).
pub const CENTER_TERM_2_DEG: f64 = 0.020;

/// Obliquity of the ecliptic at J2000 (degrees).
pub const OBLIQUITY_DEG: f64 = 23.439;

/// Drift of the obliquity (degrees/day).
pub const OBLIQUITY_RATE_DEG_PER_DAY: f64 = 0.000_000_4;

// ===== SOLAR TRANSIT SERIES =====
//
// Source: sunrise equation (Wikipedia / NOAA derivation)

/// Mean anomaly at J2000 used by the transit series (degrees).
pub const TRANSIT_MEAN_ANOMALY_DEG: f64 = 357.5291;

/// Daily motion of the mean anomaly in the transit series (degrees/day).
pub const TRANSIT_MEAN_ANOMALY_RATE_DEG_PER_DAY: f64 = 0.985_600_28;

/// Equation-of-center coefficients for M, 2M and 3M (degrees).
pub const TRANSIT_CENTER_TERMS_DEG: [f64; 3] = [1.9148, 0.0200, 0.0003];

/// Argument of perihelion plus 180° (degrees).
pub const PERIHELION_PLUS_HALF_TURN_DEG: f64 = 282.9372;

/// Equation-of-time coefficient for sin(M) (days).
pub const EOT_ANOMALY_TERM_DAYS: f64 = 0.0053;

/// Equation-of-time coefficient for sin(2λ) (days).
pub const EOT_LONGITUDE_TERM_DAYS: f64 = 0.0069;

// ===== HORIZON =====

/// Solar elevation at apparent sunrise/sunset (degrees).
///
/// 34' of standard atmospheric refraction plus the 16' solar semidiameter.
///
/// Source: USNO
pub const SUNRISE_ELEVATION_DEG: f64 = -0.833;

/// Shadow-length factor for the standard (Shafi'i, Maliki, Hanbali) Asr.
pub const ASR_SHADOW_FACTOR_STANDARD: f64 = 1.0;

/// Shadow-length factor for the Hanafi Asr.
pub const ASR_SHADOW_FACTOR_HANAFI: f64 = 2.0;
