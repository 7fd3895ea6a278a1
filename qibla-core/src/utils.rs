//! Angle Helpers
//!
//! Shared conversions used by the astronomy, bearing and compass code.
//! All functions are pure and total: any finite input gives an in-range
//! output, and non-finite input collapses to `0.0` instead of spreading
//! NaN into a displayed value.

use core::f64::consts::PI;

/// Degrees to radians
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Radians to degrees
#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Sine of an angle in degrees
#[inline]
pub fn sin_deg(degrees: f64) -> f64 {
    libm::sin(to_radians(degrees))
}

/// Wrap an angle into `[0, 360)`
///
/// Uses `((a % 360) + 360) % 360`; the second remainder folds the
/// `-1e-15 + 360 == 360.0` rounding case back to zero.
pub fn normalize_360(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    libm::fmod(libm::fmod(degrees, 360.0) + 360.0, 360.0)
}

/// Wrap an angle into `(-180, 180]`
///
/// The signed difference a caller has to turn through to close an angular
/// gap: positive is clockwise, negative counter-clockwise.
pub fn normalize_to_180(degrees: f64) -> f64 {
    let wrapped = normalize_360(degrees);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Floor-style remainder that is never negative for a positive divisor
#[inline]
pub(crate) fn rem_euclid(value: f64, divisor: f64) -> f64 {
    let r = libm::fmod(value, divisor);
    if r < 0.0 {
        r + divisor
    } else {
        r
    }
}
