//! Error Types
//!
//! ## Design Philosophy
//!
//! Errors are returned from hot paths (every compass sample) and may be
//! stored by callers, so they follow embedded rules:
//!
//! 1. **Small Size**: variants carry a few scalars at most.
//! 2. **No Heap Allocation**: messages are `&'static str`.
//! 3. **Copy Semantics**: cheap to return and to store.
//!
//! ## What Is (and Is Not) an Error
//!
//! Most numeric trouble is *not* an error here. A sun that never reaches
//! the Fajr depression angle, a Qibla request made from inside the Kaaba,
//! or a near-zero magnetometer sample are all resolved internally with a
//! defined fallback. Only three families reach the caller:
//!
//! ### Invalid Input
//! - `InvalidCoordinate`: latitude/longitude outside the globe or NaN
//! - `InvalidDate`: not a proleptic Gregorian calendar day
//! - `InvalidClockTime`: not a `HH:MM` wall-clock time
//!
//! ### Sensor Availability
//! - `SensorUnavailable`, `PermissionDenied`: the compass cannot start
//! - `SensorFault`: the stream broke while running
//!
//! ### Usage
//! - `NotInitialized`: compass started before a location was supplied
//!
//! ```rust
//! use qibla_core::{CompassConfig, CompassEngine, GeoPoint, QiblaError, ReplayMagnetometer};
//!
//! let mut engine = CompassEngine::new(CompassConfig::default());
//! engine.initialize(GeoPoint::new(51.5074, -0.1278).unwrap());
//!
//! match engine.start_updates(ReplayMagnetometer::unavailable(), |_| {}) {
//!     Ok(()) => {}
//!     Err(QiblaError::PermissionDenied) => {
//!         // ask the user again
//!     }
//!     Err(QiblaError::SensorUnavailable { .. }) => {
//!         // fall back to showing the bearing as a number
//!     }
//!     Err(_) => {}
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for fallible operations
pub type QiblaResult<T> = Result<T, QiblaError>;

/// Errors surfaced to callers
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum QiblaError {
    /// Coordinates outside the valid range or not finite
    #[error("Invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Offending latitude in degrees
        latitude: f64,
        /// Offending longitude in degrees
        longitude: f64,
    },

    /// Calendar date that does not exist
    #[error("Invalid date {year}-{month}-{day}")]
    InvalidDate {
        /// Year as given
        year: i32,
        /// Month as given
        month: u8,
        /// Day as given
        day: u8,
    },

    /// Text that is not a 24-hour `HH:MM` time
    #[error("Invalid clock time: expected HH:MM")]
    InvalidClockTime,

    /// Compass started before `initialize` supplied an observer location
    #[error("Compass not initialized with a location")]
    NotInitialized,

    /// No magnetometer on this device, or it refused to attach
    #[error("Magnetic sensor unavailable: {reason}")]
    SensorUnavailable {
        /// Platform explanation
        reason: &'static str,
    },

    /// The user or the OS denied access to the motion sensors
    #[error("Permission to read the magnetic sensor was denied")]
    PermissionDenied,

    /// The sensor stream failed after it was attached
    #[error("Magnetic sensor fault: {reason}")]
    SensorFault {
        /// Platform explanation
        reason: &'static str,
    },
}

impl QiblaError {
    /// Whether the error means the compass cannot run at all
    pub fn is_sensor_error(&self) -> bool {
        matches!(
            self,
            Self::SensorUnavailable { .. } | Self::PermissionDenied | Self::SensorFault { .. }
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for QiblaError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidCoordinate { latitude, longitude } =>
                defmt::write!(fmt, "Invalid coordinate ({}, {})", latitude, longitude),
            Self::InvalidDate { year, month, day } =>
                defmt::write!(fmt, "Invalid date {}-{}-{}", year, month, day),
            Self::InvalidClockTime =>
                defmt::write!(fmt, "Invalid clock time"),
            Self::NotInitialized =>
                defmt::write!(fmt, "Compass not initialized"),
            Self::SensorUnavailable { reason } =>
                defmt::write!(fmt, "Sensor unavailable: {}", reason),
            Self::PermissionDenied =>
                defmt::write!(fmt, "Sensor permission denied"),
            Self::SensorFault { reason } =>
                defmt::write!(fmt, "Sensor fault: {}", reason),
        }
    }
}
