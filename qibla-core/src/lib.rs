//! Core calculation engine for prayer times, Qibla bearing and compass fusion
//!
//! Derives the daily prayer markers from a location and a calculation
//! method, computes the great-circle bearing toward the Kaaba, and turns a
//! raw magnetometer stream into a calibration-aware heading.
//! Designed to run on phones and microcontrollers alike.
//!
//! Key constraints:
//! - `no_std` capable (needs `alloc` only for the compass callback)
//! - All transcendental math through `libm`
//! - Pure calculators; the only stateful piece is [`CompassEngine`]
//!
//! ```no_run
//! use qibla_core::{CalculationMethod, CivilDate, GeoPoint, PrayerCalculator, qibla_bearing};
//!
//! let new_york = GeoPoint::new(40.7128, -74.0060)?;
//! let date = CivilDate::new(2024, 6, 21)?;
//!
//! let times = PrayerCalculator::new(CalculationMethod::Isna).calculate(new_york, date, -4.0);
//! println!("Fajr {} Isha {}", times.fajr, times.isha);
//!
//! let qibla = qibla_bearing(new_york);
//! println!("Qibla {:.1}° ({:.0} km)", qibla.bearing_deg, qibla.distance_km);
//! # Ok::<(), qibla_core::QiblaError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod astro;
pub mod buffer;
pub mod compass;
pub mod constants;
pub mod errors;
pub mod geo;
pub mod methods;
pub mod prayer;
pub mod qibla;
pub mod schedule;
pub mod time;
pub mod utils;

// Public API
pub use compass::{
    CalibrationStatus, CardinalDirection, CompassConfig, CompassEngine, HeadingUpdate,
    MagneticSample, MagnetometerSource, ReplayMagnetometer,
};
#[cfg(feature = "std")]
pub use compass::SharedCompass;
pub use errors::{QiblaError, QiblaResult};
pub use geo::GeoPoint;
pub use methods::{AsrConvention, CalculationMethod, IshaRule, MethodParams};
pub use prayer::{compute, Approximations, DailyPrayerTimes, Prayer, PrayerCalculator};
pub use qibla::{bearing_and_distance, qibla_bearing, QiblaBearing};
pub use schedule::{next_prayer, NextPrayer};
pub use time::{CivilDate, ClockTime};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
