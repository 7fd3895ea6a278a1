//! Prayer Time Calculator
//!
//! ## Overview
//!
//! One pass over the astronomy primitives produces all six daily markers:
//!
//! | Marker  | Solar event                                            |
//! |---------|--------------------------------------------------------|
//! | Fajr    | Sun at `-fajr_angle` before transit                    |
//! | Sunrise | Upper limb on the horizon (-0.833°) before transit     |
//! | Dhuhr   | Transit                                                |
//! | Asr     | Shadow = factor × object + noon shadow, after transit  |
//! | Maghrib | Upper limb on the horizon after transit                |
//! | Isha    | Sun at `-isha_angle` after transit, or fixed delay     |
//!
//! ## Fallbacks
//!
//! At high latitudes some of these events do not happen. The calculator
//! never fails and never emits NaN; it substitutes the nearest defined
//! marker and records the substitution in [`Approximations`]:
//!
//! - sunrise/sunset missing → solar noon
//! - Fajr missing → sunrise
//! - Isha missing → sunset
//! - Asr missing → solar noon
//!
//! The caller decides whether to show flagged times, annotate them or hand
//! them to a high-latitude rule of its own.

use core::fmt;

use crate::{
    astro::{hour_angle_for_elevation, julian_date, solar_declination, solar_noon},
    constants::{astronomy::SUNRISE_ELEVATION_DEG, time::MINUTES_PER_DAY_F64},
    geo::GeoPoint,
    methods::{AsrConvention, CalculationMethod, IshaRule, MethodParams},
    time::{CivilDate, ClockTime},
    utils::{to_degrees, to_radians},
};

/// Daily markers in chronological order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prayer {
    /// Dawn prayer
    Fajr,
    /// Sunrise (not a prayer; ends the Fajr window)
    Sunrise,
    /// Midday prayer at solar transit
    Dhuhr,
    /// Afternoon prayer
    Asr,
    /// Sunset prayer
    Maghrib,
    /// Night prayer
    Isha,
}

impl Prayer {
    /// The five obligatory prayers in order
    pub const DAILY: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which markers came from a fallback instead of their own solar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Approximations(u8);

impl Approximations {
    /// Sunrise replaced by solar noon
    pub const SUNRISE: Self = Self(1 << 0);
    /// Sunset (Maghrib) replaced by solar noon
    pub const SUNSET: Self = Self(1 << 1);
    /// Fajr replaced by sunrise
    pub const FAJR: Self = Self(1 << 2);
    /// Isha replaced by sunset, or derived from an approximate Maghrib
    pub const ISHA: Self = Self(1 << 3);
    /// Asr replaced by solar noon
    pub const ASR: Self = Self(1 << 4);

    /// No fallbacks
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Add flags
    pub fn set(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// All flags of `other` present
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Any marker approximated
    pub const fn is_approximate(&self) -> bool {
        self.0 != 0
    }

    /// Whether the marker for `prayer` was approximated
    pub const fn covers(&self, prayer: Prayer) -> bool {
        let flag = match prayer {
            Prayer::Fajr => Self::FAJR,
            Prayer::Sunrise => Self::SUNRISE,
            Prayer::Dhuhr => return false,
            Prayer::Asr => Self::ASR,
            Prayer::Maghrib => Self::SUNSET,
            Prayer::Isha => Self::ISHA,
        };
        self.contains(flag)
    }
}

/// One day's prayer times in local wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct DailyPrayerTimes {
    pub fajr: ClockTime,
    pub sunrise: ClockTime,
    pub dhuhr: ClockTime,
    pub asr: ClockTime,
    pub maghrib: ClockTime,
    pub isha: ClockTime,
    /// Fallback markers, empty on an ordinary day
    pub approximations: Approximations,
}

impl DailyPrayerTimes {
    /// Time of a single marker
    pub fn get(&self, prayer: Prayer) -> ClockTime {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }
}

/// Prayer times with the default (standard) Asr convention
pub fn compute(
    location: GeoPoint,
    date: CivilDate,
    params: MethodParams,
    utc_offset_hours: f64,
) -> DailyPrayerTimes {
    PrayerCalculator::with_params(params).calculate(location, date, utc_offset_hours)
}

/// A configured calculation convention
///
/// Holds no state between calls; one value can serve any number of
/// locations and dates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrayerCalculator {
    params: MethodParams,
    asr: AsrConvention,
}

impl PrayerCalculator {
    /// Calculator for a named method
    pub const fn new(method: CalculationMethod) -> Self {
        Self::with_params(method.params())
    }

    /// Calculator for custom angles
    pub const fn with_params(params: MethodParams) -> Self {
        Self {
            params,
            asr: AsrConvention::Standard,
        }
    }

    /// Switch the Asr shadow convention
    pub const fn with_asr_convention(mut self, asr: AsrConvention) -> Self {
        self.asr = asr;
        self
    }

    /// Fajr/Isha parameters in use
    pub fn params(&self) -> MethodParams {
        self.params
    }

    /// Asr convention in use
    pub fn asr_convention(&self) -> AsrConvention {
        self.asr
    }

    /// Prayer times for `date` at `location`, in local time at
    /// `utc_offset_hours`
    pub fn calculate(
        &self,
        location: GeoPoint,
        date: CivilDate,
        utc_offset_hours: f64,
    ) -> DailyPrayerTimes {
        let latitude = location.latitude();
        let noon = solar_noon(julian_date(date), location.longitude());
        let declination = solar_declination(noon);
        let mut approximations = Approximations::empty();

        let horizon = hour_angle_for_elevation(latitude, declination, SUNRISE_ELEVATION_DEG);
        let (sunrise, sunset) = match horizon {
            Some(h) => (noon - h / 360.0, noon + h / 360.0),
            None => {
                log_debug!("No sunrise/sunset at latitude {}; using solar noon", latitude);
                approximations.set(Approximations::SUNRISE);
                approximations.set(Approximations::SUNSET);
                (noon, noon)
            }
        };

        let fajr = match hour_angle_for_elevation(latitude, declination, -self.params.fajr_angle_deg)
        {
            Some(h) => noon - h / 360.0,
            None => {
                log_debug!("Fajr angle not reached on {}; using sunrise", date);
                approximations.set(Approximations::FAJR);
                sunrise
            }
        };

        let isha = match self.params.isha {
            IshaRule::Angle(angle) => match hour_angle_for_elevation(latitude, declination, -angle)
            {
                Some(h) => noon + h / 360.0,
                None => {
                    log_debug!("Isha angle not reached on {}; using sunset", date);
                    approximations.set(Approximations::ISHA);
                    sunset
                }
            },
            IshaRule::MinutesAfterMaghrib(minutes) => {
                if approximations.contains(Approximations::SUNSET) {
                    approximations.set(Approximations::ISHA);
                }
                sunset + f64::from(minutes) / MINUTES_PER_DAY_F64
            }
        };

        let asr_elevation = asr_elevation_deg(latitude, declination, self.asr);
        let asr = match hour_angle_for_elevation(latitude, declination, asr_elevation) {
            Some(h) => noon + h / 360.0,
            None => {
                log_debug!("Asr shadow length not reached on {}; using solar noon", date);
                approximations.set(Approximations::ASR);
                noon
            }
        };

        let local = |jd: f64| ClockTime::from_julian(jd, utc_offset_hours);
        DailyPrayerTimes {
            fajr: local(fajr),
            sunrise: local(sunrise),
            dhuhr: local(noon),
            asr: local(asr),
            maghrib: local(sunset),
            isha: local(isha),
            approximations,
        }
    }
}

impl Default for PrayerCalculator {
    fn default() -> Self {
        Self::new(CalculationMethod::default())
    }
}

impl From<CalculationMethod> for PrayerCalculator {
    fn from(method: CalculationMethod) -> Self {
        Self::new(method)
    }
}

/// Solar elevation at which an object's shadow is `factor` times its
/// length plus the noon shadow
fn asr_elevation_deg(latitude_deg: f64, declination_rad: f64, asr: AsrConvention) -> f64 {
    let noon_zenith = libm::fabs(to_radians(latitude_deg) - declination_rad);
    to_degrees(libm::atan(1.0 / (asr.shadow_factor() + libm::tan(noon_zenith))))
}
