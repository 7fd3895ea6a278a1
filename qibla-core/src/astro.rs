//! Time and Astronomy Primitives
//!
//! ## Overview
//!
//! Everything the prayer calculator needs to know about the Sun on a given
//! day at a given place:
//!
//! ```text
//! CivilDate ──→ julian_date ──→ solar_noon(lon) ──→ transit JD
//!                                   │
//!                                   └─→ solar_declination ──→ δ
//!
//! hour_angle_for_elevation(φ, δ, h0) ──→ H  (or no solution)
//! event JD = transit ∓ H/360
//! ```
//!
//! ## Accuracy
//!
//! The series are the low-order ones from the Astronomical Almanac and the
//! standard sunrise equation. Declination is good to ~0.01°, transit to
//! well under a minute. That is the right trade for times shown to the
//! minute and computed on a microcontroller; it is not survey-grade.
//!
//! ## The Hour-Angle Equation
//!
//! For latitude φ, declination δ and target elevation h0:
//!
//! ```text
//! cos H = (sin h0 − sin φ · sin δ) / (cos φ · cos δ)
//! ```
//!
//! When the right-hand side leaves [-1, 1] the Sun never reaches h0 that
//! day (midnight sun, polar night, or simply a summer night too bright for
//! an 18° twilight). [`hour_angle_for_elevation`] returns `None` then and
//! each caller picks its documented fallback. NaN is never returned.

use crate::{
    constants::astronomy::{
        CENTER_TERM_1_DEG, CENTER_TERM_2_DEG, EOT_ANOMALY_TERM_DAYS, EOT_LONGITUDE_TERM_DAYS,
        J2000_JD, MEAN_ANOMALY_DEG, MEAN_ANOMALY_RATE_DEG_PER_DAY, MEAN_LONGITUDE_DEG,
        MEAN_LONGITUDE_RATE_DEG_PER_DAY, OBLIQUITY_DEG, OBLIQUITY_RATE_DEG_PER_DAY,
        PERIHELION_PLUS_HALF_TURN_DEG, SUNRISE_ELEVATION_DEG, TRANSIT_CENTER_TERMS_DEG,
        TRANSIT_EPOCH_CORRECTION_DAYS, TRANSIT_MEAN_ANOMALY_DEG,
        TRANSIT_MEAN_ANOMALY_RATE_DEG_PER_DAY, UNIX_EPOCH_JD,
    },
    constants::time::SECONDS_PER_DAY,
    time::CivilDate,
    utils::{sin_deg, to_degrees, to_radians},
};

/// Julian Date at 0h UT of a civil date
///
/// Meeus, *Astronomical Algorithms* ch. 7: January and February count as
/// months 13 and 14 of the previous year; `B` applies the Gregorian
/// century correction.
pub fn julian_date(date: CivilDate) -> f64 {
    let mut year = f64::from(date.year());
    let mut month = f64::from(date.month());
    let day = f64::from(date.day());

    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    let a = libm::floor(year / 100.0);
    let b = 2.0 - a + libm::floor(a / 4.0);

    libm::floor(365.25 * (year + 4716.0)) + libm::floor(30.6001 * (month + 1.0)) + day + b
        - 1524.5
}

/// Solar declination in radians
///
/// Mean longitude plus a two-term equation of center gives the ecliptic
/// longitude λ; `sin δ = sin ε · sin λ` with the obliquity ε drifting by
/// centuries.
pub fn solar_declination(julian_date: f64) -> f64 {
    let n = julian_date - J2000_JD;
    let mean_longitude = MEAN_LONGITUDE_DEG + MEAN_LONGITUDE_RATE_DEG_PER_DAY * n;
    let mean_anomaly = MEAN_ANOMALY_DEG + MEAN_ANOMALY_RATE_DEG_PER_DAY * n;

    let ecliptic_longitude = mean_longitude
        + CENTER_TERM_1_DEG * sin_deg(mean_anomaly)
        + CENTER_TERM_2_DEG * sin_deg(2.0 * mean_anomaly);
    let obliquity = OBLIQUITY_DEG - OBLIQUITY_RATE_DEG_PER_DAY * n;

    libm::asin(sin_deg(obliquity) * sin_deg(ecliptic_longitude))
}

/// Julian Date of local solar transit (true noon)
///
/// `julian_date` may be any instant on the wanted day's UT date; it is
/// rounded to whole days since J2000 before the longitude shift so the
/// result is the transit of that day. The equation of time enters through
/// the `sin M` and `sin 2λ` terms.
pub fn solar_noon(julian_date: f64, longitude_deg: f64) -> f64 {
    let days = libm::ceil(julian_date - J2000_JD + TRANSIT_EPOCH_CORRECTION_DAYS);
    let mean_solar_time = days - longitude_deg / 360.0;

    let mean_anomaly =
        TRANSIT_MEAN_ANOMALY_DEG + TRANSIT_MEAN_ANOMALY_RATE_DEG_PER_DAY * mean_solar_time;
    let [c1, c2, c3] = TRANSIT_CENTER_TERMS_DEG;
    let center = c1 * sin_deg(mean_anomaly)
        + c2 * sin_deg(2.0 * mean_anomaly)
        + c3 * sin_deg(3.0 * mean_anomaly);
    let ecliptic_longitude = mean_anomaly + center + PERIHELION_PLUS_HALF_TURN_DEG;

    J2000_JD + mean_solar_time + EOT_ANOMALY_TERM_DAYS * sin_deg(mean_anomaly)
        - EOT_LONGITUDE_TERM_DAYS * sin_deg(2.0 * ecliptic_longitude)
}

/// Hour angle (degrees) at which the Sun stands at `elevation_deg`
///
/// Returns `None` when the Sun never reaches that elevation on the day
/// (cosine outside [-1, 1]) or when the geometry degenerates at a pole.
pub fn hour_angle_for_elevation(
    latitude_deg: f64,
    declination_rad: f64,
    elevation_deg: f64,
) -> Option<f64> {
    let phi = to_radians(latitude_deg);
    let numerator = sin_deg(elevation_deg) - libm::sin(phi) * libm::sin(declination_rad);
    let denominator = libm::cos(phi) * libm::cos(declination_rad);
    let cos_h = numerator / denominator;

    if !cos_h.is_finite() || !(-1.0..=1.0).contains(&cos_h) {
        return None;
    }

    Some(to_degrees(libm::acos(cos_h)))
}

/// Julian Date of sunrise, `None` during polar day or night
pub fn sunrise_julian(julian_date: f64, latitude_deg: f64, longitude_deg: f64) -> Option<f64> {
    let noon = solar_noon(julian_date, longitude_deg);
    let declination = solar_declination(noon);
    hour_angle_for_elevation(latitude_deg, declination, SUNRISE_ELEVATION_DEG)
        .map(|hour_angle| noon - hour_angle / 360.0)
}

/// Julian Date of sunset, `None` during polar day or night
pub fn sunset_julian(julian_date: f64, latitude_deg: f64, longitude_deg: f64) -> Option<f64> {
    let noon = solar_noon(julian_date, longitude_deg);
    let declination = solar_declination(noon);
    hour_angle_for_elevation(latitude_deg, declination, SUNRISE_ELEVATION_DEG)
        .map(|hour_angle| noon + hour_angle / 360.0)
}

/// Seconds since the Unix epoch for a Julian Date
pub fn julian_to_unix_seconds(julian_date: f64) -> f64 {
    (julian_date - UNIX_EPOCH_JD) * SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> CivilDate {
        CivilDate::new(y, m, d).unwrap()
    }

    #[test]
    fn julian_date_reference_values() {
        // Meeus example 7.a and the J2000 day
        assert_eq!(julian_date(date(1957, 10, 4)), 2_436_115.5);
        assert_eq!(julian_date(date(2000, 1, 1)), 2_451_544.5);
        // January/February take the previous-year branch
        assert_eq!(julian_date(date(2024, 2, 29)), 2_460_369.5);
        assert_eq!(julian_date(date(2024, 3, 1)), 2_460_370.5);
    }

    #[test]
    fn declination_tracks_the_seasons() {
        let june = to_degrees(solar_declination(julian_date(date(2024, 6, 21))));
        let december = to_degrees(solar_declination(julian_date(date(2024, 12, 21))));
        let march = to_degrees(solar_declination(julian_date(date(2024, 3, 20))));

        assert!((june - 23.44).abs() < 0.1, "june {june}");
        assert!((december + 23.44).abs() < 0.1, "december {december}");
        assert!(march.abs() < 0.5, "march {march}");
    }

    #[test]
    fn solar_noon_at_greenwich_is_near_midday() {
        let jd = julian_date(date(2024, 6, 21));
        let noon = solar_noon(jd, 0.0);
        // Equation of time is about -1.7 min on the June solstice
        let minutes_after_midnight = (noon - jd) * 1440.0;
        assert!((minutes_after_midnight - 721.7).abs() < 1.5, "{minutes_after_midnight}");
    }

    #[test]
    fn solar_noon_shifts_with_longitude() {
        let jd = julian_date(date(2024, 3, 1));
        let greenwich = solar_noon(jd, 0.0);
        let east = solar_noon(jd, 90.0);
        assert!(((greenwich - east) - 0.25).abs() < 1e-4);
    }

    #[test]
    fn hour_angle_on_the_equator_at_equinox_is_quarter_turn() {
        let h = hour_angle_for_elevation(0.0, 0.0, 0.0).unwrap();
        assert!((h - 90.0).abs() < 1e-9);
    }

    #[test]
    fn hour_angle_has_no_solution_in_polar_day() {
        let june = solar_declination(julian_date(date(2024, 6, 21)));
        assert!(hour_angle_for_elevation(80.0, june, SUNRISE_ELEVATION_DEG).is_none());
        assert!(hour_angle_for_elevation(-80.0, june, SUNRISE_ELEVATION_DEG).is_none());
        assert!(hour_angle_for_elevation(90.0, june, -18.0).is_none());
    }

    #[test]
    fn sunrise_precedes_sunset_around_noon() {
        let jd = julian_date(date(2024, 9, 1));
        let rise = sunrise_julian(jd, 51.5, -0.13).unwrap();
        let set = sunset_julian(jd, 51.5, -0.13).unwrap();
        let noon = solar_noon(jd, -0.13);

        assert!(rise < noon && noon < set);
        assert!(((noon - rise) - (set - noon)).abs() < 1e-12);
        // London, early September: about 13h of daylight
        let daylight_hours = (set - rise) * 24.0;
        assert!((daylight_hours - 13.5).abs() < 0.2, "{daylight_hours}");
    }

    #[test]
    fn unix_epoch_maps_to_zero() {
        assert_eq!(julian_to_unix_seconds(2_440_587.5), 0.0);
        assert_eq!(julian_to_unix_seconds(2_440_588.5), 86_400.0);
    }
}
