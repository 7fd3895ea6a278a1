//! Qibla Bearing Calculator
//!
//! Great-circle initial bearing and haversine distance on a spherical
//! Earth (mean radius 6371 km). The spherical model is within a fraction of
//! a degree of the ellipsoidal bearing everywhere a compass can resolve it.
//!
//! ```text
//! θ = atan2(sin Δλ · cos φ2, cos φ1 · sin φ2 − sin φ1 · cos φ2 · cos Δλ)
//! a = sin²(Δφ/2) + cos φ1 · cos φ2 · sin²(Δλ/2)
//! d = 2R · atan2(√a, √(1−a))
//! ```

use crate::{
    constants::geodesy::{COINCIDENT_DISTANCE_KM, EARTH_MEAN_RADIUS_KM},
    geo::GeoPoint,
    utils::{normalize_360, normalize_to_180, to_degrees, to_radians},
};

/// Direction and distance from an observer to a target
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QiblaBearing {
    /// Initial bearing clockwise from true north, `[0, 360)`
    pub bearing_deg: f64,
    /// Great-circle distance in kilometres
    pub distance_km: f64,
}

/// Initial bearing and distance from `observer` to `target`
///
/// Points closer than a metre are treated as coincident and yield a zero
/// bearing and zero distance.
pub fn bearing_and_distance(observer: GeoPoint, target: GeoPoint) -> QiblaBearing {
    let phi1 = to_radians(observer.latitude());
    let phi2 = to_radians(target.latitude());
    let delta_phi = phi2 - phi1;
    let delta_lambda = to_radians(target.longitude() - observer.longitude());

    let half_phi = libm::sin(delta_phi / 2.0);
    let half_lambda = libm::sin(delta_lambda / 2.0);
    let a = half_phi * half_phi + libm::cos(phi1) * libm::cos(phi2) * half_lambda * half_lambda;
    let a = a.clamp(0.0, 1.0);
    let distance_km = 2.0 * EARTH_MEAN_RADIUS_KM * libm::atan2(libm::sqrt(a), libm::sqrt(1.0 - a));

    if distance_km < COINCIDENT_DISTANCE_KM {
        return QiblaBearing {
            bearing_deg: 0.0,
            distance_km: 0.0,
        };
    }

    let y = libm::sin(delta_lambda) * libm::cos(phi2);
    let x = libm::cos(phi1) * libm::sin(phi2)
        - libm::sin(phi1) * libm::cos(phi2) * libm::cos(delta_lambda);

    QiblaBearing {
        bearing_deg: normalize_360(to_degrees(libm::atan2(y, x))),
        distance_km,
    }
}

/// Bearing and distance from `observer` to the Kaaba
pub fn qibla_bearing(observer: GeoPoint) -> QiblaBearing {
    bearing_and_distance(observer, GeoPoint::KAABA)
}

/// Absolute angle between a device heading and the Qibla bearing, `[0, 180]`
pub fn qibla_accuracy(heading_deg: f64, qibla_bearing_deg: f64) -> f64 {
    libm::fabs(normalize_to_180(qibla_bearing_deg - heading_deg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn new_york_faces_north_east() {
        let q = qibla_bearing(point(40.7128, -74.0060));
        assert!((q.bearing_deg - 58.48).abs() < 0.05, "{}", q.bearing_deg);
        assert!((q.distance_km - 10_306.0).abs() < 5.0, "{}", q.distance_km);
    }

    #[test]
    fn reference_cities() {
        let london = qibla_bearing(point(51.5074, -0.1278));
        assert!((london.bearing_deg - 118.99).abs() < 0.05);

        let sydney = qibla_bearing(point(-33.8688, 151.2093));
        assert!((sydney.bearing_deg - 277.50).abs() < 0.05);

        let riyadh = qibla_bearing(point(24.7136, 46.6753));
        assert!((riyadh.bearing_deg - 243.80).abs() < 0.05);
        assert!((riyadh.distance_km - 790.3).abs() < 1.0);
    }

    #[test]
    fn at_the_kaaba_bearing_is_zero() {
        let q = qibla_bearing(GeoPoint::KAABA);
        assert_eq!(q.bearing_deg, 0.0);
        assert_eq!(q.distance_km, 0.0);

        // A few centimetres away still counts as coincident
        let q = qibla_bearing(point(21.422_500_1, 39.8262));
        assert_eq!(q.distance_km, 0.0);
    }

    #[test]
    fn due_north_and_east() {
        let north = bearing_and_distance(point(0.0, 0.0), point(10.0, 0.0));
        assert!(north.bearing_deg.abs() < 1e-9);

        let east = bearing_and_distance(point(0.0, 0.0), point(0.0, 10.0));
        assert!((east.bearing_deg - 90.0).abs() < 1e-9);

        let west = bearing_and_distance(point(0.0, 0.0), point(0.0, -10.0));
        assert!((west.bearing_deg - 270.0).abs() < 1e-9);
    }

    #[test]
    fn accuracy_is_shortest_turn() {
        assert_eq!(qibla_accuracy(350.0, 10.0), 20.0);
        assert_eq!(qibla_accuracy(10.0, 350.0), 20.0);
        assert_eq!(qibla_accuracy(58.0, 58.0), 0.0);
        assert_eq!(qibla_accuracy(0.0, 180.0), 180.0);
    }
}
