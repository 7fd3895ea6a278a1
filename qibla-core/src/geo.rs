//! Geographic coordinates

use crate::{
    constants::geodesy::{
        KAABA_LATITUDE_DEG, KAABA_LONGITUDE_DEG, LATITUDE_MAX_DEG, LATITUDE_MIN_DEG,
        LONGITUDE_MAX_DEG, LONGITUDE_MIN_DEG,
    },
    errors::{QiblaError, QiblaResult},
};

/// A point on the Earth's surface in decimal degrees
///
/// North and east are positive. Built once from a location provider and
/// passed by value to both calculators.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGeoPoint")
)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// The Kaaba in Mecca
    pub const KAABA: GeoPoint = GeoPoint {
        latitude: KAABA_LATITUDE_DEG,
        longitude: KAABA_LONGITUDE_DEG,
    };

    /// Create a point, rejecting anything off the globe
    pub fn new(latitude: f64, longitude: f64) -> QiblaResult<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (LATITUDE_MIN_DEG..=LATITUDE_MAX_DEG).contains(&latitude)
            && (LONGITUDE_MIN_DEG..=LONGITUDE_MAX_DEG).contains(&longitude);

        if !valid {
            return Err(QiblaError::InvalidCoordinate { latitude, longitude });
        }

        Ok(Self { latitude, longitude })
    }

    /// Latitude in degrees, north positive
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, east positive
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Unchecked wire shape, validated on the way in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = QiblaError;

    fn try_from(raw: RawGeoPoint) -> QiblaResult<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_globe_bounds() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_off_globe() {
        assert!(matches!(
            GeoPoint::new(91.0, 0.0),
            Err(QiblaError::InvalidCoordinate { .. })
        ));
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn kaaba_is_in_mecca() {
        assert_eq!(GeoPoint::KAABA.latitude(), 21.4225);
        assert_eq!(GeoPoint::KAABA.longitude(), 39.8262);
    }
}
