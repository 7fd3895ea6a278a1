//! Earth Model and Fixed Points

/// Mean Earth radius (km).
///
/// Source: IUGG mean radius R1
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Latitude of the Kaaba, Masjid al-Haram, Mecca (degrees north).
pub const KAABA_LATITUDE_DEG: f64 = 21.4225;

/// Longitude of the Kaaba, Masjid al-Haram, Mecca (degrees east).
pub const KAABA_LONGITUDE_DEG: f64 = 39.8262;

/// Below this separation two points are treated as coincident (km).
///
/// One metre. The bearing between coincident points is undefined.
pub const COINCIDENT_DISTANCE_KM: f64 = 0.001;

/// Latitude limits (degrees).
pub const LATITUDE_MIN_DEG: f64 = -90.0;
/// Upper latitude limit (degrees).
pub const LATITUDE_MAX_DEG: f64 = 90.0;

/// Longitude limits (degrees).
pub const LONGITUDE_MIN_DEG: f64 = -180.0;
/// Upper longitude limit (degrees).
pub const LONGITUDE_MAX_DEG: f64 = 180.0;
