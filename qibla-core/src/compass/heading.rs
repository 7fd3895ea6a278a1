//! Heading from the horizontal field

use core::fmt;

use super::source::MagneticSample;
use crate::{
    constants::compass::CARDINAL_SECTOR_DEG,
    utils::{normalize_360, to_degrees},
};

/// Magnetic heading in `[0, 360)` from a raw sample
///
/// `atan2(y, x)` of the horizontal components. Returns `None` when both
/// components sit under `noise_floor` or either is not finite; such a
/// sample carries no direction.
pub fn heading_from_field(sample: &MagneticSample, noise_floor: f64) -> Option<f64> {
    let MagneticSample { x, y, .. } = *sample;

    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    if libm::fabs(x) < noise_floor && libm::fabs(y) < noise_floor {
        return None;
    }

    Some(normalize_360(to_degrees(libm::atan2(y, x))))
}

/// Eight-point compass rose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum CardinalDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CardinalDirection {
    const ROSE: [CardinalDirection; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Nearest rose point; sectors are centred on each point
    pub fn from_heading(heading_deg: f64) -> Self {
        let sector = libm::round(normalize_360(heading_deg) / CARDINAL_SECTOR_DEG) as usize;
        Self::ROSE[sector % Self::ROSE.len()]
    }

    /// Abbreviation as printed on a compass
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::S => "S",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
