//! Calendar dates and wall-clock times
//!
//! Two small value types form the time boundary of the crate:
//!
//! - [`CivilDate`]: the observer's local calendar day, fed to the astronomy
//!   primitives
//! - [`ClockTime`]: a local time of day held as minutes since midnight
//!
//! `HH:MM` text is parsed once into a `ClockTime` at the edge and formatted
//! back only for display. Everything in between (ordering, the next-prayer
//! countdown) is integer arithmetic on minutes.

use core::fmt;
use core::fmt::Write as _;
use core::str::FromStr;

use crate::{
    constants::{
        astronomy::UNIX_EPOCH_JD,
        time::{
            HOURS_PER_DAY, MINUTES_PER_DAY, MINUTES_PER_HOUR, SECONDS_PER_DAY, SECONDS_PER_HOUR,
            SECONDS_PER_MINUTE,
        },
    },
    errors::{QiblaError, QiblaResult},
    utils::rem_euclid,
};

/// Proleptic Gregorian calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawCivilDate")
)]
pub struct CivilDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CivilDate {
    /// Create a date, rejecting days that do not exist
    pub fn new(year: i32, month: u8, day: u8) -> QiblaResult<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(QiblaError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Calendar year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month, 1 = January
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day of month, starting at 1
    pub fn day(&self) -> u8 {
        self.day
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Unchecked wire shape, validated on the way in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCivilDate {
    year: i32,
    month: u8,
    day: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCivilDate> for CivilDate {
    type Error = QiblaError;

    fn try_from(raw: RawCivilDate) -> QiblaResult<Self> {
        CivilDate::new(raw.year, raw.month, raw.day)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for CivilDate {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        // chrono only builds valid dates
        Self {
            year: date.year(),
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

/// Local wall-clock time with minute resolution
///
/// Stored as minutes since local midnight, always in `0..1440`.
/// Orders chronologically within one civil day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    /// Local midnight
    pub const MIDNIGHT: ClockTime = ClockTime { minutes: 0 };

    /// Build from hours (0-23) and minutes (0-59)
    pub fn from_hm(hours: u8, minutes: u8) -> QiblaResult<Self> {
        if u16::from(hours) >= HOURS_PER_DAY || u16::from(minutes) >= MINUTES_PER_HOUR {
            return Err(QiblaError::InvalidClockTime);
        }
        Ok(Self {
            minutes: u16::from(hours) * MINUTES_PER_HOUR + u16::from(minutes),
        })
    }

    /// Build from minutes since midnight, wrapping whole days away
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            minutes: (minutes % u32::from(MINUTES_PER_DAY)) as u16,
        }
    }

    /// Local clock time of a Julian Date
    ///
    /// `unix = (JD − 2440587.5) × 86400`, shifted by the UTC offset and
    /// wrapped into the civil day. Seconds are truncated, not rounded.
    pub fn from_julian(julian_date: f64, utc_offset_hours: f64) -> Self {
        let unix_seconds = (julian_date - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
        let local_seconds = unix_seconds + utc_offset_hours * SECONDS_PER_HOUR;
        let seconds_of_day = rem_euclid(local_seconds, SECONDS_PER_DAY);
        let minutes = libm::floor(seconds_of_day / f64::from(SECONDS_PER_MINUTE)) as u32;
        Self::from_minutes(minutes)
    }

    /// Minutes since local midnight
    pub fn minutes_since_midnight(&self) -> u16 {
        self.minutes
    }

    /// Hour of day (0-23)
    pub fn hour(&self) -> u8 {
        (self.minutes / MINUTES_PER_HOUR) as u8
    }

    /// Minute of hour (0-59)
    pub fn minute(&self) -> u8 {
        (self.minutes % MINUTES_PER_HOUR) as u8
    }

    /// Zero-padded `HH:MM` without touching the heap
    pub fn to_hhmm(&self) -> heapless::String<5> {
        let mut out = heapless::String::new();
        // five bytes always fit
        let _ = write!(out, "{:02}:{:02}", self.hour(), self.minute());
        out
    }

    /// Minutes from `self` forward to `later`, crossing midnight if needed
    pub fn minutes_until(&self, later: ClockTime) -> u16 {
        if later.minutes >= self.minutes {
            later.minutes - self.minutes
        } else {
            later.minutes + (MINUTES_PER_DAY - self.minutes)
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = QiblaError;

    /// Accepts `H:MM` and `HH:MM`, 24-hour
    fn from_str(s: &str) -> QiblaResult<Self> {
        let (hours, minutes) = s.trim().split_once(':').ok_or(QiblaError::InvalidClockTime)?;

        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return Err(QiblaError::InvalidClockTime);
        }
        // `u8::from_str` would take a leading '+'
        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(QiblaError::InvalidClockTime);
        }

        let hours: u8 = hours.parse().map_err(|_| QiblaError::InvalidClockTime)?;
        let minutes: u8 = minutes.parse().map_err(|_| QiblaError::InvalidClockTime)?;
        Self::from_hm(hours, minutes)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveTime> for ClockTime {
    fn from(time: chrono::NaiveTime) -> Self {
        use chrono::Timelike;
        Self::from_minutes(time.hour() * 60 + time.minute())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClockTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hhmm())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ClockTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ClockTimeVisitor;

        impl serde::de::Visitor<'_> for ClockTimeVisitor {
            type Value = ClockTime;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 24-hour HH:MM time")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<ClockTime, E> {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(ClockTimeVisitor)
    }
}
