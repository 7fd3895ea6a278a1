//! Next-prayer scheduler
//!
//! Pure lookup over one day's times. The caller owns the clock and any
//! timer; call again with a fresh `now` to refresh a countdown.

use crate::{
    prayer::{DailyPrayerTimes, Prayer},
    time::ClockTime,
};

/// The upcoming prayer and the wait until it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NextPrayer {
    /// Which prayer comes next
    pub prayer: Prayer,
    /// Its local time (tomorrow's Fajr after Isha)
    pub time: ClockTime,
    /// Whole minutes from `now`
    pub minutes_remaining: u16,
}

/// First daily prayer strictly after `now`
///
/// After Isha the answer is tomorrow's Fajr, approximated by today's Fajr
/// time; the countdown wraps through midnight.
pub fn next_prayer(times: &DailyPrayerTimes, now: ClockTime) -> NextPrayer {
    let upcoming = Prayer::DAILY
        .into_iter()
        .map(|prayer| (prayer, times.get(prayer)))
        .find(|&(_, time)| time > now);

    let (prayer, time) = upcoming.unwrap_or((Prayer::Fajr, times.fajr));

    NextPrayer {
        prayer,
        time,
        minutes_remaining: now.minutes_until(time),
    }
}
