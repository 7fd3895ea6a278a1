//! Time-Related Constants

// ===== TIME UNIT CONVERSIONS =====

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u16 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: u16 = 24;

/// Minutes per civil day.
pub const MINUTES_PER_DAY: u16 = MINUTES_PER_HOUR * HOURS_PER_DAY;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Seconds per civil day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Minutes per day as a day fraction divisor.
pub const MINUTES_PER_DAY_F64: f64 = 1440.0;
