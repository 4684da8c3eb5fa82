//! Storage policies.
//!
//! A storage policy describes how an aggregated metric is stored: the resolution it was aggregated at, and how long
//! it is retained for. Commonly-used resolutions and retentions have compact known values, which are encoded in place
//! of the full resolution/retention.
use std::{fmt, time::Duration};

const MINUTE: Duration = Duration::from_secs(60);
const HOUR: Duration = Duration::from_secs(60 * 60);
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Unit of time.
///
/// Used to describe the precision of timestamps stored under a given resolution.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TimeUnit {
    /// No unit.
    None = 0,

    /// Seconds.
    Second = 1,

    /// Milliseconds.
    Millisecond = 2,

    /// Microseconds.
    Microsecond = 3,

    /// Nanoseconds.
    Nanosecond = 4,

    /// Minutes.
    Minute = 5,

    /// Hours.
    Hour = 6,

    /// Days.
    Day = 7,

    /// Years.
    Year = 8,
}

impl TimeUnit {
    /// Gets the value written on the wire for this unit.
    pub const fn as_i64(self) -> i64 {
        self as i64
    }
}

/// Aggregation resolution.
///
/// The window is the length of time over which values are aggregated, and the precision is the unit that timestamps
/// are truncated to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Resolution {
    window: Duration,
    precision: TimeUnit,
}

impl Resolution {
    /// Creates a new `Resolution`.
    pub const fn new(window: Duration, precision: TimeUnit) -> Self {
        Self { window, precision }
    }

    /// Gets the aggregation window.
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Gets the timestamp precision.
    pub const fn precision(&self) -> TimeUnit {
        self.precision
    }
}

/// Retention period.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Retention(Duration);

impl Retention {
    /// Creates a new `Retention`.
    pub const fn new(period: Duration) -> Self {
        Self(period)
    }

    /// Gets the retention period.
    pub const fn period(&self) -> Duration {
        self.0
    }
}

/// Storage policy.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct StoragePolicy {
    resolution: Resolution,
    retention: Retention,
}

impl StoragePolicy {
    /// Creates a new `StoragePolicy`.
    pub const fn new(resolution: Resolution, retention: Retention) -> Self {
        Self { resolution, retention }
    }

    /// Gets the resolution.
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Gets the retention.
    pub const fn retention(&self) -> Retention {
        self.retention
    }
}

impl fmt::Display for StoragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}@{:?}:{:?}",
            self.resolution.window, self.resolution.precision, self.retention.0
        )
    }
}

/// Known resolution value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResolutionValue {
    /// One second window, second precision.
    OneSecond = 1,

    /// Ten second window, second precision.
    TenSeconds = 2,

    /// One minute window, minute precision.
    OneMinute = 3,

    /// Five minute window, minute precision.
    FiveMinutes = 4,

    /// Ten minute window, minute precision.
    TenMinutes = 5,

    /// One hour window, hour precision.
    OneHour = 6,
}

impl ResolutionValue {
    const ALL: [ResolutionValue; 6] = [
        Self::OneSecond,
        Self::TenSeconds,
        Self::OneMinute,
        Self::FiveMinutes,
        Self::TenMinutes,
        Self::OneHour,
    ];

    /// Gets the resolution this value stands for.
    pub const fn resolution(self) -> Resolution {
        match self {
            Self::OneSecond => Resolution::new(Duration::from_secs(1), TimeUnit::Second),
            Self::TenSeconds => Resolution::new(Duration::from_secs(10), TimeUnit::Second),
            Self::OneMinute => Resolution::new(MINUTE, TimeUnit::Minute),
            Self::FiveMinutes => Resolution::new(Duration::from_secs(5 * 60), TimeUnit::Minute),
            Self::TenMinutes => Resolution::new(Duration::from_secs(10 * 60), TimeUnit::Minute),
            Self::OneHour => Resolution::new(HOUR, TimeUnit::Hour),
        }
    }

    /// Gets the known value for the given resolution, if there is one.
    pub fn from_resolution(resolution: &Resolution) -> Option<Self> {
        Self::ALL.iter().copied().find(|value| value.resolution() == *resolution)
    }

    /// Gets the value written on the wire.
    pub const fn as_i64(self) -> i64 {
        self as i64
    }
}

/// Known retention value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RetentionValue {
    /// One hour.
    OneHour = 1,

    /// Six hours.
    SixHours = 2,

    /// Twelve hours.
    TwelveHours = 3,

    /// One day.
    OneDay = 4,

    /// Two days.
    TwoDays = 5,

    /// Seven days.
    SevenDays = 6,

    /// Fourteen days.
    FourteenDays = 7,

    /// Thirty days.
    ThirtyDays = 8,

    /// Forty-five days.
    FortyFiveDays = 9,

    /// Ninety days.
    NinetyDays = 10,

    /// One hundred eighty days.
    OneHundredEightyDays = 11,

    /// Three hundred sixty-five days.
    OneYear = 12,
}

impl RetentionValue {
    const ALL: [RetentionValue; 12] = [
        Self::OneHour,
        Self::SixHours,
        Self::TwelveHours,
        Self::OneDay,
        Self::TwoDays,
        Self::SevenDays,
        Self::FourteenDays,
        Self::ThirtyDays,
        Self::FortyFiveDays,
        Self::NinetyDays,
        Self::OneHundredEightyDays,
        Self::OneYear,
    ];

    /// Gets the retention this value stands for.
    pub const fn retention(self) -> Retention {
        let period = match self {
            Self::OneHour => HOUR,
            Self::SixHours => Duration::from_secs(6 * 60 * 60),
            Self::TwelveHours => Duration::from_secs(12 * 60 * 60),
            Self::OneDay => DAY,
            Self::TwoDays => Duration::from_secs(2 * 24 * 60 * 60),
            Self::SevenDays => Duration::from_secs(7 * 24 * 60 * 60),
            Self::FourteenDays => Duration::from_secs(14 * 24 * 60 * 60),
            Self::ThirtyDays => Duration::from_secs(30 * 24 * 60 * 60),
            Self::FortyFiveDays => Duration::from_secs(45 * 24 * 60 * 60),
            Self::NinetyDays => Duration::from_secs(90 * 24 * 60 * 60),
            Self::OneHundredEightyDays => Duration::from_secs(180 * 24 * 60 * 60),
            Self::OneYear => Duration::from_secs(365 * 24 * 60 * 60),
        };
        Retention::new(period)
    }

    /// Gets the known value for the given retention, if there is one.
    pub fn from_retention(retention: &Retention) -> Option<Self> {
        Self::ALL.iter().copied().find(|value| value.retention() == *retention)
    }

    /// Gets the value written on the wire.
    pub const fn as_i64(self) -> i64 {
        self as i64
    }
}
