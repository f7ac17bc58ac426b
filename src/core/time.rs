//! Fixed-point GPS timestamps.
//!
//! Trigger times are stored as integer seconds plus nanoseconds so that
//! comparisons and differences are exact. The difference of two timestamps
//! is a [`chrono::Duration`], which is also the type of the cluster window.

use crate::error::{ClusterError, Result};
use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const MAX_FRACTION_DIGITS: usize = 9;
const MIN_TOTAL_NANOS: i128 = i64::MIN as i128 * NANOS_PER_SECOND as i128;
const MAX_TOTAL_NANOS: i128 =
    i64::MAX as i128 * NANOS_PER_SECOND as i128 + (NANOS_PER_SECOND as i128 - 1);

/// A GPS timestamp with nanosecond resolution.
///
/// Always normalized so that `0 <= nanoseconds < 1_000_000_000`; negative
/// times carry the sign in `seconds`. Ordering is the natural time order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GpsTime {
    seconds: i64,
    nanoseconds: i32,
}

impl GpsTime {
    /// Create a timestamp, carrying any nanosecond overflow into seconds.
    ///
    /// Saturates at the ends of the representable range.
    pub fn new(seconds: i64, nanoseconds: i64) -> Self {
        Self::from_nanoseconds(
            i128::from(seconds) * i128::from(NANOS_PER_SECOND) + i128::from(nanoseconds),
        )
    }

    /// Create a timestamp on a whole second.
    pub fn from_seconds(seconds: i64) -> Self {
        Self {
            seconds,
            nanoseconds: 0,
        }
    }

    /// Create a timestamp from a total count of nanoseconds, saturating at
    /// the ends of the representable range.
    pub fn from_nanoseconds(total: i128) -> Self {
        let total = total.clamp(MIN_TOTAL_NANOS, MAX_TOTAL_NANOS);
        let per_second = i128::from(NANOS_PER_SECOND);
        Self {
            seconds: total.div_euclid(per_second) as i64,
            nanoseconds: total.rem_euclid(per_second) as i32,
        }
    }

    /// Convert floating-point seconds, rounding to the nearest nanosecond.
    pub fn from_f64(seconds: f64) -> Result<Self> {
        if !seconds.is_finite() {
            return Err(ClusterError::TimestampError(format!(
                "non-finite time {seconds}"
            )));
        }
        let whole = seconds.floor();
        if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
            return Err(ClusterError::TimestampError(format!(
                "time {seconds} out of range"
            )));
        }
        let nanos = ((seconds - whole) * NANOS_PER_SECOND as f64).round() as i64;
        Ok(Self::new(whole as i64, nanos))
    }

    /// Integer seconds (floor of the time).
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanoseconds past [`GpsTime::seconds`].
    pub fn nanoseconds(&self) -> i32 {
        self.nanoseconds
    }

    /// Nanoseconds since the GPS epoch.
    pub fn total_nanoseconds(&self) -> i128 {
        i128::from(self.seconds) * i128::from(NANOS_PER_SECOND) + i128::from(self.nanoseconds)
    }

    /// Lossy conversion to floating-point seconds.
    pub fn as_f64(&self) -> f64 {
        self.seconds as f64 + f64::from(self.nanoseconds) / NANOS_PER_SECOND as f64
    }

    /// Non-negative separation between two timestamps, saturating at
    /// [`Duration::MAX`].
    pub fn abs_diff(self, other: Self) -> Duration {
        let delta = self - other;
        if delta < Duration::zero() {
            -delta
        } else {
            delta
        }
    }
}

/// Total nanoseconds in a duration; exact for every `Duration`.
fn duration_nanos(duration: Duration) -> i128 {
    i128::from(duration.num_seconds()) * i128::from(NANOS_PER_SECOND)
        + i128::from(duration.subsec_nanos())
}

/// Duration of `total` nanoseconds, clamped to `Duration::MIN..=Duration::MAX`.
fn saturating_duration(total: i128) -> Duration {
    let per_second = i128::from(NANOS_PER_SECOND);
    i64::try_from(total.div_euclid(per_second))
        .ok()
        .and_then(|seconds| Duration::new(seconds, total.rem_euclid(per_second) as u32))
        .unwrap_or(if total < 0 { Duration::MIN } else { Duration::MAX })
}

/// Saturates at [`Duration::MIN`] and [`Duration::MAX`], which keeps every
/// comparison against a window exact.
impl Sub for GpsTime {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        saturating_duration(self.total_nanoseconds() - rhs.total_nanoseconds())
    }
}

/// Saturates at the ends of the representable range.
impl Add<Duration> for GpsTime {
    type Output = GpsTime;

    fn add(self, rhs: Duration) -> GpsTime {
        GpsTime::from_nanoseconds(self.total_nanoseconds() + duration_nanos(rhs))
    }
}

impl Sub<Duration> for GpsTime {
    type Output = GpsTime;

    fn sub(self, rhs: Duration) -> GpsTime {
        self + (-rhs)
    }
}

impl fmt::Display for GpsTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_nanoseconds();
        let sign = if total < 0 { "-" } else { "" };
        let magnitude = total.unsigned_abs();
        let per_second = NANOS_PER_SECOND as u128;
        write!(
            f,
            "{sign}{}.{:09}",
            magnitude / per_second,
            magnitude % per_second
        )
    }
}

impl FromStr for GpsTime {
    type Err = ClusterError;

    /// Parse decimal seconds such as `"1000000000.125"` or `"-0.5"`.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(ClusterError::TimestampError(format!(
                "cannot parse '{s}' as a time"
            )));
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(ClusterError::TimestampError(format!(
                "cannot parse '{s}' as a time"
            )));
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(ClusterError::TimestampError(format!(
                "'{s}' has more than {MAX_FRACTION_DIGITS} fractional digits"
            )));
        }

        let seconds: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|e| ClusterError::TimestampError(format!("'{s}': {e}")))?
        };
        let nanoseconds: i64 = if fraction.is_empty() {
            0
        } else {
            let scale = 10_i64.pow((MAX_FRACTION_DIGITS - fraction.len()) as u32);
            fraction
                .parse::<i64>()
                .map_err(|e| ClusterError::TimestampError(format!("'{s}': {e}")))?
                * scale
        };

        let total = i128::from(seconds) * i128::from(NANOS_PER_SECOND) + i128::from(nanoseconds);
        Ok(Self::from_nanoseconds(if negative { -total } else { total }))
    }
}

impl Serialize for GpsTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GpsTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Format a duration as decimal seconds, e.g. `"0.010000000"`.
pub fn format_duration(duration: Duration) -> String {
    GpsTime::from_nanoseconds(duration_nanos(duration)).to_string()
}

/// Parse decimal seconds into a duration.
///
/// Fails on text that is not a time or lies outside the range of [`Duration`].
pub fn parse_duration(text: &str) -> Result<Duration> {
    let parsed: GpsTime = text.parse()?;
    Duration::new(parsed.seconds, parsed.nanoseconds as u32).ok_or_else(|| {
        ClusterError::TimestampError(format!("duration '{}' out of range", text.trim()))
    })
}

/// Serde adapter storing a [`Duration`] as a decimal-seconds string.
///
/// Use with `#[serde(with = "trigger_cluster::core::duration_seconds")]`.
pub mod duration_seconds {
    use super::{format_duration, parse_duration};
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        duration: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_duration(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_duration(&text).map_err(serde::de::Error::custom)
    }
}
