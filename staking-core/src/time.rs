//! Block time.
//!
//! The ledger never reads a clock; callers pass block times in as
//! [`Timestamp`] values. Binary encodings carry `(seconds, nanos)` with
//! fixed-width integers, human-readable encodings carry RFC 3339 text.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimeError;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Instant on the UTC timeline with nanosecond precision.
///
/// Ordering is chronological.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    /// Whole seconds since the Unix epoch.
    pub const fn from_unix(seconds: i64) -> Self {
        Timestamp { seconds, nanos: 0 }
    }

    /// Seconds plus a sub-second component, which must be below one second.
    pub fn new(seconds: i64, nanos: u32) -> Result<Self, TimeError> {
        if nanos >= NANOS_PER_SECOND {
            return Err(TimeError::InvalidNanos(nanos));
        }
        Ok(Timestamp { seconds, nanos })
    }

    /// Seconds since the Unix epoch.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Sub-second nanoseconds.
    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    /// `self + duration`, or `None` on overflow.
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        let secs = i64::try_from(duration.as_secs()).ok()?;
        let mut seconds = self.seconds.checked_add(secs)?;
        let mut nanos = self.nanos + duration.subsec_nanos();
        if nanos >= NANOS_PER_SECOND {
            nanos -= NANOS_PER_SECOND;
            seconds = seconds.checked_add(1)?;
        }
        Some(Timestamp { seconds, nanos })
    }

    /// `self - duration`, or `None` on overflow.
    pub fn checked_sub(self, duration: Duration) -> Option<Self> {
        let secs = i64::try_from(duration.as_secs()).ok()?;
        let mut seconds = self.seconds.checked_sub(secs)?;
        let sub = duration.subsec_nanos();
        let nanos = if self.nanos >= sub {
            self.nanos - sub
        } else {
            seconds = seconds.checked_sub(1)?;
            self.nanos + NANOS_PER_SECOND - sub
        };
        Some(Timestamp { seconds, nanos })
    }

    /// Parse an RFC 3339 timestamp with any UTC offset.
    pub fn parse_rfc3339(text: &str) -> Result<Self, TimeError> {
        let parsed = DateTime::<FixedOffset>::parse_from_rfc3339(text)
            .map_err(|_| TimeError::InvalidFormat(text.to_string()))?;
        Timestamp::new(parsed.timestamp(), parsed.timestamp_subsec_nanos())
    }

    /// Render as RFC 3339 in UTC, e.g. `2024-05-01T12:00:00Z`.
    pub fn to_rfc3339(&self) -> Result<String, TimeError> {
        DateTime::<Utc>::from_timestamp(self.seconds, self.nanos)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            .ok_or(TimeError::OutOfRange)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}.{:09}s", self.seconds, self.nanos),
        }
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            let text = self.to_rfc3339().map_err(serde::ser::Error::custom)?;
            serializer.serialize_str(&text)
        } else {
            (self.seconds, self.nanos).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let text = String::deserialize(deserializer)?;
            Timestamp::parse_rfc3339(&text).map_err(de::Error::custom)
        } else {
            let (seconds, nanos) = <(i64, u32)>::deserialize(deserializer)?;
            Timestamp::new(seconds, nanos).map_err(de::Error::custom)
        }
    }
}
