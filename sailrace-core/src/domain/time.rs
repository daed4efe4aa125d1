//! RaceTime — whole-second elapsed time in the store's `H:MM:SS` text form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 3_600;

/// Errors from parsing `H:MM:SS` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("expected H:MM:SS, got '{0}'")]
    Format(String),
    #[error("'{field}' component out of range in '{input}'")]
    OutOfRange { field: &'static str, input: String },
}

/// Elapsed race time in whole seconds.
///
/// `24:00:00` is reserved as the "did not finish / unscored" sentinel. It is
/// carried through correction verbatim and ranked behind every finisher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RaceTime(u32);

impl RaceTime {
    pub const DID_NOT_FINISH: RaceTime = RaceTime(24 * SECONDS_PER_HOUR);

    pub const fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self(hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds)
    }

    /// Round a fractional second count to the nearest whole second.
    ///
    /// Returns `None` for non-finite or negative input, or input that does not
    /// fit in a `u32`.
    pub fn from_seconds_f64(seconds: f64) -> Option<Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return None;
        }
        let rounded = seconds.round();
        if rounded > u32::MAX as f64 {
            return None;
        }
        Some(Self(rounded as u32))
    }

    pub fn seconds(self) -> u32 {
        self.0
    }

    pub fn is_unscored(self) -> bool {
        self == Self::DID_NOT_FINISH
    }

    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let parts: Vec<&str> = input.trim().split(':').collect();
        if parts.len() != 3 {
            return Err(TimeParseError::Format(input.to_string()));
        }
        let component = |raw: &str| -> Result<u32, TimeParseError> {
            raw.parse::<u32>()
                .map_err(|_| TimeParseError::Format(input.to_string()))
        };
        let hours = component(parts[0])?;
        let minutes = component(parts[1])?;
        let seconds = component(parts[2])?;
        if minutes >= 60 {
            return Err(TimeParseError::OutOfRange {
                field: "minutes",
                input: input.to_string(),
            });
        }
        if seconds >= 60 {
            return Err(TimeParseError::OutOfRange {
                field: "seconds",
                input: input.to_string(),
            });
        }
        hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|h| h.checked_add(minutes * SECONDS_PER_MINUTE + seconds))
            .map(Self)
            .ok_or(TimeParseError::OutOfRange {
                field: "hours",
                input: input.to_string(),
            })
    }
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / SECONDS_PER_HOUR;
        let minutes = (self.0 % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = self.0 % SECONDS_PER_MINUTE;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl FromStr for RaceTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RaceTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RaceTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
