//! Clock frequencies such as `40MHz` and the periods they imply.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit suffixes, largest first. Matching is case-insensitive.
const UNITS: [(&str, f64); 4] = [
    ("GHz", 1e9),
    ("MHz", 1e6),
    ("KHz", 1e3),
    ("Hz", 1.0),
];

/// A frequency in Hertz.
///
/// Written as a number with an optional `Hz`/`KHz`/`MHz`/`GHz` suffix; a bare
/// number is taken as Hertz.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frequency(f64);

impl Frequency {
    /// From a value in Hertz.
    pub fn new(hz: f64) -> Self {
        Self(hz)
    }

    /// Value in Hertz.
    pub fn hz(self) -> f64 {
        self.0
    }

    /// Period rounded to the nearest nanosecond.
    ///
    /// `None` unless that is at least 1 ns and fits a `u32`, which is what a
    /// `localparam period` can hold.
    pub fn whole_period_ns(self) -> Option<u32> {
        if !self.0.is_finite() || self.0 <= 0.0 {
            return None;
        }
        let ns = (1e9 / self.0).round();
        (1.0..=f64::from(u32::MAX)).contains(&ns).then(|| ns as u32)
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (unit, scale) = UNITS
            .iter()
            .copied()
            .find(|&(_, scale)| self.0 >= scale)
            .unwrap_or(("Hz", 1.0));
        write!(f, "{}{unit}", self.0 / scale)
    }
}

/// A frequency string that is not a number with a known unit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{input}` is not a frequency (expected e.g. `40MHz`)")]
pub struct ParseFrequencyError {
    /// The rejected text, trimmed.
    pub input: String,
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (number, scale) = UNITS
            .iter()
            .find_map(|&(unit, scale)| {
                let split = text.len().checked_sub(unit.len())?;
                let (number, suffix) = (text.get(..split)?, text.get(split..)?);
                suffix.eq_ignore_ascii_case(unit).then_some((number, scale))
            })
            .unwrap_or((text, 1.0));
        number
            .trim()
            .parse::<f64>()
            .map(|value| Frequency(value * scale))
            .map_err(|_| ParseFrequencyError {
                input: text.to_string(),
            })
    }
}
