//! Three-way plausibility labels and their ordinal codes.

use super::error::{DataError, Result};
use std::fmt;
use std::str::FromStr;

/// Number of plausibility classes
pub const NUM_CLASSES: usize = 3;

/// How well a filler fits its blank.
///
/// Ordinal codes: `Implausible` = 0, `Neutral` = 1, `Plausible` = 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlausibilityLabel {
    /// The filler does not fit the blank
    Implausible,
    /// The filler neither clearly fits nor clearly clashes
    Neutral,
    /// The filler fits the blank
    Plausible,
}

impl PlausibilityLabel {
    /// Ordinal code used in merged output tables.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Implausible => 0,
            Self::Neutral => 1,
            Self::Plausible => 2,
        }
    }

    /// Label for an ordinal code, if in range.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Implausible),
            1 => Some(Self::Neutral),
            2 => Some(Self::Plausible),
            _ => None,
        }
    }

    /// Canonical string form, as it appears in label files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Implausible => "IMPLAUSIBLE",
            Self::Neutral => "NEUTRAL",
            Self::Plausible => "PLAUSIBLE",
        }
    }
}

impl FromStr for PlausibilityLabel {
    type Err = DataError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "IMPLAUSIBLE" => Ok(Self::Implausible),
            "NEUTRAL" => Ok(Self::Neutral),
            "PLAUSIBLE" => Ok(Self::Plausible),
            other => Err(DataError::InvalidLabel {
                label: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for PlausibilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
