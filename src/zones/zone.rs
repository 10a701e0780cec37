//! Deck zones.
//!
//! Every deck has three compartments. Their section headers in the
//! interchange format are case-sensitive literals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A deck compartment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Main deck.
    Main,
    /// Extra deck (fusion, synchro, xyz, link).
    Extra,
    /// Side deck. Never chosen by classification.
    Side,
}

/// Error for a zone name that is not `main`, `extra` or `side`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown zone: {0}")]
pub struct UnknownZone(pub String);

impl Zone {
    /// All zones, in section order.
    pub const ALL: [Zone; 3] = [Zone::Main, Zone::Extra, Zone::Side];

    /// Lowercase zone name, as stored by ledgers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Zone::Main => "main",
            Zone::Extra => "extra",
            Zone::Side => "side",
        }
    }

    /// Section header in the interchange format.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Zone::Main => "#main",
            Zone::Extra => "#extra",
            Zone::Side => "#side",
        }
    }

    /// Parse a section header line. The line must match exactly.
    ///
    /// `!side` is accepted as well because several simulators write the
    /// side section that way.
    #[must_use]
    pub fn from_header(line: &str) -> Option<Zone> {
        match line {
            "#main" => Some(Zone::Main),
            "#extra" => Some(Zone::Extra),
            "#side" | "!side" => Some(Zone::Side),
            _ => None,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Zone {
    type Err = UnknownZone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Zone::Main),
            "extra" => Ok(Zone::Extra),
            "side" => Ok(Zone::Side),
            other => Err(UnknownZone(other.to_string())),
        }
    }
}
