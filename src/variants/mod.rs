//! Built-in Board Tables
//!
//! One module per supported sound board, each exposing its channel numbering,
//! sample set and a `table()` constructor.

pub mod congo;
pub mod zaxxon;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rules::TriggerTable;
use crate::{Result, SoundError};

/// Supported sound board variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Ship-combat board with volume control and looping effects
    #[default]
    Zaxxon,
    /// Percussion board with drum loops
    Congo,
}

impl Variant {
    /// All variants
    pub const ALL: [Variant; 2] = [Variant::Zaxxon, Variant::Congo];

    /// Build the variant's trigger table
    pub fn table(self) -> Result<TriggerTable> {
        match self {
            Variant::Zaxxon => zaxxon::table(),
            Variant::Congo => congo::table(),
        }
    }

    /// Number of playback channels the variant needs
    pub fn channels(self) -> usize {
        match self {
            Variant::Zaxxon => zaxxon::CHANNELS,
            Variant::Congo => congo::CHANNELS,
        }
    }

    /// Lowercase identifier
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Zaxxon => "zaxxon",
            Variant::Congo => "congo",
        }
    }
}

impl FromStr for Variant {
    type Err = SoundError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zaxxon" => Ok(Variant::Zaxxon),
            "congo" | "congobongo" => Ok(Variant::Congo),
            other => Err(SoundError::Config(format!("unknown variant '{other}'"))),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_builds() {
        for variant in Variant::ALL {
            let table = variant.table().unwrap();
            assert_eq!(table.name(), variant.as_str());
            assert_eq!(table.channels(), variant.channels());
        }
    }

    #[test]
    fn test_parse_variant() {
        assert_eq!("Zaxxon".parse::<Variant>().unwrap(), Variant::Zaxxon);
        assert_eq!("congo".parse::<Variant>().unwrap(), Variant::Congo);
        assert!("scramble".parse::<Variant>().is_err());
    }
}
