//! Sound board configuration
//!
//! Selects the board variant, the power-on value of the port latches and,
//! optionally, a custom rule table in place of the built-in one.
//!
//! ```json
//! {
//!   "variant": "congo",
//!   "initial_port_value": 255
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatch::EdgeDispatcher;
use crate::playback::SamplePlayback;
use crate::rules::{TriggerRule, TriggerTable, VolumeRule};
use crate::variants::Variant;
use crate::Result;

/// Serializable description of a trigger table
///
/// Validated by the same builder as the built-in tables when turned into a
/// [`TriggerTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDefinition {
    /// Board name
    pub name: String,
    /// Number of playback channels
    pub channels: usize,
    /// Sample names in playback index order
    #[serde(default)]
    pub samples: Vec<String>,
    /// Edge-sensitive rules
    #[serde(default)]
    pub triggers: Vec<TriggerRule>,
    /// Level-sensitive volume rules
    #[serde(default)]
    pub volumes: Vec<VolumeRule>,
}

impl TableDefinition {
    /// Validate and build the table
    pub fn build(self) -> Result<TriggerTable> {
        let builder = TriggerTable::builder(self.name, self.channels).samples(self.samples);
        let builder = self
            .triggers
            .into_iter()
            .fold(builder, |builder, rule| builder.trigger(rule));
        self.volumes
            .into_iter()
            .fold(builder, |builder, rule| builder.volume(rule))
            .build()
    }
}

impl From<&TriggerTable> for TableDefinition {
    fn from(table: &TriggerTable) -> Self {
        TableDefinition {
            name: table.name().to_string(),
            channels: table.channels(),
            samples: table.samples().to_vec(),
            triggers: table.triggers().to_vec(),
            volumes: table.volumes().to_vec(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SoundConfig {
    /// Built-in board variant
    pub variant: Variant,
    /// Value of every port latch before the first write
    pub initial_port_value: u8,
    /// Custom table replacing the variant's built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableDefinition>,
}

impl Default for SoundConfig {
    fn default() -> Self {
        SoundConfig {
            variant: Variant::Zaxxon,
            initial_port_value: 0x00,
            table: None,
        }
    }
}

impl SoundConfig {
    /// Configuration for a built-in variant with default settings
    pub fn for_variant(variant: Variant) -> Self {
        SoundConfig {
            variant,
            ..Self::default()
        }
    }

    /// Parse a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        tracing::debug!(
            path = %path.display(),
            variant = %config.variant,
            custom_table = config.table.is_some(),
            "loaded sound configuration"
        );
        Ok(config)
    }

    /// Build the active trigger table
    pub fn build_table(&self) -> Result<TriggerTable> {
        match &self.table {
            Some(definition) => definition.clone().build(),
            None => self.variant.table(),
        }
    }

    /// Build a dispatcher driving `playback`
    pub fn build_dispatcher<P: SamplePlayback>(&self, playback: P) -> Result<EdgeDispatcher<P>> {
        Ok(EdgeDispatcher::with_initial(
            self.build_table()?,
            playback,
            self.initial_port_value,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Port;
    use crate::rules::Edge;
    use crate::{PlaybackLog, SoundError};

    #[test]
    fn test_defaults() {
        let config = SoundConfig::from_json("{}").unwrap();
        assert_eq!(config, SoundConfig::default());
        assert_eq!(config.build_table().unwrap().name(), "zaxxon");
    }

    #[test]
    fn test_variant_and_initial_value() {
        let config =
            SoundConfig::from_json(r#"{ "variant": "congo", "initial_port_value": 255 }"#).unwrap();
        let sound = config.build_dispatcher(PlaybackLog::new(5)).unwrap();
        assert_eq!(sound.table().name(), "congo");
        assert_eq!(sound.port(Port::C), 0xFF);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SoundConfig::from_json(r#"{ "variant": "zaxxon", "mute": true }"#).unwrap_err();
        assert!(matches!(err, SoundError::Json(_)));
    }

    #[test]
    fn test_custom_table() {
        let config = SoundConfig::from_json(
            r#"{
                "table": {
                    "name": "custom",
                    "channels": 1,
                    "samples": ["siren.wav"],
                    "triggers": [
                        { "port": "C", "mask": 1, "edge": "FALLING",
                          "action": { "kind": "start_looping", "channel": 0, "sample": 0 } },
                        { "port": "C", "mask": 1, "edge": "RISING",
                          "action": { "kind": "stop", "channel": 0 } }
                    ]
                }
            }"#,
        )
        .unwrap();

        let table = config.build_table().unwrap();
        assert_eq!(table.name(), "custom");
        assert_eq!(table.triggers()[1].edge, Edge::RISING);
    }

    #[test]
    fn test_custom_table_is_validated() {
        let config = SoundConfig::from_json(
            r#"{
                "table": {
                    "name": "broken",
                    "channels": 1,
                    "samples": ["a.wav"],
                    "triggers": [
                        { "port": "A", "mask": 3, "edge": "FALLING",
                          "action": { "kind": "stop", "channel": 0 } }
                    ]
                }
            }"#,
        )
        .unwrap();

        assert!(matches!(
            config.build_table(),
            Err(SoundError::MultiBitTrigger { mask: 3, .. })
        ));
    }

    #[test]
    fn test_table_definition_round_trip() {
        let table = Variant::Zaxxon.table().unwrap();
        let json = serde_json::to_string(&TableDefinition::from(&table)).unwrap();
        let rebuilt: TableDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(rebuilt.build().unwrap(), table);
    }
}
