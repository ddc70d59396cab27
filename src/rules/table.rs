//! Trigger tables
//!
//! A table bundles every trigger and volume rule of one board together with
//! the channel count and sample set the rules address. Tables are validated
//! once when built and are immutable afterwards.

use super::{Action, Edge, Guard, TriggerRule, VolumeRule};
use crate::ports::Port;
use crate::{Result, SoundError};

/// Validated rule set for one hardware variant
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerTable {
    name: String,
    channels: usize,
    samples: Vec<String>,
    triggers: Vec<TriggerRule>,
    volumes: Vec<VolumeRule>,
}

impl TriggerTable {
    /// Start building a table with `channels` playback channels
    pub fn builder(name: impl Into<String>, channels: usize) -> TriggerTableBuilder {
        TriggerTableBuilder::new(name, channels)
    }

    /// Board name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of playback channels
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample names in playback index order
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Name of a sample, if it exists
    pub fn sample_name(&self, sample: usize) -> Option<&str> {
        self.samples.get(sample).map(String::as_str)
    }

    /// Every trigger rule in declaration order
    pub fn triggers(&self) -> &[TriggerRule] {
        &self.triggers
    }

    /// Every volume rule in declaration order
    pub fn volumes(&self) -> &[VolumeRule] {
        &self.volumes
    }

    /// Trigger rules reading `port`
    pub fn triggers_for(&self, port: Port) -> impl Iterator<Item = &TriggerRule> {
        self.triggers.iter().filter(move |rule| rule.port == port)
    }

    /// Volume rules reading `port`
    pub fn volumes_for(&self, port: Port) -> impl Iterator<Item = &VolumeRule> {
        self.volumes.iter().filter(move |rule| rule.port == port)
    }
}

/// Builder for [`TriggerTable`]
///
/// Rules are collected unchecked; [`TriggerTableBuilder::build`] validates
/// them all and reports the first malformed entry.
#[derive(Debug, Clone)]
pub struct TriggerTableBuilder {
    name: String,
    channels: usize,
    samples: Vec<String>,
    triggers: Vec<TriggerRule>,
    volumes: Vec<VolumeRule>,
}

impl TriggerTableBuilder {
    /// Create an empty builder
    pub fn new(name: impl Into<String>, channels: usize) -> Self {
        TriggerTableBuilder {
            name: name.into(),
            channels,
            samples: Vec::new(),
            triggers: Vec::new(),
            volumes: Vec::new(),
        }
    }

    /// Set the sample names, in playback index order
    pub fn samples<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.samples = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add a trigger rule
    pub fn trigger(mut self, rule: TriggerRule) -> Self {
        self.triggers.push(rule);
        self
    }

    /// Add a volume rule
    pub fn volume(mut self, rule: VolumeRule) -> Self {
        self.volumes.push(rule);
        self
    }

    /// Continuous sound: loop while the bit is low, stop when it goes high
    pub fn toggle(self, port: Port, mask: u8, channel: usize, sample: usize) -> Self {
        self.trigger(TriggerRule::new(
            port,
            mask,
            Edge::FALLING,
            Action::StartLooping { channel, sample },
        ))
        .trigger(TriggerRule::new(
            port,
            mask,
            Edge::RISING,
            Action::Stop { channel },
        ))
    }

    /// Instantaneous sound: play once when the bit goes low
    pub fn one_shot(self, port: Port, mask: u8, channel: usize, sample: usize) -> Self {
        self.trigger(TriggerRule::new(
            port,
            mask,
            Edge::FALLING,
            Action::StartOneShot { channel, sample },
        ))
    }

    /// Like [`one_shot`](Self::one_shot), but never restarts a sound still playing
    pub fn guarded_one_shot(self, port: Port, mask: u8, channel: usize, sample: usize) -> Self {
        self.trigger(
            TriggerRule::new(
                port,
                mask,
                Edge::FALLING,
                Action::StartOneShot { channel, sample },
            )
            .with_guard(Guard::NotAlreadyPlaying),
        )
    }

    /// Validate every rule and produce the table
    pub fn build(self) -> Result<TriggerTable> {
        if self.channels == 0 {
            return Err(SoundError::Config(format!(
                "table '{}' has no channels",
                self.name
            )));
        }

        for rule in &self.triggers {
            self.check_trigger(rule)?;
        }
        for (i, rule) in self.triggers.iter().enumerate() {
            let conflict = self.triggers[i + 1..].iter().any(|other| {
                other.port == rule.port
                    && other.mask == rule.mask
                    && other.edge.intersects(rule.edge)
            });
            if conflict {
                return Err(SoundError::ConflictingTriggers {
                    port: rule.port,
                    mask: rule.mask,
                });
            }
        }
        for rule in &self.volumes {
            self.check_volume(rule)?;
        }

        tracing::debug!(
            table = %self.name,
            channels = self.channels,
            samples = self.samples.len(),
            triggers = self.triggers.len(),
            volumes = self.volumes.len(),
            "built trigger table"
        );

        Ok(TriggerTable {
            name: self.name,
            channels: self.channels,
            samples: self.samples,
            triggers: self.triggers,
            volumes: self.volumes,
        })
    }

    fn check_channel(&self, channel: usize) -> Result<()> {
        if channel >= self.channels {
            return Err(SoundError::ChannelOutOfRange {
                channel,
                channels: self.channels,
            });
        }
        Ok(())
    }

    fn check_trigger(&self, rule: &TriggerRule) -> Result<()> {
        match rule.mask.count_ones() {
            0 => return Err(SoundError::EmptyMask { port: rule.port }),
            1 => {}
            _ => {
                return Err(SoundError::MultiBitTrigger {
                    port: rule.port,
                    mask: rule.mask,
                })
            }
        }
        if rule.edge.is_empty() {
            return Err(SoundError::Config(format!(
                "trigger rule on {} mask 0x{:02X} listens to no edge",
                rule.port, rule.mask
            )));
        }

        self.check_channel(rule.action.channel())?;
        if let Some(sample) = rule.action.sample() {
            if sample >= self.samples.len() {
                return Err(SoundError::SampleOutOfRange {
                    sample,
                    samples: self.samples.len(),
                });
            }
        }
        Ok(())
    }

    fn check_volume(&self, rule: &VolumeRule) -> Result<()> {
        if rule.mask == 0 {
            return Err(SoundError::EmptyMask { port: rule.port });
        }
        if rule.channels.is_empty() {
            return Err(SoundError::Config(format!(
                "volume rule on {} mask 0x{:02X} drives no channels",
                rule.port, rule.mask
            )));
        }
        for &channel in &rule.channels {
            self.check_channel(channel)?;
        }

        let (min, max) = rule.range();
        if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) {
            return Err(SoundError::VolumeOutOfRange {
                port: rule.port,
                mask: rule.mask,
                min,
                max,
            });
        }
        Ok(())
    }
}
