//! Per-bit trigger rules
//!
//! A trigger rule watches one bit of one port and fires a playback action
//! when that bit changes in the direction the rule listens for.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::playback::SamplePlayback;
use crate::ports::Port;

bitflags! {
    /// Bit transitions a rule reacts to
    ///
    /// Outputs are active-low: a falling edge (1 -> 0) engages the sound,
    /// a rising edge (0 -> 1) releases it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Edge: u8 {
        /// Bit went 1 -> 0 (became active)
        const FALLING = 0x01;
        /// Bit went 0 -> 1 (became inactive)
        const RISING = 0x02;
        /// Either direction
        const BOTH = Self::FALLING.bits() | Self::RISING.bits();
    }
}

impl Edge {
    /// Direction of a change of `mask` given the value it changed to
    pub fn of_transition(new_value: u8, mask: u8) -> Edge {
        if new_value & mask == 0 {
            Edge::FALLING
        } else {
            Edge::RISING
        }
    }
}

/// Playback action fired by a trigger rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Start a sample that repeats until stopped
    StartLooping {
        /// Target channel
        channel: usize,
        /// Sample to play
        sample: usize,
    },
    /// Start a sample that plays once
    StartOneShot {
        /// Target channel
        channel: usize,
        /// Sample to play
        sample: usize,
    },
    /// Halt a channel
    Stop {
        /// Target channel
        channel: usize,
    },
}

impl Action {
    /// Channel the action operates on
    pub fn channel(&self) -> usize {
        match *self {
            Action::StartLooping { channel, .. }
            | Action::StartOneShot { channel, .. }
            | Action::Stop { channel } => channel,
        }
    }

    /// Sample the action plays, if it starts one
    pub fn sample(&self) -> Option<usize> {
        match *self {
            Action::StartLooping { sample, .. } | Action::StartOneShot { sample, .. } => {
                Some(sample)
            }
            Action::Stop { .. } => None,
        }
    }

    /// Issue the action against a playback engine
    pub fn apply<P: SamplePlayback + ?Sized>(&self, playback: &mut P) {
        match *self {
            Action::StartLooping { channel, sample } => playback.start(channel, sample, true),
            Action::StartOneShot { channel, sample } => playback.start(channel, sample, false),
            Action::Stop { channel } => playback.stop(channel),
        }
    }
}

/// Condition that can suppress a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    /// Skip the action while its channel is still playing
    NotAlreadyPlaying,
}

impl Guard {
    /// Whether the guarded action may fire on `channel`
    pub fn allows<P: SamplePlayback + ?Sized>(self, playback: &P, channel: usize) -> bool {
        match self {
            Guard::NotAlreadyPlaying => !playback.is_playing(channel),
        }
    }
}

/// Declarative effect of one port bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRule {
    /// Port the rule reads
    pub port: Port,
    /// Single-bit selector within the port byte
    pub mask: u8,
    /// Transitions that fire the rule
    pub edge: Edge,
    /// Action issued when the rule fires
    pub action: Action,
    /// Optional suppression condition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<Guard>,
}

impl TriggerRule {
    /// Create an unguarded rule
    pub fn new(port: Port, mask: u8, edge: Edge, action: Action) -> Self {
        TriggerRule {
            port,
            mask,
            edge,
            action,
            guard: None,
        }
    }

    /// Attach a guard to the rule
    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Whether the bit changed between `old` and `new` in a direction the rule listens for
    ///
    /// Guards are not consulted here; they need the playback state.
    pub fn fires(&self, old: u8, new: u8) -> bool {
        (old ^ new) & self.mask != 0 && self.edge.intersects(Edge::of_transition(new, self.mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laser_start() -> TriggerRule {
        TriggerRule::new(
            Port::A,
            0x40,
            Edge::FALLING,
            Action::StartLooping {
                channel: 2,
                sample: 2,
            },
        )
    }

    #[test]
    fn test_transition_direction() {
        assert_eq!(Edge::of_transition(0x00, 0x40), Edge::FALLING);
        assert_eq!(Edge::of_transition(0x40, 0x40), Edge::RISING);
        assert!(Edge::BOTH.contains(Edge::FALLING | Edge::RISING));
    }

    #[test]
    fn test_falling_rule() {
        let rule = laser_start();
        assert!(rule.fires(0xFF, 0xBF));
        assert!(!rule.fires(0xBF, 0xFF)); // rising
        assert!(!rule.fires(0xBF, 0xBF)); // unchanged
        assert!(!rule.fires(0xFF, 0xFE)); // other bit
    }

    #[test]
    fn test_both_edges() {
        let rule = TriggerRule::new(Port::C, 0x01, Edge::BOTH, Action::Stop { channel: 7 });
        assert!(rule.fires(0x01, 0x00));
        assert!(rule.fires(0x00, 0x01));
        assert!(!rule.fires(0x01, 0x01));
    }

    #[test]
    fn test_action_accessors() {
        let start = Action::StartOneShot {
            channel: 5,
            sample: 6,
        };
        assert_eq!(start.channel(), 5);
        assert_eq!(start.sample(), Some(6));
        assert_eq!(Action::Stop { channel: 3 }.sample(), None);
    }

    #[test]
    fn test_rule_from_json() {
        let rule: TriggerRule = serde_json::from_str(
            r#"{
                "port": "B",
                "mask": 32,
                "edge": "FALLING",
                "action": { "kind": "start_one_shot", "channel": 5, "sample": 5 },
                "guard": "not_already_playing"
            }"#,
        )
        .unwrap();

        assert_eq!(rule.port, Port::B);
        assert_eq!(rule.edge, Edge::FALLING);
        assert_eq!(rule.guard, Some(Guard::NotAlreadyPlaying));
        assert_eq!(
            rule.action,
            Action::StartOneShot {
                channel: 5,
                sample: 5
            }
        );
    }
}
