//! Edge detection and action dispatch
//!
//! Every write to an output port is compared with the byte previously
//! latched on that port. Volume rules are applied on every write; trigger
//! rules only fire for bits that actually changed, so writing the same byte
//! twice is a no-op for triggers.

use std::sync::Arc;

use crate::playback::SamplePlayback;
use crate::ports::{Port, PortState, PpiRegister};
use crate::rules::TriggerTable;

/// Converts port writes into playback actions for one machine instance
///
/// The dispatcher owns the latched port values and is bound to a single
/// trigger table for its whole life.
#[derive(Debug)]
pub struct EdgeDispatcher<P> {
    table: Arc<TriggerTable>,
    ports: PortState,
    initial: u8,
    playback: P,
}

impl<P: SamplePlayback> EdgeDispatcher<P> {
    /// Create a dispatcher with every port latched at 0x00
    pub fn new(table: impl Into<Arc<TriggerTable>>, playback: P) -> Self {
        Self::with_initial(table, playback, 0x00)
    }

    /// Create a dispatcher with every port latched at `initial`
    ///
    /// Use 0xFF to start with every active-low output released.
    pub fn with_initial(table: impl Into<Arc<TriggerTable>>, playback: P, initial: u8) -> Self {
        EdgeDispatcher {
            table: table.into(),
            ports: PortState::with_initial(initial),
            initial,
            playback,
        }
    }

    /// Handle a byte written to `port`
    ///
    /// Guards are evaluated against the playing state from before the write,
    /// so a start fired by one rule never suppresses another rule fired by
    /// the same write.
    pub fn on_port_write(&mut self, port: Port, value: u8) {
        let old = self.ports.write(port, value);
        let diff = old ^ value;

        tracing::trace!(%port, old, new = value, diff, "port write");

        for rule in self.table.volumes_for(port) {
            let volume = rule.volume_for(value);
            for &channel in &rule.channels {
                self.playback.set_volume(channel, volume);
            }
        }

        if diff == 0 {
            return;
        }

        let mut fired = Vec::new();
        for rule in self.table.triggers_for(port) {
            if !rule.fires(old, value) {
                continue;
            }

            let channel = rule.action.channel();
            if let Some(guard) = rule.guard {
                if !guard.allows(&self.playback, channel) {
                    tracing::trace!(%port, mask = rule.mask, channel, ?guard, "trigger suppressed");
                    continue;
                }
            }
            fired.push(rule);
        }

        for rule in fired {
            tracing::trace!(%port, mask = rule.mask, action = ?rule.action, "trigger fired");
            rule.action.apply(&mut self.playback);
        }
    }

    /// Handle a write to Port A
    pub fn on_port_a(&mut self, value: u8) {
        self.on_port_write(Port::A, value);
    }

    /// Handle a write to Port B
    pub fn on_port_b(&mut self, value: u8) {
        self.on_port_write(Port::B, value);
    }

    /// Handle a write to Port C
    pub fn on_port_c(&mut self, value: u8) {
        self.on_port_write(Port::C, value);
    }

    /// Handle a write to the 8255 register window at `offset`
    ///
    /// Control register writes only configure the chip mode and are ignored.
    pub fn write_register(&mut self, offset: u8, value: u8) {
        match PpiRegister::from_offset(offset) {
            PpiRegister::Port(port) => self.on_port_write(port, value),
            PpiRegister::Control => {
                tracing::trace!(control = value, "8255 control write ignored");
            }
        }
    }

    /// Return every port to its initial value and silence every channel
    pub fn reset(&mut self) {
        self.ports.fill(self.initial);
        for channel in 0..self.table.channels() {
            self.playback.stop(channel);
        }
    }
}

impl<P> EdgeDispatcher<P> {
    /// Latched port values
    pub fn ports(&self) -> &PortState {
        &self.ports
    }

    /// Last byte written to `port`
    pub fn port(&self, port: Port) -> u8 {
        self.ports.read(port)
    }

    /// Active trigger table
    pub fn table(&self) -> &TriggerTable {
        &self.table
    }

    /// Playback engine
    pub fn playback(&self) -> &P {
        &self.playback
    }

    /// Mutable playback engine
    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }

    /// Consume the dispatcher and return its playback engine
    pub fn into_playback(self) -> P {
        self.playback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Edge, PlaybackEvent, PlaybackLog, TriggerRule, VolumeRule};
    use approx::assert_relative_eq;

    fn table() -> TriggerTable {
        TriggerTable::builder("test", 3)
            .samples(["engine", "boom", "beep"])
            .toggle(Port::A, 0x01, 0, 0)
            .guarded_one_shot(Port::B, 0x02, 1, 1)
            .one_shot(Port::C, 0x80, 2, 2)
            .build()
            .unwrap()
    }

    fn dispatcher() -> EdgeDispatcher<PlaybackLog> {
        EdgeDispatcher::with_initial(table(), PlaybackLog::new(3), 0xFF)
    }

    #[test]
    fn test_toggle_start_and_stop() {
        let mut sound = dispatcher();
        sound.on_port_a(0xFE);
        sound.on_port_a(0xFF);

        assert_eq!(
            sound.playback().events(),
            &[
                PlaybackEvent::Start {
                    channel: 0,
                    sample: 0,
                    looping: true
                },
                PlaybackEvent::Stop { channel: 0 },
            ]
        );
    }

    #[test]
    fn test_repeated_write_is_noop() {
        let mut sound = dispatcher();
        sound.on_port_c(0x7F);
        sound.playback_mut().clear();

        sound.on_port_c(0x7F);
        assert!(sound.playback().events().is_empty());
    }

    #[test]
    fn test_guard_blocks_retrigger() {
        let mut sound = dispatcher();
        sound.on_port_b(0xFD);
        sound.on_port_b(0xFF);
        sound.on_port_b(0xFD); // still playing

        assert_eq!(sound.playback().triggers().len(), 1);

        sound.playback_mut().finish(1);
        sound.on_port_b(0xFF);
        sound.on_port_b(0xFD);
        assert_eq!(sound.playback().triggers().len(), 2);
    }

    #[test]
    fn test_register_window() {
        let mut sound = dispatcher();
        sound.write_register(0x3F, 0x80);
        assert_eq!(sound.ports().as_array(), [0xFF, 0xFF, 0xFF]);

        sound.write_register(0x3E, 0x7F);
        assert_eq!(sound.port(Port::C), 0x7F);
        assert_eq!(sound.playback().triggers().len(), 1);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut sound = dispatcher();
        sound.on_port_a(0x00);
        assert!(sound.playback().is_playing(0));

        sound.reset();
        assert_eq!(sound.ports().as_array(), [0xFF; 3]);
        assert!(!sound.playback().is_playing(0));
    }

    #[test]
    fn test_volume_uses_masked_bits_in_place() {
        let table = TriggerTable::builder("volume", 1)
            .samples(["engine"])
            .volume(VolumeRule::new(Port::A, 0x0C, &[0], 0.0, 0.05))
            .build()
            .unwrap();
        let mut sound = EdgeDispatcher::new(table, PlaybackLog::new(1));

        sound.on_port_a(0x04);
        match sound.playback().events() {
            [PlaybackEvent::Volume { channel: 0, volume }] => {
                assert_relative_eq!(*volume, 0.2_f32, epsilon = 1e-6)
            }
            events => panic!("unexpected events {events:?}"),
        }
        assert_relative_eq!(sound.playback().volume(0).unwrap(), 0.2_f32, epsilon = 1e-6);
    }

    #[test]
    fn test_both_edge_rule_fires_once_per_flip() {
        let table = TriggerTable::builder("both", 1)
            .samples(["click"])
            .trigger(TriggerRule::new(
                Port::C,
                0x01,
                Edge::BOTH,
                Action::StartOneShot {
                    channel: 0,
                    sample: 0,
                },
            ))
            .build()
            .unwrap();
        let mut sound = EdgeDispatcher::new(table, PlaybackLog::new(1));

        // 0x00 -> 0x01 rises, 0x01 -> 0x00 falls, repeats are silent
        for value in [0x01, 0x01, 0x00, 0x00, 0x01, 0xFF] {
            sound.on_port_c(value);
        }

        let click = PlaybackEvent::Start {
            channel: 0,
            sample: 0,
            looping: false,
        };
        assert_eq!(sound.playback().events(), &[click; 3]);
    }

    #[test]
    fn test_guard_sees_state_before_write() {
        let table = TriggerTable::builder("guards", 1)
            .samples(["loop", "hit"])
            .trigger(TriggerRule::new(
                Port::B,
                0x01,
                Edge::FALLING,
                Action::StartLooping {
                    channel: 0,
                    sample: 0,
                },
            ))
            .guarded_one_shot(Port::B, 0x02, 0, 1)
            .build()
            .unwrap();
        let mut sound = EdgeDispatcher::with_initial(table, PlaybackLog::new(1), 0xFF);

        // both bits fall in one write; the loop started by bit 0 must not
        // block the guarded one-shot on the same channel
        sound.on_port_b(0xFC);
        assert_eq!(
            sound.playback().events(),
            &[
                PlaybackEvent::Start {
                    channel: 0,
                    sample: 0,
                    looping: true
                },
                PlaybackEvent::Start {
                    channel: 0,
                    sample: 1,
                    looping: false
                },
            ]
        );

        // on a later write the channel is busy and the guard holds
        sound.on_port_b(0xFF);
        sound.playback_mut().clear();
        sound.on_port_b(0xFD);
        assert!(sound.playback().events().is_empty());
    }
}
