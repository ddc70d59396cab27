//! Recording playback engine
//!
//! `PlaybackLog` produces no audio. It records every call it receives and
//! keeps just enough channel state to answer `is_playing`, which makes it
//! the engine of choice for tests and for the command-line host.

use std::fmt;

use super::SamplePlayback;

/// One call received by a [`PlaybackLog`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    /// `start(channel, sample, looping)`
    Start {
        /// Target channel
        channel: usize,
        /// Sample started
        sample: usize,
        /// Whether the sample repeats
        looping: bool,
    },
    /// `stop(channel)`
    Stop {
        /// Target channel
        channel: usize,
    },
    /// `set_volume(channel, volume)`
    Volume {
        /// Target channel
        channel: usize,
        /// New gain
        volume: f32,
    },
}

impl PlaybackEvent {
    /// Whether the event starts or stops a sound
    pub fn is_trigger(&self) -> bool {
        !matches!(self, PlaybackEvent::Volume { .. })
    }
}

impl fmt::Display for PlaybackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlaybackEvent::Start {
                channel,
                sample,
                looping: true,
            } => write!(f, "ch{channel:>2} loop    sample {sample}"),
            PlaybackEvent::Start {
                channel, sample, ..
            } => write!(f, "ch{channel:>2} play    sample {sample}"),
            PlaybackEvent::Stop { channel } => write!(f, "ch{channel:>2} stop"),
            PlaybackEvent::Volume { channel, volume } => {
                write!(f, "ch{channel:>2} volume  {volume:.3}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ChannelSlot {
    sample: Option<usize>,
    looping: bool,
    volume: f32,
}

/// Playback engine that records calls instead of rendering audio
///
/// A looping start keeps the channel playing until `stop`. A one-shot start
/// keeps it playing until [`finish`](PlaybackLog::finish) reports that the
/// sample ran out.
#[derive(Debug, Clone)]
pub struct PlaybackLog {
    channels: Vec<ChannelSlot>,
    events: Vec<PlaybackEvent>,
}

impl PlaybackLog {
    /// Create a log for `channels` playback channels
    pub fn new(channels: usize) -> Self {
        PlaybackLog {
            channels: vec![
                ChannelSlot {
                    volume: 1.0,
                    ..ChannelSlot::default()
                };
                channels
            ],
            events: Vec::new(),
        }
    }

    /// Recorded events, oldest first
    pub fn events(&self) -> &[PlaybackEvent] {
        &self.events
    }

    /// Recorded start/stop events, ignoring volume changes
    pub fn triggers(&self) -> Vec<PlaybackEvent> {
        self.events.iter().copied().filter(PlaybackEvent::is_trigger).collect()
    }

    /// Take all recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forget recorded events (channel state is kept)
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Mark a one-shot sample on `channel` as having run to completion
    ///
    /// Looping samples are not affected.
    pub fn finish(&mut self, channel: usize) {
        if let Some(slot) = self.channels.get_mut(channel) {
            if !slot.looping {
                slot.sample = None;
            }
        }
    }

    /// Sample currently held by `channel`
    pub fn sample(&self, channel: usize) -> Option<usize> {
        self.channels.get(channel).and_then(|slot| slot.sample)
    }

    /// Current gain of `channel`
    pub fn volume(&self, channel: usize) -> Option<f32> {
        self.channels.get(channel).map(|slot| slot.volume)
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

impl SamplePlayback for PlaybackLog {
    fn start(&mut self, channel: usize, sample: usize, looping: bool) {
        self.events.push(PlaybackEvent::Start {
            channel,
            sample,
            looping,
        });
        if let Some(slot) = self.channels.get_mut(channel) {
            slot.sample = Some(sample);
            slot.looping = looping;
        }
    }

    fn stop(&mut self, channel: usize) {
        self.events.push(PlaybackEvent::Stop { channel });
        if let Some(slot) = self.channels.get_mut(channel) {
            slot.sample = None;
            slot.looping = false;
        }
    }

    fn is_playing(&self, channel: usize) -> bool {
        self.sample(channel).is_some()
    }

    fn set_volume(&mut self, channel: usize, volume: f32) {
        self.events.push(PlaybackEvent::Volume { channel, volume });
        if let Some(slot) = self.channels.get_mut(channel) {
            slot.volume = volume;
        }
    }
}
