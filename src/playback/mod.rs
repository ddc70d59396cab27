//! Sample playback collaborator
//!
//! This module defines the interface the dispatcher drives. Loading samples,
//! resampling and mixing belong to the implementation behind it.

pub mod log;
pub mod shared;

pub use self::log::{PlaybackEvent, PlaybackLog};
pub use shared::SharedPlayback;

/// Multi-channel sample playback engine
///
/// Calls are fire-and-forget from the dispatcher's point of view. An
/// implementation that renders audio on another thread owns the
/// synchronization with that thread (see [`SharedPlayback`]).
///
/// # Example
///
/// ```
/// use ppi_sound::{PlaybackLog, SamplePlayback};
///
/// fn fire_laser<P: SamplePlayback>(playback: &mut P) {
///     playback.set_volume(2, 0.8);
///     playback.start(2, 2, true);
/// }
///
/// let mut log = PlaybackLog::new(4);
/// fire_laser(&mut log);
/// assert!(log.is_playing(2));
/// ```
pub trait SamplePlayback {
    /// Begin playing `sample` on `channel`
    ///
    /// A looping sample repeats until [`stop`](Self::stop) is called; a
    /// one-shot sample ends by itself and then reports not playing.
    fn start(&mut self, channel: usize, sample: usize, looping: bool);

    /// Halt `channel` immediately (no-op when idle)
    fn stop(&mut self, channel: usize);

    /// Whether `channel` is currently playing
    fn is_playing(&self, channel: usize) -> bool;

    /// Set the gain of `channel`, in 0.0..=1.0
    fn set_volume(&mut self, channel: usize, volume: f32);
}

impl<P: SamplePlayback + ?Sized> SamplePlayback for &mut P {
    fn start(&mut self, channel: usize, sample: usize, looping: bool) {
        (**self).start(channel, sample, looping);
    }

    fn stop(&mut self, channel: usize) {
        (**self).stop(channel);
    }

    fn is_playing(&self, channel: usize) -> bool {
        (**self).is_playing(channel)
    }

    fn set_volume(&mut self, channel: usize, volume: f32) {
        (**self).set_volume(channel, volume);
    }
}

impl<P: SamplePlayback + ?Sized> SamplePlayback for Box<P> {
    fn start(&mut self, channel: usize, sample: usize, looping: bool) {
        (**self).start(channel, sample, looping);
    }

    fn stop(&mut self, channel: usize) {
        (**self).stop(channel);
    }

    fn is_playing(&self, channel: usize) -> bool {
        (**self).is_playing(channel)
    }

    fn set_volume(&mut self, channel: usize, volume: f32) {
        (**self).set_volume(channel, volume);
    }
}
