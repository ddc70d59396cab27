//! Playback engine shared with an audio thread
//!
//! The dispatcher runs on the emulation thread while the engine it drives is
//! usually also read by the thread that renders audio. `SharedPlayback`
//! puts the engine behind a `parking_lot::Mutex` so both sides can hold it.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::SamplePlayback;

/// Cloneable handle to a mutex-protected playback engine
#[derive(Debug)]
pub struct SharedPlayback<P> {
    inner: Arc<Mutex<P>>,
}

impl<P> SharedPlayback<P> {
    /// Wrap an engine
    pub fn new(playback: P) -> Self {
        SharedPlayback {
            inner: Arc::new(Mutex::new(playback)),
        }
    }

    /// Lock the engine for direct access (e.g. from the audio thread)
    pub fn lock(&self) -> MutexGuard<'_, P> {
        self.inner.lock()
    }

    /// Get the shared engine
    pub fn get_inner(&self) -> Arc<Mutex<P>> {
        Arc::clone(&self.inner)
    }
}

impl<P> Clone for SharedPlayback<P> {
    fn clone(&self) -> Self {
        SharedPlayback {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: SamplePlayback> SamplePlayback for SharedPlayback<P> {
    fn start(&mut self, channel: usize, sample: usize, looping: bool) {
        self.inner.lock().start(channel, sample, looping);
    }

    fn stop(&mut self, channel: usize) {
        self.inner.lock().stop(channel);
    }

    fn is_playing(&self, channel: usize) -> bool {
        self.inner.lock().is_playing(channel)
    }

    fn set_volume(&mut self, channel: usize, volume: f32) {
        self.inner.lock().set_volume(channel, volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlaybackLog;

    #[test]
    fn test_clones_share_engine() {
        let mut emulation = SharedPlayback::new(PlaybackLog::new(4));
        let audio = emulation.clone();

        emulation.start(2, 2, true);
        assert!(audio.is_playing(2));
        assert_eq!(audio.lock().events().len(), 1);
    }

    #[test]
    fn test_audio_thread_sees_writes() {
        let mut emulation = SharedPlayback::new(PlaybackLog::new(4));
        let audio = emulation.get_inner();

        let handle = std::thread::spawn(move || {
            let mut log = audio.lock();
            log.start(0, 0, false);
        });
        handle.join().unwrap();

        assert!(emulation.is_playing(0));
        emulation.stop(0);
        assert!(!emulation.is_playing(0));
    }
}
