//! Congo Bongo (percussion board)
//!
//! Same 8255 sound interface as Zaxxon with a much smaller sound set: the
//! gorilla roar on Port B and four drums on Port C. Port A is not used.
//!
//! ```text
//! Port B             Port C
//!  bit7 Mute          bit3 Rim
//!  bit1 Gorilla       bit2 High conga
//!                     bit1 Low conga
//!                     bit0 Bass drum
//! ```

use crate::ports::Port;
use crate::rules::TriggerTable;
use crate::Result;

/// Number of playback channels
pub const CHANNELS: usize = 5;

/// Gorilla roar (guarded one-shot)
pub const GORILLA: usize = 0;
/// Bass drum
pub const BASS_DRUM: usize = 1;
/// Low conga
pub const LOW_CONGA: usize = 2;
/// High conga
pub const HIGH_CONGA: usize = 3;
/// Rim shot
pub const RIM: usize = 4;

/// Sample assets in playback index order; channel N plays sample N
pub const SAMPLE_NAMES: [&str; CHANNELS] = [
    "gorilla.wav",
    "bass.wav",
    "congal.wav",
    "congah.wav",
    "rim.wav",
];

/// Port B bit 7: documented mute flag, not wired to any sound
pub const MUTE_MASK: u8 = 0x80;

/// Build the Congo Bongo trigger table
pub fn table() -> Result<TriggerTable> {
    TriggerTable::builder("congo", CHANNELS)
        .samples(SAMPLE_NAMES)
        .guarded_one_shot(Port::B, 0x02, GORILLA, GORILLA)
        .toggle(Port::C, 0x01, BASS_DRUM, BASS_DRUM)
        .toggle(Port::C, 0x02, LOW_CONGA, LOW_CONGA)
        .toggle(Port::C, 0x04, HIGH_CONGA, HIGH_CONGA)
        .toggle(Port::C, 0x08, RIM, RIM)
        .build()
}
