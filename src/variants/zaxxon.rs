//! Zaxxon (ship-combat board)
//!
//! All sounds are discrete circuits triggered by the 8255 outputs, replaced
//! here by samples. Port A carries the continuous ship and weapon sounds plus
//! a 2-bit volume field, Port B the explosions and cannon, Port C the shot and
//! alarms.
//!
//! ```text
//! Port A (FF3C)          Port B (FF3D)       Port C (FF3E)
//!  bit7 Battleship        bit7 Cannon         bit7 Mute
//!  bit6 Laser             bit6 N/C            bit6-4 N/C
//!  bit5 Base Missile      bit5 M-Exp          bit3 Alarm 3
//!  bit4 Homing Missile    bit4 S-Exp          bit2 Alarm 2
//!  bit3 Player Ship D     bit3-0 N/C          bit1 N/C
//!  bit2 Player Ship C                         bit0 Shot
//!  bit1-0 Player Ship A/B (volume)
//! ```

use crate::ports::Port;
use crate::rules::{TriggerTable, VolumeRule};
use crate::Result;

/// Number of playback channels
pub const CHANNELS: usize = 12;

/// Homing missile (looping)
pub const HOMING_MISSILE: usize = 0;
/// Base missile (one-shot)
pub const BASE_MISSILE: usize = 1;
/// Laser force field (looping)
pub const LASER: usize = 2;
/// End-of-level battleship (looping)
pub const BATTLESHIP: usize = 3;
/// Enemy explosion
pub const S_EXP: usize = 4;
/// Ship explosion (guarded)
pub const M_EXP: usize = 5;
/// Ship cannon fire
pub const CANNON: usize = 6;
/// Enemy shot
pub const SHOT: usize = 7;
/// Target lock alarm
pub const ALARM_2: usize = 8;
/// Low fuel alarm (guarded)
pub const ALARM_3: usize = 9;
/// Player ship C: background noise loop
pub const PLAYER_SHIP_C: usize = 10;
/// Player ship D: asteroid noise loop
pub const PLAYER_SHIP_D: usize = 11;

/// Sample assets in playback index order; channel N plays sample N
pub const SAMPLE_NAMES: [&str; CHANNELS] = [
    "03.wav", // homing missile
    "02.wav", // base missile
    "01.wav", // laser
    "00.wav", // battleship
    "11.wav", // S-exp
    "10.wav", // M-exp
    "08.wav", // cannon
    "23.wav", // shot
    "21.wav", // alarm 2
    "20.wav", // alarm 3
    "05.wav", // initial background noise
    "04.wav", // looped asteroid noise
];

/// Port A bits 0-1: player ship A/B volume field
pub const SHIP_VOLUME_MASK: u8 = 0x03;
/// Gain at volume field 0
pub const SHIP_VOLUME_BASE: f32 = 0.5;
/// Gain per volume field step
pub const SHIP_VOLUME_STEP: f32 = 0.157;

/// Port C bit 7: documented mute line, not wired to any sound
pub const MUTE_MASK: u8 = 0x80;

/// Build the Zaxxon trigger table
pub fn table() -> Result<TriggerTable> {
    TriggerTable::builder("zaxxon", CHANNELS)
        .samples(SAMPLE_NAMES)
        // Port A
        .volume(VolumeRule::new(
            Port::A,
            SHIP_VOLUME_MASK,
            &[PLAYER_SHIP_C, PLAYER_SHIP_D],
            SHIP_VOLUME_BASE,
            SHIP_VOLUME_STEP,
        ))
        .toggle(Port::A, 0x04, PLAYER_SHIP_C, PLAYER_SHIP_C)
        .toggle(Port::A, 0x08, PLAYER_SHIP_D, PLAYER_SHIP_D)
        .toggle(Port::A, 0x10, HOMING_MISSILE, HOMING_MISSILE)
        .one_shot(Port::A, 0x20, BASE_MISSILE, BASE_MISSILE)
        .toggle(Port::A, 0x40, LASER, LASER)
        .toggle(Port::A, 0x80, BATTLESHIP, BATTLESHIP)
        // Port B
        .one_shot(Port::B, 0x10, S_EXP, S_EXP)
        .guarded_one_shot(Port::B, 0x20, M_EXP, M_EXP)
        .one_shot(Port::B, 0x80, CANNON, CANNON)
        // Port C
        .one_shot(Port::C, 0x01, SHOT, SHOT)
        .one_shot(Port::C, 0x04, ALARM_2, ALARM_2)
        .guarded_one_shot(Port::C, 0x08, ALARM_3, ALARM_3)
        .build()
}
