//! Discrete Sample Sound Emulation for 8255-Driven Arcade Boards
//!
//! Some arcade sound boards have no sound CPU at all: the main CPU writes bytes
//! to the three output ports of an 8255 PPI, and every output pin fires a fixed
//! discrete sound circuit. The pins are active-low, so a sound starts when its
//! bit falls to 0 and (for continuous sounds) stops when the bit rises to 1.
//!
//! This crate turns those port writes into sample playback actions. Each
//! hardware variant is described by a declarative [`TriggerTable`], and one
//! [`EdgeDispatcher`] diffs every new byte against the previous one and drives
//! a [`SamplePlayback`] engine supplied by the host.
//!
//! # Supported boards
//! - `zaxxon`: ship-combat board with per-channel volume and looping effects
//! - `congo`: percussion board with drum loops and a guarded one-shot
//!
//! # Crate feature flags
//! - `cli` (default): `ppi-sound` command-line host (enables `clap`, `anyhow`
//!   and `tracing-subscriber`)
//!
//! # Quick start
//! ```
//! use ppi_sound::variants::zaxxon;
//! use ppi_sound::{EdgeDispatcher, PlaybackEvent, PlaybackLog, Variant};
//!
//! let table = Variant::Zaxxon.table().unwrap();
//! let mut sound = EdgeDispatcher::new(table, PlaybackLog::new(zaxxon::CHANNELS));
//!
//! sound.on_port_a(0xFF); // all effects released
//! sound.playback_mut().clear();
//! sound.on_port_a(0x7F); // bit 7 falls: battleship
//!
//! assert!(sound.playback().events().contains(&PlaybackEvent::Start {
//!     channel: zaxxon::BATTLESHIP,
//!     sample: zaxxon::BATTLESHIP,
//!     looping: true,
//! }));
//! ```

#![warn(missing_docs)]

pub mod config; // JSON configuration and custom tables
pub mod dispatch; // Edge detection and action dispatch
pub mod playback; // Sample playback collaborator interface
pub mod ports; // 8255 output ports and latched state
pub mod rules; // Trigger/volume rules and tables
pub mod variants; // Built-in board tables

/// Error types for table construction and configuration
///
/// Every variant is raised while building a table or loading a configuration.
/// Port dispatch itself cannot fail.
#[derive(thiserror::Error, Debug)]
pub enum SoundError {
    /// Raw port index outside the three 8255 output ports
    #[error("Unknown port index {0} (expected 0-2)")]
    UnknownPort(u8),

    /// Rule selects no bits of its port
    #[error("Rule on {port} has an empty bit mask")]
    EmptyMask {
        /// Port the rule reads
        port: Port,
    },

    /// Trigger rule selects more than one bit
    #[error("Trigger rule on {port} must select a single bit, got mask 0x{mask:02X}")]
    MultiBitTrigger {
        /// Port the rule reads
        port: Port,
        /// Offending mask
        mask: u8,
    },

    /// Rule addresses a channel the table does not have
    #[error("Channel {channel} out of range (table has {channels} channels)")]
    ChannelOutOfRange {
        /// Requested channel
        channel: usize,
        /// Number of channels in the table
        channels: usize,
    },

    /// Rule plays a sample the table does not have
    #[error("Sample {sample} out of range (table has {samples} samples)")]
    SampleOutOfRange {
        /// Requested sample
        sample: usize,
        /// Number of samples in the table
        samples: usize,
    },

    /// Two trigger rules react to the same transition of the same bit
    #[error("Conflicting trigger rules on {port} mask 0x{mask:02X}")]
    ConflictingTriggers {
        /// Port of both rules
        port: Port,
        /// Shared bit mask
        mask: u8,
    },

    /// Volume rule produces gains outside [0.0, 1.0]
    #[error("Volume rule on {port} mask 0x{mask:02X} spans {min}..={max}, outside 0.0..=1.0")]
    VolumeOutOfRange {
        /// Port the rule reads
        port: Port,
        /// Bit field mask
        mask: u8,
        /// Lowest volume the rule can produce
        min: f32,
        /// Highest volume the rule can produce
        max: f32,
    },

    /// Unparseable textual port write
    #[error("Invalid port write: {0}")]
    InvalidWrite(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error while reading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for table and configuration operations
pub type Result<T> = std::result::Result<T, SoundError>;

// Public API exports
pub use config::{SoundConfig, TableDefinition};
pub use dispatch::EdgeDispatcher;
pub use playback::{PlaybackEvent, PlaybackLog, SamplePlayback, SharedPlayback};
pub use ports::{Port, PortState, PortWrite, PpiRegister};
pub use rules::{Action, Edge, Guard, TriggerRule, TriggerTable, TriggerTableBuilder, VolumeRule};
pub use variants::Variant;
