//! Declarative Sound Rules
//!
//! The boards hardwire each output bit to one sound. These modules describe
//! that wiring as data:
//! - `trigger` - edge-sensitive per-bit rules (start, stop, guarded start)
//! - `volume` - level-sensitive bit-field to gain mappings
//! - `table` - validated rule set for one board

pub mod table;
pub mod trigger;
pub mod volume;

pub use table::{TriggerTable, TriggerTableBuilder};
pub use trigger::{Action, Edge, Guard, TriggerRule};
pub use volume::VolumeRule;
