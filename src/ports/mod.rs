//! 8255 Output Port Definitions
//!
//! The sound boards wire the three 8-bit outputs of an 8255 PPI (ports A, B
//! and C) straight to the discrete sound circuits. The fourth register of the
//! chip is the control byte, which the boards only use to select mode 0.
//!
//! Ship-combat board address map (main CPU): FF3C = Port A, FF3D = Port B,
//! FF3E = Port C, FF3F = control (written 0x80 for mode 0).

pub mod state;

pub use state::PortState;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SoundError;

/// 8255 output port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    /// Port A - offset 0
    A = 0,
    /// Port B - offset 1
    B = 1,
    /// Port C - offset 2
    C = 2,
}

impl Port {
    /// All output ports in offset order
    pub const ALL: [Port; 3] = [Port::A, Port::B, Port::C];

    /// Convert a raw port index (0-2) to a Port
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Port::A),
            1 => Some(Port::B),
            2 => Some(Port::C),
            _ => None,
        }
    }

    /// Index of the port into per-port storage
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-letter port name
    pub fn letter(self) -> char {
        match self {
            Port::A => 'A',
            Port::B => 'B',
            Port::C => 'C',
        }
    }
}

impl TryFrom<u8> for Port {
    type Error = SoundError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Port::from_index(index).ok_or(SoundError::UnknownPort(index))
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Port {}", self.letter())
    }
}

/// One of the four registers the 8255 decodes from the low address bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpiRegister {
    /// Output port latch
    Port(Port),
    /// Control byte (mode select / bit set-reset)
    Control,
}

impl PpiRegister {
    /// Decode a register from a host address offset
    ///
    /// Only the low two bits are decoded, so any mirror of the 4-byte
    /// window maps onto the same register.
    pub fn from_offset(offset: u8) -> Self {
        match offset & 0x03 {
            0 => PpiRegister::Port(Port::A),
            1 => PpiRegister::Port(Port::B),
            2 => PpiRegister::Port(Port::C),
            _ => PpiRegister::Control,
        }
    }
}

/// Parse a hex byte with an optional `0x` prefix, e.g. `7F` or `0xff`
pub fn parse_hex_byte(s: &str) -> Option<u8> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u8::from_str_radix(digits, 16).ok()
}

/// A single textual port write such as `A=7F` or `c=0x08`
///
/// Used by hosts that replay scripted write sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortWrite {
    /// Target port
    pub port: Port,
    /// Byte written
    pub value: u8,
}

impl FromStr for PortWrite {
    type Err = SoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SoundError::InvalidWrite(s.to_string());

        let (port, value) = s.trim().split_once('=').ok_or_else(invalid)?;
        let port = match port.trim().to_ascii_uppercase().as_str() {
            "A" => Port::A,
            "B" => Port::B,
            "C" => Port::C,
            _ => return Err(invalid()),
        };

        let value = parse_hex_byte(value).ok_or_else(invalid)?;

        Ok(PortWrite { port, value })
    }
}

impl fmt::Display for PortWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:02X}", self.port.letter(), self.value)
    }
}
