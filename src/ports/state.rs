//! Latched port values
//!
//! The dispatcher needs the previous byte of every port to find which bits
//! changed on a write, so the latches are kept here.

use super::Port;

/// Last byte written to each of the three output ports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortState {
    values: [u8; 3],
}

impl PortState {
    /// Create a port state with every port at 0x00
    pub fn new() -> Self {
        Self::with_initial(0x00)
    }

    /// Create a port state with every port at `initial`
    pub fn with_initial(initial: u8) -> Self {
        PortState {
            values: [initial; 3],
        }
    }

    /// Read the last value written to a port
    pub fn read(&self, port: Port) -> u8 {
        self.values[port.index()]
    }

    /// Store a new value and return the one it replaces
    pub fn write(&mut self, port: Port, value: u8) -> u8 {
        std::mem::replace(&mut self.values[port.index()], value)
    }

    /// Set every port back to `value`
    pub fn fill(&mut self, value: u8) {
        self.values = [value; 3];
    }

    /// All port values in A, B, C order
    pub fn as_array(&self) -> [u8; 3] {
        self.values
    }
}

impl Default for PortState {
    fn default() -> Self {
        Self::new()
    }
}
