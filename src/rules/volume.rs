//! Level-sensitive volume rules
//!
//! Unlike trigger rules, a volume rule is re-evaluated on every write to its
//! port, whether or not its bits changed.

use serde::{Deserialize, Serialize};

use crate::ports::Port;

/// Maps a bit field of a port to a channel gain
///
/// `volume = base + step * (value & mask)`. The masked bits are used in
/// place, so a field above bit 0 scales by its bit weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRule {
    /// Port the rule reads
    pub port: Port,
    /// Bits forming the volume field
    pub mask: u8,
    /// Channels whose gain follows the field
    pub channels: Vec<usize>,
    /// Gain for a field value of zero
    pub base: f32,
    /// Gain added per field step
    pub step: f32,
}

impl VolumeRule {
    /// Create a volume rule
    pub fn new(port: Port, mask: u8, channels: &[usize], base: f32, step: f32) -> Self {
        VolumeRule {
            port,
            mask,
            channels: channels.to_vec(),
            base,
            step,
        }
    }

    /// Masked bits of `value`
    pub fn masked(&self, value: u8) -> u8 {
        value & self.mask
    }

    /// Gain for a port byte
    pub fn volume_for(&self, value: u8) -> f32 {
        self.base + self.step * f32::from(self.masked(value))
    }

    /// Lowest and highest gain the rule can produce
    pub fn range(&self) -> (f32, f32) {
        let low = self.volume_for(0x00);
        let high = self.volume_for(self.mask);
        (low.min(high), low.max(high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_masked_value_keeps_bit_weight() {
        let rule = VolumeRule::new(Port::A, 0x0C, &[0], 0.0, 0.05);
        assert_eq!(rule.masked(0b1111_0111), 0x04);
        assert_relative_eq!(rule.volume_for(0x04), 0.2_f32, epsilon = 1e-6);
        assert_relative_eq!(rule.volume_for(0x0C), 0.6_f32, epsilon = 1e-6);
        assert_relative_eq!(rule.volume_for(0xF3), 0.0_f32);
    }

    #[test]
    fn test_range() {
        let rule = VolumeRule::new(Port::A, 0x03, &[10, 11], 0.5, 0.157);
        let (low, high) = rule.range();
        assert_relative_eq!(low, 0.5_f32);
        assert_relative_eq!(high, 0.971_f32, epsilon = 1e-6);

        let high_field = VolumeRule::new(Port::A, 0x0C, &[0], 0.0, 0.05);
        let (_, high) = high_field.range();
        assert_relative_eq!(high, 0.6_f32, epsilon = 1e-6);

        let falling = VolumeRule::new(Port::B, 0x01, &[0], 1.0, -0.5);
        assert_eq!(falling.range(), (0.5, 1.0));
    }
}
