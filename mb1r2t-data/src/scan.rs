#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of angular slots in one revolution, at 0.5 degree resolution.
pub const SCAN_SLOTS: usize = 720;

/// One occupied slot of the accumulated scan.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanPoint {
    /// Distance to an object (in mm).
    pub distance_mm: u16,
    /// Return strength of the laser pulse.
    pub quality: u8,
    /// Full rotations elapsed since the slot was last refreshed.
    pub age: u32,
}

/// Maps an angle in degrees to its 0.5 degree wide slot.
pub fn slot_index(angle_degrees: f64) -> usize {
    ((angle_degrees * 2.) as usize) % SCAN_SLOTS
}

/// Angle of the lower edge of a slot, in degrees.
pub fn slot_angle_degrees(index: usize) -> f64 {
    (index as f64) / 2.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index() {
        assert_eq!(slot_index(0.), 0);
        assert_eq!(slot_index(0.49), 0);
        assert_eq!(slot_index(0.5), 1);
        assert_eq!(slot_index(100.), 200);
        assert_eq!(slot_index(359.9), 719);
    }

    #[test]
    fn test_slot_angle_degrees() {
        assert_eq!(slot_angle_degrees(0), 0.);
        assert_eq!(slot_angle_degrees(200), 100.);
        assert_eq!(slot_angle_degrees(719), 359.5);
    }
}
