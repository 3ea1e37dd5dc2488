#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One distance reading expanded from a measurement packet.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Direction of the reading in degrees, in `[0, 360)`.
    pub angle_degrees: f64,
    /// Distance to an object (in mm).
    pub distance_mm: u16,
    /// Return strength of the laser pulse.
    pub quality: u8,
}
