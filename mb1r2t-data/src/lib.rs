pub mod measurement;
pub mod scan;

pub use measurement::Measurement;
pub use scan::{slot_angle_degrees, slot_index, ScanPoint, SCAN_SLOTS};
