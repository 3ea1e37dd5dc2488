pub(crate) const PACKET_SYNC_BYTE_0: u8 = 0xAA;
pub(crate) const PACKET_SYNC_BYTE_1: u8 = 0x55;
pub(crate) const PACKET_HEADER_SIZE: usize = 10;
pub(crate) const MEASUREMENT_STRIDE: usize = 3;
// A count of zero or above this is a false header match, not a real packet.
pub(crate) const MAX_MEASUREMENTS_PER_PACKET: usize = 100;

pub(crate) const BUFFER_HIGH_WATER: usize = 30_000;
pub(crate) const RESYNC_WINDOW: usize = 10_000;
pub(crate) const BUFFER_KEEP_TAIL: usize = 5_000;

pub(crate) const MIN_QUALITY: u8 = 10;
pub(crate) const MIN_VALID_DISTANCE_MM: u16 = 50;
pub(crate) const INVALID_DISTANCE_MM: u16 = 16_000;
pub(crate) const POINT_FADE_ROTATIONS: u32 = 3;

// The sweep has wrapped when the angle jumps below this right after
// exceeding the high threshold.
pub(crate) const ROTATION_WRAP_LOW_DEGREES: f64 = 30.;
pub(crate) const ROTATION_WRAP_HIGH_DEGREES: f64 = 330.;

pub(crate) const BAUD_RATE: u32 = 153_600;
pub(crate) const MAX_READ_CHUNK: usize = 8192;
