pub(crate) fn to_u16(lo: u8, hi: u8) -> u16 {
    (lo as u16) | ((hi as u16) << 8)
}

/// Angles arrive on the wire as degrees scaled by 100.
pub(crate) fn to_angle(lo: u8, hi: u8) -> f64 {
    (to_u16(lo, hi) as f64) / 100.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_u16() {
        assert_eq!(to_u16(0x34, 0x12), 0x1234);
        assert_eq!(to_u16(0xFF, 0x00), 255);
    }

    #[test]
    fn test_to_angle() {
        assert_eq!(to_angle(0xB8, 0x88), 350.);
        assert_eq!(to_angle(0x00, 0x00), 0.);
    }
}
