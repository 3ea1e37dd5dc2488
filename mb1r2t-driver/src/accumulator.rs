use crate::constants::{
    INVALID_DISTANCE_MM, MIN_QUALITY, MIN_VALID_DISTANCE_MM, POINT_FADE_ROTATIONS,
    ROTATION_WRAP_HIGH_DEGREES, ROTATION_WRAP_LOW_DEGREES,
};
use mb1r2t_data::{slot_index, Measurement, ScanPoint, SCAN_SLOTS};

/// Accumulates measurements into a 720-slot, 0.5 degree resolution view
/// of the surroundings.
///
/// Slots age in whole rotations rather than wall-clock time: when the
/// sweep wraps from near 360 back to near 0 degrees, every occupied slot
/// grows one rotation older and slots past the fade threshold are
/// evicted. A fresh reading always overwrites its slot, whatever was
/// there before. The aging pass runs on any detected wrap, including one
/// triggered by a noisy out-of-order angle; no check is made that a full
/// sweep actually happened.
pub struct ScanAccumulator {
    slots: [Option<ScanPoint>; SCAN_SLOTS],
    last_angle_degrees: f64,
    rotations: u64,
    min_quality: u8,
    min_distance_mm: u16,
    invalid_distance_mm: u16,
    fade_rotations: u32,
}

impl ScanAccumulator {
    /// Accumulator with the MB-1R2T reference thresholds: quality >= 10,
    /// distance strictly between 50 and 16000 mm, fade after 3 rotations.
    pub fn new() -> ScanAccumulator {
        ScanAccumulator::with_thresholds(
            MIN_QUALITY,
            MIN_VALID_DISTANCE_MM,
            INVALID_DISTANCE_MM,
            POINT_FADE_ROTATIONS,
        )
    }

    pub fn with_thresholds(
        min_quality: u8,
        min_distance_mm: u16,
        invalid_distance_mm: u16,
        fade_rotations: u32,
    ) -> ScanAccumulator {
        ScanAccumulator {
            slots: [None; SCAN_SLOTS],
            last_angle_degrees: 0.,
            rotations: 0,
            min_quality,
            min_distance_mm,
            invalid_distance_mm,
            fade_rotations,
        }
    }

    /// Places one measurement into its slot. Returns whether the
    /// measurement passed the quality and distance thresholds; rejected
    /// measurements leave the accumulator untouched.
    pub fn ingest(&mut self, measurement: Measurement) -> bool {
        if !self.accepts(&measurement) {
            return false;
        }
        if measurement.angle_degrees < ROTATION_WRAP_LOW_DEGREES
            && self.last_angle_degrees > ROTATION_WRAP_HIGH_DEGREES
        {
            self.age_slots();
            self.rotations += 1;
        }
        self.last_angle_degrees = measurement.angle_degrees;
        self.slots[slot_index(measurement.angle_degrees)] = Some(ScanPoint {
            distance_mm: measurement.distance_mm,
            quality: measurement.quality,
            age: 0,
        });
        true
    }

    /// Read-only view of the slot array. The next `ingest` may overwrite
    /// slots in place, so callers must not hold the view across ticks.
    pub fn snapshot(&self) -> &[Option<ScanPoint>; SCAN_SLOTS] {
        &self.slots
    }

    /// Number of currently occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of rotation boundaries detected since construction or the
    /// last `reset`.
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    /// Clears all slots and the rotation state.
    pub fn reset(&mut self) {
        self.slots = [None; SCAN_SLOTS];
        self.last_angle_degrees = 0.;
        self.rotations = 0;
    }

    fn accepts(&self, measurement: &Measurement) -> bool {
        measurement.quality >= self.min_quality
            && measurement.distance_mm > self.min_distance_mm
            && measurement.distance_mm < self.invalid_distance_mm
    }

    fn age_slots(&mut self) {
        for slot in self.slots.iter_mut() {
            if let Some(point) = slot {
                if point.age > self.fade_rotations {
                    *slot = None;
                } else {
                    point.age += 1;
                }
            }
        }
    }
}

impl Default for ScanAccumulator {
    fn default() -> Self {
        ScanAccumulator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(angle_degrees: f64) -> Measurement {
        Measurement {
            angle_degrees,
            distance_mm: 1000,
            quality: 100,
        }
    }

    #[test]
    fn test_ingest_places_measurement_in_slot() {
        let mut accumulator = ScanAccumulator::new();
        assert!(accumulator.ingest(measurement(100.)));
        assert_eq!(
            accumulator.snapshot()[200],
            Some(ScanPoint {
                distance_mm: 1000,
                quality: 100,
                age: 0,
            })
        );
        assert_eq!(accumulator.occupied(), 1);
    }

    #[test]
    fn test_rejects_low_quality() {
        let mut accumulator = ScanAccumulator::new();
        let mut low = measurement(100.);
        low.quality = 9;
        assert!(!accumulator.ingest(low));
        let mut ok = measurement(100.);
        ok.quality = 10;
        assert!(accumulator.ingest(ok));
    }

    #[test]
    fn test_rejects_out_of_range_distance() {
        let mut accumulator = ScanAccumulator::new();
        for distance in [0, 50, 16_000, u16::MAX] {
            let mut bad = measurement(100.);
            bad.distance_mm = distance;
            assert!(!accumulator.ingest(bad), "distance {distance} accepted");
        }
        for distance in [51, 15_999] {
            let mut ok = measurement(100.);
            ok.distance_mm = distance;
            assert!(accumulator.ingest(ok), "distance {distance} rejected");
        }
    }

    #[test]
    fn test_rejected_measurement_does_not_move_rotation_state() {
        let mut accumulator = ScanAccumulator::new();
        assert!(accumulator.ingest(measurement(350.)));
        let mut bad = measurement(10.);
        bad.quality = 0;
        assert!(!accumulator.ingest(bad));
        assert_eq!(accumulator.rotations(), 0);
        // The wrap edge is still armed for the next accepted reading.
        assert!(accumulator.ingest(measurement(10.)));
        assert_eq!(accumulator.rotations(), 1);
    }

    #[test]
    fn test_no_aging_within_a_rotation() {
        let mut accumulator = ScanAccumulator::new();
        accumulator.ingest(measurement(100.));
        for angle in [110., 120., 200., 300., 330.] {
            accumulator.ingest(measurement(angle));
        }
        for slot in accumulator.snapshot().iter().flatten() {
            assert_eq!(slot.age, 0);
        }
        assert_eq!(accumulator.rotations(), 0);
    }

    #[test]
    fn test_revisited_slot_is_overwritten() {
        let mut accumulator = ScanAccumulator::new();
        accumulator.ingest(measurement(100.));
        let mut second = measurement(100.);
        second.distance_mm = 2000;
        second.quality = 50;
        accumulator.ingest(second);
        assert_eq!(
            accumulator.snapshot()[200],
            Some(ScanPoint {
                distance_mm: 2000,
                quality: 50,
                age: 0,
            })
        );
        assert_eq!(accumulator.occupied(), 1);
    }

    #[test]
    fn test_rotation_boundary_ages_occupied_slots() {
        let mut accumulator = ScanAccumulator::new();
        accumulator.ingest(measurement(100.));
        accumulator.ingest(measurement(350.));
        accumulator.ingest(measurement(10.));
        assert_eq!(accumulator.rotations(), 1);
        assert_eq!(accumulator.snapshot()[200].unwrap().age, 1);
        assert_eq!(accumulator.snapshot()[700].unwrap().age, 1);
        // The reading that crossed the boundary lands fresh.
        assert_eq!(accumulator.snapshot()[20].unwrap().age, 0);
    }

    #[test]
    fn test_stale_slot_fades_out() {
        let mut accumulator = ScanAccumulator::new();
        accumulator.ingest(measurement(100.));
        for rotation in 1..=4u32 {
            accumulator.ingest(measurement(350.));
            accumulator.ingest(measurement(10.));
            assert_eq!(accumulator.snapshot()[200].unwrap().age, rotation);
        }
        // Fifth boundary: age 4 exceeds the fade threshold of 3.
        accumulator.ingest(measurement(350.));
        accumulator.ingest(measurement(10.));
        assert_eq!(accumulator.snapshot()[200], None);
        // Slots refreshed every rotation are still there.
        assert!(accumulator.snapshot()[700].is_some());
        assert_eq!(accumulator.rotations(), 5);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut accumulator = ScanAccumulator::new();
        accumulator.ingest(measurement(350.));
        accumulator.ingest(measurement(10.));
        accumulator.reset();
        assert_eq!(accumulator.occupied(), 0);
        assert_eq!(accumulator.rotations(), 0);
        // After a reset the first low-angle reading is not a wrap.
        accumulator.ingest(measurement(10.));
        assert_eq!(accumulator.rotations(), 0);
    }

    #[test]
    fn test_custom_fade_threshold() {
        let mut accumulator = ScanAccumulator::with_thresholds(10, 50, 16_000, 0);
        accumulator.ingest(measurement(100.));
        accumulator.ingest(measurement(350.));
        accumulator.ingest(measurement(10.));
        assert_eq!(accumulator.snapshot()[200].unwrap().age, 1);
        accumulator.ingest(measurement(350.));
        accumulator.ingest(measurement(10.));
        assert_eq!(accumulator.snapshot()[200], None);
    }
}
