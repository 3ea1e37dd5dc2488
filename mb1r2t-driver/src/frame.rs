use crate::constants::{MEASUREMENT_STRIDE, PACKET_HEADER_SIZE};
use crate::numeric::{to_angle, to_u16};
use mb1r2t_data::Measurement;

/// One decoded measurement packet.
///
/// A frame is ephemeral: it is extracted from the byte stream, expanded
/// into [`Measurement`]s and discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Sensor/type byte, passed through as-is.
    pub sensor_type: u8,
    /// Angle of the first reading, in degrees.
    pub start_angle_degrees: f64,
    /// Angle of the last reading, in degrees. Shifted up by 360 when the
    /// sweep crosses the 0 degree boundary, so it is always
    /// `>= start_angle_degrees`.
    pub end_angle_degrees: f64,
    /// `(quality, distance_mm)` pairs in wire order.
    pub readings: Vec<(u8, u16)>,
}

impl Frame {
    /// Decodes one complete packet. `packet` must hold exactly
    /// `10 + 3 * count` bytes starting at the sync bytes.
    pub(crate) fn decode(packet: &[u8]) -> Frame {
        let count = packet[3] as usize;
        let start_angle = to_angle(packet[4], packet[5]);
        let mut end_angle = to_angle(packet[6], packet[7]);
        if end_angle < start_angle {
            end_angle += 360.;
        }
        let readings = (0..count)
            .map(|i| {
                let offset = PACKET_HEADER_SIZE + i * MEASUREMENT_STRIDE;
                (
                    packet[offset],
                    to_u16(packet[offset + 1], packet[offset + 2]),
                )
            })
            .collect();
        Frame {
            sensor_type: packet[2],
            start_angle_degrees: start_angle,
            end_angle_degrees: end_angle,
            readings,
        }
    }

    fn angle_step(&self) -> f64 {
        if self.readings.len() > 1 {
            (self.end_angle_degrees - self.start_angle_degrees)
                / ((self.readings.len() - 1) as f64)
        } else {
            0.
        }
    }

    /// Expands the frame into per-reading measurements, spreading the
    /// angles evenly between the start and end angle.
    pub fn measurements(&self) -> impl Iterator<Item = Measurement> + '_ {
        let step = self.angle_step();
        self.readings
            .iter()
            .enumerate()
            .map(move |(i, &(quality, distance_mm))| Measurement {
                angle_degrees: (self.start_angle_degrees + (i as f64) * step) % 360.,
                distance_mm,
                quality,
            })
    }
}
