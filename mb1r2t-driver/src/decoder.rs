use std::collections::VecDeque;

use log::{debug, warn};

use crate::constants::{
    BUFFER_HIGH_WATER, BUFFER_KEEP_TAIL, MAX_MEASUREMENTS_PER_PACKET, MEASUREMENT_STRIDE,
    PACKET_HEADER_SIZE, PACKET_SYNC_BYTE_0, PACKET_SYNC_BYTE_1, RESYNC_WINDOW,
};
use crate::frame::Frame;
use mb1r2t_data::Measurement;

/// Incremental decoder for the MB-1R2T measurement byte stream.
///
/// The sensor streams packets continuously with no request/response
/// phase, so the decoder must tolerate starting mid-packet and losing
/// alignment at any point. Bytes are appended with [`feed`] in whatever
/// chunk sizes the transport delivers them; complete frames are pulled
/// out with [`drain`] or [`next_frame`]. Malformed input is never an
/// error: the decoder rescans for the next sync byte pair and carries on.
///
/// [`feed`]: StreamDecoder::feed
/// [`drain`]: StreamDecoder::drain
/// [`next_frame`]: StreamDecoder::next_frame
pub struct StreamDecoder {
    buffer: VecDeque<u8>,
    frames_decoded: u64,
}

impl StreamDecoder {
    pub fn new() -> StreamDecoder {
        StreamDecoder {
            buffer: VecDeque::new(),
            frames_decoded: 0,
        }
    }

    /// Appends freshly arrived bytes. No parsing happens here, but the
    /// buffer bound is enforced so that sustained desynchronization can
    /// never grow the buffer without limit.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes.iter().copied());
        self.enforce_bound();
    }

    /// Lazily extracts measurements from the buffered bytes. The
    /// iterator ends when no complete frame remains; decoding resumes on
    /// the next `feed`.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain {
            decoder: self,
            pending: Vec::new().into_iter(),
        }
    }

    /// Extracts the next complete frame from the front of the buffer,
    /// discarding any noise before it. Returns `None` once only a
    /// partial frame (or nothing) remains.
    pub fn next_frame(&mut self) -> Option<Frame> {
        while self.buffer.len() >= PACKET_HEADER_SIZE {
            let start = match self.buffer.iter().position(|&b| b == PACKET_SYNC_BYTE_0) {
                Some(i) => i,
                None => {
                    // Nothing recoverable in the whole buffer.
                    self.buffer.clear();
                    return None;
                }
            };
            if start > 0 {
                self.buffer.drain(..start);
                continue;
            }
            if self.buffer[1] != PACKET_SYNC_BYTE_1 {
                self.buffer.drain(..1);
                continue;
            }
            let count = self.buffer[3] as usize;
            if count == 0 || count > MAX_MEASUREMENTS_PER_PACKET {
                // A sync byte pair occurring inside measurement payload.
                // Skip past it and rescan.
                debug!("false sync match, count = {count}");
                self.buffer.drain(..2);
                continue;
            }
            let packet_len = PACKET_HEADER_SIZE + count * MEASUREMENT_STRIDE;
            if self.buffer.len() < packet_len {
                // Partial frame, wait for more data.
                return None;
            }
            let packet: Vec<u8> = self.buffer.drain(..packet_len).collect();
            self.frames_decoded += 1;
            return Some(Frame::decode(&packet));
        }
        None
    }

    /// Number of complete frames extracted since construction.
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    /// Number of bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn enforce_bound(&mut self) {
        if self.buffer.len() <= BUFFER_HIGH_WATER {
            return;
        }
        let from = self.buffer.len() - RESYNC_WINDOW;
        match self.find_sync(from) {
            Some(index) => {
                warn!("buffer over high-water mark, resyncing to offset {index}");
                self.buffer.drain(..index);
            }
            None => {
                warn!(
                    "buffer over high-water mark with no sync in trailing window, \
                     keeping last {BUFFER_KEEP_TAIL} bytes"
                );
                let excess = self.buffer.len() - BUFFER_KEEP_TAIL;
                self.buffer.drain(..excess);
            }
        }
    }

    fn find_sync(&self, from: usize) -> Option<usize> {
        if self.buffer.len() < 2 {
            return None;
        }
        (from..self.buffer.len() - 1).find(|&i| {
            self.buffer[i] == PACKET_SYNC_BYTE_0 && self.buffer[i + 1] == PACKET_SYNC_BYTE_1
        })
    }
}

impl Default for StreamDecoder {
    fn default() -> Self {
        StreamDecoder::new()
    }
}

/// Iterator returned by [`StreamDecoder::drain`]. Yields the
/// measurements of each complete buffered frame, in wire order.
pub struct Drain<'a> {
    decoder: &'a mut StreamDecoder,
    pending: std::vec::IntoIter<Measurement>,
}

impl Iterator for Drain<'_> {
    type Item = Measurement;

    fn next(&mut self) -> Option<Measurement> {
        loop {
            if let Some(measurement) = self.pending.next() {
                return Some(measurement);
            }
            let frame = self.decoder.next_frame()?;
            self.pending = frame.measurements().collect::<Vec<_>>().into_iter();
        }
    }
}
