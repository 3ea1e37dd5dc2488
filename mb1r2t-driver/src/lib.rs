use std::sync::mpsc;

pub mod accumulator;
mod constants;
pub mod decoder;
mod driver_threads;
mod error;
pub mod frame;
mod numeric;
mod serial;
pub mod stats;
mod time;

pub use crate::accumulator::ScanAccumulator;
pub use crate::decoder::{Drain, StreamDecoder};
pub use crate::driver_threads::{join, DriverThreads};
pub use crate::error::Mb1r2tError;
pub use crate::frame::Frame;
pub use crate::serial::{open_port, poll_available};
pub use crate::stats::RateCounter;
pub use mb1r2t_data::{Measurement, ScanPoint, SCAN_SLOTS};

use crossbeam_channel::bounded;

/// Function to launch the MB-1R2T reader.
///
/// Opens the port, discards the sensor's backlog and spawns a thread
/// that ships raw byte chunks over the returned channel. Feed the
/// chunks into a [`StreamDecoder`]; the sensor needs no commands to
/// start streaming.
///
/// # Arguments
///
/// * `port_name` - Serial port name such as `/dev/ttyUSB0`.
pub fn run_driver(
    port_name: &str,
) -> Result<(DriverThreads, mpsc::Receiver<Vec<u8>>), Mb1r2tError> {
    let mut port = serial::open_port(port_name)?;

    if !cfg!(test) {
        // In testing, disable flushing so pre-written signals survive
        serial::flush(&mut port)?;
    }

    let (reader_terminator_tx, reader_terminator_rx) = bounded(10);
    let (raw_data_tx, raw_data_rx) = mpsc::sync_channel::<Vec<u8>>(200);

    let reader_thread = Some(std::thread::spawn(move || {
        driver_threads::read_device_signal(&mut port, raw_data_tx, reader_terminator_rx);
    }));

    let driver_threads = DriverThreads {
        reader_terminator_tx,
        reader_thread,
    };

    Ok((driver_threads, raw_data_rx))
}
