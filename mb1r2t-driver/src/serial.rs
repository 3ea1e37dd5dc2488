use crate::constants::{BAUD_RATE, MAX_READ_CHUNK};
use crate::error::Mb1r2tError;
use serialport::SerialPort;
use std::io::Read;

/// Opens the sensor's serial port. The MB-1R2T streams measurement
/// packets unconditionally once powered; there is no command phase.
pub fn open_port(port_name: &str) -> Result<Box<dyn SerialPort>, Mb1r2tError> {
    let port = serialport::new(port_name, BAUD_RATE)
        .timeout(std::time::Duration::from_millis(10))
        .open()?;
    Ok(port)
}

pub(crate) fn get_n_read(port: &mut Box<dyn SerialPort>) -> Result<usize, Mb1r2tError> {
    let n_u32: u32 = port.bytes_to_read()?;
    Ok(n_u32.try_into().unwrap_or(0))
}

/// Reads whatever is currently waiting on the port, up to one chunk.
/// Returns an empty buffer when nothing has arrived; never blocks past
/// the port timeout.
pub fn poll_available(port: &mut Box<dyn SerialPort>) -> Result<Vec<u8>, Mb1r2tError> {
    let n_read = get_n_read(port)?.min(MAX_READ_CHUNK);
    if n_read == 0 {
        return Ok(Vec::new());
    }
    let mut chunk: Vec<u8> = vec![0; n_read];
    let n = port.read(chunk.as_mut_slice())?;
    chunk.truncate(n);
    Ok(chunk)
}

/// Discards whatever the sensor streamed before we started listening.
pub(crate) fn flush(port: &mut Box<dyn SerialPort>) -> Result<(), Mb1r2tError> {
    let n_read: usize = get_n_read(port).unwrap_or(0);
    if n_read == 0 {
        return Ok(());
    }
    let mut discard: Vec<u8> = vec![0; n_read];
    port.read(discard.as_mut_slice())?;
    Ok(())
}
