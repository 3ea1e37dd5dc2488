use crate::serial::poll_available;
use crate::time::sleep_ms;
use crossbeam_channel::{Receiver, Sender};
use log::error;
use serialport::SerialPort;
use std::sync::mpsc;
use std::thread::JoinHandle;

/// Handle on the background reader thread.
pub struct DriverThreads {
    pub(crate) reader_terminator_tx: Sender<bool>,
    pub(crate) reader_thread: Option<JoinHandle<()>>,
}

/// Polls the port and ships raw byte chunks to the decoding side. The
/// chunks carry no framing; the decoder recovers packet boundaries.
pub(crate) fn read_device_signal(
    port: &mut Box<dyn SerialPort>,
    raw_data_tx: mpsc::SyncSender<Vec<u8>>,
    reader_terminator_rx: Receiver<bool>,
) {
    loop {
        if do_terminate(&reader_terminator_rx) {
            return;
        }

        match poll_available(port) {
            Ok(chunk) if chunk.is_empty() => sleep_ms(1),
            Ok(chunk) => {
                if let Err(e) = raw_data_tx.send(chunk) {
                    error!("{e}");
                    return;
                }
            }
            Err(e) => {
                // A failed read is treated as no data this tick.
                error!("serial read failed: {e}");
                sleep_ms(10);
            }
        }
    }
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    terminator_rx.try_recv().unwrap_or(false)
}

/// Function to join the reader thread.
/// This function is automatically called when `driver_threads` is dropped.
pub fn join(driver_threads: &mut DriverThreads) {
    // The reader may already have exited if the receiving side hung up.
    let _ = driver_threads.reader_terminator_tx.send(true);

    if let Some(thread) = driver_threads.reader_thread.take() {
        if let Err(e) = thread.join() {
            error!("reader thread panicked: {e:?}");
        }
    }
}

impl Drop for DriverThreads {
    fn drop(&mut self) {
        join(self);
    }
}
