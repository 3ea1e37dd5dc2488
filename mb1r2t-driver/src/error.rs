use std::error::Error;
use std::fmt::{self, Display};
use std::io;

#[derive(Debug)]
pub enum Mb1r2tError {
    SerialError(serialport::Error),
    IoError(io::Error),
}

impl fmt::Display for Mb1r2tError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mb1r2tError::SerialError(err) => Display::fmt(&err, f),
            Mb1r2tError::IoError(err) => Display::fmt(&err, f),
        }
    }
}

impl Error for Mb1r2tError {}

impl From<io::Error> for Mb1r2tError {
    fn from(err: io::Error) -> Self {
        Mb1r2tError::IoError(err)
    }
}

impl From<serialport::Error> for Mb1r2tError {
    fn from(err: serialport::Error) -> Self {
        Mb1r2tError::SerialError(err)
    }
}
