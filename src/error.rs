//! Watchface errors

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The persistent flag could not be read or written
    Storage,
    /// The draw target rejected a drawing operation
    Draw,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Storage => f.write_str("persistent storage access failed"),
            Error::Draw => f.write_str("drawing to the display failed"),
        }
    }
}
