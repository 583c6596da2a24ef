// src/common/error.rs

use crate::decoder::DecodeError;

/// Errors returned by the meter handles.
///
/// `E` is the transport error of the serial interface. It is wrapped in
/// `Io` unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Tm917Error<E = ()>
where
    E: core::fmt::Debug, // Still need Debug for the generic Io error
{
    /// Underlying I/O error from the serial interface.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// No frame started before the frame timeout elapsed.
    #[error("Operation timed out")]
    Timeout,

    /// A frame started but stopped arriving, or ended early.
    #[error("Incomplete frame: received {received} bytes")]
    IncompleteFrame { received: usize },

    /// A complete frame arrived but could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl<E: core::fmt::Debug> Tm917Error<E> {
    /// The decode diagnosis, if this error came from the decoder.
    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Tm917Error::Decode(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: core::fmt::Debug> defmt::Format for Tm917Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Tm917Error::Io(e) => defmt::write!(f, "I/O error: {}", defmt::Debug2Format(e)),
            Tm917Error::Timeout => defmt::write!(f, "Operation timed out"),
            Tm917Error::IncompleteFrame { received } => {
                defmt::write!(f, "Incomplete frame: received {=usize} bytes", *received)
            }
            Tm917Error::Decode(e) => defmt::write!(f, "Decode error: {}", e),
        }
    }
}
