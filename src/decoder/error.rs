// src/decoder/error.rs

use crate::common::frame::FrameText;

/// Why a frame could not be decoded.
///
/// Every variant carries the trimmed frame so a garbled transmission can be
/// inspected after the fact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Trimmed frame is shorter than the protocol minimum, or too short to hold the numeric field.
    #[error("frame too short: need {required} bytes, got {len} (\"{frame}\")")]
    FrameTooShort { len: usize, required: usize, frame: FrameText },

    /// Trimmed frame is longer than one transmission. Only its prefix is kept in `frame`.
    #[error("frame too long: at most {max} bytes, got {len} (\"{frame}\")")]
    FrameTooLong { len: usize, max: usize, frame: FrameText },

    /// Unit indicator is neither `'1'` nor `'2'`.
    #[error("unrecognized unit indicator {byte:#04x} (\"{frame}\")")]
    UnrecognizedUnit { byte: u8, frame: FrameText },

    /// Precision indicator is neither `'1'` nor `'2'`.
    #[error("unrecognized precision indicator {byte:#04x} (\"{frame}\")")]
    UnrecognizedPrecision { byte: u8, frame: FrameText },

    /// Numeric field has the wrong width for its precision.
    #[error("malformed numeric field: expected {expected} digits, got {actual} (\"{frame}\")")]
    MalformedField { expected: usize, actual: usize, frame: FrameText },

    /// Numeric field holds something other than decimal digits.
    #[error("numeric field is not a number (\"{frame}\")")]
    NumberFormat { frame: FrameText },

    /// Neither numeric field parsed while probing for the precision.
    #[error("no numeric field could be parsed (\"{frame}\")")]
    InvalidFrame { frame: FrameText },
}

impl DecodeError {
    /// The trimmed frame the error refers to.
    pub fn frame(&self) -> &FrameText {
        match self {
            DecodeError::FrameTooShort { frame, .. }
            | DecodeError::FrameTooLong { frame, .. }
            | DecodeError::UnrecognizedUnit { frame, .. }
            | DecodeError::UnrecognizedPrecision { frame, .. }
            | DecodeError::MalformedField { frame, .. }
            | DecodeError::NumberFormat { frame }
            | DecodeError::InvalidFrame { frame } => frame,
        }
    }
}
