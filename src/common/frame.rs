// src/common/frame.rs

use super::layout;
use arrayvec::ArrayVec;
use core::fmt;

/// Strips framing artifacts from a raw transmission.
///
/// Removes one leading STX byte and any trailing CR, LF, whitespace or NUL
/// padding. Never fails: a frame that is too short or too long is reported by
/// the decoder, which knows the observed length.
pub fn normalize(raw: &[u8]) -> &[u8] {
    let frame = raw.strip_prefix(&[layout::START_OF_TEXT]).unwrap_or(raw);
    let end = frame
        .iter()
        .rposition(|&b| !is_trailing_noise(b))
        .map_or(0, |last| last + 1);
    &frame[..end]
}

#[inline]
fn is_trailing_noise(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0
}

/// Copy of a trimmed frame, kept for diagnostics.
///
/// Holds at most `MAX_FRAME_LEN` bytes; longer input keeps its prefix.
/// Non-printable bytes are shown as `\xNN` when displayed.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct FrameText(ArrayVec<u8, { layout::MAX_FRAME_LEN }>);

impl FrameText {
    pub fn new(bytes: &[u8]) -> Self {
        FrameText(bytes.iter().take(layout::MAX_FRAME_LEN).copied().collect())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FrameText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.as_bytes() {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FrameText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameText(\"{}\")", self)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FrameText {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]:a}", self.as_bytes());
    }
}
