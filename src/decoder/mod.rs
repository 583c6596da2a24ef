// src/decoder/mod.rs

mod error;
mod reading;
pub mod parse; // Make parse functions public

pub use error::DecodeError;
pub use reading::Reading;
pub use parse::{decode, parse_temperature, resolve_reading, resolve_unit};

use crate::common::types::Precision;

/// How the precision of a frame is determined when no hint is given.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodePolicy {
    /// Read the precision indicator at index 5. Unknown bytes are rejected.
    #[default]
    Indicator,
    /// Try the five-digit field, then the four-digit field, ignoring the indicator.
    ///
    /// A live frame always has digits at both offsets, so this picks two
    /// decimals whenever the five-digit field parses.
    TrialFallback,
}

/// Stateless frame decoder bound to a `DecodePolicy`.
///
/// Holds no mutable state; share it freely between threads.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameDecoder {
    policy: DecodePolicy,
    read_polarity: bool,
}

impl FrameDecoder {
    pub const fn new(policy: DecodePolicy) -> Self {
        Self { policy, read_polarity: false }
    }

    /// Negates the value when byte 4 is `'1'`. Off by default.
    pub const fn with_polarity(mut self, read_polarity: bool) -> Self {
        self.read_polarity = read_polarity;
        self
    }

    pub const fn policy(&self) -> DecodePolicy {
        self.policy
    }

    pub const fn reads_polarity(&self) -> bool {
        self.read_polarity
    }

    /// Decodes one raw transmission. See [`decode`] for the check order.
    pub fn decode(&self, raw: &[u8], precision_hint: Option<Precision>) -> Result<Reading, DecodeError> {
        parse::decode_with(raw, precision_hint, self.policy, self.read_polarity)
    }
}
