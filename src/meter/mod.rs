// src/meter/mod.rs

// Blocking handle over Tm917Serial + Tm917Timer
pub mod sync_meter;

#[cfg(feature = "async")]
pub mod async_meter;

pub use sync_meter::SyncMeter;
#[cfg(feature = "async")]
pub use async_meter::AsyncMeter;

use crate::common::layout::RAW_FRAME_LEN;
use crate::common::timing;
use crate::decoder::{DecodePolicy, FrameDecoder};
use arrayvec::ArrayVec;
use core::time::Duration;

/// One raw transmission as received, STX and CR included.
pub type RawFrame = ArrayVec<u8, RAW_FRAME_LEN>;

/// Acquisition and decoding settings for a meter handle.
///
/// The timeouts only apply to `SyncMeter`; an `AsyncMeter` leaves timing to
/// the caller's executor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MeterConfig {
    /// Maximum wait for a frame to start.
    pub frame_timeout: Duration,
    /// Maximum gap between two bytes of one frame.
    pub inter_byte_timeout: Duration,
    /// Delay between polls of an idle UART.
    pub poll_interval_us: u32,
    /// Discard bytes until STX so a read never starts mid-frame.
    pub sync_on_start: bool,
    /// Clear residual input after every read.
    pub reset_after_read: bool,
    /// Precision detection used when no hint is given.
    pub policy: DecodePolicy,
    /// Treat byte 4 as a sign flag (`'1'` = negative).
    pub read_polarity: bool,
}

impl Default for MeterConfig {
    fn default() -> Self {
        MeterConfig {
            frame_timeout: timing::FRAME_TIMEOUT_DEFAULT,
            inter_byte_timeout: timing::INTER_BYTE_TIMEOUT_DEFAULT,
            poll_interval_us: timing::POLL_INTERVAL_US_DEFAULT,
            sync_on_start: true,
            reset_after_read: true,
            policy: DecodePolicy::Indicator,
            read_polarity: false,
        }
    }
}

impl MeterConfig {
    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_timeouts(mut self, frame_timeout: Duration, inter_byte_timeout: Duration) -> Self {
        self.frame_timeout = frame_timeout;
        self.inter_byte_timeout = inter_byte_timeout;
        self
    }

    pub fn with_polarity(mut self, read_polarity: bool) -> Self {
        self.read_polarity = read_polarity;
        self
    }

    #[inline]
    pub fn decoder(&self) -> FrameDecoder {
        FrameDecoder::new(self.policy).with_polarity(self.read_polarity)
    }
}
