// src/common/timing.rs

use core::time::Duration;

// The meter streams one frame roughly every second at 9600 baud, 8N1.
// Values below are nominal; the defaults in `MeterConfig` add slack on top.

// === Byte Timing at 9600 Baud (8N1) ===
// 1 start bit + 8 data bits + 1 stop bit = 10 bits per byte
// Time per byte = 10 / 9600 s = 1.0416... ms

/// Baud rate of the meter's RS-232 output.
pub const BAUD_RATE: u32 = 9600;
/// Nominal duration of a single byte (10 bits total) at 9600 baud.
pub const BYTE_DURATION: Duration = Duration::from_nanos(1_041_667);

// === Frame Timing ===

/// Nominal interval between two frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(1000);
/// Default wait for the first byte of a frame (covers a full interval plus a late frame).
pub const FRAME_TIMEOUT_DEFAULT: Duration = Duration::from_millis(2500);
/// Default maximum gap between two bytes of the same frame.
pub const INTER_BYTE_TIMEOUT_DEFAULT: Duration = Duration::from_millis(50);
/// Default busy-wait step while polling the UART.
pub const POLL_INTERVAL_US_DEFAULT: u32 = 100;

/// Upper bound on bytes drained when clearing residual input.
pub const RESET_DRAIN_LIMIT: usize = 256;
