// src/lib.rs

//! Decoder for the serial output of the TM-917 digital thermometer.
//!
//! The meter streams a 16-byte ASCII frame per reading:
//! `STX`, fourteen data bytes, `CR`. [`decode`] turns one such frame into a
//! [`Reading`]; [`SyncMeter`] (and `AsyncMeter` with the `async` feature)
//! pull frames off a UART and decode them.
//!
//! ```
//! use tm917::{decode, Precision, Unit};
//!
//! let reading = decode(b"\x0241020200008276\r", None).unwrap();
//! assert_eq!(reading.value(), 82.76);
//! assert_eq!(reading.unit(), Unit::Fahrenheit);
//! assert_eq!(reading.precision(), Precision::TwoDecimal);
//! ```

#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod common;
pub mod decoder;
pub mod meter;

// Re-export key types for convenience
pub use common::{Precision, Tm917Error, Unit};
pub use decoder::{decode, DecodeError, DecodePolicy, FrameDecoder, Reading};
pub use meter::{MeterConfig, SyncMeter};
#[cfg(feature = "async")]
pub use meter::AsyncMeter;
