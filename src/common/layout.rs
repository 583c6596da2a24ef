// src/common/layout.rs

//! Byte layout of a trimmed TM-917 frame.
//!
//! ```text
//! index  0   1   2   3   4   5   6 .. 13
//!        '4' d   a   U   S   P   display digits (8)
//! ```
//! `U` unit indicator, `S` polarity (only read when a decoder opts in),
//! `P` decimal-point (precision) indicator.
//! The numeric field is the tail of the display digits.

use core::ops::Range;

/// Start-of-text byte the meter sends ahead of every frame.
pub const START_OF_TEXT: u8 = 0x02;
/// End-of-frame byte.
pub const CARRIAGE_RETURN: u8 = b'\r';

/// Minimum length of a trimmed frame.
pub const MIN_FRAME_LEN: usize = 14;
/// Maximum length of a trimmed frame.
pub const MAX_FRAME_LEN: usize = 16;
/// Size of one raw transmission including STX and CR.
pub const RAW_FRAME_LEN: usize = 16;

/// Position of the unit indicator.
pub const UNIT_OFFSET: usize = 3;
/// Position of the polarity indicator.
pub const POLARITY_OFFSET: usize = 4;
/// Polarity byte marking a negative reading.
pub const POLARITY_NEGATIVE: u8 = b'1';
/// Position of the precision indicator.
pub const PRECISION_OFFSET: usize = 5;

/// Numeric field for 0.01° resolution.
pub const TWO_DECIMAL_FIELD: Range<usize> = 9..14;
/// Numeric field for 0.1° resolution.
pub const ONE_DECIMAL_FIELD: Range<usize> = 10..14;
