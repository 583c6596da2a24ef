// src/common/types.rs

use super::layout;
use core::fmt;
use core::ops::Range;

// --- Temperature Unit (frame index 3) ---

/// Temperature unit shown on the meter's display.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    Fahrenheit,
    Celsius,
}

impl Unit {
    /// Maps the unit indicator byte to a `Unit`.
    pub fn from_indicator(byte: u8) -> Option<Self> {
        match byte {
            b'2' => Some(Unit::Fahrenheit),
            b'1' => Some(Unit::Celsius),
            _ => None,
        }
    }

    /// The indicator byte the meter sends for this unit.
    pub const fn indicator(&self) -> u8 {
        match self {
            Unit::Fahrenheit => b'2',
            Unit::Celsius => b'1',
        }
    }

    pub const fn symbol(&self) -> char {
        match self {
            Unit::Fahrenheit => 'F',
            Unit::Celsius => 'C',
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "°{}", self.symbol())
    }
}

// --- Display Precision (frame index 5) ---

/// Resolution the meter is reporting with.
///
/// Precision decides which numeric field of the frame is read and how many
/// fractional digits the decimal point leaves behind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Precision {
    /// 0.1° resolution, 4-digit field.
    OneDecimal,
    /// 0.01° resolution, 5-digit field.
    TwoDecimal,
}

impl Precision {
    /// Maps the precision indicator byte to a `Precision`.
    pub fn from_indicator(byte: u8) -> Option<Self> {
        match byte {
            b'2' => Some(Precision::TwoDecimal),
            b'1' => Some(Precision::OneDecimal),
            _ => None,
        }
    }

    pub const fn indicator(&self) -> u8 {
        match self {
            Precision::OneDecimal => b'1',
            Precision::TwoDecimal => b'2',
        }
    }

    /// Number of fractional digits in a decoded value.
    pub const fn decimals(&self) -> usize {
        match self {
            Precision::OneDecimal => 1,
            Precision::TwoDecimal => 2,
        }
    }

    /// Byte range of the numeric field within a trimmed frame.
    pub fn field(&self) -> Range<usize> {
        match self {
            Precision::OneDecimal => layout::ONE_DECIMAL_FIELD,
            Precision::TwoDecimal => layout::TWO_DECIMAL_FIELD,
        }
    }

    /// Width of the numeric field in bytes.
    pub fn field_len(&self) -> usize {
        self.field().len()
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::OneDecimal => write!(f, "0.1"),
            Precision::TwoDecimal => write!(f, "0.01"),
        }
    }
}
