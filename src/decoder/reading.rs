// src/decoder/reading.rs

use crate::common::frame::FrameText;
use crate::common::types::{Precision, Unit};
use core::fmt;

/// One decoded temperature reading.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    value: f32,
    unit: Unit,
    precision: Precision,
    frame: FrameText,
}

impl Reading {
    pub(crate) fn new(value: f32, unit: Unit, precision: Precision, frame: FrameText) -> Self {
        Self { value, unit, precision, frame }
    }

    /// Temperature in the unit the meter displayed.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// The trimmed frame this reading was decoded from.
    #[inline]
    pub fn frame(&self) -> &FrameText {
        &self.frame
    }

    /// Temperature converted to degrees Celsius.
    pub fn celsius(&self) -> f32 {
        match self.unit {
            Unit::Celsius => self.value,
            Unit::Fahrenheit => (self.value - 32.0) * 5.0 / 9.0,
        }
    }

    /// Temperature converted to degrees Fahrenheit.
    pub fn fahrenheit(&self) -> f32 {
        match self.unit {
            Unit::Fahrenheit => self.value,
            Unit::Celsius => self.value * 9.0 / 5.0 + 32.0,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*} {}", self.precision.decimals(), self.value, self.unit)
    }
}
