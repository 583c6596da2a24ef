// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Monotonic instant used for read timeouts.
pub trait Tm917Instant:
    Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> Tm917Instant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for timer/delay operations needed while waiting for a frame.
pub trait Tm917Timer {
    type Instant: Tm917Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Current monotonic time.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for the receive side of the meter's serial link.
///
/// The meter only talks; nothing is ever written to it.
pub trait Tm917Serial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Discards any bytes already received but not yet read.
    fn reset_input_buffer(&mut self) -> Result<(), Self::Error>;
}

/// Abstraction for asynchronous serial reception (requires 'async' feature).
#[cfg(feature = "async")]
#[allow(async_fn_in_trait)]
pub trait Tm917SerialAsync {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Asynchronously reads a single byte from the serial interface.
    async fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Discards any bytes already received but not yet read.
    async fn reset_input_buffer(&mut self) -> Result<(), Self::Error>;
}

/// Joins a serial receiver and a timer into one interface.
#[derive(Debug, Clone)]
pub struct Paired<S, T> {
    pub serial: S,
    pub timer: T,
}

impl<S, T> Paired<S, T> {
    pub fn new(serial: S, timer: T) -> Self {
        Paired { serial, timer }
    }

    pub fn into_parts(self) -> (S, T) {
        (self.serial, self.timer)
    }
}

impl<S: Tm917Serial, T> Tm917Serial for Paired<S, T> {
    type Error = S::Error;

    #[inline]
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.serial.read_byte()
    }

    #[inline]
    fn reset_input_buffer(&mut self) -> Result<(), Self::Error> {
        self.serial.reset_input_buffer()
    }
}

impl<S, T: Tm917Timer> Tm917Timer for Paired<S, T> {
    type Instant = T::Instant;

    #[inline]
    fn delay_us(&mut self, us: u32) {
        self.timer.delay_us(us)
    }

    #[inline]
    fn now(&self) -> Self::Instant {
        self.timer.now()
    }
}
