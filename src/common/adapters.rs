// src/common/adapters.rs

//! Ready-made `Tm917Serial`/`Tm917Timer` implementations.
//!
//! Combine a serial adapter with a timer through [`Paired`](super::hal_traits::Paired)
//! to get an interface for [`SyncMeter`](crate::meter::SyncMeter).

#[cfg(feature = "impl-embedded-io")]
pub use self::embedded::EmbeddedIoSerial;
#[cfg(feature = "async")]
pub use self::embedded_async::EmbeddedIoAsyncSerial;
#[cfg(feature = "std")]
pub use self::host::{StdSerial, StdTimer};

// --- embedded-io UARTs ---

#[cfg(feature = "impl-embedded-io")]
mod embedded {
    use crate::common::hal_traits::Tm917Serial;
    use crate::common::timing::RESET_DRAIN_LIMIT;
    use embedded_io::{Read, ReadReady};

    /// Wraps a UART implementing `embedded_io::Read + ReadReady`.
    #[derive(Debug)]
    pub struct EmbeddedIoSerial<T> {
        uart: T,
    }

    impl<T> EmbeddedIoSerial<T> {
        pub fn new(uart: T) -> Self {
            EmbeddedIoSerial { uart }
        }

        pub fn into_inner(self) -> T {
            self.uart
        }
    }

    impl<T: Read + ReadReady> Tm917Serial for EmbeddedIoSerial<T> {
        type Error = T::Error;

        fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
            if !self.uart.read_ready().map_err(nb::Error::Other)? {
                return Err(nb::Error::WouldBlock);
            }
            let mut byte = [0u8; 1];
            match self.uart.read(&mut byte).map_err(nb::Error::Other)? {
                0 => Err(nb::Error::WouldBlock),
                _ => Ok(byte[0]),
            }
        }

        fn reset_input_buffer(&mut self) -> Result<(), Self::Error> {
            let mut scratch = [0u8; 16];
            let mut drained = 0;
            while drained < RESET_DRAIN_LIMIT && self.uart.read_ready()? {
                match self.uart.read(&mut scratch)? {
                    0 => break,
                    n => drained += n,
                }
            }
            Ok(())
        }
    }

}

#[cfg(feature = "async")]
mod embedded_async {
    use crate::common::hal_traits::Tm917SerialAsync;
    use crate::common::timing::RESET_DRAIN_LIMIT;
    use embedded_io::{ReadExactError, ReadReady};
    use embedded_io_async::Read;

    /// Wraps a UART implementing `embedded_io_async::Read + ReadReady`.
    ///
    /// A UART that reports end of stream fails reads with
    /// `ReadExactError::UnexpectedEof`.
    #[derive(Debug)]
    pub struct EmbeddedIoAsyncSerial<T> {
        uart: T,
    }

    impl<T> EmbeddedIoAsyncSerial<T> {
        pub fn new(uart: T) -> Self {
            EmbeddedIoAsyncSerial { uart }
        }

        pub fn into_inner(self) -> T {
            self.uart
        }
    }

    impl<T: Read + ReadReady> Tm917SerialAsync for EmbeddedIoAsyncSerial<T> {
        type Error = ReadExactError<T::Error>;

        async fn read_byte(&mut self) -> Result<u8, Self::Error> {
            let mut byte = [0u8; 1];
            self.uart.read_exact(&mut byte).await?;
            Ok(byte[0])
        }

        async fn reset_input_buffer(&mut self) -> Result<(), Self::Error> {
            let mut scratch = [0u8; 16];
            let mut drained = 0;
            while drained < RESET_DRAIN_LIMIT && self.uart.read_ready().map_err(ReadExactError::Other)? {
                match self.uart.read(&mut scratch).await.map_err(ReadExactError::Other)? {
                    0 => break,
                    n => drained += n,
                }
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use embassy_futures::block_on;
        use embedded_io::{ErrorKind, ErrorType};

        struct MockUart {
            data: &'static [u8],
            pos: usize,
            fail: bool,
        }

        impl ErrorType for MockUart {
            type Error = ErrorKind;
        }

        impl ReadReady for MockUart {
            fn read_ready(&mut self) -> Result<bool, Self::Error> {
                if self.fail {
                    return Err(ErrorKind::Other);
                }
                Ok(self.pos < self.data.len())
            }
        }

        impl Read for MockUart {
            async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
                if self.fail {
                    return Err(ErrorKind::Other);
                }
                // Ok(0) once the data runs out
                let n = buf.len().min(self.data.len() - self.pos);
                buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
                self.pos += n;
                Ok(n)
            }
        }

        fn serial(data: &'static [u8], fail: bool) -> EmbeddedIoAsyncSerial<MockUart> {
            EmbeddedIoAsyncSerial::new(MockUart { data, pos: 0, fail })
        }

        #[test]
        fn test_read_byte() {
            let mut serial = serial(b"41", false);
            assert_eq!(block_on(serial.read_byte()), Ok(b'4'));
            assert_eq!(block_on(serial.read_byte()), Ok(b'1'));
        }

        #[test]
        fn test_end_of_stream_fails_the_read() {
            let mut serial = serial(b"4", false);
            assert_eq!(block_on(serial.read_byte()), Ok(b'4'));
            assert_eq!(block_on(serial.read_byte()), Err(ReadExactError::UnexpectedEof));
        }

        #[test]
        fn test_reset_drains_pending_bytes() {
            let mut serial = serial(b"0123456789abcdefXYZ", false);
            assert_eq!(block_on(serial.reset_input_buffer()), Ok(()));
            assert_eq!(serial.into_inner().pos, 19);
        }

        #[test]
        fn test_errors_pass_through() {
            let mut serial = serial(b"4", true);
            assert_eq!(block_on(serial.read_byte()), Err(ReadExactError::Other(ErrorKind::Other)));
            assert_eq!(block_on(serial.reset_input_buffer()), Err(ReadExactError::Other(ErrorKind::Other)));
        }
    }
}

// --- Host serial ports ---

#[cfg(feature = "std")]
mod host {
    use crate::common::hal_traits::{Tm917Serial, Tm917Timer};
    use crate::common::timing::RESET_DRAIN_LIMIT;
    use std::io::{self, ErrorKind, Read};
    use std::time::{Duration, Instant};

    /// Wraps any `std::io::Read` port.
    ///
    /// The port must be non-blocking or have a read timeout set; `WouldBlock`,
    /// `TimedOut` and `Interrupted` all mean "no byte yet".
    #[derive(Debug)]
    pub struct StdSerial<R> {
        port: R,
    }

    impl<R> StdSerial<R> {
        pub fn new(port: R) -> Self {
            StdSerial { port }
        }

        pub fn into_inner(self) -> R {
            self.port
        }
    }

    #[inline]
    fn is_transient(e: &io::Error) -> bool {
        matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted)
    }

    impl<R: Read> Tm917Serial for StdSerial<R> {
        type Error = io::Error;

        fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
            let mut byte = [0u8; 1];
            match self.port.read(&mut byte) {
                Ok(1) => Ok(byte[0]),
                Ok(_) => Err(nb::Error::WouldBlock),
                Err(e) if is_transient(&e) => Err(nb::Error::WouldBlock),
                Err(e) => Err(nb::Error::Other(e)),
            }
        }

        fn reset_input_buffer(&mut self) -> Result<(), Self::Error> {
            let mut scratch = [0u8; 16];
            let mut drained = 0;
            while drained < RESET_DRAIN_LIMIT {
                match self.port.read(&mut scratch) {
                    Ok(0) => break,
                    Ok(n) => drained += n,
                    Err(e) if is_transient(&e) => break,
                    Err(e) => return Err(e),
                }
            }
            Ok(())
        }
    }

    /// Timer backed by `std::time::Instant` and `thread::sleep`.
    #[derive(Debug, Copy, Clone, Default)]
    pub struct StdTimer;

    impl Tm917Timer for StdTimer {
        type Instant = Instant;

        fn delay_us(&mut self, us: u32) {
            std::thread::sleep(Duration::from_micros(us as u64));
        }

        fn now(&self) -> Self::Instant {
            Instant::now()
        }
    }

}
