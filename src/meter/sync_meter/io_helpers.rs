// src/meter/sync_meter/io_helpers.rs

use super::SyncMeter; // Access SyncMeter definition
use crate::common::{
    error::Tm917Error,
    hal_traits::{Tm917Serial, Tm917Timer},
    layout,
};
use crate::meter::RawFrame;
use core::time::Duration;
use nb::Result as NbResult;

// Implementation block for I/O related helpers
impl<IF> SyncMeter<IF>
where
    IF: Tm917Serial + Tm917Timer,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<T, Tm917Error<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let deadline = self.interface.now() + timeout;

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(Tm917Error::Timeout);
                    }
                    self.interface.delay_us(self.config.poll_interval_us);
                }
                Err(nb::Error::Other(e)) => return Err(Tm917Error::Io(e)),
            }
        }
    }

    /// Discards bytes until STX arrives. Returns how many were skipped.
    pub(super) fn wait_for_start(&mut self) -> Result<usize, Tm917Error<IF::Error>> {
        let deadline = self.interface.now() + self.config.frame_timeout;
        let mut skipped = 0;

        loop {
            let now = self.interface.now();
            if now >= deadline {
                return Err(Tm917Error::Timeout);
            }
            let byte = self.execute_blocking_io_with_timeout(deadline - now, |iface| iface.read_byte())?;
            if byte == layout::START_OF_TEXT {
                return Ok(skipped);
            }
            skipped += 1;
        }
    }

    /// Reads one transmission: up to and including CR, at most `RAW_FRAME_LEN` bytes.
    pub(super) fn read_frame_bytes(&mut self) -> Result<RawFrame, Tm917Error<IF::Error>> {
        let mut frame = RawFrame::new();

        if self.config.sync_on_start {
            let _skipped = self.wait_for_start()?;
            #[cfg(feature = "defmt")]
            defmt::trace!("skipped {=usize} bytes before STX", _skipped);
            frame.push(layout::START_OF_TEXT);
        } else {
            let first = self.execute_blocking_io_with_timeout(self.config.frame_timeout, |iface| iface.read_byte())?;
            frame.push(first);
        }

        // Once a frame has started, a silent line means it was cut short
        let gap = self.config.inter_byte_timeout;
        while !frame.is_full() {
            match self.execute_blocking_io_with_timeout(gap, |iface| iface.read_byte()) {
                Ok(byte) => {
                    frame.push(byte);
                    if byte == layout::CARRIAGE_RETURN {
                        break;
                    }
                }
                Err(Tm917Error::Timeout) => {
                    return Err(Tm917Error::IncompleteFrame { received: frame.len() });
                }
                Err(e) => return Err(e),
            }
        }

        if frame.len() < layout::MIN_FRAME_LEN {
            return Err(Tm917Error::IncompleteFrame { received: frame.len() });
        }
        Ok(frame)
    }

    /// Clears residual input so the next read starts on a fresh frame.
    pub(super) fn reset_input(&mut self) -> Result<(), Tm917Error<IF::Error>> {
        self.interface.reset_input_buffer().map_err(Tm917Error::Io)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("input buffer reset");
        Ok(())
    }
}
