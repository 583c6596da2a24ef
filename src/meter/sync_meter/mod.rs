// src/meter/sync_meter/mod.rs

use crate::common::{
    error::Tm917Error,
    hal_traits::{Tm917Serial, Tm917Timer},
    types::Precision,
};
use crate::decoder::Reading;
use crate::meter::{MeterConfig, RawFrame};

mod io_helpers;

/// Blocking handle to a TM-917 on a serial link.
///
/// The handle owns the interface and its settings but no decoding state: the
/// precision hint is passed to every [`read`](SyncMeter::read).
#[derive(Debug)]
pub struct SyncMeter<IF>
where
    IF: Tm917Serial + Tm917Timer,
{
    interface: IF,
    config: MeterConfig,
}

impl<IF> SyncMeter<IF>
where
    IF: Tm917Serial + Tm917Timer,
{
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, MeterConfig::default())
    }

    pub fn with_config(interface: IF, config: MeterConfig) -> Self {
        SyncMeter { interface, config }
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn interface_mut(&mut self) -> &mut IF {
        &mut self.interface
    }

    /// Gives the interface back, e.g. to close the port.
    pub fn release(self) -> IF {
        self.interface
    }

    // --- Public Blocking Methods ---

    /// Reads one raw transmission from the meter.
    ///
    /// Clears residual input afterwards (unless disabled) so a stale frame is
    /// never returned by the next call.
    pub fn raw(&mut self) -> Result<RawFrame, Tm917Error<IF::Error>> {
        let result = self.read_frame_bytes();

        let received_bytes = matches!(result, Ok(_) | Err(Tm917Error::IncompleteFrame { .. }));
        if self.config.reset_after_read && received_bytes {
            self.reset_input()?;
        }
        result
    }

    /// Reads and decodes one frame.
    ///
    /// `precision_hint` fixes the precision when the meter's resolution is
    /// known in advance; `None` lets the configured policy detect it.
    pub fn read(&mut self, precision_hint: Option<Precision>) -> Result<Reading, Tm917Error<IF::Error>> {
        let raw = self.raw()?;
        match self.config.decoder().decode(&raw, precision_hint) {
            Ok(reading) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("reading: {}", reading);
                Ok(reading)
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("decode failed: {}", e);
                Err(e.into())
            }
        }
    }
}
