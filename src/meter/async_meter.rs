// src/meter/async_meter.rs

use crate::common::{error::Tm917Error, hal_traits::Tm917SerialAsync, layout, types::Precision};
use crate::decoder::Reading;
use crate::meter::{MeterConfig, RawFrame};

/// Async handle to a TM-917 (requires 'async' feature).
///
/// Reads wait as long as the UART does; wrap calls in the executor's timeout
/// to bound them. `MeterConfig` timeouts are not used here.
#[derive(Debug)]
pub struct AsyncMeter<IF>
where
    IF: Tm917SerialAsync,
{
    interface: IF,
    config: MeterConfig,
}

impl<IF> AsyncMeter<IF>
where
    IF: Tm917SerialAsync,
{
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, MeterConfig::default())
    }

    pub fn with_config(interface: IF, config: MeterConfig) -> Self {
        AsyncMeter { interface, config }
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn release(self) -> IF {
        self.interface
    }

    /// Reads one raw transmission, then clears residual input if configured.
    pub async fn raw(&mut self) -> Result<RawFrame, Tm917Error<IF::Error>> {
        let mut frame = RawFrame::new();

        if self.config.sync_on_start {
            while self.read_byte().await? != layout::START_OF_TEXT {}
            frame.push(layout::START_OF_TEXT);
        }
        while !frame.is_full() {
            let byte = self.read_byte().await?;
            frame.push(byte);
            if byte == layout::CARRIAGE_RETURN {
                break;
            }
        }

        if self.config.reset_after_read {
            self.interface.reset_input_buffer().await.map_err(Tm917Error::Io)?;
        }
        if frame.len() < layout::MIN_FRAME_LEN {
            return Err(Tm917Error::IncompleteFrame { received: frame.len() });
        }
        Ok(frame)
    }

    /// Reads and decodes one frame. See [`SyncMeter::read`](crate::meter::SyncMeter::read).
    pub async fn read(&mut self, precision_hint: Option<Precision>) -> Result<Reading, Tm917Error<IF::Error>> {
        let raw = self.raw().await?;
        self.config.decoder().decode(&raw, precision_hint).map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("decode failed: {}", e);
            Tm917Error::Decode(e)
        })
    }

    async fn read_byte(&mut self) -> Result<u8, Tm917Error<IF::Error>> {
        self.interface.read_byte().await.map_err(Tm917Error::Io)
    }
}
