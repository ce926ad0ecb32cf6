//! `embedded-hal` bus implementation
//!
//! Lets device drivers written against [`embedded_hal::spi::SpiBus`] run on
//! a [`Spi`]. Every word goes through the arbiter, so drivers sharing a
//! peripheral keep their own formats.

use crate::master::Spi;
use crate::transport::SpiTransport;
use embedded_hal::spi::{ErrorType, SpiBus};
use spi_api::SpiPeripheral;
use spi_core::{SpiError, Word};

impl<P: SpiPeripheral> ErrorType for Spi<'_, P> {
    type Error = SpiError;
}

impl<P: SpiPeripheral, W: Word> SpiBus<W> for Spi<'_, P> {
    fn read(&mut self, words: &mut [W]) -> Result<(), Self::Error> {
        SpiTransport::read_array(self, words)
    }

    fn write(&mut self, words: &[W]) -> Result<(), Self::Error> {
        SpiTransport::write_array(self, words)
    }

    /// Words past the end of `write` are sent as zero; responses past the
    /// end of `read` are discarded.
    fn transfer(&mut self, read: &mut [W], write: &[W]) -> Result<(), Self::Error> {
        let len = read.len().max(write.len());

        for i in 0..len {
            let out = write.get(i).copied().unwrap_or_default();
            let response = SpiTransport::write(self, out.to_frame())?;
            if let Some(slot) = read.get_mut(i) {
                *slot = W::from_frame(response);
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [W]) -> Result<(), Self::Error> {
        SpiTransport::transfer(self, words)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        // Every exchange has completed by the time it returns
        Ok(())
    }
}
