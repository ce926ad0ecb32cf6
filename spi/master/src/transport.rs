//! Word-oriented master capability

use spi_core::{Hertz, SpiResult, Word};

/// Blocking SPI master operations.
///
/// Implementors provide configuration and the single-word exchange; the
/// buffer operations are built on [`write`](Self::write) and run word by
/// word in index order. A failing word aborts the rest of the buffer.
pub trait SpiTransport {
    /// Set bits per frame and clock mode (0..=3), reprogramming the bus now
    fn format(&mut self, bits: u8, mode: u8) -> SpiResult<()>;

    /// Set the SCLK rate, reprogramming the bus now
    fn frequency(&mut self, hz: Hertz) -> SpiResult<()>;

    /// Send `value` and return the slave's response
    fn write(&mut self, value: u32) -> SpiResult<u32>;

    /// Exchange every word, replacing each with the slave's response
    fn transfer<W: Word>(&mut self, words: &mut [W]) -> SpiResult<()> {
        for word in words.iter_mut() {
            *word = W::from_frame(self.write(word.to_frame())?);
        }
        Ok(())
    }

    /// Send every word, discarding the responses
    fn write_array<W: Word>(&mut self, words: &[W]) -> SpiResult<()> {
        for word in words {
            self.write(word.to_frame())?;
        }
        Ok(())
    }

    /// Clock out zero words, collecting the responses
    fn read_array<W: Word>(&mut self, words: &mut [W]) -> SpiResult<()> {
        for word in words.iter_mut() {
            *word = W::from_frame(self.write(0)?);
        }
        Ok(())
    }
}
