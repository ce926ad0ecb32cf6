//! Half-duplex master over a shared data line
//!
//! MOSI and MISO are tied together (usually through a resistor) so master
//! and slave take turns on one wire. Each write sends the master word,
//! checks that it read back unchanged, then clocks a slave-width frame of
//! ones with the line released and returns what the slave drove.

use crate::arbiter::BusArbiter;
use crate::master::Spi;
use crate::transport::SpiTransport;
use spi_api::SpiPeripheral;
use spi_core::{Format, Hertz, PinName, SpiConfig, SpiError, SpiPins, SpiResult};

/// Half-duplex SPI master
pub struct HalfDuplexSpi<'a, P> {
    spi: Spi<'a, P>,
    slave_bits: u8,
}

impl<'a, P: SpiPeripheral> HalfDuplexSpi<'a, P> {
    /// Create a master whose `mosi` and `miso` pins share one data line
    pub fn new(
        arbiter: &'a BusArbiter<P>,
        mosi: PinName,
        miso: PinName,
        sclk: PinName,
    ) -> SpiResult<Self> {
        let spi = Spi::with_pins(arbiter, SpiPins::full_duplex(mosi, miso, sclk))?;
        let slave_bits = spi.config().format.bits();
        Ok(Self { spi, slave_bits })
    }

    /// Set the width of the slave's response frame
    pub fn slave_format(&mut self, bits: u8) {
        self.slave_bits = bits;
    }

    /// Width of the slave's response frame
    pub fn slave_bits(&self) -> u8 {
        self.slave_bits
    }

    /// Master-side configuration
    pub fn config(&self) -> &SpiConfig {
        self.spi.config()
    }

    /// Underlying full-duplex master
    pub fn inner(&self) -> &Spi<'a, P> {
        &self.spi
    }
}

impl<P: SpiPeripheral> SpiTransport for HalfDuplexSpi<'_, P> {
    fn format(&mut self, bits: u8, mode: u8) -> SpiResult<()> {
        self.spi.format(bits, mode)
    }

    fn frequency(&mut self, hz: Hertz) -> SpiResult<()> {
        self.spi.frequency(hz)
    }

    fn write(&mut self, value: u32) -> SpiResult<u32> {
        let master = self.spi.config().format;

        let echo = self.spi.write(value)?;
        if echo != value & master.mask() {
            spi_core::warn!("half-duplex echo mismatch");
            return Err(SpiError::BusConflict);
        }

        let release = Format::new(self.slave_bits, master.raw_mode()).mask();
        self.spi.format(self.slave_bits, master.raw_mode())?;
        let response = self.spi.write(release);

        // Restore the master width even if the slave frame failed
        let restored = self.spi.format(master.bits(), master.raw_mode());
        let response = response?;
        restored?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spi_sim::lpc::board::{P5, P6, P7};
    use spi_sim::{SimSpi, SlaveModel};

    #[test]
    fn test_slave_width_defaults_to_master() {
        let bus = BusArbiter::new(SimSpi::spi1());
        let spi = HalfDuplexSpi::new(&bus, P5, P6, P7).unwrap();
        assert_eq!(spi.slave_bits(), 8);
    }

    #[test]
    fn test_write_returns_slave_frame() {
        let bus = BusArbiter::new(SimSpi::spi1().with_slave(SlaveModel::Scripted));
        let mut spi = HalfDuplexSpi::new(&bus, P5, P6, P7).unwrap();
        spi.slave_format(12);
        bus.with_peripheral(|sim| sim.queue_responses(&[0x3C, 0xABC])).unwrap();

        assert_eq!(spi.write(0x3C), Ok(0xABC));
        // Released line is clocked as all ones at the slave width
        assert_eq!(bus.with_peripheral(|sim| sim.last_sent()), Some(0xFFF));
        assert_eq!(spi.config().format.bits(), 8);
        assert_eq!(bus.with_peripheral(|sim| sim.format().bits()), 8);
    }

    #[test]
    fn test_echo_mismatch_is_conflict() {
        let bus = BusArbiter::new(SimSpi::spi1().with_slave(SlaveModel::Scripted));
        let mut spi = HalfDuplexSpi::new(&bus, P5, P6, P7).unwrap();
        bus.with_peripheral(|sim| sim.queue_response(0x00)).unwrap();

        assert_eq!(spi.write(0x81), Err(SpiError::BusConflict));
        assert_eq!(bus.with_peripheral(|sim| sim.frames()), 1);
    }

    #[test]
    fn test_loopback_reads_released_line() {
        let bus = BusArbiter::new(SimSpi::spi1());
        let mut spi = HalfDuplexSpi::new(&bus, P5, P6, P7).unwrap();
        spi.slave_format(4);

        assert_eq!(spi.write(0x42), Ok(0xF));
    }
}
