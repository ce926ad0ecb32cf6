//! Standard SPI master

use crate::arbiter::{BusArbiter, InstanceId};
use crate::transport::SpiTransport;
use spi_api::SpiPeripheral;
use spi_core::{Format, Hertz, PinName, SpiConfig, SpiPins, SpiResult};

/// A SPI master bound to pins on a shared peripheral.
///
/// The default format is 8 bits, mode 0, at 1 MHz. Chip select is not
/// handled here; drive it with a GPIO around each transaction.
///
/// ```no_run
/// use spi_master::{BusArbiter, Spi, SpiTransport};
/// use spi_sim::{lpc::board::*, SimSpi};
///
/// let bus = BusArbiter::new(SimSpi::spi1());
/// let mut device = Spi::new(&bus, Some(P5), Some(P6), P7).unwrap();
/// let response = device.write(0xFF).unwrap();
/// ```
pub struct Spi<'a, P> {
    arbiter: &'a BusArbiter<P>,
    id: InstanceId,
    pins: SpiPins,
    config: SpiConfig,
}

impl<'a, P: SpiPeripheral> Spi<'a, P> {
    /// Create a master on `mosi`, `miso` and `sclk`.
    ///
    /// Either data pin may be `None` when unused. Fails with
    /// [`SpiError::PinMapping`](spi_core::SpiError::PinMapping) if the pins
    /// do not belong to the arbiter's peripheral.
    pub fn new(
        arbiter: &'a BusArbiter<P>,
        mosi: Option<PinName>,
        miso: Option<PinName>,
        sclk: PinName,
    ) -> SpiResult<Self> {
        Self::with_pins(arbiter, SpiPins::new(mosi, miso, sclk))
    }

    /// Create a master from a full pin assignment
    pub fn with_pins(arbiter: &'a BusArbiter<P>, pins: SpiPins) -> SpiResult<Self> {
        Self::with_config(arbiter, pins, SpiConfig::default())
    }

    /// Create a master and program `config` instead of the defaults
    pub fn with_config(
        arbiter: &'a BusArbiter<P>,
        pins: SpiPins,
        config: SpiConfig,
    ) -> SpiResult<Self> {
        let id = arbiter.attach(&pins)?;
        let spi = Self {
            arbiter,
            id,
            pins,
            config,
        };

        // Dropping on failure releases the handle
        arbiter.reconfigure(id, &spi.config)?;
        spi_core::info!("SPI instance {=u32} attached", id.raw());
        Ok(spi)
    }

    /// Handle on the arbiter
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Pins this master was created with
    pub fn pins(&self) -> &SpiPins {
        &self.pins
    }

    /// Format and frequency this master programs when it takes the bus
    pub fn config(&self) -> &SpiConfig {
        &self.config
    }

    /// Whether the bus currently carries this master's configuration
    pub fn is_owner(&self) -> bool {
        self.arbiter.owner() == Some(self.id)
    }

    /// Take the bus, reprogramming it if another master used it last.
    ///
    /// Every transfer does this implicitly. Returns whether the peripheral
    /// was reprogrammed.
    pub fn acquire(&self) -> SpiResult<bool> {
        self.arbiter.acquire(self.id, &self.config)
    }

    /// Arbiter this master is attached to
    pub fn arbiter(&self) -> &'a BusArbiter<P> {
        self.arbiter
    }
}

impl<P: SpiPeripheral> SpiTransport for Spi<'_, P> {
    fn format(&mut self, bits: u8, mode: u8) -> SpiResult<()> {
        self.config.format = Format::new(bits, mode);
        self.arbiter.reconfigure(self.id, &self.config)
    }

    fn frequency(&mut self, hz: Hertz) -> SpiResult<()> {
        self.config.frequency = hz;
        self.arbiter.reconfigure(self.id, &self.config)
    }

    fn write(&mut self, value: u32) -> SpiResult<u32> {
        self.arbiter.exchange(self.id, &self.config, value)
    }
}

impl<P> Drop for Spi<'_, P> {
    fn drop(&mut self) {
        self.arbiter.release(self.id);
    }
}
