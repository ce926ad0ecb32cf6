//! Pin names and SPI pin assignments

use core::fmt;

/// A microcontroller pin, encoded as `port << 5 | pin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinName(u16);

impl PinName {
    /// Pin `pin` of GPIO port `port`
    pub const fn new(port: u8, pin: u8) -> Self {
        Self(((port as u16) << 5) | (pin as u16 & 0x1F))
    }

    /// Pin from its raw encoding
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw encoding
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// GPIO port number
    pub const fn port(self) -> u8 {
        (self.0 >> 5) as u8
    }

    /// Pin number within the port
    pub const fn pin(self) -> u8 {
        (self.0 & 0x1F) as u8
    }
}

impl fmt::Display for PinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}_{}", self.port(), self.pin())
    }
}

/// Pins bound to one SPI master.
///
/// `mosi` or `miso` may be left unconnected for read-only or write-only
/// buses; the clock is always required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiPins {
    /// Master Out, Slave In
    pub mosi: Option<PinName>,
    /// Master In, Slave Out
    pub miso: Option<PinName>,
    /// Serial clock
    pub sclk: PinName,
}

impl SpiPins {
    /// Create a pin assignment
    pub const fn new(mosi: Option<PinName>, miso: Option<PinName>, sclk: PinName) -> Self {
        Self { mosi, miso, sclk }
    }

    /// Full-duplex assignment with every signal connected
    pub const fn full_duplex(mosi: PinName, miso: PinName, sclk: PinName) -> Self {
        Self::new(Some(mosi), Some(miso), sclk)
    }

    /// Whether the master can drive data out
    pub const fn can_transmit(&self) -> bool {
        self.mosi.is_some()
    }

    /// Whether the master can sample data in
    pub const fn can_receive(&self) -> bool {
        self.miso.is_some()
    }
}
