#![no_std]
#![forbid(unsafe_code)]

//! # SPI API
//!
//! The contract between the SPI master facade and the peripheral that
//! actually drives the bus. A backend implements [`SpiPeripheral`] for one
//! physical SPI block; the facade never touches registers itself.
//!
//! Backends usually validate pin assignments against static tables with the
//! helpers in [`pinmap`].

use core::fmt;

pub mod pinmap;

pub use pinmap::*;
pub use spi_core::{Format, Hertz, PinName, SpiError, SpiPins, SpiResult};

/// Identifies one physical SPI block on the chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeripheralId(u8);

impl PeripheralId {
    /// Create an identifier for block `index`
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Block index
    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PeripheralId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SPI_{}", self.0)
    }
}

/// Hardware access for one SPI master block.
///
/// All methods are called with the bus held exclusively by the caller.
pub trait SpiPeripheral {
    /// The block this backend drives
    fn id(&self) -> PeripheralId;

    /// Route `pins` to this block.
    ///
    /// Fails with [`SpiError::PinMapping`] if the pins do not belong to it.
    fn connect(&mut self, pins: &SpiPins) -> SpiResult<()>;

    /// Program frame width and clock mode
    fn set_format(&mut self, format: Format) -> SpiResult<()>;

    /// Program the clock divider for `hz`, returning the rate achieved
    fn set_frequency(&mut self, hz: Hertz) -> SpiResult<Hertz>;

    /// Shift one frame out and the slave's frame in.
    ///
    /// Returns [`nb::Error::WouldBlock`] while the block is busy; the caller
    /// polls until the exchange completes.
    fn exchange(&mut self, frame: u32) -> nb::Result<u32, SpiError>;
}

