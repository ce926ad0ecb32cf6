//! Pin-to-peripheral mapping
//!
//! Every SPI signal has a table listing which pins can carry it, for which
//! block, and with which pin-mux function. Resolving an assignment checks
//! that all connected pins agree on a single block.

use crate::PeripheralId;
use spi_core::{PinName, SpiError, SpiPins, SpiResult};

/// One row of a pin table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMapEntry {
    pub pin: PinName,
    pub peripheral: PeripheralId,
    /// Pin-mux function selecting the SPI signal
    pub function: u8,
}

impl PinMapEntry {
    pub const fn new(pin: PinName, peripheral: PeripheralId, function: u8) -> Self {
        Self {
            pin,
            peripheral,
            function,
        }
    }
}

/// Pin tables for the three master signals
#[derive(Debug, Clone, Copy)]
pub struct SpiPinMap {
    pub mosi: &'static [PinMapEntry],
    pub miso: &'static [PinMapEntry],
    pub sclk: &'static [PinMapEntry],
}

impl SpiPinMap {
    /// Block that `pins` select, see [`resolve`]
    pub fn resolve(&self, pins: &SpiPins) -> SpiResult<PeripheralId> {
        resolve(pins, self)
    }

    /// Pin-mux assignments for `pins`, unconnected signals skipped
    pub fn pinout(&self, pins: &SpiPins) -> impl Iterator<Item = PinMapEntry> + '_ {
        let mosi = pins.mosi.and_then(|pin| lookup(pin, self.mosi));
        let miso = pins.miso.and_then(|pin| lookup(pin, self.miso));
        let sclk = lookup(pins.sclk, self.sclk);

        [mosi, miso, sclk].into_iter().flatten()
    }
}

/// Find the table row for `pin`
pub fn lookup(pin: PinName, map: &[PinMapEntry]) -> Option<PinMapEntry> {
    map.iter().copied().find(|entry| entry.pin == pin)
}

/// Block that `pin` belongs to.
///
/// An unconnected pin places no constraint and yields `Ok(None)`; a pin
/// missing from the table is a mapping error.
pub fn pinmap_peripheral(
    pin: Option<PinName>,
    map: &[PinMapEntry],
) -> SpiResult<Option<PeripheralId>> {
    match pin {
        None => Ok(None),
        Some(pin) => lookup(pin, map)
            .map(|entry| Some(entry.peripheral))
            .ok_or(SpiError::PinMapping),
    }
}

/// Combine two constraints; they must agree when both are present
pub fn pinmap_merge(
    a: Option<PeripheralId>,
    b: Option<PeripheralId>,
) -> SpiResult<Option<PeripheralId>> {
    match (a, b) {
        (Some(a), Some(b)) if a != b => Err(SpiError::PinMapping),
        (Some(a), _) => Ok(Some(a)),
        (None, b) => Ok(b),
    }
}

/// Resolve a full assignment to the single block it selects
pub fn resolve(pins: &SpiPins, map: &SpiPinMap) -> SpiResult<PeripheralId> {
    let mosi = pinmap_peripheral(pins.mosi, map.mosi)?;
    let miso = pinmap_peripheral(pins.miso, map.miso)?;
    let sclk = pinmap_peripheral(Some(pins.sclk), map.sclk)?;

    let data = pinmap_merge(mosi, miso)?;
    pinmap_merge(data, sclk)?.ok_or(SpiError::PinMapping)
}
