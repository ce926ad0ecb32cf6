//! LPC176x SSP pin tables and board pin aliases

use spi_api::{PeripheralId, PinMapEntry, SpiPinMap};
use spi_core::PinName;

/// SSP0
pub const SPI_0: PeripheralId = PeripheralId::new(0);

/// SSP1
pub const SPI_1: PeripheralId = PeripheralId::new(1);

pub const P0_7: PinName = PinName::new(0, 7);
pub const P0_8: PinName = PinName::new(0, 8);
pub const P0_9: PinName = PinName::new(0, 9);
pub const P0_15: PinName = PinName::new(0, 15);
pub const P0_17: PinName = PinName::new(0, 17);
pub const P0_18: PinName = PinName::new(0, 18);
pub const P1_20: PinName = PinName::new(1, 20);
pub const P1_23: PinName = PinName::new(1, 23);
pub const P1_24: PinName = PinName::new(1, 24);

const PIN_MAP_MOSI: [PinMapEntry; 3] = [
    PinMapEntry::new(P0_18, SPI_0, 2),
    PinMapEntry::new(P1_24, SPI_0, 3),
    PinMapEntry::new(P0_9, SPI_1, 2),
];

const PIN_MAP_MISO: [PinMapEntry; 3] = [
    PinMapEntry::new(P0_17, SPI_0, 2),
    PinMapEntry::new(P1_23, SPI_0, 3),
    PinMapEntry::new(P0_8, SPI_1, 2),
];

const PIN_MAP_SCLK: [PinMapEntry; 3] = [
    PinMapEntry::new(P0_15, SPI_0, 2),
    PinMapEntry::new(P1_20, SPI_0, 3),
    PinMapEntry::new(P0_7, SPI_1, 2),
];

/// Pin tables for both SSP blocks
pub const PIN_MAP: SpiPinMap = SpiPinMap {
    mosi: &PIN_MAP_MOSI,
    miso: &PIN_MAP_MISO,
    sclk: &PIN_MAP_SCLK,
};

/// DIP pin numbering of the mbed LPC1768 module
pub mod board {
    use super::*;

    /// SSP1 MOSI
    pub const P5: PinName = P0_9;
    /// SSP1 MISO
    pub const P6: PinName = P0_8;
    /// SSP1 SCLK
    pub const P7: PinName = P0_7;
    /// SSP0 MOSI
    pub const P11: PinName = P0_18;
    /// SSP0 MISO
    pub const P12: PinName = P0_17;
    /// SSP0 SCLK
    pub const P13: PinName = P0_15;
}
