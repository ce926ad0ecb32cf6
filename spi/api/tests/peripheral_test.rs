//! Peripheral contract tests for spi-api

use spi_api::{
    Format, Hertz, PeripheralId, PinMapEntry, PinName, SpiError, SpiPeripheral, SpiPinMap,
    SpiPins, SpiResult,
};

const BLOCK: PeripheralId = PeripheralId::new(2);

const MOSI: &[PinMapEntry] = &[PinMapEntry::new(PinName::new(3, 1), BLOCK, 5)];
const MISO: &[PinMapEntry] = &[PinMapEntry::new(PinName::new(3, 2), BLOCK, 5)];
const SCLK: &[PinMapEntry] = &[PinMapEntry::new(PinName::new(3, 0), BLOCK, 5)];
const MAP: SpiPinMap = SpiPinMap {
    mosi: MOSI,
    miso: MISO,
    sclk: SCLK,
};

/// Inverts every frame and needs one poll per word
#[derive(Default)]
struct Inverter {
    format: Format,
    ready: bool,
}

impl SpiPeripheral for Inverter {
    fn id(&self) -> PeripheralId {
        BLOCK
    }

    fn connect(&mut self, pins: &SpiPins) -> SpiResult<()> {
        match MAP.resolve(pins)? {
            BLOCK => Ok(()),
            _ => Err(SpiError::PinMapping),
        }
    }

    fn set_format(&mut self, format: Format) -> SpiResult<()> {
        self.format = format;
        Ok(())
    }

    fn set_frequency(&mut self, hz: Hertz) -> SpiResult<Hertz> {
        Ok(hz)
    }

    fn exchange(&mut self, frame: u32) -> nb::Result<u32, SpiError> {
        if !self.ready {
            self.ready = true;
            return Err(nb::Error::WouldBlock);
        }
        self.ready = false;
        Ok(!frame & self.format.mask())
    }
}

#[test]
fn test_connect_through_pin_map() {
    let mut block = Inverter::default();
    let pins = SpiPins::full_duplex(PinName::new(3, 1), PinName::new(3, 2), PinName::new(3, 0));
    assert_eq!(block.connect(&pins), Ok(()));

    let clock_only = SpiPins::new(None, None, PinName::new(3, 0));
    assert_eq!(block.connect(&clock_only), Ok(()));

    let foreign = SpiPins::new(None, None, PinName::new(0, 7));
    assert_eq!(block.connect(&foreign), Err(SpiError::PinMapping));
}

#[test]
fn test_block_polls_until_done() {
    let mut block = Inverter::default();
    block.set_format(Format::new(8, 0)).unwrap();

    assert_eq!(nb::block!(block.exchange(0x0F)), Ok(0xF0));
    assert_eq!(nb::block!(block.exchange(0xFF)), Ok(0x00));
}
