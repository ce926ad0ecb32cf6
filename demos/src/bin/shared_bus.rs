//! Several devices sharing one SSP block
//!
//! A flash chip (8-bit, mode 0, 1 MHz), an ADC (12-bit, mode 1, 250 kHz) and a
//! three-wire sensor (half-duplex, 4-bit reply) all sit on SSP1. Each handle
//! keeps its own format and clock; the arbiter reprograms the block whenever
//! ownership changes hands.

use spi_master::{BusArbiter, HalfDuplexSpi, Hertz, Spi, SpiResult, SpiTransport};
use spi_sim::lpc::board::{P5, P6, P7};
use spi_sim::{BusEvent, SimSpi};

static BUS: BusArbiter<SimSpi> = BusArbiter::new(SimSpi::spi1());

fn main() -> SpiResult<()> {
    let mut flash = Spi::new(&BUS, Some(P5), Some(P6), P7)?;

    let mut adc = Spi::new(&BUS, Some(P5), Some(P6), P7)?;
    adc.format(12, 1)?;
    adc.frequency(Hertz::khz(250))?;

    let mut sensor = HalfDuplexSpi::new(&BUS, P5, P6, P7)?;
    sensor.slave_format(4);

    for round in 0..2 {
        let id = flash.write(0x9F)?;
        let sample = adc.write(0x0ABC)?;
        let reading = sensor.write(0x3)?;
        println!(
            "round {}: flash {:#04x}, adc {:#05x}, sensor {:#x}",
            round, id, sample, reading
        );
    }

    // Consecutive writes by the owner leave the block alone
    let before = BUS.with_peripheral(|sim| sim.format_writes());
    let mut page = [0u8; 16];
    flash.read_array(&mut page)?;
    assert_eq!(BUS.with_peripheral(|sim| sim.format_writes()), before + 1);

    println!("owner {:?}", BUS.owner());
    BUS.with_peripheral(|sim| {
        for event in sim.events() {
            match event {
                BusEvent::Connected(pins) => println!("  connect {:?}", pins),
                BusEvent::FormatSet(format) => println!("  format {}", format),
                BusEvent::FrequencySet { requested, actual } => {
                    println!("  clock {} -> {}", requested, actual)
                }
            }
        }
    });
    Ok(())
}
