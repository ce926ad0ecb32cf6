//! Loopback on the simulated SSP1 block
//!
//! MOSI (p5) is wired back to MISO (p6), so every word clocked out comes
//! straight back. Shows single writes, buffer transfers at two widths and
//! an embedded-hal driver running on the same facade.

use spi_master::{BusArbiter, Hertz, Spi, SpiResult, SpiTransport};
use spi_sim::lpc::board::{P5, P6, P7};
use spi_sim::SimSpi;

/// Reads a block of bytes after a command byte, the way most
/// register-style SPI devices are driven
fn read_block<B>(bus: &mut B, command: u8, out: &mut [u8]) -> Result<(), B::Error>
where
    B: embedded_hal::spi::SpiBus<u8>,
{
    bus.write(&[command])?;
    bus.read(out)?;
    bus.flush()
}

fn main() -> SpiResult<()> {
    let bus = BusArbiter::new(SimSpi::spi1());
    let mut spi = Spi::new(&bus, Some(P5), Some(P6), P7)?;
    println!("spi {} on {:?}", spi.id(), spi.pins());

    spi.frequency(Hertz::khz(400))?;
    let (sclk, divider) = bus.with_peripheral(|sim| (sim.frequency(), sim.divider()));
    println!("sclk {:?} (divider {:?})", sclk, divider);

    let echo = spi.write(0xA5)?;
    println!("write 0xA5 -> {:#04x}", echo);

    let mut bytes = *b"loopback";
    spi.transfer(&mut bytes)?;
    println!("transfer -> {:?}", core::str::from_utf8(&bytes).unwrap_or("?"));

    spi.format(16, 3)?;
    let mut words = [0x1234u16, 0xBEEF, 0x0F0F];
    spi.transfer(&mut words)?;
    println!("16-bit mode 3 -> {:04x?}", words);

    spi.format(8, 0)?;
    let mut block = [0u8; 4];
    read_block(&mut spi, 0x9F, &mut block)?;
    println!("read_block(0x9F) -> {:02x?}", block);

    println!(
        "{} frames, last {:?}",
        bus.with_peripheral(|sim| sim.frames()),
        bus.with_peripheral(|sim| sim.last_sent())
    );
    Ok(())
}
