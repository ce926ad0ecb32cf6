//! Bus ownership tests for spi-master

use spi_master::{
    BusArbiter, Format, HalfDuplexSpi, Hertz, Spi, SpiConfig, SpiError, SpiPins, SpiTransport,
};
use spi_sim::lpc::board::{P11, P12, P13, P5, P6, P7};
use spi_sim::{BusEvent, SimSpi, EVENT_DEPTH};

const PINS: SpiPins = SpiPins::full_duplex(P5, P6, P7);

fn programmed(bus: &BusArbiter<SimSpi>) -> (Format, Option<Hertz>) {
    bus.with_peripheral(|sim| (sim.format(), sim.frequency()))
}

#[test]
fn test_second_instance_reprograms_before_transfer() {
    let bus = BusArbiter::new(SimSpi::spi1());
    let mut first = Spi::with_pins(&bus, PINS).unwrap();
    let mut second = Spi::with_pins(&bus, PINS).unwrap();

    first.format(8, 0).unwrap();
    first.frequency(Hertz::mhz(1)).unwrap();
    second.format(16, 3).unwrap();
    second.frequency(Hertz::khz(500)).unwrap();
    assert!(second.is_owner());

    first.write(0x12).unwrap();
    assert!(first.is_owner());
    assert_eq!(programmed(&bus), (first.config().format, Some(Hertz::mhz(1))));

    second.write(0x1234).unwrap();
    assert!(second.is_owner());
    assert!(!first.is_owner());
    assert_eq!(programmed(&bus), (second.config().format, Some(Hertz::khz(500))));

    // The hand-off wrote format then frequency
    let tail: Vec<BusEvent> = bus.with_peripheral(|sim| {
        let events: Vec<BusEvent> = sim.events().copied().collect();
        events[events.len() - 2..].to_vec()
    });
    assert_eq!(
        tail,
        [
            BusEvent::FormatSet(second.config().format),
            BusEvent::FrequencySet {
                requested: Hertz::khz(500),
                actual: Hertz::khz(500),
            },
        ]
    );
}

#[test]
fn test_owner_does_not_reprogram() {
    let bus = BusArbiter::new(SimSpi::spi1());
    let mut spi = Spi::with_pins(&bus, PINS).unwrap();
    let writes = bus.with_peripheral(|sim| sim.format_writes());

    let mut words = [0u8; 8];
    spi.transfer(&mut words).unwrap();
    spi.write(0xFF).unwrap();

    assert_eq!(bus.with_peripheral(|sim| sim.format_writes()), writes);
}

#[test]
fn test_explicit_acquire() {
    let bus = BusArbiter::new(SimSpi::spi1());
    let first = Spi::with_pins(&bus, PINS).unwrap();
    let second = Spi::with_config(
        &bus,
        PINS,
        SpiConfig {
            format: Format::new(12, 1),
            frequency: Hertz::khz(250),
        },
    )
    .unwrap();

    assert_eq!(first.acquire(), Ok(true));
    assert_eq!(first.acquire(), Ok(false));
    assert_eq!(second.acquire(), Ok(true));
    assert_eq!(bus.owner(), Some(second.id()));
}

#[test]
fn test_dropped_owner_forces_reprogram() {
    let bus = BusArbiter::new(SimSpi::spi1());
    let survivor = Spi::with_pins(&bus, PINS).unwrap();
    {
        let _temp = Spi::with_pins(&bus, PINS).unwrap();
    }

    assert_eq!(bus.owner(), None);
    assert_eq!(survivor.acquire(), Ok(true));
}

#[test]
fn test_half_duplex_shares_bus_with_standard_master() {
    let bus = BusArbiter::new(SimSpi::spi1());
    let mut standard = Spi::with_pins(&bus, PINS).unwrap();
    let mut half = HalfDuplexSpi::new(&bus, P5, P6, P7).unwrap();
    standard.format(16, 0).unwrap();

    half.slave_format(4);
    assert_eq!(half.write(0x5A), Ok(0xF));
    assert_eq!(bus.with_peripheral(|sim| sim.format().bits()), 8);

    assert_eq!(standard.write(0xCAFE), Ok(0xCAFE));
    assert_eq!(bus.with_peripheral(|sim| sim.format().bits()), 16);
}

#[test]
fn test_read_only_instance_keeps_full_duplex_loopback() {
    let bus = BusArbiter::new(SimSpi::spi0());
    let mut full = Spi::new(&bus, Some(P11), Some(P12), P13).unwrap();
    let mut reader = Spi::new(&bus, None, Some(P12), P13).unwrap();

    assert_eq!(full.write(0x42), Ok(0x42));
    assert_eq!(reader.write(0x00), Ok(0x00));
    assert_eq!(full.write(0x81), Ok(0x81));
}

#[test]
fn test_failed_construction_leaves_bus_usable() {
    let bus = BusArbiter::new(SimSpi::spi0());
    let mut full = Spi::new(&bus, Some(P11), Some(P12), P13).unwrap();

    let rejected = Spi::with_config(
        &bus,
        SpiPins::new(None, Some(P12), P13),
        SpiConfig {
            format: Format::new(20, 0),
            frequency: Hertz::mhz(1),
        },
    );
    assert_eq!(rejected.err(), Some(SpiError::InvalidFormat));
    assert_eq!(bus.owner(), None);

    assert_eq!(full.write(0x42), Ok(0x42));
    assert!(full.is_owner());
}

#[test]
fn test_every_handoff_reprograms_past_history_depth() {
    let bus = BusArbiter::new(SimSpi::spi1());
    let mut first = Spi::with_pins(&bus, PINS).unwrap();
    let mut second = Spi::with_pins(&bus, PINS).unwrap();
    second.format(16, 2).unwrap();
    let start = bus.with_peripheral(|sim| sim.format_writes());

    let rounds = EVENT_DEPTH as u32;
    for _ in 0..rounds {
        first.write(0x5A).unwrap();
        second.write(0xA5A5).unwrap();
    }

    assert_eq!(bus.with_peripheral(|sim| sim.format_writes()), start + 2 * rounds);
    assert_eq!(bus.with_peripheral(|sim| sim.events().count()), EVENT_DEPTH);
}
