//! Format and configuration tests for spi-core

use spi_core::{Format, Hertz, Mode, SpiConfig};

#[test]
fn test_default_config() {
    let config = SpiConfig::default();
    assert_eq!(config.format.bits(), 8);
    assert_eq!(config.format.mode(), Some(Mode::Mode0));
    assert_eq!(config.frequency, Hertz::hz(1_000_000));
}

#[test]
fn test_format_valid_range() {
    for bits in 4..=16 {
        for mode in 0..=3 {
            let format = Format::new(bits, mode);
            assert!(format.is_valid());
            assert_eq!(format.bits(), bits);
            assert_eq!(format.raw_mode(), mode);
        }
    }
}

#[test]
fn test_format_invalid_range() {
    assert!(!Format::new(3, 0).is_valid());
    assert!(!Format::new(17, 0).is_valid());
    assert!(!Format::new(8, 4).is_valid());
}

#[test]
fn test_format_with_mode() {
    let format = Format::with_mode(12, Mode::Mode2);
    assert_eq!(format.raw_mode(), 2);
    assert_eq!(format.mask(), 0x0FFF);
}
