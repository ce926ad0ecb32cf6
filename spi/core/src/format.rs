//! Frame format and clock mode

use core::fmt;
use embedded_hal::spi::{Phase, Polarity};

/// SPI mode (clock polarity and phase)
///
/// ```text
/// mode | POL PHA
/// -----+--------
///   0  |  0   0
///   1  |  0   1
///   2  |  1   0
///   3  |  1   1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// CPOL=0, CPHA=0
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Decode a raw mode number, `None` outside 0..=3
    pub const fn from_raw(mode: u8) -> Option<Self> {
        match mode {
            0 => Some(Mode::Mode0),
            1 => Some(Mode::Mode1),
            2 => Some(Mode::Mode2),
            3 => Some(Mode::Mode3),
            _ => None,
        }
    }

    /// Raw mode number
    pub const fn raw(self) -> u8 {
        match self {
            Mode::Mode0 => 0,
            Mode::Mode1 => 1,
            Mode::Mode2 => 2,
            Mode::Mode3 => 3,
        }
    }

    /// Clock polarity (POL bit)
    pub const fn polarity(self) -> Polarity {
        match self {
            Mode::Mode0 | Mode::Mode1 => Polarity::IdleLow,
            Mode::Mode2 | Mode::Mode3 => Polarity::IdleHigh,
        }
    }

    /// Clock phase (PHA bit)
    pub const fn phase(self) -> Phase {
        match self {
            Mode::Mode0 | Mode::Mode2 => Phase::CaptureOnFirstTransition,
            Mode::Mode1 | Mode::Mode3 => Phase::CaptureOnSecondTransition,
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        mode.raw()
    }
}

impl From<Mode> for embedded_hal::spi::Mode {
    fn from(mode: Mode) -> Self {
        embedded_hal::spi::Mode {
            polarity: mode.polarity(),
            phase: mode.phase(),
        }
    }
}

impl From<embedded_hal::spi::Mode> for Mode {
    fn from(mode: embedded_hal::spi::Mode) -> Self {
        match (mode.polarity, mode.phase) {
            (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => Mode::Mode0,
            (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => Mode::Mode1,
            (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => Mode::Mode2,
            (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => Mode::Mode3,
        }
    }
}

/// Data transmission format: bits per frame and clock mode.
///
/// Values are stored exactly as given. Range checking (4..=16 bits, mode
/// 0..=3) is left to the peripheral that gets programmed with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Format {
    bits: u8,
    mode: u8,
}

impl Format {
    /// Smallest frame width supported by common SPI blocks
    pub const MIN_BITS: u8 = 4;

    /// Largest frame width supported by common SPI blocks
    pub const MAX_BITS: u8 = 16;

    /// 8 bits, mode 0
    pub const DEFAULT: Format = Format { bits: 8, mode: 0 };

    /// Create a format from a frame width and raw mode number
    pub const fn new(bits: u8, mode: u8) -> Self {
        Self { bits, mode }
    }

    /// Create a format from a frame width and decoded mode
    pub const fn with_mode(bits: u8, mode: Mode) -> Self {
        Self { bits, mode: mode.raw() }
    }

    /// Bits per frame
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Raw mode number as configured
    pub const fn raw_mode(self) -> u8 {
        self.mode
    }

    /// Decoded mode, `None` if the raw number is out of range
    pub const fn mode(self) -> Option<Mode> {
        Mode::from_raw(self.mode)
    }

    /// Check both fields against the common hardware range
    pub const fn is_valid(self) -> bool {
        self.bits >= Self::MIN_BITS && self.bits <= Self::MAX_BITS && self.mode <= 3
    }

    /// Mask selecting the low `bits` of a frame
    pub const fn mask(self) -> u32 {
        if self.bits >= 32 {
            u32::MAX
        } else {
            (1u32 << self.bits) - 1
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits, mode {}", self.bits, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_pol_pha_table() {
        let table = [
            (0, Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            (1, Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            (2, Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            (3, Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        ];

        for (raw, pol, pha) in table {
            let mode = Mode::from_raw(raw).unwrap();
            assert_eq!(mode.polarity(), pol);
            assert_eq!(mode.phase(), pha);
            assert_eq!(mode.raw(), raw);
        }
        assert_eq!(Mode::from_raw(4), None);
    }

    #[test]
    fn test_embedded_hal_mode_conversion() {
        for raw in 0..4 {
            let mode = Mode::from_raw(raw).unwrap();
            let ehal: embedded_hal::spi::Mode = mode.into();
            assert_eq!(Mode::from(ehal), mode);
        }
        assert_eq!(Mode::from(embedded_hal::spi::MODE_3), Mode::Mode3);
    }

    #[test]
    fn test_format_mask() {
        assert_eq!(Format::new(4, 0).mask(), 0x000F);
        assert_eq!(Format::new(8, 0).mask(), 0x00FF);
        assert_eq!(Format::new(16, 0).mask(), 0xFFFF);
        assert_eq!(Format::new(32, 0).mask(), u32::MAX);
        assert_eq!(Format::new(0, 0).mask(), 0);
    }

    #[test]
    fn test_format_keeps_out_of_range_values() {
        let format = Format::new(20, 7);
        assert_eq!(format.bits(), 20);
        assert_eq!(format.raw_mode(), 7);
        assert_eq!(format.mode(), None);
        assert!(!format.is_valid());
    }
}
