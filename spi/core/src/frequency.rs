//! Bus clock frequency

use core::fmt;

/// A clock frequency expressed in hertz.
// Do not implement From<u32>, callers should spell out the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hertz(pub u32);

impl Hertz {
    /// Default SCLK frequency (1 MHz)
    pub const DEFAULT: Hertz = Hertz::mhz(1);

    /// Frequency in hertz
    pub const fn hz(hz: u32) -> Self {
        Self(hz)
    }

    /// Frequency in kilohertz, saturating at `u32::MAX` Hz
    pub const fn khz(khz: u32) -> Self {
        Self(khz.saturating_mul(1_000))
    }

    /// Frequency in megahertz, saturating at `u32::MAX` Hz
    pub const fn mhz(mhz: u32) -> Self {
        Self(mhz.saturating_mul(1_000_000))
    }

    /// Raw value in hertz
    pub const fn to_hz(self) -> u32 {
        self.0
    }
}

impl Default for Hertz {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Hertz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}
