//! Per-instance bus configuration

use crate::{Format, Hertz};

/// SPI configuration saved by each master instance and re-applied to the
/// peripheral whenever that instance takes over the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    pub format: Format,
    pub frequency: Hertz,
}

impl SpiConfig {
    /// 8 bits, mode 0, 1 MHz
    pub const DEFAULT: SpiConfig = SpiConfig {
        format: Format::DEFAULT,
        frequency: Hertz::DEFAULT,
    };
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
