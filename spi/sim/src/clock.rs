//! SSP-style clock divider
//!
//! SCLK = PCLK / (prescaler * divider), with an even prescaler in 2..=254
//! and a divider in 1..=255.

use spi_core::Hertz;

/// Smallest prescaler the block accepts
pub const MIN_PRESCALER: u32 = 2;

/// Largest prescaler the block accepts
pub const MAX_PRESCALER: u32 = 254;

/// Largest post-prescaler divider (SCR + 1)
pub const MAX_DIVIDER: u32 = 255;

/// Prescaler/divider pair programmed into the block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockDivider {
    prescaler: u8,
    divider: u8,
}

impl ClockDivider {
    /// Pick the smallest prescaler whose rounded divider fits.
    ///
    /// Requests faster than PCLK / 2 saturate at divider 1. Returns `None`
    /// for a zero rate or one too slow to reach.
    pub fn for_frequency(pclk: Hertz, hz: Hertz) -> Option<Self> {
        let hz = hz.to_hz();
        if hz == 0 {
            return None;
        }

        (MIN_PRESCALER..=MAX_PRESCALER)
            .step_by(2)
            .find_map(|prescaler| {
                let prescale_hz = pclk.to_hz() / prescaler;
                let divider = (prescale_hz + hz / 2) / hz;

                (divider <= MAX_DIVIDER).then(|| Self {
                    prescaler: prescaler as u8,
                    divider: divider.max(1) as u8,
                })
            })
    }

    /// Clock prescale register value
    pub const fn prescaler(self) -> u8 {
        self.prescaler
    }

    /// Post-prescaler divider
    pub const fn divider(self) -> u8 {
        self.divider
    }

    /// Serial clock rate register value (divider - 1)
    pub const fn scr(self) -> u8 {
        self.divider - 1
    }

    /// Rate produced from `pclk`
    pub const fn actual(self, pclk: Hertz) -> Hertz {
        Hertz(pclk.to_hz() / (self.prescaler as u32 * self.divider as u32))
    }
}
