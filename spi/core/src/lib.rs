#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # SPI Core
//!
//! Core types shared by every layer of the SPI master stack: data words,
//! frame formats and clock modes, bus frequencies, pin assignments and the
//! common error type. Peripheral backends and the master facade build on
//! these without depending on each other.

use core::fmt;

pub mod config;
pub mod format;
pub mod frequency;
pub mod log;
pub mod pins;
pub mod word;

pub use config::*;
pub use format::*;
pub use frequency::*;
pub use pins::*;
pub use word::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the SPI stack
pub type SpiResult<T> = Result<T, SpiError>;

/// Error types for SPI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiError {
    /// Pins do not map onto a single SPI peripheral
    PinMapping,
    /// Frame width or clock mode rejected by the peripheral
    InvalidFormat,
    /// Requested clock rate cannot be produced by the peripheral
    InvalidFrequency,
    /// Echoed word on a shared data line differs from the word sent
    BusConflict,
    /// Received word was not read before the next one arrived
    Overrun,
    /// Another master drove the bus
    ModeFault,
    /// Operation not supported by this peripheral
    NotSupported,
    /// Vendor-specific error code
    Vendor(i32),
}

impl fmt::Display for SpiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpiError::PinMapping => write!(f, "SPI pinout mapping failed"),
            SpiError::InvalidFormat => write!(f, "SPI format error"),
            SpiError::InvalidFrequency => write!(f, "SPI frequency not reachable"),
            SpiError::BusConflict => write!(f, "SPI bus conflict on shared data line"),
            SpiError::Overrun => write!(f, "SPI receive overrun"),
            SpiError::ModeFault => write!(f, "SPI mode fault"),
            SpiError::NotSupported => write!(f, "operation not supported"),
            SpiError::Vendor(code) => write!(f, "vendor error code: {}", code),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SpiError {}

#[cfg(feature = "defmt")]
impl defmt::Format for SpiError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SpiError::PinMapping => defmt::write!(fmt, "PinMapping"),
            SpiError::InvalidFormat => defmt::write!(fmt, "InvalidFormat"),
            SpiError::InvalidFrequency => defmt::write!(fmt, "InvalidFrequency"),
            SpiError::BusConflict => defmt::write!(fmt, "BusConflict"),
            SpiError::Overrun => defmt::write!(fmt, "Overrun"),
            SpiError::ModeFault => defmt::write!(fmt, "ModeFault"),
            SpiError::NotSupported => defmt::write!(fmt, "NotSupported"),
            SpiError::Vendor(code) => defmt::write!(fmt, "Vendor({=i32})", code),
        }
    }
}

impl embedded_hal::spi::Error for SpiError {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        use embedded_hal::spi::ErrorKind;

        match self {
            SpiError::Overrun => ErrorKind::Overrun,
            SpiError::ModeFault | SpiError::BusConflict => ErrorKind::ModeFault,
            SpiError::InvalidFormat => ErrorKind::FrameFormat,
            _ => ErrorKind::Other,
        }
    }
}
