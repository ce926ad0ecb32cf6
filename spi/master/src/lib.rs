#![no_std]
#![forbid(unsafe_code)]

//! # SPI Master
//!
//! A blocking, word-oriented SPI master on top of any [`SpiPeripheral`].
//!
//! - [`Spi`] binds a set of pins and keeps its own format and clock rate.
//! - [`BusArbiter`] owns the physical block. Masters that share a block
//!   reprogram it with their own settings whenever they take it over.
//! - [`SpiTransport`] is the capability every master variant offers;
//!   [`HalfDuplexSpi`] is the shared-data-line variant.
//! - [`Spi`] also implements [`embedded_hal::spi::SpiBus`] for `u8`, `u16`
//!   and `u32` words.
//!
//! Every operation blocks until the hardware has finished. There are no
//! timeouts: a peripheral that never completes a frame hangs the caller.
//!
//! ## Example
//! ```no_run
//! use spi_master::{BusArbiter, Spi, SpiTransport};
//! use spi_sim::{lpc::board::*, SimSpi};
//!
//! let bus = BusArbiter::new(SimSpi::spi0());
//! let mut flash = Spi::new(&bus, Some(P11), Some(P12), P13).unwrap();
//! flash.format(8, 3).unwrap();
//!
//! let mut id = [0x9Fu8, 0, 0, 0];
//! flash.transfer(&mut id).unwrap();
//! ```

pub mod arbiter;
pub mod ehal;
pub mod half_duplex;
pub mod master;
pub mod transport;

pub use arbiter::{BusArbiter, InstanceId};
pub use half_duplex::HalfDuplexSpi;
pub use master::Spi;
pub use transport::SpiTransport;

pub use spi_api::SpiPeripheral;
pub use spi_core::{Format, Hertz, Mode, PinName, SpiConfig, SpiError, SpiPins, SpiResult, Word};
