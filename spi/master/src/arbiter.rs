//! Ownership of a shared SPI peripheral
//!
//! Several [`Spi`](crate::Spi) instances may drive the same physical block,
//! each with its own format and clock. The arbiter records which instance
//! programmed the block last; any other instance reprograms it with its own
//! settings before exchanging data. Last acquirer wins: there is no queueing
//! and no explicit release short of dropping the instance.

use core::cell::RefCell;
use core::fmt;
use critical_section::Mutex;
use spi_api::SpiPeripheral;
use spi_core::{SpiConfig, SpiPins, SpiResult};

/// Handle identifying one master instance on an arbiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InstanceId(u32);

impl InstanceId {
    /// Raw handle value
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

struct Bus<P> {
    peripheral: P,
    owner: Option<InstanceId>,
    next_id: u32,
}

impl<P: SpiPeripheral> Bus<P> {
    fn acquire(&mut self, id: InstanceId, config: &SpiConfig) -> SpiResult<bool> {
        if self.owner == Some(id) {
            return Ok(false);
        }

        // Not owned until both writes succeed
        let previous = self.owner.take();
        self.peripheral.set_format(config.format)?;
        let actual = self.peripheral.set_frequency(config.frequency)?;
        spi_core::trace!(
            "reprogrammed {=u8} bits mode {=u8} at {=u32} Hz",
            config.format.bits(),
            config.format.raw_mode(),
            actual.to_hz()
        );

        if let Some(previous) = previous {
            spi_core::debug!("bus handed from {=u32} to {=u32}", previous.raw(), id.raw());
        }
        self.owner = Some(id);
        Ok(true)
    }
}

/// Shared SPI block plus the identity of its current owner.
///
/// State lives behind a [`critical_section::Mutex`] so an arbiter can be
/// placed in a `static` and shared by instances created anywhere.
pub struct BusArbiter<P> {
    bus: Mutex<RefCell<Bus<P>>>,
}

impl<P> BusArbiter<P> {
    /// Take ownership of `peripheral`; nobody owns the bus yet
    pub const fn new(peripheral: P) -> Self {
        Self {
            bus: Mutex::new(RefCell::new(Bus {
                peripheral,
                owner: None,
                next_id: 0,
            })),
        }
    }

    /// Instance whose configuration is currently programmed
    pub fn owner(&self) -> Option<InstanceId> {
        critical_section::with(|cs| self.bus.borrow_ref(cs).owner)
    }

    /// Forget the current owner so the next acquire reprograms the block
    pub fn invalidate(&self) {
        critical_section::with(|cs| {
            self.bus.borrow_ref_mut(cs).owner = None;
        });
    }

    /// Give up ownership if `id` holds it
    pub fn release(&self, id: InstanceId) {
        critical_section::with(|cs| {
            let mut bus = self.bus.borrow_ref_mut(cs);
            if bus.owner == Some(id) {
                bus.owner = None;
            }
        });
    }

    /// Run `f` with exclusive access to the peripheral.
    ///
    /// Changing the block's configuration here bypasses ownership tracking;
    /// call [`invalidate`](Self::invalidate) afterwards if you do. `f` must
    /// not call back into this arbiter, the bus is already borrowed.
    pub fn with_peripheral<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        critical_section::with(|cs| f(&mut self.bus.borrow_ref_mut(cs).peripheral))
    }
}

impl<P: SpiPeripheral> BusArbiter<P> {
    /// Route `pins` to the block and issue a handle for a new instance
    pub fn attach(&self, pins: &SpiPins) -> SpiResult<InstanceId> {
        critical_section::with(|cs| {
            let mut bus = self.bus.borrow_ref_mut(cs);

            if let Err(err) = bus.peripheral.connect(pins) {
                spi_core::warn!("pin assignment rejected by {=u8}", bus.peripheral.id().index());
                return Err(err);
            }

            let id = InstanceId(bus.next_id);
            bus.next_id = bus.next_id.wrapping_add(1);
            Ok(id)
        })
    }

    /// Make `id` the owner, reprogramming the block with `config` if the
    /// bus was owned by anyone else.
    ///
    /// Returns whether the block was reprogrammed. On failure nobody owns
    /// the bus, so the next acquire tries again.
    pub fn acquire(&self, id: InstanceId, config: &SpiConfig) -> SpiResult<bool> {
        critical_section::with(|cs| self.bus.borrow_ref_mut(cs).acquire(id, config))
    }

    /// Reprogram the block with `config` unconditionally and hand it to `id`
    pub fn reconfigure(&self, id: InstanceId, config: &SpiConfig) -> SpiResult<()> {
        critical_section::with(|cs| {
            let mut bus = self.bus.borrow_ref_mut(cs);
            bus.owner = None;
            bus.acquire(id, config).map(|_| ())
        })
    }

    /// Acquire for `id`, then exchange one frame, blocking until it completes
    pub fn exchange(&self, id: InstanceId, config: &SpiConfig, frame: u32) -> SpiResult<u32> {
        critical_section::with(|cs| {
            let mut bus = self.bus.borrow_ref_mut(cs);
            bus.acquire(id, config)?;
            nb::block!(bus.peripheral.exchange(frame))
        })
    }
}
