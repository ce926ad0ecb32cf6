#![no_std]
#![forbid(unsafe_code)]

//! # SPI Sim
//!
//! A software model of an SSP-style SPI block implementing
//! [`SpiPeripheral`]. It resolves pins against the LPC176x tables,
//! computes real prescaler/divider pairs, masks frames to the programmed
//! width and answers from either a loopback wire or a scripted slave.
//!
//! The model keeps a short history of everything the master programmed so
//! tests can observe bus hand-offs.

use heapless::{Deque, HistoryBuffer, Vec};
use spi_api::{PeripheralId, PinMapEntry, SpiPeripheral, SpiPinMap};
use spi_core::{Format, Hertz, SpiError, SpiPins, SpiResult};

pub mod clock;
pub mod lpc;

pub use clock::ClockDivider;

/// Default peripheral clock (LPC1768 core clock)
pub const DEFAULT_PCLK: Hertz = Hertz::mhz(96);

/// Scripted responses that can be queued ahead
pub const RESPONSE_DEPTH: usize = 64;

/// Transmitted frames kept for inspection
pub const SENT_DEPTH: usize = 64;

/// Programming events kept for inspection
pub const EVENT_DEPTH: usize = 32;

/// What sits on the other end of the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlaveModel {
    /// MISO wired to MOSI; with MOSI unconnected the line idles high
    Loopback,
    /// Responses come from the queue, zero once it runs dry
    Scripted,
}

/// Register-level change observed by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusEvent {
    /// Pins routed to the block
    Connected(SpiPins),
    /// Frame format programmed
    FormatSet(Format),
    /// Clock divider programmed
    FrequencySet { requested: Hertz, actual: Hertz },
}

/// Simulated SSP block
pub struct SimSpi {
    id: PeripheralId,
    pin_map: &'static SpiPinMap,
    pclk: Hertz,
    slave: SlaveModel,
    pins: Option<SpiPins>,
    routed: Vec<PinMapEntry, 3>,
    format: Format,
    divider: Option<ClockDivider>,
    latency: u8,
    polls_left: u8,
    in_flight: bool,
    busy_polls: u32,
    frames: u32,
    format_writes: u32,
    responses: Deque<u32, RESPONSE_DEPTH>,
    sent: HistoryBuffer<u32, SENT_DEPTH>,
    events: HistoryBuffer<BusEvent, EVENT_DEPTH>,
}

impl SimSpi {
    /// Model block `id` of the LPC176x with a loopback slave
    pub const fn new(id: PeripheralId) -> Self {
        Self {
            id,
            pin_map: &lpc::PIN_MAP,
            pclk: DEFAULT_PCLK,
            slave: SlaveModel::Loopback,
            pins: None,
            routed: Vec::new(),
            format: Format::DEFAULT,
            divider: None,
            latency: 0,
            polls_left: 0,
            in_flight: false,
            busy_polls: 0,
            frames: 0,
            format_writes: 0,
            responses: Deque::new(),
            sent: HistoryBuffer::new(),
            events: HistoryBuffer::new(),
        }
    }

    /// SSP0 with a loopback slave
    pub const fn spi0() -> Self {
        Self::new(lpc::SPI_0)
    }

    /// SSP1 with a loopback slave
    pub const fn spi1() -> Self {
        Self::new(lpc::SPI_1)
    }

    /// Use a different slave model
    pub fn with_slave(mut self, slave: SlaveModel) -> Self {
        self.slave = slave;
        self
    }

    /// Report busy `polls` times before completing each frame
    pub fn with_latency(mut self, polls: u8) -> Self {
        self.latency = polls;
        self
    }

    /// Use a different peripheral clock
    pub fn with_pclk(mut self, pclk: Hertz) -> Self {
        self.pclk = pclk;
        self
    }

    /// Queue a response for the scripted slave.
    ///
    /// Hands the frame back if the queue is full.
    pub fn queue_response(&mut self, frame: u32) -> Result<(), u32> {
        self.responses.push_back(frame)
    }

    /// Queue several responses, stopping at the first that does not fit
    pub fn queue_responses(&mut self, frames: &[u32]) -> Result<(), u32> {
        frames.iter().try_for_each(|&frame| self.queue_response(frame))
    }

    /// Scripted responses not yet consumed
    pub fn pending_responses(&self) -> usize {
        self.responses.len()
    }

    /// Currently routed pins, merged over every connect
    pub fn pins(&self) -> Option<SpiPins> {
        self.pins
    }

    /// Pin-mux rows applied by the last connect
    pub fn routed(&self) -> &[PinMapEntry] {
        &self.routed
    }

    /// Format currently programmed
    pub fn format(&self) -> Format {
        self.format
    }

    /// Divider currently programmed
    pub fn divider(&self) -> Option<ClockDivider> {
        self.divider
    }

    /// SCLK rate currently produced
    pub fn frequency(&self) -> Option<Hertz> {
        self.divider.map(|div| div.actual(self.pclk))
    }

    /// Frames completed since reset
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Times `exchange` reported busy
    pub fn busy_polls(&self) -> u32 {
        self.busy_polls
    }

    /// Transmitted frames, oldest first
    pub fn sent(&self) -> impl Iterator<Item = u32> + '_ {
        self.sent.oldest_ordered().copied()
    }

    /// Most recently transmitted frame
    pub fn last_sent(&self) -> Option<u32> {
        self.sent.recent().copied()
    }

    /// Programming history, oldest first
    pub fn events(&self) -> impl Iterator<Item = &BusEvent> + '_ {
        self.events.oldest_ordered()
    }

    /// Most recent programming event
    pub fn last_event(&self) -> Option<&BusEvent> {
        self.events.recent()
    }

    /// Formats programmed since reset
    pub fn format_writes(&self) -> u32 {
        self.format_writes
    }

    fn respond(&mut self, frame: u32) -> u32 {
        let mask = self.format.mask();
        let Some(pins) = self.pins else {
            return 0;
        };

        if !pins.can_receive() {
            // MISO not sampled
            return 0;
        }

        match self.slave {
            SlaveModel::Loopback if pins.can_transmit() => frame,
            SlaveModel::Loopback => mask,
            SlaveModel::Scripted => self.responses.pop_front().unwrap_or(0) & mask,
        }
    }
}

impl SpiPeripheral for SimSpi {
    fn id(&self) -> PeripheralId {
        self.id
    }

    fn connect(&mut self, pins: &SpiPins) -> SpiResult<()> {
        if self.pin_map.resolve(pins)? != self.id {
            return Err(SpiError::PinMapping);
        }

        // Signals left unconnected keep whatever an earlier instance routed
        let merged = match self.pins {
            Some(routed) => SpiPins::new(
                pins.mosi.or(routed.mosi),
                pins.miso.or(routed.miso),
                pins.sclk,
            ),
            None => *pins,
        };

        self.routed.clear();
        for entry in self.pin_map.pinout(&merged) {
            // Three signals at most
            let _ = self.routed.push(entry);
        }
        self.pins = Some(merged);
        self.events.write(BusEvent::Connected(*pins));
        Ok(())
    }

    fn set_format(&mut self, format: Format) -> SpiResult<()> {
        if !format.is_valid() {
            return Err(SpiError::InvalidFormat);
        }

        self.format = format;
        self.format_writes += 1;
        self.events.write(BusEvent::FormatSet(format));
        Ok(())
    }

    fn set_frequency(&mut self, hz: Hertz) -> SpiResult<Hertz> {
        let divider =
            ClockDivider::for_frequency(self.pclk, hz).ok_or(SpiError::InvalidFrequency)?;
        let actual = divider.actual(self.pclk);

        self.divider = Some(divider);
        self.events.write(BusEvent::FrequencySet {
            requested: hz,
            actual,
        });
        Ok(actual)
    }

    fn exchange(&mut self, frame: u32) -> nb::Result<u32, SpiError> {
        if !self.in_flight {
            self.in_flight = true;
            self.polls_left = self.latency;
        }

        if self.polls_left > 0 {
            self.polls_left -= 1;
            self.busy_polls += 1;
            return Err(nb::Error::WouldBlock);
        }

        self.in_flight = false;
        let frame = frame & self.format.mask();
        self.sent.write(frame);
        self.frames += 1;

        Ok(self.respond(frame))
    }
}
