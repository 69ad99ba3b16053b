//! RTTY (asynchronous FSK) transmitter.
//!
//! This module provides [`RttyTransmitter`], an 8-N-1 asynchronous serial
//! framer that keys a radio between two fixed tones through a pair of digital
//! outputs: one selects the mark tone, the other the space tone.
//!
//! Each character goes out as a start bit (space), eight data bits LSB first
//! and one or two stop bits (mark). When the buffer is empty the line idles at
//! mark. There is no bit-stuffing and no checksum at this layer; framing is
//! purely structural.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use habtx::modem::Modem;
//! use habtx::rtty::{RttyConfig, RttyTransmitter};
//!
//! # let mark = Pin::new(&[PinTransaction::set(PinState::High)]);
//! # let space = Pin::new(&[PinTransaction::set(PinState::Low)]);
//! # let enable = Pin::new(&[PinTransaction::set(PinState::Low), PinTransaction::set(PinState::High)]);
//! let mut rtty = RttyTransmitter::new(mark, space, enable, RttyConfig::default());
//! rtty.enable(true);
//! assert!(rtty.try_submit("$$CALL,1\n".into()).is_ok());
//! // rtty.tick() is now called once per bit period by a timer interrupt
//! # rtty.mark.done();
//! # rtty.space.done();
//! # rtty.enable.done();
//! ```

use embedded_hal::digital::{OutputPin, PinState};

use crate::buffer::TxBuffer;
use crate::error::Error;
use crate::modem::Modem;
use crate::timer::samples_per_bit;

/// Number of stop bits closing each character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum StopBits {
    /// 8-N-1.
    #[default]
    One,
    /// 8-N-2, easier for receivers to resynchronise at low baud rates.
    Two,
}

impl StopBits {
    fn count(self) -> u8 {
        match self {
            StopBits::One => 1,
            StopBits::Two => 2,
        }
    }
}

/// Static configuration of an [`RttyTransmitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct RttyConfig {
    /// Number of `tick()` calls per bit. `1` when the timer runs at the baud rate.
    pub ticks_per_bit: u16,
    /// Stop bits per character.
    pub stop_bits: StopBits,
    /// Drive the enable output LOW to switch the radio on.
    pub enable_inverted: bool,
}

impl Default for RttyConfig {
    fn default() -> Self {
        Self {
            ticks_per_bit: 1,
            stop_bits: StopBits::One,
            enable_inverted: false,
        }
    }
}

impl RttyConfig {
    /// Builds a configuration for a timer ticking at `tick_hz`.
    ///
    /// # Errors
    /// [`Error::TickRate`] if `tick_hz` is not a whole multiple of `baud`.
    pub fn from_rates(tick_hz: u32, baud: u32, stop_bits: StopBits) -> Result<Self, Error> {
        Ok(Self {
            ticks_per_bit: samples_per_bit(tick_hz, baud)?,
            stop_bits,
            enable_inverted: false,
        })
    }
}

/// Which part of a character is currently on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum RttyState {
    /// Nothing to send; the line rests at mark.
    #[default]
    Idle,
    /// Start bit (space).
    Start,
    /// Data bit `n` (0 = least significant).
    Data(u8),
    /// Stop bit `n` (mark).
    Stop(u8),
}

/// A tick-driven 8-N-1 RTTY transmitter.
///
/// ## Type Parameters
///
/// - `MARK`: output selecting the mark (upper) tone
/// - `SPACE`: output selecting the space (lower) tone
/// - `EN`: output gating the transmitter stage
///
/// ## Notes
///
/// - Call [`tick()`](Modem::tick) from a timer interrupt at
///   `baud * ticks_per_bit` Hz. The transmitter runs continuously; when there
///   is nothing to send it holds mark.
/// - The buffer is released as soon as its last byte is loaded into the shift
///   register, so [`is_busy()`](Modem::is_busy) turns false while that last
///   character is still on the line.
#[derive(Debug)]
pub struct RttyTransmitter<MARK, SPACE, EN>
where
    MARK: OutputPin,
    SPACE: OutputPin,
    EN: OutputPin,
{
    /// Mark tone output
    pub mark: MARK,
    /// Space tone output
    pub space: SPACE,
    /// Output stage enable
    pub enable: EN,
    config: RttyConfig,
    enabled: bool,
    state: RttyState,
    shift: u8,
    tick_counter: u16,
    buf: Option<TxBuffer>,

    /// Counter of messages whose last byte has been taken from the buffer.
    pub tx_good: u16,
}

impl<MARK, SPACE, EN> RttyTransmitter<MARK, SPACE, EN>
where
    MARK: OutputPin,
    SPACE: OutputPin,
    EN: OutputPin,
{
    /// Creates a transmitter with the line at mark and the output stage off.
    pub fn new(mark: MARK, space: SPACE, enable: EN, config: RttyConfig) -> Self {
        let mut tx = Self {
            mark,
            space,
            enable,
            config,
            enabled: true,
            state: RttyState::Idle,
            shift: 0,
            tick_counter: 0,
            buf: None,
            tx_good: 0,
        };
        tx.write_bit(true);
        tx.enable(false);
        tx
    }

    fn write_bit(&mut self, bit: bool) {
        let _ = self.mark.set_state(PinState::from(bit));
        let _ = self.space.set_state(PinState::from(!bit));
    }

    /// Switches the output stage on or off.
    pub fn enable(&mut self, on: bool) {
        let level = if self.config.enable_inverted { !on } else { on };
        let _ = self.enable.set_state(PinState::from(level));
        self.enabled = on;
    }

    /// Whether the output stage is switched on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The part of the character currently on the line.
    pub fn state(&self) -> RttyState {
        self.state
    }

    /// Takes the next byte of the current message, releasing the buffer once
    /// it is drained.
    fn load_next(&mut self) -> RttyState {
        let Some(buf) = self.buf.as_mut() else {
            return RttyState::Idle;
        };
        let Some(byte) = buf.next_byte() else {
            self.buf = None;
            return RttyState::Idle;
        };
        if buf.remaining() == 0 {
            self.buf = None;
            self.tx_good = self.tx_good.wrapping_add(1);
            trace!("rtty: buffer drained");
        }
        self.shift = byte;
        RttyState::Start
    }

    /// Moves to the next bit of the frame and drives it onto the outputs.
    ///
    /// Called once per bit period, not once per tick.
    fn transmit_bit(&mut self) {
        self.state = match self.state {
            RttyState::Idle => self.load_next(),
            RttyState::Start => RttyState::Data(0),
            RttyState::Data(7) => RttyState::Stop(0),
            RttyState::Data(n) => RttyState::Data(n + 1),
            RttyState::Stop(n) if n + 1 < self.config.stop_bits.count() => RttyState::Stop(n + 1),
            RttyState::Stop(_) => self.load_next(),
        };
        let bit = match self.state {
            RttyState::Idle | RttyState::Stop(_) => true,
            RttyState::Start => false,
            RttyState::Data(n) => (self.shift >> n) & 1 != 0,
        };
        self.write_bit(bit);
    }
}

impl<MARK, SPACE, EN> Modem for RttyTransmitter<MARK, SPACE, EN>
where
    MARK: OutputPin,
    SPACE: OutputPin,
    EN: OutputPin,
{
    fn tick(&mut self) {
        // The line advances only every `ticks_per_bit` ticks
        self.tick_counter += 1;
        if self.tick_counter >= self.config.ticks_per_bit {
            self.tick_counter = 0;
            self.transmit_bit();
        }
    }

    fn try_submit(&mut self, buf: TxBuffer) -> Result<(), TxBuffer> {
        if self.is_busy() {
            return Err(buf);
        }
        if buf.remaining() > 0 {
            debug!("rtty: sending {} bytes", buf.remaining());
            self.buf = Some(buf);
        }
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.buf.as_ref().map_or(0, TxBuffer::remaining)
    }

    fn is_active(&self) -> bool {
        self.buf.is_some() || self.state != RttyState::Idle
    }
}
