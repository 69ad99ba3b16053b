//! AX.25 over Bell-202 AFSK transmitter.
//!
//! This module provides [`AfskTransmitter`], a software modem that turns a
//! pre-built AX.25 frame (see [`crate::frame`]) into audio, one sample per
//! `tick()`, written to a PWM output.
//!
//! ## Tone synthesis
//!
//! A 16-bit phase accumulator is advanced every sample by one of two step
//! values, selecting the 1200 Hz mark or the 2200 Hz space tone. The top
//! 9 bits index a 512-entry sine table generated at build time. Switching
//! tones only changes the step, so the phase never jumps: the output is
//! continuous-phase FSK.
//!
//! ## HDLC framing
//!
//! Every `samples_per_bit` samples one bit is processed:
//!
//! - a 1 bit holds the current tone, a 0 bit toggles it (NRZI)
//! - after five consecutive 1 bits of frame content a 0 is inserted
//! - flag bytes (`0x7E`) are sent unstuffed
//!
//! A transmission is: 10 leading flags, the frame, 11 trailing flags. The
//! radio is then unkeyed and the tick handler goes quiet until the next
//! submission.
//!
//! ## Example
//!
//! ```rust,ignore
//! use habtx::afsk::{AfskConfig, AfskTransmitter};
//! use habtx::frame::{Address, build_frame};
//! use habtx::modem::Modem;
//!
//! let mut afsk = AfskTransmitter::new(pwm, radio_enable, AfskConfig::new(57_600))?;
//! let frame = build_frame(
//!     Address::new("APRS", 0)?,
//!     Address::new("N0CALL", 11)?,
//!     Some(Address::new("WIDE2", 1)?),
//!     None,
//!     format_args!("!/{}", position),
//! )?;
//! afsk.try_submit(frame.into())?;
//! // afsk.tick() is now called from the PWM overflow interrupt
//! ```

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use crate::buffer::TxBuffer;
use crate::consts::{
    AFSK_MARK_HZ, AFSK_SPACE_HZ, AX25_BAUD, AX25_FLAG, AX25_REST_BYTES, AX25_TRAIL_RELOAD,
    HDLC_MAX_ONES, PHASE_FRAC_BITS, PHASE_INDEX_MASK, SINE_TABLE_LEN,
};
use crate::error::Error;
use crate::modem::Modem;
use crate::timer::samples_per_bit;

include!(concat!(env!("OUT_DIR"), "/sine_table.rs"));

/// Phase increment per sample for a tone of `freq_hz` at `tick_hz`.
///
/// The result is in units of 1/128 of a table entry.
pub const fn phase_step(freq_hz: u32, tick_hz: u32) -> u32 {
    (((SINE_TABLE_LEN as u64 * freq_hz as u64) << PHASE_FRAC_BITS) / tick_hz as u64) as u32
}

/// Steps at or above this give two or fewer samples per tone period.
const MAX_STEP: u32 = (SINE_TABLE_LEN << PHASE_FRAC_BITS) / 2;

/// Overflow rate of an 8-bit PWM timer clocked at 14.7456 MHz.
pub const DEFAULT_TICK_HZ: u32 = 57_600;

/// The tone currently being synthesised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Tone {
    /// 1200 Hz
    Mark,
    /// 2200 Hz
    Space,
}

/// Static configuration of an [`AfskTransmitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct AfskConfig {
    /// Rate at which `tick()` is called, i.e. the audio sample rate.
    pub tick_hz: u32,
    /// Drive the enable output LOW to key the radio.
    pub enable_inverted: bool,
}

impl AfskConfig {
    /// Configuration for a tick rate of `tick_hz`, radio keyed by a HIGH output.
    pub const fn new(tick_hz: u32) -> Self {
        Self {
            tick_hz,
            enable_inverted: false,
        }
    }
}

/// Everything the tick handler carries from one sample to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ModemState {
    /// Phase accumulator; top bits index the sine table.
    phase: u16,
    /// Current phase increment, one of the two tone steps.
    step: u16,
    /// Samples emitted in the current bit period.
    sample: u16,
    /// Flag countdown: preamble above `AX25_REST_BYTES`, postamble below.
    rest: u8,
    /// Byte being shifted out, LSB first.
    byte: u8,
    /// Bits of `byte` already sent.
    bit: u8,
    /// Consecutive content 1 bits; negative while sending flags.
    ones: i8,
}

impl ModemState {
    const fn idle(step_mark: u16) -> Self {
        Self {
            phase: 0,
            step: step_mark,
            sample: 0,
            rest: AX25_REST_BYTES * 2,
            byte: 0,
            bit: 7,
            ones: 0,
        }
    }
}

/// A tick-driven AX.25 / Bell-202 AFSK transmitter.
///
/// ## Type Parameters
///
/// - `OUT`: PWM channel producing the audio; 8-bit samples are written as a
///   fraction of 255 of its full duty cycle
/// - `EN`: output keying the radio
///
/// ## Notes
///
/// - [`tick()`](Modem::tick) must be called at exactly `tick_hz`; it returns
///   immediately while no transmission is active.
/// - [`is_busy()`](Modem::is_busy) is false once the last frame byte has been
///   taken, while the trailing flags may still be sounding; see
///   [`is_active()`](Modem::is_active).
#[derive(Debug)]
pub struct AfskTransmitter<OUT, EN>
where
    OUT: SetDutyCycle,
    EN: OutputPin,
{
    /// Audio output
    pub out: OUT,
    /// Radio enable (PTT)
    pub enable: EN,
    enable_inverted: bool,
    samples_per_bit: u16,
    step_mark: u16,
    step_xor: u16,
    active: bool,
    state: ModemState,
    buf: Option<TxBuffer>,

    /// Counter of transmissions completed through the trailing flags.
    pub tx_good: u16,
}

impl<OUT, EN> AfskTransmitter<OUT, EN>
where
    OUT: SetDutyCycle,
    EN: OutputPin,
{
    /// Creates an idle transmitter with the radio unkeyed.
    ///
    /// # Errors
    /// - [`Error::TickRate`] if `tick_hz` is not a whole multiple of 1200
    /// - [`Error::ToneRate`] if a tone would get two or fewer samples per
    ///   period at `tick_hz`
    pub fn new(out: OUT, enable: EN, config: AfskConfig) -> Result<Self, Error> {
        let samples_per_bit = samples_per_bit(config.tick_hz, AX25_BAUD).inspect_err(|_| {
            warn!("afsk: tick rate {} Hz rejected", config.tick_hz);
        })?;
        let step = |freq: u32| {
            let step = phase_step(freq, config.tick_hz);
            if step >= MAX_STEP {
                warn!("afsk: {} Hz not representable at {} Hz", freq, config.tick_hz);
                return Err(Error::ToneRate {
                    tick_hz: config.tick_hz,
                    freq,
                });
            }
            Ok(step as u16)
        };
        let step_mark = step(AFSK_MARK_HZ)?;
        let step_space = step(AFSK_SPACE_HZ)?;

        let mut tx = Self {
            out,
            enable,
            enable_inverted: config.enable_inverted,
            samples_per_bit,
            step_mark,
            step_xor: step_mark ^ step_space,
            active: false,
            state: ModemState::idle(step_mark),
            buf: None,
            tx_good: 0,
        };
        tx.key(false);
        Ok(tx)
    }

    fn key(&mut self, on: bool) {
        let level = if self.enable_inverted { !on } else { on };
        let _ = self.enable.set_state(PinState::from(level));
    }

    /// The tone the synthesiser is currently producing.
    pub fn tone(&self) -> Tone {
        if self.state.step == self.step_mark {
            Tone::Mark
        } else {
            Tone::Space
        }
    }

    /// Samples per bit period at the configured tick rate.
    pub fn samples_per_bit(&self) -> u16 {
        self.samples_per_bit
    }

    /// Takes the next content byte, or `None` while flags are due.
    fn take_content_byte(&mut self) -> Option<u8> {
        if self.state.rest > AX25_REST_BYTES {
            return None;
        }
        let buf = self.buf.as_mut()?;
        let byte = buf.next_byte()?;
        if buf.remaining() == 0 {
            self.buf = None;
            self.state.rest = AX25_TRAIL_RELOAD;
        }
        Some(byte)
    }

    /// Ends the transmission: unkeys the radio and resets the modem state.
    fn finish(&mut self) {
        self.key(false);
        self.active = false;
        self.state = ModemState::idle(self.step_mark);
        self.tx_good = self.tx_good.wrapping_add(1);
        debug!("afsk: transmission complete");
    }

    /// Processes one bit period.
    fn transmit_bit(&mut self) {
        // Zero-bit insertion
        if self.state.ones == HDLC_MAX_ONES {
            self.state.step ^= self.step_xor;
            self.state.ones = 0;
            return;
        }

        // Load the next byte
        self.state.bit += 1;
        if self.state.bit == 8 {
            self.state.bit = 0;
            match self.take_content_byte() {
                Some(byte) => {
                    self.state.byte = byte;
                    if self.state.ones < 0 {
                        self.state.ones = 0;
                    }
                }
                None => {
                    self.state.rest -= 1;
                    if self.state.rest == 0 {
                        self.finish();
                        return;
                    }
                    self.state.byte = AX25_FLAG;
                    self.state.ones = -1;
                }
            }
        }

        if self.state.byte & 1 != 0 {
            // 1: the tone stays the same
            if self.state.ones >= 0 {
                self.state.ones += 1;
            }
        } else {
            // 0: toggle the tone
            self.state.step ^= self.step_xor;
            if self.state.ones >= 0 {
                self.state.ones = 0;
            }
        }
        self.state.byte >>= 1;
    }
}

impl<OUT, EN> Modem for AfskTransmitter<OUT, EN>
where
    OUT: SetDutyCycle,
    EN: OutputPin,
{
    fn tick(&mut self) {
        if !self.active {
            return;
        }

        let index = (self.state.phase >> PHASE_FRAC_BITS) & PHASE_INDEX_MASK;
        let sample = SINE_TABLE[usize::from(index)];
        let _ = self
            .out
            .set_duty_cycle_fraction(u16::from(sample), u16::from(u8::MAX));
        self.state.phase = self.state.phase.wrapping_add(self.state.step);

        self.state.sample += 1;
        if self.state.sample < self.samples_per_bit {
            return;
        }
        self.state.sample = 0;
        self.transmit_bit();
    }

    fn try_submit(&mut self, buf: TxBuffer) -> Result<(), TxBuffer> {
        if self.is_busy() {
            return Err(buf);
        }
        if buf.remaining() == 0 {
            return Ok(());
        }
        debug!("afsk: sending {} byte frame", buf.remaining());
        self.buf = Some(buf);
        if !self.active {
            self.active = true;
            self.key(true);
        }
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.buf.as_ref().map_or(0, TxBuffer::remaining)
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

impl Default for AfskConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_HZ)
    }
}
