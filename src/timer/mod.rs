//! Timer and tick-loop utilities for the transmitters.
//!
//! Logic for setting up the modem tick. This employs two approaches: an interrupt service
//! routine using `critical_section::with` (`timer-isr` feature), or a busy-loop delay timer
//! (`delay-loop` feature).
//!
//! Contains helpers for polling- and ISR-based scheduling, including:
//! - `compute_ocr_value`: runtime compare-match value for a CTC timer
//! - `const_ocr_value`: compile-time compare-match value
//! - `pwm_sample_rate`: sample rate of a free-running fast PWM timer
//! - `samples_per_bit`: start-up check that a tick rate suits a baud rate
//! - `run_tick_loop`, `transmit_blocking`: delay-driven loops (feature `delay-loop`)
//! - `global_tick`, `global_submit` and `tick_modem!()`: interrupt-based wrappers
//! (feature `timer-isr`)
//!
//! Common CTC settings for RTTY at 16 MHz: (For use with `compute_ocr_value`)
//!
//! | PRESCALER | BAUD | OCR value |
//! |-----------|------|-----------|
//! |      1024 |   50 |       312 |
//! |       256 |  300 |       207 |
//! |        64 |  300 |       832 |
//!
//! The AFSK modem is normally ticked from the overflow of an 8-bit fast PWM
//! timer whose compare register is the audio output, so its tick rate is
//! `f_cpu / prescaler / 256`.

use libm::round;

use crate::error::Error;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg_attr(feature = "delay-loop", allow(unused_imports))]
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// Counts in one period of an 8-bit timer.
pub const TIMER8_PERIOD: u32 = 256;

/// Computes the compare-match value for an AVR timer in CTC mode
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 8, 64, 256, 1024)
/// - `rate_hz`: desired interrupt rate in Hz (e.g., the RTTY baud rate)
///
/// # Returns
/// - OCR value for OCRnA (rounds to nearest integer)
pub fn compute_ocr_value(f_cpu: u32, prescaler: u32, rate_hz: u32) -> u16 {
    let counts = f_cpu as f64 / prescaler as f64 / rate_hz as f64;
    (round(counts) as u16).saturating_sub(1)
}

/// Compile-time compare-match value calculator
///
/// Truncates rather than rounds, as integer division in a C macro would.
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 8, 64, 256, 1024)
/// - `rate_hz`: desired interrupt rate in Hz
///
/// # Returns
/// - OCR value for OCRnA
pub const fn const_ocr_value(f_cpu: u32, prescaler: u32, rate_hz: u32) -> u16 {
    (f_cpu / prescaler / rate_hz).saturating_sub(1) as u16
}

/// Sample rate of a free-running fast PWM timer, i.e. its overflow rate.
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler
/// - `period`: counts per timer period ([`TIMER8_PERIOD`] for an 8-bit timer)
pub const fn pwm_sample_rate(f_cpu: u32, prescaler: u32, period: u32) -> u32 {
    f_cpu / prescaler / period
}

/// Checks that `tick_hz` yields a whole number of ticks per bit at `baud`.
///
/// Any remainder would skew every bit, so it is rejected rather than rounded.
///
/// # Returns
/// - `Ok(n)`: ticks per bit
/// - `Err(Error::TickRate)`: zero rates, a tick rate below the baud rate, a
///   remainder, or more than `u16::MAX` ticks per bit
pub fn samples_per_bit(tick_hz: u32, baud: u32) -> Result<u16, Error> {
    let err = Error::TickRate { tick_hz, baud };
    if baud == 0 || tick_hz < baud || tick_hz % baud != 0 {
        return Err(err);
    }
    u16::try_from(tick_hz / baud).map_err(|_| err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocr_values_for_rtty() {
        assert_eq!(compute_ocr_value(16_000_000, 1024, 50), 312);
        assert_eq!(compute_ocr_value(16_000_000, 256, 300), 207);
        assert_eq!(const_ocr_value(16_000_000, 1024, 50), 311);
        assert_eq!(const_ocr_value(16_000_000, 64, 300), 832);
    }

    #[test]
    fn test_pwm_sample_rate() {
        assert_eq!(pwm_sample_rate(14_745_600, 1, TIMER8_PERIOD), 57_600);
        assert_eq!(samples_per_bit(57_600, 1_200), Ok(48));
    }

    #[test]
    fn test_samples_per_bit_rejects_drifting_rates() {
        let rate = pwm_sample_rate(16_000_000, 1, TIMER8_PERIOD);
        assert_eq!(
            samples_per_bit(rate, 1_200),
            Err(Error::TickRate {
                tick_hz: 62_500,
                baud: 1_200
            })
        );
        assert!(samples_per_bit(1_200, 0).is_err());
        assert!(samples_per_bit(600, 1_200).is_err());
        assert!(samples_per_bit(50 * 70_000, 50).is_err());
    }
}
