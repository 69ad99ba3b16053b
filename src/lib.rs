//! # habtx
//!
//! A portable, no_std software modem for high-altitude balloon telemetry, built on
//! `embedded-hal`. Everything is generated in software, one timer tick at a time:
//!
//! - **RTTY**: asynchronous 8-N-1 (or 8-N-2) FSK, keyed through two digital outputs
//! - **APRS**: AX.25 UI frames over Bell-202 AFSK (1200 Hz mark / 2200 Hz space,
//!   1200 baud), synthesised with a phase accumulator into a PWM output
//!
//! plus the message formatting that goes with them: the AX.25 frame builder with its
//! CRC-16 frame check sequence, base-91 encoding for compressed APRS positions and
//! telemetry, and the `$$CALL,...*CRC` RTTY telemetry sentence.
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` |
//! | `delay-loop`          | Blocking tick loops driven by `embedded_hal::delay::DelayNs` |
//! | `timer-isr` (default) | Global transmitter slots shared with an ISR through `critical_section::with` |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use habtx::afsk::{AfskConfig, AfskTransmitter};
//! use habtx::aprs::position_report;
//! use habtx::frame::{Address, build_frame};
//! use habtx::timer::{GlobalModem, global_modem_init, global_modem_setup, global_submit, global_tick};
//!
//! static AFSK: GlobalModem<AfskTransmitter<Pwm, Ptt>> = global_modem_init();
//!
//! #[avr_device::interrupt(atmega328p)]
//! fn TIMER2_OVF() {
//!     global_tick(&AFSK);
//! }
//!
//! fn main() -> ! {
//!     global_modem_setup(&AFSK, AfskTransmitter::new(pwm, ptt, AfskConfig::new(57_600)).unwrap());
//!     loop {
//!         let frame = build_frame(
//!             Address::new("APRS", 0).unwrap(),
//!             Address::new("N0CALL", 11).unwrap(),
//!             Some(Address::new("WIDE2", 1).unwrap()),
//!             None,
//!             format_args!("{}", position_report(lat, lon, alt, None)),
//!         );
//!         if let Ok(frame) = frame {
//!             let _ = global_submit(&AFSK, frame.into());
//!         }
//!     }
//! }
//! ```
//!
//! Or, without interrupts, use `transmit_blocking()` with a `DelayNs` implementation:
//!
//! ```rust,ignore
//! habtx::timer::transmit_blocking(&mut rtty, &mut delay, 20_000_000, sentence);
//! ```
//!
//! ## Integration Notes
//!
//! - The RTTY transmitter is ticked at a whole multiple of its baud rate, the AFSK
//!   transmitter at its audio sample rate (a whole multiple of 1200 Hz)
//! - Each transmitter holds one message at a time; a new one is accepted once the
//!   previous message's bytes have all been taken
//! - Nothing on the tick path blocks, allocates or logs per sample
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

pub use heapless;

#[macro_use]
mod fmt;

pub mod afsk;
pub mod aprs;
pub mod buffer;
pub mod consts;
pub mod crc;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod modem;
pub mod rtty;
pub mod telemetry;
pub mod timer;
pub mod writer;

pub use error::Error;
