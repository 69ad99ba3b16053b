//! Constants used across the RTTY and AX.25/AFSK implementations.
//!
//! This module defines the protocol-wide values that are fixed for a
//! deployment: tone frequencies, the AFSK baud rate, AX.25 frame layout,
//! preamble/postamble lengths and buffer capacities.
//!
//! ## Key Concepts
//!
//! - **Tones**: Bell-202 AFSK uses 1200 Hz for mark and 2200 Hz for space.
//! - **Phase accumulator**: a 16-bit register whose top 9 bits index the
//!   512-entry sine table; the remaining 7 bits are fractional phase.
//! - **Rest bytes**: the number of HDLC flags used as preamble. The postamble
//!   is derived from the same count.
//! - **Capacities**: every buffer is fixed-size so nothing allocates.

/// Baud rate of the AX.25 AFSK link.
pub const AX25_BAUD: u32 = 1_200;

/// Mark tone (binary 1 / idle) in Hz.
pub const AFSK_MARK_HZ: u32 = 1_200;

/// Space tone in Hz.
pub const AFSK_SPACE_HZ: u32 = 2_200;

/// Number of samples in one period of the generated sine table.
///
/// Must match the table emitted by `build.rs`.
pub const SINE_TABLE_LEN: u32 = 512;

/// Fractional bits below the table index in the 16-bit phase accumulator.
pub const PHASE_FRAC_BITS: u32 = 7;

/// Mask applied to `phase >> PHASE_FRAC_BITS` to get a table index.
pub const PHASE_INDEX_MASK: u16 = (SINE_TABLE_LEN - 1) as u16;

/// Number of HDLC flag bytes sent before the frame content.
///
/// The AFSK state machine starts its rest counter at twice this value and
/// emits flags while the counter is above it.
pub const AX25_REST_BYTES: u8 = 10;

/// Value the rest counter is reloaded with when the final content byte is
/// taken from the buffer. Flags are sent until it counts down to zero.
pub const AX25_TRAIL_RELOAD: u8 = AX25_REST_BYTES + 2;

/// HDLC frame delimiter.
pub const AX25_FLAG: u8 = 0x7e;

/// AX.25 control field for an unnumbered information (UI) frame.
pub const AX25_CONTROL_UI: u8 = 0x03;

/// AX.25 protocol identifier: no layer 3 protocol.
pub const AX25_PID_NO_LAYER3: u8 = 0xf0;

/// Characters in an AX.25 callsign field (space padded).
pub const AX25_CALLSIGN_LEN: usize = 6;

/// Bytes in one encoded address (callsign + SSID byte).
pub const AX25_ADDRESS_LEN: usize = AX25_CALLSIGN_LEN + 1;

/// Largest SSID that fits the 4-bit SSID field.
pub const AX25_MAX_SSID: u8 = 15;

/// Length of the frame check sequence appended to each frame.
pub const AX25_FCS_LEN: usize = 2;

/// Default capacity of a built AX.25 frame, including the FCS.
pub const AX25_MAX_FRAME_LEN: usize = 100;

/// Consecutive content 1-bits after which a 0 is stuffed.
pub const HDLC_MAX_ONES: i8 = 5;

/// Capacity of a RAM-backed transmit buffer.
pub const TX_BUF_LEN: usize = 100;

/// Typical RTTY baud rate for balloon telemetry.
pub const RTTY_DEFAULT_BAUD: u32 = 50;

/// Offset added to each Base-91 digit to land in printable ASCII (`'!'`).
pub const BASE91_OFFSET: u8 = 33;

/// Radix of the Base-91 numeral system.
pub const BASE91_RADIX: u32 = 91;
