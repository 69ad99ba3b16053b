//! CRC-16 accumulators.
//!
//! Two variants are needed:
//!
//! - [`crc_ccitt_update`]: bit-reflected CRC-16/CCITT (polynomial `0x8408`),
//!   seeded with `0xFFFF`. Its ones complement is the AX.25 frame check
//!   sequence.
//! - [`crc_xmodem_update`]: non-reflected CRC-16 (polynomial `0x1021`), used
//!   for the checksum at the end of a telemetry sentence.

use crate::consts::AX25_FCS_LEN;

/// Seed for both CRC variants as used on air.
pub const CRC_SEED: u16 = 0xffff;

/// Folds one byte into a reflected CRC-16/CCITT accumulator.
pub fn crc_ccitt_update(crc: u16, data: u8) -> u16 {
    let mut d = data ^ lo8(crc) as u8;
    d ^= d << 4;
    let d = u16::from(d);
    ((d << 8) | hi8(crc)) ^ (d >> 4) ^ (d << 3)
}

/// Folds one byte into a CRC-16/XMODEM accumulator.
pub fn crc_xmodem_update(crc: u16, data: u8) -> u16 {
    let mut crc = crc ^ (u16::from(data) << 8);
    for _ in 0..8 {
        crc = if crc & 0x8000 != 0 {
            (crc << 1) ^ 0x1021
        } else {
            crc << 1
        };
    }
    crc
}

/// Computes the AX.25 frame check sequence over `bytes`.
///
/// # Returns
/// The ones complement of the CRC, low byte first, ready to append.
pub fn ax25_fcs(bytes: &[u8]) -> [u8; AX25_FCS_LEN] {
    let crc = bytes
        .iter()
        .fold(CRC_SEED, |crc, &b| crc_ccitt_update(crc, b));
    [!lo8(crc) as u8, !hi8(crc) as u8]
}

pub(crate) fn lo8(x: u16) -> u16 {
    x & 0xff
}

pub(crate) fn hi8(x: u16) -> u16 {
    x >> 8
}
