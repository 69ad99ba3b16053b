//! AX.25 UI frame builder.
//!
//! Produces the byte sequence handed to [`crate::afsk::AfskTransmitter`]:
//!
//! ```text
//! | dest (7) | src (7) | path1 (7)? | path2 (7)? | 0x03 | 0xF0 | payload | FCS (2) |
//! ```
//!
//! Flags and bit stuffing are added by the modem, not here.

use core::fmt;

use heapless::Vec;

use crate::consts::{
    AX25_ADDRESS_LEN, AX25_CALLSIGN_LEN, AX25_CONTROL_UI, AX25_FCS_LEN, AX25_MAX_FRAME_LEN,
    AX25_MAX_SSID, AX25_PID_NO_LAYER3,
};
use crate::crc::ax25_fcs;
use crate::error::Error;
use crate::writer::write_bounded;

/// A frame built into the default transmit capacity.
pub type Frame = Vec<u8, AX25_MAX_FRAME_LEN>;

/// A station address: callsign and SSID.
///
/// In a digipeater path the SSID is the hop count (e.g. `WIDE2-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Address<'a> {
    callsign: &'a str,
    ssid: u8,
}

impl<'a> Address<'a> {
    /// Validates and creates an address.
    ///
    /// # Errors
    /// - [`Error::InvalidCallsign`]: empty, longer than six characters, or
    ///   containing anything but upper-case letters and digits
    /// - [`Error::InvalidSsid`]: `ssid > 15`
    pub fn new(callsign: &'a str, ssid: u8) -> Result<Self, Error> {
        if callsign.is_empty()
            || callsign.len() > AX25_CALLSIGN_LEN
            || !callsign
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(Error::InvalidCallsign);
        }
        if ssid > AX25_MAX_SSID {
            return Err(Error::InvalidSsid(ssid));
        }
        Ok(Self { callsign, ssid })
    }

    /// The callsign.
    pub fn callsign(&self) -> &'a str {
        self.callsign
    }

    /// The SSID.
    pub fn ssid(&self) -> u8 {
        self.ssid
    }
}

/// Encodes one address field.
///
/// The callsign is padded with spaces to six characters and every byte is
/// shifted left one bit. The SSID byte is `('0' + ssid) << 1`, with bit 0 set
/// when `last` marks the end of the address list.
pub fn encode_address(addr: &Address<'_>, last: bool) -> [u8; AX25_ADDRESS_LEN] {
    let mut out = [b' ' << 1; AX25_ADDRESS_LEN];
    for (o, c) in out.iter_mut().zip(addr.callsign.bytes()) {
        *o = c << 1;
    }
    out[AX25_CALLSIGN_LEN] = ((b'0' + addr.ssid) << 1) | u8::from(last);
    out
}

/// Builds a UI frame into a [`Frame`].
///
/// See [`build_frame_with_capacity`].
pub fn build_frame(
    dest: Address<'_>,
    src: Address<'_>,
    path1: Option<Address<'_>>,
    path2: Option<Address<'_>>,
    payload: fmt::Arguments<'_>,
) -> Result<Frame, Error> {
    build_frame_with_capacity(dest, src, path1, path2, payload)
}

/// Builds a UI frame with `payload` formatted in place, into a buffer of `N` bytes.
///
/// Each present address takes seven bytes, in the order given. Only the last
/// one carries the end-of-address bit.
///
/// # Errors
/// [`Error::CapacityExceeded`] when the addresses, payload and FCS do not fit
/// in `N` bytes. No partial frame is returned.
pub fn build_frame_with_capacity<const N: usize>(
    dest: Address<'_>,
    src: Address<'_>,
    path1: Option<Address<'_>>,
    path2: Option<Address<'_>>,
    payload: fmt::Arguments<'_>,
) -> Result<Vec<u8, N>, Error> {
    let addresses: [Option<Address<'_>>; 4] = [Some(dest), Some(src), path1, path2];
    let count = addresses.iter().flatten().count();

    let header = count * AX25_ADDRESS_LEN + 2;
    let mut buf = [0u8; N];
    if header + AX25_FCS_LEN > N {
        return Err(Error::CapacityExceeded {
            needed: header + AX25_FCS_LEN,
            capacity: N,
        });
    }

    for (i, addr) in addresses.iter().flatten().enumerate() {
        let at = i * AX25_ADDRESS_LEN;
        buf[at..at + AX25_ADDRESS_LEN].copy_from_slice(&encode_address(addr, i + 1 == count));
    }
    buf[header - 2] = AX25_CONTROL_UI;
    buf[header - 1] = AX25_PID_NO_LAYER3;

    let body = write_bounded(&mut buf[header..N - AX25_FCS_LEN], payload).map_err(|e| {
        warn!("frame: payload does not fit");
        match e {
            Error::CapacityExceeded { needed, .. } => Error::CapacityExceeded {
                needed: header + needed + AX25_FCS_LEN,
                capacity: N,
            },
            other => other,
        }
    })?;

    let end = header + body;
    let fcs = ax25_fcs(&buf[..end]);
    buf[end..end + AX25_FCS_LEN].copy_from_slice(&fcs);
    let len = end + AX25_FCS_LEN;
    debug!("frame: built {} bytes", len);

    Vec::from_slice(&buf[..len]).map_err(|_| Error::CapacityExceeded {
        needed: len,
        capacity: N,
    })
}
