//! APRS payload helpers for the AX.25 frame builder.
//!
//! Everything here implements [`Display`](fmt::Display) so it can be passed
//! straight to [`crate::frame::build_frame`] through `format_args!` and is
//! formatted in place, without an intermediate buffer.
//!
//! ```rust
//! use habtx::aprs::position_report;
//! use habtx::frame::{Address, build_frame};
//!
//! let report = position_report(495_000_000, -727_500_000, 1_000_000, None);
//! let frame = build_frame(
//!     Address::new("APRS", 0)?,
//!     Address::new("N0CALL", 11)?,
//!     Some(Address::new("WIDE2", 1)?),
//!     None,
//!     format_args!("{}", report),
//! )?;
//! let body = &frame[3 * 7 + 2..frame.len() - 2];
//! assert_eq!(body, b"!/5L!!<*e7O   /A=003280");
//! # Ok::<(), habtx::Error>(())
//! ```

use core::fmt::{self, Write};

use crate::encoding::base91_encode;

/// Bytes in a compressed position: table, 4 lat, 4 lon, symbol, course/speed, type.
pub const COMPRESSED_POSITION_LEN: usize = 13;

/// Analog channels carried in a telemetry field.
pub const TELEMETRY_CHANNELS: usize = 5;

/// Primary symbol table.
pub const SYMBOL_TABLE_PRIMARY: u8 = b'/';

/// Balloon symbol (`/O`).
pub const SYMBOL_BALLOON: u8 = b'O';

/// Encodes a compressed position body `/YYYYXXXX$csT`.
///
/// `lat` and `lon` are in 1e-7 degrees, north and east positive. Course,
/// speed and compression type are left blank.
pub fn compressed_position(
    lat: i32,
    lon: i32,
    symbol_table: u8,
    symbol: u8,
) -> [u8; COMPRESSED_POSITION_LEN] {
    let y = (900_000_000 - i64::from(lat)) * 380_926 / 10_000_000;
    let x = (1_800_000_000 + i64::from(lon)) * 190_463 / 10_000_000;

    let mut out = [b' '; COMPRESSED_POSITION_LEN];
    out[0] = symbol_table;
    out[1..5].copy_from_slice(&base91_encode::<4>(y.clamp(0, i64::from(u32::MAX)) as u32));
    out[5..9].copy_from_slice(&base91_encode::<4>(x.clamp(0, i64::from(u32::MAX)) as u32));
    out[9] = symbol;
    out
}

/// Converts millimetres to whole feet.
pub fn mm_to_feet(mm: i32) -> i32 {
    (i64::from(mm) * 10_000 / 3_048_000) as i32
}

fn write_ascii(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    bytes.iter().try_for_each(|&b| f.write_char(char::from(b)))
}

/// A base-91 telemetry field `|ssaabbccddee|`.
///
/// The sequence number and each value are two base-91 digits, so they wrap
/// modulo 8281. At most [`TELEMETRY_CHANNELS`] values are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryField<'a> {
    seq: u16,
    values: &'a [u16],
}

/// Builds a telemetry field from a sequence number and analog values.
pub fn telemetry_field(seq: u16, values: &[u16]) -> TelemetryField<'_> {
    TelemetryField { seq, values }
}

impl fmt::Display for TelemetryField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('|')?;
        write_ascii(f, &base91_encode::<2>(u32::from(self.seq)))?;
        for &v in self.values.iter().take(TELEMETRY_CHANNELS) {
            write_ascii(f, &base91_encode::<2>(u32::from(v)))?;
        }
        f.write_char('|')
    }
}

/// An APRS position report with a balloon symbol and altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionReport<'a> {
    lat: i32,
    lon: i32,
    alt_mm: i32,
    telemetry: Option<TelemetryField<'a>>,
}

/// Builds a position report: `!` + compressed position + `/A=nnnnnn` (feet)
/// + an optional telemetry field.
///
/// `lat` and `lon` are in 1e-7 degrees, `alt_mm` in millimetres.
pub fn position_report(
    lat: i32,
    lon: i32,
    alt_mm: i32,
    telemetry: Option<TelemetryField<'_>>,
) -> PositionReport<'_> {
    PositionReport {
        lat,
        lon,
        alt_mm,
        telemetry,
    }
}

impl fmt::Display for PositionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('!')?;
        write_ascii(
            f,
            &compressed_position(self.lat, self.lon, SYMBOL_TABLE_PRIMARY, SYMBOL_BALLOON),
        )?;
        let feet = mm_to_feet(self.alt_mm).clamp(-99_999, 999_999);
        write!(f, "/A={:06}", feet)?;
        if let Some(t) = &self.telemetry {
            write!(f, "{}", t)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(args: fmt::Arguments<'_>) -> String {
        args.to_string()
    }

    #[test]
    fn test_compressed_position() {
        // 49.5 N, 72.75 W
        let pos = compressed_position(495_000_000, -727_500_000, b'/', b'>');
        assert_eq!(&pos, b"/5L!!<*e7>   ");
    }

    #[test]
    fn test_compressed_position_extremes() {
        let north_west = compressed_position(900_000_000, -1_800_000_000, b'/', b'O');
        assert_eq!(&north_west[1..9], b"!!!!!!!!");
        let south = compressed_position(-900_000_000, 0, b'/', b'O');
        assert_eq!(
            crate::encoding::base91_decode(&south[1..5]),
            Some(380_926 * 180)
        );
    }

    #[test]
    fn test_altitude_in_feet() {
        assert_eq!(mm_to_feet(1_000_000), 3280);
        assert_eq!(mm_to_feet(30_480_000), 100_000);
        assert_eq!(mm_to_feet(-3_048), -10);
    }

    #[test]
    fn test_telemetry_field() {
        let b = render(format_args!("{}", telemetry_field(1, &[0, 90, 91])));
        assert_eq!(b.as_bytes(), b"|!\"!!!{\"!|");

        let b = render(format_args!("{}", telemetry_field(8281, &[1, 2, 3, 4, 5, 6])));
        assert_eq!(b.as_bytes().len(), 2 + 2 + 5 * 2);
        assert_eq!(&b.as_bytes()[1..3], b"!!");
    }

    #[test]
    fn test_position_report() {
        let report = position_report(495_000_000, -727_500_000, 1_000_000, None);
        let b = render(format_args!("{}", report));
        assert_eq!(b.as_bytes(), b"!/5L!!<*e7O   /A=003280");

        let with = position_report(
            495_000_000,
            -727_500_000,
            -3_048,
            Some(telemetry_field(0, &[90])),
        );
        let b = render(format_args!("{}", with));
        assert_eq!(b.as_bytes(), b"!/5L!!<*e7O   /A=-00010|!!!{|");
    }
}
