//! RTTY telemetry sentences.
//!
//! The flight computer sends one line per position fix over RTTY:
//!
//! ```text
//! $$CALL,count,hh:mm:ss,lat,lon,alt*CRC
//! ```
//!
//! `lat`/`lon` are decimal degrees with five decimals, `alt` whole metres.
//! `CRC` is CRC-16/XMODEM with a 0xFFFF seed over everything between `$$`
//! and `*`, as four upper-case hex digits.

use core::fmt::{self, Write};

use crate::buffer::TxBuffer;
use crate::crc::{CRC_SEED, crc_xmodem_update};
use crate::error::Error;

/// A position fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Position {
    /// Latitude in 1e-7 degrees, north positive.
    pub lat: i32,
    /// Longitude in 1e-7 degrees, east positive.
    pub lon: i32,
    /// Height above mean sea level in millimetres.
    pub alt: i32,
}

/// UTC time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Time {
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-60
    pub second: u8,
}

/// Something that can report a position and time, usually a GPS receiver.
pub trait GpsSource {
    /// Current fix, or `None` if there is no valid one.
    fn position(&mut self) -> Option<Position>;

    /// Current UTC time, or `None` if unknown.
    fn time(&mut self) -> Option<Time>;
}

/// Degrees in 1e-7 units, shown with five decimals.
struct Degrees(i32);

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:05}", sign, abs / 10_000_000, abs % 10_000_000 / 100)
    }
}

/// Forwards to a formatter while checksumming what passes through.
struct Checksummed<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    crc: u16,
}

impl Write for Checksummed<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.crc = s.bytes().fold(self.crc, crc_xmodem_update);
        self.f.write_str(s)
    }
}

/// One telemetry line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// Payload callsign.
    pub callsign: &'a str,
    /// Sentence counter.
    pub count: u32,
    /// Time of the fix.
    pub time: Time,
    /// The fix.
    pub position: Position,
}

impl<'a> Sentence<'a> {
    /// Formats a sentence into a transmit buffer.
    ///
    /// # Errors
    /// [`Error::CapacityExceeded`] if the line is longer than the buffer.
    pub fn format(
        callsign: &'a str,
        count: u32,
        time: Time,
        position: Position,
    ) -> Result<TxBuffer, Error> {
        TxBuffer::format(format_args!(
            "{}",
            Sentence {
                callsign,
                count,
                time,
                position,
            }
        ))
    }

    /// Reads a fix from `gps` and formats it.
    ///
    /// # Errors
    /// - [`Error::NoFix`] if either the position or the time is unavailable;
    ///   send [`Sentence::no_fix`] instead
    /// - [`Error::CapacityExceeded`] as [`Sentence::format`]
    pub fn from_source<G: GpsSource>(
        callsign: &'a str,
        count: u32,
        gps: &mut G,
    ) -> Result<TxBuffer, Error> {
        let Some(position) = gps.position() else {
            warn!("telemetry: no position");
            return Err(Error::NoFix);
        };
        let Some(time) = gps.time() else {
            warn!("telemetry: no time");
            return Err(Error::NoFix);
        };
        Self::format(callsign, count, time, position)
    }

    /// The line sent in place of a sentence when there is no fix.
    ///
    /// # Errors
    /// [`Error::CapacityExceeded`] if the callsign makes the line too long.
    pub fn no_fix(callsign: &str) -> Result<TxBuffer, Error> {
        TxBuffer::format(format_args!("$${},No or invalid GPS response\n", callsign))
    }
}

impl fmt::Display for Sentence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$$")?;
        let mut body = Checksummed {
            f: &mut *f,
            crc: CRC_SEED,
        };
        write!(
            body,
            "{},{},{:02}:{:02}:{:02},{},{},{}",
            self.callsign,
            self.count,
            self.time.hour,
            self.time.minute,
            self.time.second,
            Degrees(self.position.lat),
            Degrees(self.position.lon),
            self.position.alt / 1000,
        )?;
        let crc = body.crc;
        writeln!(f, "*{:04X}", crc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TxData;

    fn bytes(buf: &TxBuffer) -> &[u8] {
        match buf.data() {
            TxData::Ram(v) => v.as_slice(),
            TxData::Flash(s) => *s,
        }
    }

    struct FakeGps {
        position: Option<Position>,
        time: Option<Time>,
    }

    impl GpsSource for FakeGps {
        fn position(&mut self) -> Option<Position> {
            self.position
        }

        fn time(&mut self) -> Option<Time> {
            self.time
        }
    }

    const FIX: Position = Position {
        lat: 524_012_345,
        lon: -17_654_321,
        alt: 12_345_678,
    };

    const NOON: Time = Time {
        hour: 12,
        minute: 3,
        second: 9,
    };

    #[test]
    fn test_degrees() {
        let s = format!("{} {} {}", Degrees(-5_000_000), Degrees(0), Degrees(1_800_000_000));
        assert_eq!(s, "-0.50000 0.00000 180.00000");
    }

    #[test]
    fn test_sentence_layout() {
        let buf = Sentence::format("HAB", 42, NOON, FIX).unwrap();
        let line = bytes(&buf);
        let star = line.iter().position(|&b| b == b'*').unwrap();
        assert_eq!(&line[..star], b"$$HAB,42,12:03:09,52.40123,-1.76543,12345");

        let crc = line[2..star]
            .iter()
            .fold(CRC_SEED, |crc, &b| crc_xmodem_update(crc, b));
        let expected = format!("*{:04X}\n", crc);
        assert_eq!(&line[star..], expected.as_bytes());
    }

    #[test]
    fn test_checksum_value() {
        let buf = Sentence::format("A", 0, Time::default(), Position::default()).unwrap();
        assert_eq!(bytes(&buf), b"$$A,0,00:00:00,0.00000,0.00000,0*05A1\n");
    }

    #[test]
    fn test_from_source_requires_a_fix() {
        let mut gps = FakeGps {
            position: Some(FIX),
            time: Some(NOON),
        };
        assert_eq!(
            Sentence::from_source("HAB", 1, &mut gps),
            Sentence::format("HAB", 1, NOON, FIX)
        );

        gps.time = None;
        assert_eq!(Sentence::from_source("HAB", 1, &mut gps), Err(Error::NoFix));
        gps.position = None;
        gps.time = Some(NOON);
        assert_eq!(Sentence::from_source("HAB", 1, &mut gps), Err(Error::NoFix));
    }

    #[test]
    fn test_no_fix_line() {
        let buf = Sentence::no_fix("HAB").unwrap();
        assert_eq!(bytes(&buf), b"$$HAB,No or invalid GPS response\n");
    }

    #[test]
    fn test_overlong_callsign_is_rejected() {
        let call = "X".repeat(120);
        assert!(matches!(
            Sentence::format(&call, 0, NOON, FIX),
            Err(Error::CapacityExceeded { .. })
        ));
    }
}
