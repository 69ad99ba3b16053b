//! Error type shared by the frame builder, buffers and transmitter setup.
//!
//! Nothing on the per-tick path returns an error; every variant here is
//! reported either while a message is being prepared or once when a
//! transmitter is configured.

/// Errors reported while building messages or configuring a transmitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error {
    /// The message does not fit the fixed-capacity buffer it is built into.
    /// Nothing is handed to a transmitter when this is returned.
    #[error("message needs {needed} bytes but the buffer holds {capacity}")]
    CapacityExceeded {
        /// Bytes the complete message would occupy.
        needed: usize,
        /// Bytes available in the buffer.
        capacity: usize,
    },
    /// A callsign was empty, longer than six characters, or not printable ASCII.
    #[error("callsign must be 1 to 6 printable ASCII characters")]
    InvalidCallsign,
    /// An SSID outside `0..=15`.
    #[error("SSID {0} is outside 0..=15")]
    InvalidSsid(u8),
    /// The tick rate does not divide into a whole number of ticks per bit.
    #[error("tick rate {tick_hz} Hz is not a whole multiple of {baud} baud")]
    TickRate {
        /// Configured tick (sample) rate.
        tick_hz: u32,
        /// Requested baud rate.
        baud: u32,
    },
    /// A tone cannot be represented by the 16-bit phase accumulator at this
    /// tick rate.
    #[error("{freq} Hz cannot be synthesised at {tick_hz} Hz")]
    ToneRate {
        /// Configured tick (sample) rate.
        tick_hz: u32,
        /// Tone that does not fit.
        freq: u32,
    },
    /// The position or time source had no valid fix.
    #[error("no valid GPS fix")]
    NoFix,
}
