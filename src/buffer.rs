//! Transmit buffers handed from the application to a transmitter.
//!
//! A [`TxBuffer`] is moved into a transmitter on submission, so the producer
//! cannot touch the bytes while they are being sent. The transmitter reads it
//! front to back and drops it once the last byte has been taken. Two storage
//! modes exist:
//!
//! - [`TxData::Ram`]: a fixed-capacity `heapless::Vec`, filled at run time
//! - [`TxData::Flash`]: a `&'static [u8]`, for constant text that lives in
//!   read-only storage and is never copied

use core::fmt;

use heapless::Vec;

use crate::consts::TX_BUF_LEN;
use crate::error::Error;
use crate::writer::write_bounded;

/// Backing storage of a [`TxBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxData {
    /// Bytes copied into RAM.
    Ram(Vec<u8, TX_BUF_LEN>),
    /// Bytes in static read-only storage.
    Flash(&'static [u8]),
}

/// A message owned by a transmitter while it is being sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxBuffer {
    data: TxData,
    pos: usize,
}

impl TxBuffer {
    /// Takes ownership of a RAM vector.
    pub fn ram(bytes: Vec<u8, TX_BUF_LEN>) -> Self {
        Self {
            data: TxData::Ram(bytes),
            pos: 0,
        }
    }

    /// Copies `bytes` into a RAM buffer.
    ///
    /// # Errors
    /// [`Error::CapacityExceeded`] if `bytes` is longer than [`TX_BUF_LEN`].
    pub fn copy_from(bytes: &[u8]) -> Result<Self, Error> {
        let v = Vec::from_slice(bytes).map_err(|_| Error::CapacityExceeded {
            needed: bytes.len(),
            capacity: TX_BUF_LEN,
        })?;
        Ok(Self::ram(v))
    }

    /// Formats `args` straight into a RAM buffer.
    ///
    /// # Errors
    /// [`Error::CapacityExceeded`] if the text is longer than [`TX_BUF_LEN`].
    pub fn format(args: fmt::Arguments<'_>) -> Result<Self, Error> {
        let mut raw = Vec::new();
        // Capacity is exactly TX_BUF_LEN, so this cannot fail.
        let _ = raw.resize(TX_BUF_LEN, 0);
        let len = write_bounded(&mut raw, args)?;
        raw.truncate(len);
        Ok(Self::ram(raw))
    }

    /// Borrows constant bytes from static storage.
    pub const fn flash(bytes: &'static [u8]) -> Self {
        Self {
            data: TxData::Flash(bytes),
            pos: 0,
        }
    }

    /// Borrows a constant string from static storage.
    pub const fn flash_str(s: &'static str) -> Self {
        Self::flash(s.as_bytes())
    }

    fn bytes(&self) -> &[u8] {
        match &self.data {
            TxData::Ram(v) => v.as_slice(),
            TxData::Flash(s) => *s,
        }
    }

    /// Total length of the message.
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    /// Whether the message has no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes not yet taken by the transmitter.
    pub fn remaining(&self) -> usize {
        self.len() - self.pos
    }

    /// The storage mode of this buffer.
    pub fn data(&self) -> &TxData {
        &self.data
    }

    /// Takes the next byte, advancing the read position.
    pub(crate) fn next_byte(&mut self) -> Option<u8> {
        let b = self.bytes().get(self.pos).copied()?;
        self.pos += 1;
        Some(b)
    }
}

impl From<&'static str> for TxBuffer {
    fn from(s: &'static str) -> Self {
        Self::flash_str(s)
    }
}

impl From<Vec<u8, TX_BUF_LEN>> for TxBuffer {
    fn from(v: Vec<u8, TX_BUF_LEN>) -> Self {
        Self::ram(v)
    }
}
