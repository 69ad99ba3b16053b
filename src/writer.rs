//! Bounded text formatting into fixed byte buffers.
//!
//! [`SliceWriter`] implements [`core::fmt::Write`] over a `&mut [u8]`. It
//! never writes past the end of the slice; instead it keeps counting how many
//! bytes the formatted text would have needed so the caller can report an
//! exact [`Error::CapacityExceeded`].

use core::fmt;

use crate::error::Error;

/// A `fmt::Write` sink over a fixed slice.
#[derive(Debug)]
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    written: usize,
    needed: usize,
}

impl<'a> SliceWriter<'a> {
    /// Wraps `buf`; nothing is written yet.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            written: 0,
            needed: 0,
        }
    }

    /// Bytes actually stored in the slice.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Bytes the formatted text needs in total.
    ///
    /// Larger than [`written()`](SliceWriter::written) only after an overflow.
    pub fn needed(&self) -> usize {
        self.needed
    }

    /// Whether any text was cut off.
    pub fn overflowed(&self) -> bool {
        self.needed > self.written
    }
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        self.needed += bytes.len();
        if self.needed > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.written..self.needed].copy_from_slice(bytes);
        self.written = self.needed;
        Ok(())
    }
}

/// Formats `args` into `buf`.
///
/// # Returns
/// - `Ok(len)`: the number of bytes written
/// - `Err(Error::CapacityExceeded)`: the text did not fit; the contents of
///   `buf` are unspecified and must not be used
pub fn write_bounded(buf: &mut [u8], args: fmt::Arguments<'_>) -> Result<usize, Error> {
    let capacity = buf.len();
    let mut w = SliceWriter::new(buf);
    if fmt::write(&mut w, args).is_err() || w.overflowed() {
        // fmt::write stops at the first failing piece; count the rest.
        let mut counter = LenCounter(0);
        let _ = fmt::write(&mut counter, args);
        return Err(Error::CapacityExceeded {
            needed: counter.0,
            capacity,
        });
    }
    Ok(w.written())
}

struct LenCounter(usize);

impl fmt::Write for LenCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}
