//! The surface shared by both software modems.
//!
//! [`Modem`] is what the tick helpers in [`crate::timer`] drive. Each
//! transmitter holds at most one [`TxBuffer`] at a time: a one-deep mailbox
//! with no queue. A submission while a buffer is still being consumed is
//! refused and the buffer is handed back untouched, so the in-flight message
//! is never replaced.

use core::convert::Infallible;

use crate::buffer::TxBuffer;

/// A tick-driven transmitter.
pub trait Modem {
    /// Advances the transmitter by one timer tick.
    ///
    /// Must be called at the fixed rate the transmitter was configured for.
    /// Never blocks and never allocates.
    fn tick(&mut self);

    /// Hands `buf` to the transmitter if it is idle.
    ///
    /// # Errors
    /// Returns the buffer unchanged while a previous message still has bytes
    /// left to send.
    fn try_submit(&mut self, buf: TxBuffer) -> Result<(), TxBuffer>;

    /// Bytes of the current message not yet taken from its buffer.
    fn remaining(&self) -> usize;

    /// Whether a message still has bytes left to send.
    fn is_busy(&self) -> bool {
        self.remaining() > 0
    }

    /// Whether anything is still going out on the air.
    ///
    /// Stays true after [`is_busy`](Modem::is_busy) clears, while the last
    /// character or the closing flags are being sent.
    fn is_active(&self) -> bool {
        self.is_busy()
    }

    /// Non-blocking idle check, for use with [`nb::block!`].
    fn poll_idle(&self) -> nb::Result<(), Infallible> {
        if self.is_busy() {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }
}
