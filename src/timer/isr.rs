use core::cell::RefCell;
use core::convert::Infallible;
use core::hint::spin_loop;

use critical_section::Mutex;

use crate::buffer::TxBuffer;
use crate::modem::Modem;

/// A transmitter shared between the main context and the tick interrupt.
pub type GlobalModem<M> = Mutex<RefCell<Option<M>>>;

/// Used to initialize a global static transmitter slot for use with
/// `critical_section`.
///
/// # Returns
/// * An empty slot
///
/// # Example
/// ```rust,ignore
/// use habtx::rtty::RttyTransmitter;
/// use habtx::timer::{GlobalModem, global_modem_init};
///
/// static RTTY: GlobalModem<RttyTransmitter<PD2, PD3, PD4>> = global_modem_init();
/// ```
pub const fn global_modem_init<M>() -> GlobalModem<M> {
    Mutex::new(RefCell::new(None))
}

/// Installs `modem` in the global slot, replacing any previous transmitter.
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     let rtty = RttyTransmitter::new(mark, space, enable, RttyConfig::default());
///     global_modem_setup(&RTTY, rtty);
/// }
/// ```
pub fn global_modem_setup<M: Modem>(global: &GlobalModem<M>, modem: M) {
    critical_section::with(|cs| {
        let _ = global.borrow(cs).replace(Some(modem));
    });
}

/// Removes the transmitter from the global slot, leaving it empty.
pub fn global_modem_take<M: Modem>(global: &GlobalModem<M>) -> Option<M> {
    critical_section::with(|cs| global.borrow(cs).take())
}

/// Runs the tick at each interrupt
///
/// Does nothing until a transmitter has been installed.
///
/// # Example
/// ```rust,ignore
/// #[avr_device::interrupt(atmega328p)]
/// fn TIMER1_COMPA() {
///     global_tick(&RTTY);
/// }
/// ```
pub fn global_tick<M: Modem>(global: &GlobalModem<M>) {
    critical_section::with(|cs| {
        if let Some(modem) = global.borrow(cs).borrow_mut().as_mut() {
            modem.tick();
        }
    });
}

/// Hands `buf` to the global transmitter in a single attempt.
///
/// # Errors
/// Returns the buffer if the transmitter is busy or not installed.
pub fn global_try_submit<M: Modem>(
    global: &GlobalModem<M>,
    buf: TxBuffer,
) -> Result<(), TxBuffer> {
    critical_section::with(|cs| match global.borrow(cs).borrow_mut().as_mut() {
        Some(modem) => modem.try_submit(buf),
        None => Err(buf),
    })
}

/// Hands `buf` to the global transmitter, spinning until it is free.
///
/// Each attempt runs in its own critical section, so the tick interrupt keeps
/// draining the previous message between attempts.
///
/// # Errors
/// Returns the buffer only if no transmitter is installed.
pub fn global_submit<M: Modem>(
    global: &GlobalModem<M>,
    buf: TxBuffer,
) -> Result<(), TxBuffer> {
    let mut pending = buf;
    loop {
        let attempt = critical_section::with(|cs| match global.borrow(cs).borrow_mut().as_mut() {
            Some(modem) => modem.try_submit(pending).map_err(|buf| (buf, true)),
            None => Err((pending, false)),
        });
        match attempt {
            Ok(()) => return Ok(()),
            Err((buf, true)) => {
                pending = buf;
                spin_loop();
            }
            Err((buf, false)) => {
                warn!("timer: submit without a transmitter");
                return Err(buf);
            }
        }
    }
}

/// Non-blocking idle check of the global transmitter, for use with
/// [`nb::block!`]. An empty slot counts as idle.
pub fn global_poll_idle<M: Modem>(
    global: &GlobalModem<M>,
) -> nb::Result<(), Infallible> {
    critical_section::with(|cs| match global.borrow(cs).borrow().as_ref() {
        Some(modem) => modem.poll_idle(),
        None => Ok(()),
    })
}

/// Blocks until the global transmitter has taken every byte of its message.
pub fn global_wait_idle<M: Modem>(global: &GlobalModem<M>) {
    let Ok(()) = nb::block!(global_poll_idle(global));
}
