/// Declares a static global transmitter slot protected by a `critical_section` mutex.
///
/// This macro creates a `static` singleton suitable for use in interrupt-based
/// environments, where both the main thread and an ISR need to safely access
/// the shared transmitter.
///
/// # Arguments
/// - `$name`: name of the static
/// - `$modem`: the concrete transmitter type (must implement `Modem`)
///
/// # Example
/// ```rust,ignore
/// init_modem!(RTTY, RttyTransmitter<PD2, PD3, PD4>);
/// ```
#[macro_export]
macro_rules! init_modem {
    ( $name:ident, $modem:ty ) => {
        pub static $name: $crate::timer::GlobalModem<$modem> = $crate::timer::global_modem_init();
    };
}

/// Installs a transmitter in a slot declared with `init_modem!`.
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     setup_modem!(RTTY, RttyTransmitter::new(mark, space, enable, RttyConfig::default()));
/// }
/// ```
///
/// # Notes
/// - Must be called inside a critical section-aware context (safe in `main()`).
#[macro_export]
macro_rules! setup_modem {
    ( $name:ident, $modem:expr ) => {
        $crate::timer::global_modem_setup(&$name, $modem)
    };
}

/// Calls `tick()` on a global transmitter if it has been installed.
///
/// This macro is intended to be invoked from a timer ISR to advance the
/// transmitter at its configured rate.
///
/// # Example
/// ```rust,ignore
/// #[avr_device::interrupt(atmega328p)]
/// fn TIMER2_OVF() {
///     tick_modem!(AFSK);
/// }
/// ```
///
/// # Notes
/// - Safe to call repeatedly; does nothing until `setup_modem!` has run.
#[macro_export]
macro_rules! tick_modem {
    ( $name:ident ) => {
        $crate::timer::global_tick(&$name)
    };
}

#[cfg(test)]
mod tests {
    use crate::buffer::TxBuffer;
    use crate::modem::Modem;
    use crate::rtty::{RttyConfig, RttyTransmitter};
    use crate::timer::{global_modem_take, global_try_submit};
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    crate::init_modem!(MACRO_RTTY, RttyTransmitter<PinMock, PinMock, PinMock>);

    #[test]
    fn test_declare_setup_and_tick() {
        crate::tick_modem!(MACRO_RTTY);

        let mark = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let space = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let enable = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        crate::setup_modem!(
            MACRO_RTTY,
            RttyTransmitter::new(mark, space, enable, RttyConfig::default())
        );

        assert_eq!(global_try_submit(&MACRO_RTTY, TxBuffer::from("U")), Ok(()));
        crate::tick_modem!(MACRO_RTTY);

        let mut tx = global_modem_take(&MACRO_RTTY).unwrap();
        assert!(!tx.is_busy());
        assert!(tx.is_active());
        tx.mark.done();
        tx.space.done();
        tx.enable.done();
    }
}
