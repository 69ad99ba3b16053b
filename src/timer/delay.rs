use embedded_hal::delay::DelayNs;

use crate::buffer::TxBuffer;
use crate::modem::Modem;

/// Runs a blocking loop that repeatedly calls `tick()` on the provided transmitter.
///
/// This is a simple timing loop for use in environments where interrupts are unavailable
/// or undesired. The tick rate is only as accurate as the delay provider plus the time
/// spent in `tick()`, which is fine for RTTY but marginal for AFSK.
///
/// # Arguments
/// - `modem`: the transmitter to drive
/// - `delay`: a delay provider implementing `DelayNs`, typically from the HAL
/// - `tick_ns`: the delay between each tick call, in nanoseconds (20 ms for 50 baud RTTY)
///
/// # Example
/// ```rust,ignore
/// use habtx::timer::run_tick_loop;
/// let mut rtty = RttyTransmitter::new(mark, space, enable, RttyConfig::default());
/// run_tick_loop(&mut rtty, &mut delay, 20_000_000);
/// ```
///
/// # Notes
/// - This loop never returns; it is intended for single-purpose polling firmware.
pub fn run_tick_loop<M: Modem, D: DelayNs>(modem: &mut M, delay: &mut D, tick_ns: u32) -> ! {
    loop {
        modem.tick();
        delay.delay_ns(tick_ns);
    }
}

/// Ticks `modem` until nothing more is going out on the air.
///
/// # Returns
/// The number of ticks taken.
pub fn tick_until_idle<M: Modem, D: DelayNs>(modem: &mut M, delay: &mut D, tick_ns: u32) -> u32 {
    let mut ticks = 0;
    while modem.is_active() {
        modem.tick();
        delay.delay_ns(tick_ns);
        ticks += 1;
    }
    ticks
}

/// Sends `buf` and returns once it has been completely transmitted.
///
/// If the transmitter is still busy with an earlier message, that message is
/// ticked out first.
///
/// # Returns
/// The number of ticks taken.
pub fn transmit_blocking<M: Modem, D: DelayNs>(
    modem: &mut M,
    delay: &mut D,
    tick_ns: u32,
    buf: TxBuffer,
) -> u32 {
    let mut ticks = 0;
    let mut pending = buf;
    while let Err(buf) = modem.try_submit(pending) {
        pending = buf;
        modem.tick();
        delay.delay_ns(tick_ns);
        ticks += 1;
    }
    ticks + tick_until_idle(modem, delay, tick_ns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::afsk::{AfskConfig, AfskTransmitter};
    use crate::rtty::{RttyConfig, RttyTransmitter};
    use core::convert::Infallible;
    use embedded_hal::pwm::{ErrorType, SetDutyCycle};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    struct NullPwm;

    impl ErrorType for NullPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for NullPwm {
        fn max_duty_cycle(&self) -> u16 {
            255
        }

        fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn test_tick_until_idle_on_idle_transmitter() {
        let mark = PinMock::new(&[PinTransaction::set(PinState::High)]);
        let space = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let enable = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let mut tx = RttyTransmitter::new(mark, space, enable, RttyConfig::default());
        assert_eq!(tick_until_idle(&mut tx, &mut NoopDelay::new(), 1_000), 0);
        tx.mark.done();
        tx.space.done();
        tx.enable.done();
    }

    #[test]
    fn test_transmit_blocking_rtty_ticks() {
        // 0xff sends start, eight 1s and a stop: only the start bit is space
        let mut mark = vec![PinTransaction::set(PinState::High)];
        let mut space = vec![PinTransaction::set(PinState::Low)];
        mark.push(PinTransaction::set(PinState::Low));
        space.push(PinTransaction::set(PinState::High));
        mark.extend(vec![PinTransaction::set(PinState::High); 10]);
        space.extend(vec![PinTransaction::set(PinState::Low); 10]);
        let mut tx = RttyTransmitter::new(
            PinMock::new(&mark),
            PinMock::new(&space),
            PinMock::new(&[PinTransaction::set(PinState::Low)]),
            RttyConfig::default(),
        );

        let ticks = transmit_blocking(
            &mut tx,
            &mut NoopDelay::new(),
            20_000_000,
            TxBuffer::flash(&[0xff]),
        );
        // load + 8 data + stop + return to idle
        assert_eq!(ticks, 11);
        assert!(!tx.is_active());
        tx.mark.done();
        tx.space.done();
        tx.enable.done();
    }

    #[test]
    fn test_transmit_blocking_waits_for_previous_message() {
        let enable = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut tx = AfskTransmitter::new(NullPwm, enable, AfskConfig::new(9_600)).unwrap();
        let mut delay = NoopDelay::new();

        assert!(tx.try_submit(TxBuffer::flash(b"first")).is_ok());
        let _ = transmit_blocking(&mut tx, &mut delay, 104_167, TxBuffer::flash(b"second"));
        assert!(!tx.is_active());
        assert_eq!(tx.tx_good, 1);

        let ticks = transmit_blocking(&mut tx, &mut delay, 104_167, TxBuffer::flash(b"third"));
        assert!(ticks > 8 * 8 * (10 + 5 + 11));
        assert_eq!(tx.tx_good, 2);
        tx.enable.done();
    }
}
