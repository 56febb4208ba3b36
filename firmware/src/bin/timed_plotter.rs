//! Pen plotter driven by timed pulses on PORTD, figures picked over UART.

#![no_std]
#![no_main]

use firmware::uart::Serial;
use firmware::{delay_ms, peripherals, Peripherals};
use labs_core::plotter::{timed, Choice, Plotter, Step, INVALID_CHOICE, MENU};

struct TimedPlotter<'a> {
    dp: &'a Peripherals,
}

impl TimedPlotter<'_> {
    fn hold(&self, pattern: u8, ms: u32) {
        // PD0/PD1 belong to the UART and are left untouched.
        self.dp
            .PORTD
            .portd
            .modify(|r, w| unsafe { w.bits((r.bits() & !timed::DDR) | pattern) });
        let mut left = ms;
        while left > 0 {
            let chunk = left.min(u16::MAX as u32);
            delay_ms(chunk as u16);
            left -= chunk;
        }
        self.dp
            .PORTD
            .portd
            .modify(|r, w| unsafe { w.bits(r.bits() & !timed::DDR) });
    }
}

impl Plotter for TimedPlotter<'_> {
    fn execute(&mut self, step: Step) {
        self.hold(
            timed::pattern(step.motion),
            timed::hold_ms(step.motion, step.amount),
        );
    }
}

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    let mut serial = Serial::new(&dp.USART0);

    dp.PORTD
        .ddrd
        .modify(|r, w| unsafe { w.bits(r.bits() | timed::DDR) });
    let mut plotter = TimedPlotter { dp: &dp };

    loop {
        serial.print(MENU);
        let byte = serial.read_byte();
        match Choice::from_byte(byte) {
            Some(choice) => plotter.run(choice.timed_program()),
            None => serial.print(INVALID_CHOICE),
        }
    }
}
