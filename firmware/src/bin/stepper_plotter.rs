//! Draws the whole demonstration sheet once with the stepper plotter.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use firmware::stepper::{self, StepperPlotter};
use firmware::peripherals;
use labs_core::plotter::{Plotter, STEPPER_SHEET};

#[avr_device::interrupt(atmega328p)]
fn TIMER1_COMPA() {
    stepper::on_compare_a(&peripherals());
}

#[avr_device::interrupt(atmega328p)]
fn TIMER1_COMPB() {
    stepper::on_compare_b(&peripherals());
}

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    let mut plotter = StepperPlotter::new(&dp);
    unsafe { avr_device::interrupt::enable() };

    plotter.run(&STEPPER_SHEET);

    loop {}
}
