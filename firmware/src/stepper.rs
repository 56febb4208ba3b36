//! Two-axis stepper plotter driven from the Timer1 compare interrupts.
//!
//! Compare A toggles the Y clock and compare B the X clock, both at
//! `OCR1x = 199` (5 kHz). Each handler counts its own toggles and masks its
//! interrupt once the limit is reached; a move busy-waits on the mask.

use core::cell::Cell;

use avr_device::interrupt::Mutex;
use labs_core::plotter::stepper::{
    axes, CLK_X, CLK_Y, DIR_X, DIR_Y, EN_X, EN_Y, PEN_DOWN_SETTLE_MS, SOLENOID,
};
use labs_core::plotter::{Direction, Motion, Plotter, Step, TableScale};
use labs_core::timing::{stepper_ocr, STEP_HZ};

use crate::{delay_ms, port, Peripherals};

// TCCR1B
const WGM12: u8 = 1 << 3;
const CS11: u8 = 1 << 1;
// TIMSK1
const OCIE1A: u8 = 1 << 1;
const OCIE1B: u8 = 1 << 2;

struct Axis {
    count: Mutex<Cell<u16>>,
    limit: Mutex<Cell<u16>>,
}

impl Axis {
    const fn new() -> Self {
        Self {
            count: Mutex::new(Cell::new(0)),
            limit: Mutex::new(Cell::new(0)),
        }
    }
}

static X: Axis = Axis::new();
static Y: Axis = Axis::new();

/// One toggle; returns `true` when the axis is done.
fn advance(axis: &Axis) -> bool {
    avr_device::interrupt::free(|cs| {
        let count = axis.count.borrow(cs).get() + 1;
        axis.count.borrow(cs).set(count);
        count >= axis.limit.borrow(cs).get()
    })
}

/// Body of the TIMER1_COMPA handler.
pub fn on_compare_a(dp: &Peripherals) {
    dp.PORTC.pinc.write(|w| unsafe { w.bits(CLK_Y) });
    if advance(&Y) {
        stop(dp, OCIE1A);
        port::clear_c(dp, CLK_Y);
    }
}

/// Body of the TIMER1_COMPB handler.
pub fn on_compare_b(dp: &Peripherals) {
    dp.PORTB.pinb.write(|w| unsafe { w.bits(CLK_X) });
    if advance(&X) {
        stop(dp, OCIE1B);
        port::clear_b(dp, CLK_X);
    }
}

fn stop(dp: &Peripherals, mask: u8) {
    dp.TC1
        .timsk1
        .modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
}

pub struct StepperPlotter<'a> {
    dp: &'a Peripherals,
}

impl<'a> StepperPlotter<'a> {
    /// Configure the pins and start Timer1. Interrupts must be enabled by
    /// the caller.
    pub fn new(dp: &'a Peripherals) -> Self {
        port::output_b(dp, CLK_X | DIR_X | EN_X);
        port::output_c(dp, SOLENOID | CLK_Y | DIR_Y | EN_Y);
        port::set_c(dp, SOLENOID);

        let ocr = stepper_ocr(STEP_HZ);
        let tc1 = &dp.TC1;
        tc1.tccr1a.write(|w| unsafe { w.bits(0) });
        tc1.tccr1b.write(|w| unsafe { w.bits(0) });
        tc1.tcnt1.write(|w| unsafe { w.bits(0) });
        tc1.ocr1a.write(|w| unsafe { w.bits(ocr) });
        tc1.ocr1b.write(|w| unsafe { w.bits(ocr) });
        tc1.tccr1b.write(|w| unsafe { w.bits(WGM12 | CS11) });
        Self { dp }
    }

    pub fn pen_down(&mut self) {
        port::clear_c(self.dp, SOLENOID);
        delay_ms(PEN_DOWN_SETTLE_MS);
    }

    pub fn pen_up(&mut self) {
        port::set_c(self.dp, SOLENOID);
    }

    fn arm(&mut self, axis: &Axis, steps: u16) {
        avr_device::interrupt::free(|cs| {
            axis.count.borrow(cs).set(0);
            axis.limit.borrow(cs).set(steps);
        });
    }

    /// Run the axes `dir` needs for `steps` toggles and wait for both.
    pub fn travel(&mut self, dir: Direction, steps: u16) {
        if steps == 0 {
            return;
        }
        let m = axes(dir);
        let mut mask = 0;
        if let Some(right) = m.x {
            if right {
                port::set_b(self.dp, DIR_X);
            } else {
                port::clear_b(self.dp, DIR_X);
            }
            port::set_b(self.dp, EN_X);
            port::clear_b(self.dp, CLK_X);
            self.arm(&X, steps);
            mask |= OCIE1B;
        }
        if let Some(down) = m.y {
            if down {
                port::set_c(self.dp, DIR_Y);
            } else {
                port::clear_c(self.dp, DIR_Y);
            }
            port::set_c(self.dp, EN_Y);
            port::clear_c(self.dp, CLK_Y);
            self.arm(&Y, steps);
            mask |= OCIE1A;
        }
        let timsk1 = &self.dp.TC1.timsk1;
        timsk1.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
        while timsk1.read().bits() & mask != 0 {}
    }
}

impl Plotter for StepperPlotter<'_> {
    fn execute(&mut self, step: Step) {
        match step.motion {
            Motion::PenDown => self.pen_down(),
            Motion::PenUp => self.pen_up(),
            Motion::Draw(dir) => self.travel(dir, step.amount),
            Motion::Travel(dir) => {
                self.pen_up();
                self.travel(dir, step.amount);
            }
        }
    }

    fn table_scale(&self) -> TableScale {
        TableScale::Stepper
    }
}
