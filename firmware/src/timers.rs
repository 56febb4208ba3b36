//! Timer0 and Timer1 set-ups used across the labs.
//!
//! Timer1 is either a 1 Hz CTC tick, a tone generator, a servo PWM or the
//! stepper pulse clock; each binary picks one. Timer0 drives OC0A (PD6)
//! as an 8-bit fast PWM.

use avr_device::atmega328p::{TC0, TC1};
use labs_core::timing::{tone_top, SECOND_TICK_TOP, SERVO_TOP, servo_ticks};

// TCCR1A
const COM1A1: u8 = 1 << 7;
const WGM11: u8 = 1 << 1;
// TCCR1B
const WGM13: u8 = 1 << 4;
const WGM12: u8 = 1 << 3;
const CS11: u8 = 1 << 1;
const CS_1024: u8 = 0b101;
// TIMSK1
const OCIE1A: u8 = 1 << 1;

// TCCR0A: non-inverting OC0A, fast PWM
const COM0A1: u8 = 1 << 7;
const WGM0_FAST: u8 = (1 << 1) | (1 << 0);
// TCCR0B
const CS0_64: u8 = 0b011;

/// Timer1 CTC at 1 Hz with the compare-A interrupt.
pub fn start_second_tick(tc1: &TC1) {
    tc1.tccr1a.write(|w| unsafe { w.bits(0) });
    tc1.ocr1a.write(|w| unsafe { w.bits(SECOND_TICK_TOP) });
    tc1.tcnt1.write(|w| unsafe { w.bits(0) });
    tc1.tccr1b.write(|w| unsafe { w.bits(WGM12 | CS_1024) });
    tc1.timsk1.write(|w| unsafe { w.bits(OCIE1A) });
}

pub fn stop_timer1(tc1: &TC1) {
    tc1.timsk1.write(|w| unsafe { w.bits(0) });
    tc1.tccr1b.write(|w| unsafe { w.bits(0) });
    tc1.tccr1a.write(|w| unsafe { w.bits(0) });
}

/// Square wave on OC1A (PB1): fast PWM mode 14, TOP in ICR1, prescaler 8.
pub struct Tone<'a> {
    tc1: &'a TC1,
}

impl<'a> Tone<'a> {
    /// PB1 must already be an output.
    pub fn new(tc1: &'a TC1) -> Self {
        tc1.tccr1a.write(|w| unsafe { w.bits(WGM11) });
        tc1.tccr1b.write(|w| unsafe { w.bits(WGM13 | WGM12) });
        Self { tc1 }
    }

    /// Start `hz`, or silence for 0 Hz.
    pub fn play(&mut self, hz: u16) {
        match tone_top(hz) {
            Some(top) => {
                self.tc1.icr1.write(|w| unsafe { w.bits(top) });
                self.tc1.ocr1a.write(|w| unsafe { w.bits(top / 2) });
                self.tc1.tccr1a.write(|w| unsafe { w.bits(COM1A1 | WGM11) });
                self.tc1
                    .tccr1b
                    .write(|w| unsafe { w.bits(WGM13 | WGM12 | CS11) });
            }
            None => self.stop(),
        }
    }

    /// Stop the clock and release the pin.
    pub fn stop(&mut self) {
        self.tc1.tccr1b.write(|w| unsafe { w.bits(WGM13 | WGM12) });
        self.tc1.tccr1a.write(|w| unsafe { w.bits(WGM11) });
    }
}

/// 50 Hz servo pulse on OC1A (PB1).
pub struct Servo<'a> {
    tc1: &'a TC1,
}

impl<'a> Servo<'a> {
    pub fn new(tc1: &'a TC1) -> Self {
        tc1.icr1.write(|w| unsafe { w.bits(SERVO_TOP) });
        tc1.tccr1a.write(|w| unsafe { w.bits(COM1A1 | WGM11) });
        tc1.tccr1b.write(|w| unsafe { w.bits(WGM13 | WGM12 | CS11) });
        Self { tc1 }
    }

    pub fn set_angle(&mut self, degrees: u8) {
        self.tc1
            .ocr1a
            .write(|w| unsafe { w.bits(servo_ticks(degrees)) });
    }
}

/// 8-bit PWM on OC0A (PD6), prescaler 64 (about 976 Hz).
pub struct Pwm0<'a> {
    tc0: &'a TC0,
}

impl<'a> Pwm0<'a> {
    /// PD6 must already be an output.
    pub fn new(tc0: &'a TC0) -> Self {
        tc0.ocr0a.write(|w| unsafe { w.bits(0) });
        tc0.tccr0a.write(|w| unsafe { w.bits(COM0A1 | WGM0_FAST) });
        tc0.tccr0b.write(|w| unsafe { w.bits(CS0_64) });
        Self { tc0 }
    }

    pub fn set_duty(&mut self, duty: u8) {
        self.tc0.ocr0a.write(|w| unsafe { w.bits(duty) });
    }
}
