//! Timer and baud-rate arithmetic for the 16 MHz ATmega328P.

use crate::config::F_CPU;

/// UBRR0 value for normal-speed asynchronous mode.
pub const fn ubrr(f_cpu: u32, baud: u32) -> u16 {
    (f_cpu / (16 * baud) - 1) as u16
}

/// Compare value for a CTC timer firing `hz` times per second.
pub const fn ctc_top(f_cpu: u32, prescaler: u32, hz: u32) -> u16 {
    (f_cpu / (prescaler * hz) - 1) as u16
}

/// Timer1 compare value for the 1 s tick (prescaler 1024).
pub const SECOND_TICK_TOP: u16 = ctc_top(F_CPU, 1024, 1);

/// Timer1 prescaler used by the tone generator, the servo and the steppers.
pub const TIMER1_PRESCALER: u32 = 8;

/// ICR1 value that makes OC1A oscillate at `hz` (fast PWM, prescaler 8).
///
/// Returns `None` for 0 Hz, which means the output must be silenced.
pub fn tone_top(hz: u16) -> Option<u16> {
    if hz == 0 {
        return None;
    }
    let top = F_CPU / (TIMER1_PRESCALER * hz as u32) - 1;
    Some(top.min(u16::MAX as u32) as u16)
}

/// Step toggle rate of the stepper plotter.
pub const STEP_HZ: u32 = 5000;

/// OCR1A/OCR1B for a CTC toggle at `step_hz`.
pub const fn stepper_ocr(step_hz: u32) -> u16 {
    (F_CPU / (TIMER1_PRESCALER * 2 * step_hz) - 1) as u16
}

/// Servo frame: 20 ms at 0.5 µs per tick.
pub const SERVO_TOP: u16 = 39_999;

const SERVO_MIN_US: u32 = 800;
const SERVO_SPAN_US: u32 = 1400;

/// Pulse width in µs for a servo angle; angles above 180° are clamped.
pub fn servo_pulse_us(degrees: u8) -> u16 {
    let deg = degrees.min(180) as u32;
    (SERVO_MIN_US + deg * SERVO_SPAN_US / 180) as u16
}

/// OCR1A value for a servo angle (two timer ticks per µs).
pub fn servo_ticks(degrees: u8) -> u16 {
    servo_pulse_us(degrees) * 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uart_divisor_for_9600() {
        assert_eq!(ubrr(F_CPU, 9600), 103);
        assert_eq!(ubrr(F_CPU, 115_200), 7);
    }

    #[test]
    fn one_second_tick() {
        assert_eq!(SECOND_TICK_TOP, 15624);
    }

    #[test]
    fn tone_tops() {
        assert_eq!(tone_top(0), None);
        assert_eq!(tone_top(440), Some(4544));
        assert_eq!(tone_top(2000), Some(999));
        // 1 Hz would need 1_999_999, clamp to the 16-bit register
        assert_eq!(tone_top(1), Some(u16::MAX));
    }

    #[test]
    fn stepper_rate() {
        assert_eq!(stepper_ocr(STEP_HZ), 199);
    }

    #[test]
    fn servo_pulses() {
        assert_eq!(servo_pulse_us(0), 800);
        assert_eq!(servo_pulse_us(90), 1500);
        assert_eq!(servo_pulse_us(180), 2200);
        assert_eq!(servo_pulse_us(255), 2200);
        assert_eq!(servo_ticks(155), 4010);
    }
}
