//! Proportional position control of a DC motor.
//!
//! A reference potentiometer sets the target and a second potentiometer
//! coupled to the motor shaft reports the position.

pub const KP: f32 = 0.35;
/// Smallest duty that still overcomes static friction.
pub const PWM_MIN: u8 = 80;
/// Errors up to this size stop the motor.
pub const DEAD_BAND: u16 = 1;
/// Errors within this size are reported as stopped.
pub const REPORT_TOLERANCE: i16 = 25;

pub const LOOP_MS: u16 = 30;
/// Control iterations between reports.
pub const REPORT_EVERY: u8 = 10;

/// PORTB
pub const IN1: u8 = 1 << 0;
pub const IN2: u8 = 1 << 1;

pub const BANNER: &str = "\r\n=== Control de potenciometro con motor PWM ===\r\n";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
    Stopped,
}

impl Spin {
    pub const fn bridge(self) -> u8 {
        match self {
            Spin::Clockwise => IN1,
            Spin::CounterClockwise => IN2,
            Spin::Stopped => 0,
        }
    }

    /// Direction as seen from the error, with the reporting tolerance.
    pub const fn sensed(error: i16) -> Spin {
        if error > REPORT_TOLERANCE {
            Spin::Clockwise
        } else if error < -REPORT_TOLERANCE {
            Spin::CounterClockwise
        } else {
            Spin::Stopped
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Spin::Clockwise => "Horario",
            Spin::CounterClockwise => "Antihorario",
            Spin::Stopped => "Detenido",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Drive {
    pub spin: Spin,
    pub pwm: u8,
}

pub const fn error(reference: u16, actual: u16) -> i16 {
    reference as i16 - actual as i16
}

pub fn drive(error: i16) -> Drive {
    let magnitude = error.unsigned_abs();
    if magnitude <= DEAD_BAND {
        return Drive {
            spin: Spin::Stopped,
            pwm: 0,
        };
    }
    let duty = (PWM_MIN as f32 + KP * magnitude as f32).min(255.0);
    Drive {
        spin: if error > 0 {
            Spin::Clockwise
        } else {
            Spin::CounterClockwise
        },
        pwm: duty as u8,
    }
}

/// Counts control iterations and says when to report.
pub struct Throttle {
    count: u8,
}

impl Throttle {
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= REPORT_EVERY {
            self.count = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_band_stops() {
        assert_eq!(drive(1), Drive { spin: Spin::Stopped, pwm: 0 });
        assert_eq!(drive(-1), Drive { spin: Spin::Stopped, pwm: 0 });
        assert_eq!(drive(0).pwm, 0);
    }

    #[test]
    fn proportional_duty() {
        assert_eq!(drive(100), Drive { spin: Spin::Clockwise, pwm: 115 });
        assert_eq!(drive(-2).spin, Spin::CounterClockwise);
        assert_eq!(drive(-2).pwm, 80);
        assert_eq!(drive(1000).pwm, 255);
        assert_eq!(drive(error(0, 1023)).pwm, 255);
    }

    #[test]
    fn reported_direction() {
        assert_eq!(Spin::sensed(26), Spin::Clockwise);
        assert_eq!(Spin::sensed(25), Spin::Stopped);
        assert_eq!(Spin::sensed(-26).label(), "Antihorario");
    }

    #[test]
    fn reports_every_tenth_loop() {
        let mut t = Throttle::new();
        let fired: Vec<bool> = (0..20).map(|_| t.tick()).collect();
        assert_eq!(fired.iter().filter(|&&f| f).count(), 2);
        assert!(fired[9] && fired[19]);
    }
}
