//! Temperature control with a heater and an H-bridge driven fan.
//!
//! The setpoint can be changed over the serial port: `x` pauses the
//! measurements and opens a small line editor, Enter applies the value.

use crate::text::{parse_int, Feed, LineBuffer, Terminator};

pub const DEFAULT_SETPOINT: u8 = 26;
pub const MIN_SETPOINT: i32 = 10;
pub const MAX_SETPOINT: i32 = 50;

/// Time between measurements.
pub const REPORT_MS: u16 = 1000;
/// Timer0 PWM prescaler for the fan.
pub const PWM_PRESCALER: u16 = 64;

/// PORTB
pub const HEATER: u8 = 1 << 0;
pub const BRIDGE_ENABLE: u8 = 1 << 1;
/// PORTD
pub const IN1: u8 = 1 << 2;
pub const IN2: u8 = 1 << 3;

pub const BANNER: &str = "=== Control de Temperatura con PWM y Puente H ===\r\n\
Presione 'x' para cambiar el punto medio\r\n\
-------------------------------------------------\r\n";
pub const EDIT_OPENED: &str = "\r\n>> Ajuste de punto medio activado\r\nIngrese nuevo valor (10–50): ";
pub const UPDATED: &str = "\r\nPunto medio actualizado correctamente\r\n";
pub const OUT_OF_RANGE: &str = "\r\nValor fuera de rango (10–50)\r\n";
pub const RESUMING: &str = "Reanudando medición...\r\n";

/// LM35 on a 5 V reference: 10 mV per degree.
pub const fn adc_to_celsius(adc: u16) -> u16 {
    ((adc as u32 * 500) / 1023) as u16
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Band {
    Heat,
    Off,
    FanLow,
    FanMedium,
    FanHigh,
}

impl Band {
    pub fn classify(temp: u16, setpoint: u8) -> Band {
        let t = temp as i32;
        let pm = setpoint as i32;
        if t <= pm - 4 {
            Band::Heat
        } else if t <= pm + 4 {
            Band::Off
        } else if t <= pm + 14 {
            Band::FanLow
        } else if t <= pm + 24 {
            Band::FanMedium
        } else {
            Band::FanHigh
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Band::Heat => "Calefactor ON",
            Band::Off => "Todo OFF",
            Band::FanLow => "Ventilador BAJO",
            Band::FanMedium => "Ventilador MEDIO",
            Band::FanHigh => "Ventilador ALTO",
        }
    }

    /// Fan PWM duty (0-255).
    pub const fn duty(self) -> u8 {
        match self {
            Band::Heat | Band::Off => 0,
            Band::FanLow => 85,
            Band::FanMedium => 170,
            Band::FanHigh => 255,
        }
    }

    pub const fn heater_on(self) -> bool {
        matches!(self, Band::Heat)
    }

    /// H-bridge input bits for PORTD; the fan only spins one way.
    pub const fn bridge(self) -> u8 {
        match self {
            Band::Heat | Band::Off => 0,
            _ => IN1,
        }
    }
}

/// Outcome of one received byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Entry opened; measurements pause.
    Opened,
    Echo(u8),
    Updated(u8),
    OutOfRange,
    Ignored,
}

/// Setpoint holder plus its serial editor.
pub struct Setpoint {
    value: u8,
    entry: Option<LineBuffer<7>>,
}

impl Setpoint {
    pub const fn new() -> Self {
        Self {
            value: DEFAULT_SETPOINT,
            entry: None,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn paused(&self) -> bool {
        self.entry.is_some()
    }

    pub fn handle(&mut self, byte: u8) -> Event {
        if byte == b'x' || byte == b'X' {
            self.entry = Some(LineBuffer::new(Terminator::Enter));
            return Event::Opened;
        }
        let Some(entry) = self.entry.as_mut() else {
            return Event::Ignored;
        };
        match entry.feed(byte) {
            Feed::Echo(b) => Event::Echo(b),
            Feed::Ignored => Event::Ignored,
            Feed::Submit => {
                let parsed = parse_int(entry.as_str());
                self.entry = None;
                match parsed {
                    Some(v) if (MIN_SETPOINT..=MAX_SETPOINT).contains(&v) => {
                        self.value = v as u8;
                        Event::Updated(self.value)
                    }
                    _ => Event::OutOfRange,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_scale() {
        assert_eq!(adc_to_celsius(0), 0);
        assert_eq!(adc_to_celsius(1023), 500);
        assert_eq!(adc_to_celsius(53), 25);
    }

    #[test]
    fn bands_around_default() {
        let pm = DEFAULT_SETPOINT;
        assert_eq!(Band::classify(22, pm), Band::Heat);
        assert_eq!(Band::classify(23, pm), Band::Off);
        assert_eq!(Band::classify(30, pm), Band::Off);
        assert_eq!(Band::classify(31, pm), Band::FanLow);
        assert_eq!(Band::classify(40, pm), Band::FanLow);
        assert_eq!(Band::classify(41, pm), Band::FanMedium);
        assert_eq!(Band::classify(50, pm), Band::FanMedium);
        assert_eq!(Band::classify(51, pm), Band::FanHigh);
    }

    #[test]
    fn band_outputs() {
        assert!(Band::Heat.heater_on());
        assert_eq!(Band::Heat.duty(), 0);
        assert_eq!(Band::FanMedium.duty(), 170);
        assert_eq!(Band::FanHigh.bridge(), IN1);
        assert_eq!(Band::Off.bridge(), 0);
        assert_eq!(Band::FanLow.label(), "Ventilador BAJO");
    }

    #[test]
    fn change_setpoint() {
        let mut sp = Setpoint::new();
        assert_eq!(sp.handle(b'3'), Event::Ignored);
        assert_eq!(sp.handle(b'x'), Event::Opened);
        assert!(sp.paused());
        assert_eq!(sp.handle(b'3'), Event::Echo(b'3'));
        assert_eq!(sp.handle(b'5'), Event::Echo(b'5'));
        assert_eq!(sp.handle(b'\r'), Event::Updated(35));
        assert!(!sp.paused());
        assert_eq!(sp.value(), 35);
    }

    #[test]
    fn rejects_out_of_range() {
        let mut sp = Setpoint::new();
        sp.handle(b'X');
        for &b in b"9\n" {
            sp.handle(b);
        }
        assert_eq!(sp.value(), DEFAULT_SETPOINT);
        sp.handle(b'x');
        assert_eq!(sp.handle(b'\r'), Event::OutOfRange);
        assert!(!sp.paused());
    }

    #[test]
    fn x_restarts_entry() {
        let mut sp = Setpoint::new();
        sp.handle(b'x');
        sp.handle(b'4');
        sp.handle(b'x');
        sp.handle(b'2');
        sp.handle(b'0');
        assert_eq!(sp.handle(b'\n'), Event::Updated(20));
    }
}
