//! Status lines the labs print once per loop, and parsers for them.
//!
//! The firmware formats the report structs with `uwrite!`; the host tool
//! reads the same lines back into a [`Sample`].

use core::str::FromStr;

use ufmt::{uDisplay, uWrite, uwrite, Formatter};

use crate::matrix::{Cursor, Heading};
use crate::motor::Spin;
use crate::text::{LeftAligned, RightAligned};
use crate::thermostat::Band;
use crate::ws2812::Rgb;

/// `Temp:<t>C | PM:<pm> | <action>`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ThermostatReport {
    pub temp: u16,
    pub setpoint: u8,
    pub band: Band,
}

impl uDisplay for ThermostatReport {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(
            f,
            "Temp:{}C | PM:{} | {}\r\n",
            self.temp,
            self.setpoint,
            self.band.label()
        )
    }
}

/// `Ref:<r> | Act:<a> | PWM:<p> | Sent:<s>`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MotorReport {
    pub reference: u16,
    pub actual: u16,
    pub pwm: u8,
    pub spin: Spin,
}

impl uDisplay for MotorReport {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(
            f,
            "Ref:{} | Act:{} | PWM:{} | Sent:{}\r\n",
            self.reference,
            self.actual,
            self.pwm,
            self.spin.label()
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct JoystickReport {
    pub x: u16,
    pub y: u16,
    pub heading: Heading,
    pub color: Rgb,
    pub cursor: Cursor,
}

impl uDisplay for JoystickReport {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(
            f,
            "X={} | Y={} | Dir={} | Color(R,G,B)=({},{},{}) | LED=({},{})\r\n",
            RightAligned(self.x, 4),
            RightAligned(self.y, 4),
            LeftAligned(self.heading.label(), 9),
            RightAligned(self.color.r as u16, 3),
            RightAligned(self.color.g as u16, 3),
            RightAligned(self.color.b as u16, 3),
            self.cursor.x,
            self.cursor.y
        )
    }
}

/// One reading of the joystick calibration tool.
pub struct StickSample<'a> {
    pub label: &'a str,
    pub x: u16,
    pub y: u16,
    pub pressed: bool,
}

impl uDisplay for StickSample<'_> {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(
            f,
            "[{}] X={} | Y={} | SW={}\r\n",
            self.label,
            self.x,
            self.y,
            self.pressed as u8
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Not one of the report lines.
    Unrecognized,
    Missing(&'static str),
    Number(&'static str),
    Label(&'static str),
}

/// A parsed report line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sample {
    Thermostat(ThermostatReport),
    Motor(MotorReport),
    Joystick(JoystickReport),
}

const BANDS: [Band; 5] = [
    Band::Heat,
    Band::Off,
    Band::FanLow,
    Band::FanMedium,
    Band::FanHigh,
];
const SPINS: [Spin; 3] = [Spin::Clockwise, Spin::CounterClockwise, Spin::Stopped];
const HEADINGS: [Heading; 5] = [
    Heading::Center,
    Heading::Up,
    Heading::Down,
    Heading::Right,
    Heading::Left,
];

/// Fields of a ` | ` separated line.
struct Fields<'a> {
    rest: Option<&'a str>,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: Some(line) }
    }

    fn next(&mut self, name: &'static str) -> Result<&'a str, ParseError> {
        let rest = self.rest.ok_or(ParseError::Missing(name))?;
        match rest.split_once(" | ") {
            Some((field, tail)) => {
                self.rest = Some(tail);
                Ok(field)
            }
            None => {
                self.rest = None;
                Ok(rest)
            }
        }
    }

    /// Next field with its `key` and separator stripped.
    fn value(&mut self, name: &'static str, key: &str) -> Result<&'a str, ParseError> {
        self.next(name)?
            .strip_prefix(key)
            .ok_or(ParseError::Missing(name))
    }
}

fn number<T: FromStr>(s: &str, name: &'static str) -> Result<T, ParseError> {
    s.trim().parse().map_err(|_| ParseError::Number(name))
}

fn label<T: Copy>(
    all: &[T],
    text: &str,
    name: &'static str,
    f: impl Fn(T) -> &'static str,
) -> Result<T, ParseError> {
    all.iter()
        .copied()
        .find(|&v| f(v) == text.trim())
        .ok_or(ParseError::Label(name))
}

/// `(a,b,c)` style tuple of numbers.
fn tuple<const N: usize>(s: &str, name: &'static str) -> Result<[u16; N], ParseError> {
    let inner = s
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or(ParseError::Number(name))?;
    let mut out = [0; N];
    let mut parts = inner.split(',');
    for slot in out.iter_mut() {
        *slot = number(parts.next().ok_or(ParseError::Number(name))?, name)?;
    }
    if parts.next().is_some() {
        return Err(ParseError::Number(name));
    }
    Ok(out)
}

fn byte(v: u16, name: &'static str) -> Result<u8, ParseError> {
    u8::try_from(v).map_err(|_| ParseError::Number(name))
}

impl Sample {
    pub fn parse(line: &str) -> Result<Sample, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.starts_with("Temp:") {
            Self::thermostat(line)
        } else if line.starts_with("Ref:") {
            Self::motor(line)
        } else if line.starts_with("X=") {
            Self::joystick(line)
        } else {
            Err(ParseError::Unrecognized)
        }
    }

    fn thermostat(line: &str) -> Result<Sample, ParseError> {
        let mut fields = Fields::new(line);
        let temp = fields.value("temp", "Temp:")?;
        let temp = temp.strip_suffix('C').ok_or(ParseError::Number("temp"))?;
        let setpoint = fields.value("setpoint", "PM:")?;
        let action = fields.next("action")?;
        Ok(Sample::Thermostat(ThermostatReport {
            temp: number(temp, "temp")?,
            setpoint: number(setpoint, "setpoint")?,
            band: label(&BANDS, action, "action", Band::label)?,
        }))
    }

    fn motor(line: &str) -> Result<Sample, ParseError> {
        let mut fields = Fields::new(line);
        let reference = fields.value("ref", "Ref:")?;
        let actual = fields.value("act", "Act:")?;
        let pwm = fields.value("pwm", "PWM:")?;
        let spin = fields.value("sent", "Sent:")?;
        Ok(Sample::Motor(MotorReport {
            reference: number(reference, "ref")?,
            actual: number(actual, "act")?,
            pwm: number(pwm, "pwm")?,
            spin: label(&SPINS, spin, "sent", Spin::label)?,
        }))
    }

    fn joystick(line: &str) -> Result<Sample, ParseError> {
        let mut fields = Fields::new(line);
        let x = fields.value("x", "X=")?;
        let y = fields.value("y", "Y=")?;
        let heading = fields.value("dir", "Dir=")?;
        let [r, g, b] = tuple::<3>(fields.value("color", "Color(R,G,B)=")?, "color")?;
        let [px, py] = tuple::<2>(fields.value("led", "LED=")?, "led")?;
        Ok(Sample::Joystick(JoystickReport {
            x: number(x, "x")?,
            y: number(y, "y")?,
            heading: label(&HEADINGS, heading, "dir", Heading::label)?,
            color: Rgb::new(byte(r, "color")?, byte(g, "color")?, byte(b, "color")?),
            cursor: Cursor {
                x: byte(px, "led")?,
                y: byte(py, "led")?,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;
    use ufmt::uwrite;

    fn render(report: &impl uDisplay) -> String<96> {
        let mut s = String::new();
        uwrite!(s, "{}", report).unwrap();
        s
    }

    #[test]
    fn thermostat_line() {
        let report = ThermostatReport {
            temp: 31,
            setpoint: 26,
            band: Band::FanLow,
        };
        let line = render(&report);
        assert_eq!(line.as_str(), "Temp:31C | PM:26 | Ventilador BAJO\r\n");
        assert_eq!(Sample::parse(&line), Ok(Sample::Thermostat(report)));
    }

    #[test]
    fn motor_line() {
        let report = MotorReport {
            reference: 612,
            actual: 500,
            pwm: 119,
            spin: Spin::Clockwise,
        };
        let line = render(&report);
        assert_eq!(line.as_str(), "Ref:612 | Act:500 | PWM:119 | Sent:Horario\r\n");
        assert_eq!(Sample::parse(&line), Ok(Sample::Motor(report)));
    }

    #[test]
    fn joystick_line() {
        let report = JoystickReport {
            x: 1023,
            y: 517,
            heading: Heading::Down,
            color: Rgb::new(12, 0, 255),
            cursor: Cursor { x: 3, y: 4 },
        };
        let line = render(&report);
        assert_eq!(
            line.as_str(),
            "X=1023 | Y= 517 | Dir=ABAJO     | Color(R,G,B)=( 12,  0,255) | LED=(3,4)\r\n"
        );
        assert_eq!(Sample::parse(&line), Ok(Sample::Joystick(report)));
    }

    #[test]
    fn stick_sample_line() {
        let sample = StickSample {
            label: "arriba",
            x: 40,
            y: 512,
            pressed: true,
        };
        assert_eq!(render(&sample).as_str(), "[arriba] X=40 | Y=512 | SW=1\r\n");
    }

    #[test]
    fn rejects_other_lines() {
        assert_eq!(Sample::parse("UART 9600 8N1 listo"), Err(ParseError::Unrecognized));
        assert_eq!(Sample::parse("Temp:31 | PM:26 | Todo OFF"), Err(ParseError::Number("temp")));
        assert_eq!(Sample::parse("Temp:31C | PM:26"), Err(ParseError::Missing("action")));
        assert_eq!(
            Sample::parse("Ref:1 | Act:2 | PWM:3 | Sent:Lento"),
            Err(ParseError::Label("sent"))
        );
        assert_eq!(
            Sample::parse("X=1 | Y=2 | Dir=CENTRO | Color(R,G,B)=(1,2) | LED=(0,0)"),
            Err(ParseError::Number("color"))
        );
        assert_eq!(
            Sample::parse("X=1 | Y=2 | Dir=CENTRO | Color(R,G,B)=(1,2,300) | LED=(0,0)"),
            Err(ParseError::Number("color"))
        );
    }
}
