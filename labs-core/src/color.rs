//! Reflectance color classifier for the sorting arm.
//!
//! A photoresistor on ADC0 is read with the room light only and again with
//! each of the red, green and blue LEDs lit. The three differences place a
//! sample inside one of the calibrated boxes below; samples that miss every
//! box go to the box whose centre is nearest.

use ufmt::{uDisplay, uWrite, uwrite, Formatter};

use crate::ws2812::Rgb;

/// ADC samples averaged per reading.
pub const SAMPLES: u8 = 30;
/// Spacing between averaged samples.
pub const SAMPLE_GAP_MS: u16 = 5;
/// LED warm-up before the lit reading.
pub const LED_SETTLE_MS: u16 = 100;
/// Servo travel time before the indicator comes on.
pub const SERVO_SETTLE_MS: u16 = 300;
/// How long the indicator stays on.
pub const INDICATOR_MS: u16 = 500;

/// Sensor LEDs on PORTD.
pub const LED_R: u8 = 1 << 2;
pub const LED_G: u8 = 1 << 3;
pub const LED_B: u8 = 1 << 4;
pub const LED_MASK: u8 = LED_R | LED_G | LED_B;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub min: u16,
    pub max: u16,
}

impl Span {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, v: u16) -> bool {
        v >= self.min && v <= self.max
    }

    /// Twice the centre, so distances stay in integers.
    const fn centre2(&self) -> i32 {
        self.min as i32 + self.max as i32
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorName {
    Green,
    Yellow,
    Red,
    Purple,
}

impl ColorName {
    pub const fn label(self) -> &'static str {
        match self {
            ColorName::Green => "VERDE",
            ColorName::Yellow => "AMARILLO",
            ColorName::Red => "ROJO",
            ColorName::Purple => "MORADO",
        }
    }

    /// Indicator pixel color and the sensor LEDs lit with it.
    pub const fn indicator(self) -> (Rgb, u8) {
        match self {
            ColorName::Green => (Rgb::new(0, 255, 0), LED_G),
            ColorName::Yellow => (Rgb::new(255, 255, 0), LED_R | LED_G),
            ColorName::Red => (Rgb::new(255, 0, 0), LED_R),
            ColorName::Purple => (Rgb::new(128, 0, 128), LED_B),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColorRange {
    pub name: ColorName,
    pub r: Span,
    pub g: Span,
    pub b: Span,
    /// Servo angle of the bin for this color.
    pub angle: u8,
}

pub const COLORS: [ColorRange; 4] = [
    ColorRange {
        name: ColorName::Green,
        r: Span::new(241, 274),
        g: Span::new(287, 367),
        b: Span::new(70, 138),
        angle: 155,
    },
    ColorRange {
        name: ColorName::Yellow,
        r: Span::new(309, 341),
        g: Span::new(274, 282),
        b: Span::new(68, 86),
        angle: 110,
    },
    ColorRange {
        name: ColorName::Red,
        r: Span::new(340, 354),
        g: Span::new(119, 142),
        b: Span::new(78, 86),
        angle: 70,
    },
    ColorRange {
        name: ColorName::Purple,
        r: Span::new(266, 382),
        g: Span::new(140, 155),
        b: Span::new(135, 150),
        angle: 25,
    },
];

/// Lit-minus-ambient ADC difference of one channel.
pub const fn reflectance(lit: u16, ambient: u16) -> u16 {
    lit.saturating_sub(ambient)
}

/// Raw measurement of one channel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Channel {
    pub lit: u16,
    pub ambient: u16,
}

impl Channel {
    pub const fn delta(&self) -> u16 {
        reflectance(self.lit, self.ambient)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Reading {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl ColorRange {
    pub const fn contains(&self, s: &Reading) -> bool {
        self.r.contains(s.r) && self.g.contains(s.g) && self.b.contains(s.b)
    }

    fn distance2(&self, s: &Reading) -> u64 {
        let d = |span: &Span, v: u16| {
            let e = 2 * v as i32 - span.centre2();
            (e as i64 * e as i64) as u64
        };
        d(&self.r, s.r) + d(&self.g, s.g) + d(&self.b, s.b)
    }
}

/// First box containing the sample, otherwise the nearest box centre.
pub fn classify(sample: &Reading) -> &'static ColorRange {
    if let Some(hit) = COLORS.iter().find(|c| c.contains(sample)) {
        return hit;
    }
    let mut best = &COLORS[0];
    let mut best_d = best.distance2(sample);
    for c in &COLORS[1..] {
        let d = c.distance2(sample);
        if d < best_d {
            best = c;
            best_d = d;
        }
    }
    best
}

/// Serial report printed after each classification.
pub struct Report<'a> {
    pub sample: &'a Reading,
    pub matched: &'a ColorRange,
}

impl uDisplay for Report<'_> {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let m = self.matched;
        uwrite!(f, "\r\nColor detectado: {}", m.name.label())?;
        uwrite!(
            f,
            "\r\nValores ADC -> R: {} | G: {} | B: {}",
            self.sample.r,
            self.sample.g,
            self.sample.b
        )?;
        uwrite!(
            f,
            "\r\nValores de referencia -> R: [{} ; {}] | G: [{} ; {}] | B: [{} ; {}]",
            m.r.min,
            m.r.max,
            m.g.min,
            m.g.max,
            m.b.min,
            m.b.max
        )?;
        f.write_str("\r\n---------------------------------------\r\n")
    }
}

/// Calibration line for one sample under a user-supplied name.
pub struct CalibrationLine<'a> {
    pub name: &'a str,
    pub r: Channel,
    pub g: Channel,
    pub b: Channel,
}

impl uDisplay for CalibrationLine<'_> {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        uwrite!(
            f,
            "COLOR={} | R:{}/{}  G:{}/{}  B:{}/{}  |  dR={}  dG={}  dB={}\r\n",
            self.name,
            self.r.lit,
            self.r.ambient,
            self.g.lit,
            self.g.ambient,
            self.b.lit,
            self.b.ambient,
            self.r.delta(),
            self.g.delta(),
            self.b.delta()
        )
    }
}

pub const CALIBRATION_PROMPT: &str =
    "\r\nColor (escriba nombre y luego 'w' para medir, '0' para terminar): ";
pub const CALIBRATION_BANNER: &str = "\r\n=== Calibracion RGB con LDR ===\r\n";
pub const CALIBRATION_DONE: &str = "\r\nFin de calibracion.\r\n";
pub const CALIBRATION_MEASURING: &str = "Midiendo...\r\n";
pub const CALIBRATION_NEXT: &str = "Listo. Ingrese otro color o '0' para terminar.\r\n";

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;
    use ufmt::uwrite;

    fn reading(r: u16, g: u16, b: u16) -> Reading {
        Reading { r, g, b }
    }

    #[test]
    fn inside_a_box() {
        assert_eq!(classify(&reading(250, 300, 100)).name, ColorName::Green);
        assert_eq!(classify(&reading(320, 278, 70)).name, ColorName::Yellow);
        assert_eq!(classify(&reading(345, 130, 80)).name, ColorName::Red);
        assert_eq!(classify(&reading(300, 150, 140)).name, ColorName::Purple);
    }

    #[test]
    fn first_box_wins_on_overlap() {
        // Red and purple overlap on R and G; blue decides.
        assert_eq!(classify(&reading(350, 141, 80)).name, ColorName::Red);
    }

    #[test]
    fn nearest_centre_otherwise() {
        // Slightly outside the red box on G.
        assert_eq!(classify(&reading(347, 110, 82)).name, ColorName::Red);
        assert_eq!(classify(&reading(0, 0, 0)).name, ColorName::Red);
        assert_eq!(classify(&reading(258, 400, 104)).name, ColorName::Green);
    }

    #[test]
    fn reflectance_saturates() {
        assert_eq!(reflectance(500, 200), 300);
        assert_eq!(reflectance(100, 200), 0);
    }

    #[test]
    fn indicators() {
        assert_eq!(ColorName::Yellow.indicator(), (Rgb::new(255, 255, 0), LED_R | LED_G));
        assert_eq!(ColorName::Purple.indicator().1, LED_B);
    }

    #[test]
    fn report_text() {
        let sample = reading(345, 130, 80);
        let matched = classify(&sample);
        let mut out: String<256> = String::new();
        uwrite!(out, "{}", Report { sample: &sample, matched }).unwrap();
        assert!(out.starts_with("\r\nColor detectado: ROJO\r\n"));
        assert!(out.contains("Valores ADC -> R: 345 | G: 130 | B: 80"));
        assert!(out.contains("R: [340 ; 354] | G: [119 ; 142] | B: [78 ; 86]"));
    }

    #[test]
    fn calibration_line() {
        let c = CalibrationLine {
            name: "rojo",
            r: Channel { lit: 600, ambient: 250 },
            g: Channel { lit: 380, ambient: 250 },
            b: Channel { lit: 200, ambient: 250 },
        };
        let mut out: String<128> = String::new();
        uwrite!(out, "{}", c).unwrap();
        assert_eq!(
            out.as_str(),
            "COLOR=rojo | R:600/250  G:380/250  B:200/250  |  dR=350  dG=130  dB=0\r\n"
        );
    }
}
