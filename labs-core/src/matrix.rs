//! Joystick-driven cursor on an 8x8 WS2812 matrix.

use crate::ws2812::Rgb;

pub const WIDTH: u8 = 8;
pub const HEIGHT: u8 = 8;

/// ADC readings below this count as pushed toward zero.
pub const LOW: u16 = 400;
/// ADC readings above this count as pushed toward full scale.
pub const HIGH: u16 = 600;

pub const LOOP_MS: u16 = 150;

/// Joystick switch on PD2, active low.
pub const SWITCH: u8 = 1 << 2;

pub const BANNER: &str = "\r\n=== CONTROL DE LED DE MATRIZ WS2813B CON JOYSTICK ===\r\n";
pub const RANDOM_COLOR: &str = "APLICACIÓN DE COLOR ALEATORIO\r\n";

pub const CALIBRATION_BANNER: &str = "\r\n=== Calibracion Joystick (modo manual) ===\r\n\
1) Escriba la DIRECCION y presione ENTER.\r\n\
2) Cuando quiera medir, presione 'w'.\r\n\
   Direcciones sugeridas: ARRIBA/ABAJO/IZQUIERDA/DERECHA/CENTRO\r\n";
pub const CALIBRATION_PROMPT: &str = "\r\nDireccion> ";
pub const CALIBRATION_EMPTY: &str = "(vacio, reintente)\r\n";
pub const CALIBRATION_READY: &str = "Listo. Presione 'w' para medir...\r\n";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Center,
    Up,
    Down,
    Right,
    Left,
}

impl Heading {
    pub const fn label(self) -> &'static str {
        match self {
            Heading::Center => "CENTRO",
            Heading::Up => "ARRIBA",
            Heading::Down => "ABAJO",
            Heading::Right => "DERECHA",
            Heading::Left => "IZQUIERDA",
        }
    }
}

/// Lit pixel position. The stick is mounted rotated: its X axis moves the
/// cursor vertically and its Y axis moves it horizontally.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub x: u8,
    pub y: u8,
}

impl Default for Cursor {
    fn default() -> Self {
        Self { x: 3, y: 3 }
    }
}

impl Cursor {
    pub const fn index(&self) -> usize {
        self.y as usize * WIDTH as usize + self.x as usize
    }

    /// Move at most one pixel per axis. A horizontal move wins the label.
    pub fn step(&mut self, stick_x: u16, stick_y: u16) -> Heading {
        let mut heading = Heading::Center;
        if stick_x < LOW && self.y > 0 {
            self.y -= 1;
            heading = Heading::Up;
        } else if stick_x > HIGH && self.y < HEIGHT - 1 {
            self.y += 1;
            heading = Heading::Down;
        }
        if stick_y < LOW && self.x < WIDTH - 1 {
            self.x += 1;
            heading = Heading::Right;
        } else if stick_y > HIGH && self.x > 0 {
            self.x -= 1;
            heading = Heading::Left;
        }
        heading
    }
}

/// Xorshift generator for the random cursor colors.
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Any seed works; zero is remapped since xorshift would stick there.
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x2545_F491 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    pub fn color(&mut self) -> Rgb {
        let v = self.next_u32();
        Rgb::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REST: u16 = 512;

    #[test]
    fn starts_near_centre() {
        let c = Cursor::default();
        assert_eq!((c.x, c.y), (3, 3));
        assert_eq!(c.index(), 27);
    }

    #[test]
    fn resting_stick_stays() {
        let mut c = Cursor::default();
        assert_eq!(c.step(REST, REST), Heading::Center);
        assert_eq!(c, Cursor::default());
    }

    #[test]
    fn axes_are_swapped() {
        let mut c = Cursor::default();
        assert_eq!(c.step(100, REST), Heading::Up);
        assert_eq!((c.x, c.y), (3, 2));
        assert_eq!(c.step(REST, 100), Heading::Right);
        assert_eq!((c.x, c.y), (4, 2));
        assert_eq!(c.step(900, 900), Heading::Left);
        assert_eq!((c.x, c.y), (3, 3));
    }

    #[test]
    fn clamps_at_edges() {
        let mut c = Cursor { x: 7, y: 0 };
        assert_eq!(c.step(0, 0), Heading::Center);
        assert_eq!(c.index(), 7);
        let mut c = Cursor { x: 0, y: 7 };
        assert_eq!(c.step(1023, 1023), Heading::Center);
        assert_eq!(c.index(), 56);
    }

    #[test]
    fn rng_varies() {
        let mut rng = Rng::new(0);
        let a = rng.color();
        let b = rng.color();
        assert_ne!(a, b);
        let mut again = Rng::new(0);
        assert_eq!(again.color(), a);
    }
}
