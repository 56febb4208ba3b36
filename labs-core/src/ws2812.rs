//! WS2812 frame buffers.
//!
//! The LEDs expect 24 bits per pixel in green, red, blue order, most
//! significant bit first. The firmware shifts out [`Frame::bytes`] with
//! interrupts disabled and then holds the line low to latch.

/// Pixels on the 8x8 matrix and on the sorter's indicator strip.
pub const NUM_LEDS: usize = 64;

/// Low time that latches the shifted data.
pub const LATCH_US: u16 = 80;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Wire order of one pixel.
    pub const fn grb(self) -> [u8; 3] {
        [self.g, self.r, self.b]
    }
}

pub struct Frame<const N: usize> {
    pixels: [Rgb; N],
}

impl<const N: usize> Frame<N> {
    pub const fn new() -> Self {
        Self {
            pixels: [Rgb::OFF; N],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [Rgb::OFF; N];
    }

    /// Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, color: Rgb) {
        if let Some(p) = self.pixels.get_mut(index) {
            *p = color;
        }
    }

    pub fn get(&self, index: usize) -> Rgb {
        self.pixels.get(index).copied().unwrap_or(Rgb::OFF)
    }

    /// Bytes in transmission order.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.iter().flat_map(|p| p.grb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_go_out_green_first() {
        let mut f = Frame::<2>::new();
        f.set(1, Rgb::new(1, 2, 3));
        let bytes: Vec<u8> = f.bytes().collect();
        assert_eq!(bytes, vec![0, 0, 0, 2, 1, 3]);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut f = Frame::<NUM_LEDS>::new();
        f.set(64, Rgb::new(9, 9, 9));
        assert_eq!(f.bytes().filter(|&b| b != 0).count(), 0);
        assert_eq!(f.get(64), Rgb::OFF);
    }

    #[test]
    fn clear_turns_everything_off() {
        let mut f = Frame::<4>::new();
        f.set(0, Rgb::new(255, 255, 255));
        f.clear();
        assert_eq!(f.get(0), Rgb::OFF);
    }
}
