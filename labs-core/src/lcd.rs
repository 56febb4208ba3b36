//! HD44780 16x2 character LCD behind a PCF8574 I2C expander.
//!
//! The expander drives the LCD in 4-bit mode: each byte goes out as two
//! nibbles in the high half of the expander port, with the low bits used
//! for register select, enable and the backlight.

use ufmt::uWrite;

/// 7-bit I2C address of the expander.
pub const ADDRESS: u8 = 0x27;
pub const COLUMNS: u8 = 16;

pub const BACKLIGHT: u8 = 0x08;
pub const ENABLE: u8 = 0x04;
/// Register select: 0 for commands, 1 for character data.
pub const RS_DATA: u8 = 0x01;

pub const CLEAR: u8 = 0x01;
/// 4-bit mode setup, two lines, display on without cursor, left to right.
pub const INIT_SEQUENCE: [u8; 6] = [0x33, 0x32, 0x28, 0x0C, 0x06, CLEAR];

pub const POWER_UP_MS: u16 = 15;
pub const CLEAR_MS: u16 = 2;

/// DDRAM address command for a row and column.
pub const fn position(row: u8, col: u8) -> u8 {
    (if row == 0 { 0x80 } else { 0xC0 }) + col
}

/// Expander writes for one nibble: enable high, then enable low.
pub const fn strobe(nibble: u8, mode: u8) -> [u8; 2] {
    let data = (nibble & 0xF0) | BACKLIGHT | mode;
    [data | ENABLE, data & !ENABLE]
}

/// The two strobes that carry one byte, high nibble first.
pub const fn byte_strobes(byte: u8, mode: u8) -> [[u8; 2]; 2] {
    [strobe(byte & 0xF0, mode), strobe(byte << 4, mode)]
}

/// Link to the expander.
pub trait Expander {
    type Error;

    /// Send both bytes of one strobe in a single I2C transaction.
    fn strobe(&mut self, bytes: [u8; 2]) -> Result<(), Self::Error>;

    fn delay_ms(&mut self, ms: u16);
}

pub struct Lcd<E> {
    bus: E,
}

impl<E: Expander> Lcd<E> {
    pub const fn new(bus: E) -> Self {
        Self { bus }
    }

    pub fn init(&mut self) -> Result<(), E::Error> {
        self.bus.delay_ms(POWER_UP_MS);
        for cmd in INIT_SEQUENCE {
            self.command(cmd)?;
        }
        self.bus.delay_ms(CLEAR_MS);
        Ok(())
    }

    fn send(&mut self, byte: u8, mode: u8) -> Result<(), E::Error> {
        for s in byte_strobes(byte, mode) {
            self.bus.strobe(s)?;
        }
        Ok(())
    }

    pub fn command(&mut self, cmd: u8) -> Result<(), E::Error> {
        self.send(cmd, 0)
    }

    pub fn clear(&mut self) -> Result<(), E::Error> {
        self.command(CLEAR)?;
        self.bus.delay_ms(CLEAR_MS);
        Ok(())
    }

    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), E::Error> {
        self.command(position(row, col))
    }

    pub fn print(&mut self, text: &str) -> Result<(), E::Error> {
        for b in text.bytes() {
            self.send(b, RS_DATA)?;
        }
        Ok(())
    }

    /// Clear and show two lines.
    pub fn show(&mut self, top: &str, bottom: &str) -> Result<(), E::Error> {
        self.clear()?;
        self.set_cursor(0, 0)?;
        self.print(top)?;
        self.set_cursor(1, 0)?;
        self.print(bottom)
    }

    /// Second line as `count` asterisks, blanking the rest.
    pub fn masked(&mut self, count: u8) -> Result<(), E::Error> {
        self.set_cursor(1, 0)?;
        for col in 0..COLUMNS {
            self.send(if col < count { b'*' } else { b' ' }, RS_DATA)?;
        }
        Ok(())
    }

    pub fn release(self) -> E {
        self.bus
    }
}

impl<E: Expander> uWrite for Lcd<E> {
    type Error = E::Error;

    fn write_str(&mut self, s: &str) -> Result<(), E::Error> {
        self.print(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        strobes: Vec<[u8; 2]>,
        delays: Vec<u16>,
    }

    impl Expander for Recorder {
        type Error = ();

        fn strobe(&mut self, bytes: [u8; 2]) -> Result<(), ()> {
            self.strobes.push(bytes);
            Ok(())
        }

        fn delay_ms(&mut self, ms: u16) {
            self.delays.push(ms);
        }
    }

    /// Rebuild bytes from recorded strobes, checking the enable pulse.
    fn decode(strobes: &[[u8; 2]]) -> Vec<(u8, u8)> {
        strobes
            .chunks(2)
            .map(|pair| {
                for s in pair {
                    assert_eq!(s[0] & ENABLE, ENABLE);
                    assert_eq!(s[1] & ENABLE, 0);
                    assert_eq!(s[0] & BACKLIGHT, BACKLIGHT);
                }
                let byte = (pair[0][1] & 0xF0) | (pair[1][1] >> 4);
                (byte, pair[0][1] & RS_DATA)
            })
            .collect()
    }

    #[test]
    fn strobe_bits() {
        assert_eq!(strobe(0x30, 0), [0x3C, 0x38]);
        assert_eq!(byte_strobes(b'A', RS_DATA), [[0x4D, 0x49], [0x1D, 0x19]]);
    }

    #[test]
    fn positions() {
        assert_eq!(position(0, 0), 0x80);
        assert_eq!(position(1, 5), 0xC5);
    }

    #[test]
    fn init_sends_sequence() {
        let mut lcd = Lcd::new(Recorder::default());
        lcd.init().unwrap();
        let bus = lcd.release();
        let sent: Vec<u8> = decode(&bus.strobes).into_iter().map(|(b, _)| b).collect();
        assert_eq!(sent, INIT_SEQUENCE);
        assert_eq!(bus.delays, vec![15, 2]);
    }

    #[test]
    fn show_two_lines() {
        let mut lcd = Lcd::new(Recorder::default());
        lcd.show("Hi", "yo").unwrap();
        let sent = decode(&lcd.release().strobes);
        assert_eq!(
            sent,
            vec![
                (CLEAR, 0),
                (0x80, 0),
                (b'H', 1),
                (b'i', 1),
                (0xC0, 0),
                (b'y', 1),
                (b'o', 1),
            ]
        );
    }

    #[test]
    fn masked_line_is_padded() {
        let mut lcd = Lcd::new(Recorder::default());
        lcd.masked(3).unwrap();
        let sent = decode(&lcd.release().strobes);
        assert_eq!(sent.len(), 17);
        assert_eq!(sent[1..4], [(b'*', 1); 3]);
        assert!(sent[4..].iter().all(|&c| c == (b' ', 1)));
    }
}
