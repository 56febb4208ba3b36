//! Serial line editing and small text helpers.
//!
//! The labs read user input one byte at a time from the UART and echo it
//! back, so line editing happens a byte at a time as well.

use heapless::String;
use ufmt::{uDisplay, uWrite, Formatter};

/// What ends a line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Terminator {
    /// Carriage return or line feed.
    Enter,
    /// A specific character; CR and LF are then dropped silently.
    Byte(u8),
}

/// Result of feeding one received byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Feed {
    /// Stored; the byte should be echoed.
    Echo(u8),
    /// The terminator arrived; the line is ready.
    Submit,
    /// Dropped (buffer full, control byte, non-ASCII).
    Ignored,
}

/// Fixed-capacity input line.
pub struct LineBuffer<const N: usize> {
    text: String<N>,
    end: Terminator,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new(end: Terminator) -> Self {
        Self {
            text: String::new(),
            end,
        }
    }

    pub fn feed(&mut self, byte: u8) -> Feed {
        let newline = byte == b'\r' || byte == b'\n';
        match self.end {
            Terminator::Enter if newline => return Feed::Submit,
            Terminator::Byte(t) if byte == t => return Feed::Submit,
            _ if newline => return Feed::Ignored,
            _ => {}
        }
        if !(0x20..0x7F).contains(&byte) {
            return Feed::Ignored;
        }
        match self.text.push(byte as char) {
            Ok(()) => Feed::Echo(byte),
            Err(_) => Feed::Ignored,
        }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Leading decimal integer of `s`, like C `atoi` but `None` when there
/// are no digits at all.
pub fn parse_int(s: &str) -> Option<i32> {
    let bytes = s.trim_start().as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    let mut value: i32 = 0;
    let mut seen = false;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        value = value.saturating_mul(10).saturating_add((b - b'0') as i32);
        seen = true;
    }
    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// `0xAB` style byte.
#[derive(Copy, Clone)]
pub struct Hex(pub u8);

impl uDisplay for Hex {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str("0x")?;
        f.write_char(HEX_DIGITS[(self.0 >> 4) as usize] as char)?;
        f.write_char(HEX_DIGITS[(self.0 & 0x0F) as usize] as char)
    }
}

/// Bytes as `0xAA 0xBB ` with a space after each.
pub struct HexBytes<'a>(pub &'a [u8]);

impl uDisplay for HexBytes<'_> {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        for &b in self.0 {
            Hex(b).fmt(f)?;
            f.write_char(' ')?;
        }
        Ok(())
    }
}

/// Unsigned number padded with spaces to `width` columns, like `%4u`.
#[derive(Copy, Clone)]
pub struct RightAligned(pub u16, pub u8);

impl uDisplay for RightAligned {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let mut digits = 1;
        let mut rest = self.0 / 10;
        while rest > 0 {
            digits += 1;
            rest /= 10;
        }
        for _ in digits..self.1 {
            f.write_char(' ')?;
        }
        self.0.fmt(f)
    }
}

/// Text followed by spaces up to `width` columns, like `%-9s`.
#[derive(Copy, Clone)]
pub struct LeftAligned<'a>(pub &'a str, pub u8);

impl uDisplay for LeftAligned<'_> {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.0)?;
        for _ in self.0.chars().count()..self.1 as usize {
            f.write_char(' ')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ufmt::uwrite;

    #[test]
    fn enter_submits() {
        let mut line = LineBuffer::<8>::new(Terminator::Enter);
        assert_eq!(line.feed(b'2'), Feed::Echo(b'2'));
        assert_eq!(line.feed(b'8'), Feed::Echo(b'8'));
        assert_eq!(line.feed(b'\r'), Feed::Submit);
        assert_eq!(line.as_str(), "28");
    }

    #[test]
    fn custom_terminator_drops_newlines() {
        let mut line = LineBuffer::<31>::new(Terminator::Byte(b'w'));
        for &b in b"ro\r\njo" {
            line.feed(b);
        }
        assert_eq!(line.feed(b'w'), Feed::Submit);
        assert_eq!(line.as_str(), "rojo");
    }

    #[test]
    fn full_buffer_ignores() {
        let mut line = LineBuffer::<2>::new(Terminator::Enter);
        line.feed(b'1');
        line.feed(b'2');
        assert_eq!(line.feed(b'3'), Feed::Ignored);
        assert_eq!(line.as_str(), "12");
        line.clear();
        assert!(line.is_empty());
    }

    #[test]
    fn atoi_like() {
        assert_eq!(parse_int("30"), Some(30));
        assert_eq!(parse_int(" 42abc"), Some(42));
        assert_eq!(parse_int("-5"), Some(-5));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn hex_bytes() {
        let mut out: String<32> = String::new();
        uwrite!(out, "{}", HexBytes(&[0xDE, 0x0A, 0x33])).unwrap();
        assert_eq!(out.as_str(), "0xDE 0x0A 0x33 ");
    }

    #[test]
    fn column_padding() {
        let mut out: String<32> = String::new();
        uwrite!(
            out,
            "[{}|{}|{}|{}]",
            RightAligned(7, 4),
            RightAligned(1023, 4),
            RightAligned(0, 3),
            LeftAligned("ABAJO", 9)
        )
        .unwrap();
        assert_eq!(out.as_str(), "[   7|1023|  0|ABAJO    ]");

        out.clear();
        uwrite!(out, "{}", RightAligned(65535, 3)).unwrap();
        assert_eq!(out.as_str(), "65535");
    }
}
