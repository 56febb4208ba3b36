//! USART0 at 9600 8N1, polled.

use core::convert::Infallible;

use avr_device::atmega328p::USART0;
use labs_core::config::{BAUD, F_CPU};
use labs_core::timing::ubrr;
use ufmt::uWrite;

// UCSR0A
const RXC0: u8 = 1 << 7;
const UDRE0: u8 = 1 << 5;
// UCSR0B
const RXEN0: u8 = 1 << 4;
const TXEN0: u8 = 1 << 3;
// UCSR0C: asynchronous, no parity, one stop bit, 8 data bits
const MODE_8N1: u8 = (1 << 2) | (1 << 1);

pub struct Serial<'a> {
    usart: &'a USART0,
}

impl<'a> Serial<'a> {
    pub fn new(usart: &'a USART0) -> Self {
        usart.ubrr0.write(|w| unsafe { w.bits(ubrr(F_CPU, BAUD)) });
        usart.ucsr0b.write(|w| unsafe { w.bits(RXEN0 | TXEN0) });
        usart.ucsr0c.write(|w| unsafe { w.bits(MODE_8N1) });
        Self { usart }
    }

    pub fn write_byte(&mut self, byte: u8) {
        while self.usart.ucsr0a.read().bits() & UDRE0 == 0 {}
        self.usart.udr0.write(|w| unsafe { w.bits(byte) });
    }

    pub fn print(&mut self, s: &str) {
        for b in s.bytes() {
            self.write_byte(b);
        }
    }

    /// Blocks until a byte arrives.
    pub fn read_byte(&mut self) -> u8 {
        loop {
            if let Some(b) = self.try_read() {
                return b;
            }
        }
    }

    pub fn try_read(&mut self) -> Option<u8> {
        if self.usart.ucsr0a.read().bits() & RXC0 != 0 {
            Some(self.usart.udr0.read().bits())
        } else {
            None
        }
    }
}

impl uWrite for Serial<'_> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.print(s);
        Ok(())
    }
}
