//! SPI master on PB2-PB5 and the MFRC522 register bus on top of it.

use avr_device::atmega328p::SPI;
use labs_core::rc522::{read_address, write_address, RegisterBus};

use crate::{delay_ms, port, Peripherals};

/// PORTB: SS, MOSI, SCK. MISO (PB4) stays an input.
const SS: u8 = 1 << 2;
const MOSI: u8 = 1 << 3;
const SCK: u8 = 1 << 5;
/// PORTD: reader reset.
const RST: u8 = 1 << 4;

const SPE: u8 = 1 << 6;
const MSTR: u8 = 1 << 4;
const SPIF: u8 = 1 << 7;
const SPI2X: u8 = 1 << 0;

pub struct Spi<'a> {
    spi: &'a SPI,
}

impl<'a> Spi<'a> {
    /// Master, mode 0, fosc/2.
    pub fn new(dp: &'a Peripherals) -> Self {
        port::output_b(dp, SS | MOSI | SCK);
        port::set_b(dp, SS);
        dp.SPI.spcr.write(|w| unsafe { w.bits(SPE | MSTR) });
        dp.SPI.spsr.write(|w| unsafe { w.bits(SPI2X) });
        Self { spi: &dp.SPI }
    }

    pub fn transfer(&mut self, byte: u8) -> u8 {
        self.spi.spdr.write(|w| unsafe { w.bits(byte) });
        while self.spi.spsr.read().bits() & SPIF == 0 {}
        self.spi.spdr.read().bits()
    }
}

/// Register access framed by SS.
pub struct Rc522Bus<'a> {
    dp: &'a Peripherals,
    spi: Spi<'a>,
}

impl<'a> Rc522Bus<'a> {
    /// Pulse the reset line, then hand out the bus.
    pub fn new(dp: &'a Peripherals, spi: Spi<'a>) -> Self {
        port::output_d(dp, RST);
        port::clear_d(dp, RST);
        delay_ms(10);
        port::set_d(dp, RST);
        delay_ms(50);
        Self { dp, spi }
    }
}

impl RegisterBus for Rc522Bus<'_> {
    fn write(&mut self, reg: u8, value: u8) {
        port::clear_b(self.dp, SS);
        self.spi.transfer(write_address(reg));
        self.spi.transfer(value);
        port::set_b(self.dp, SS);
    }

    fn read(&mut self, reg: u8) -> u8 {
        port::clear_b(self.dp, SS);
        self.spi.transfer(read_address(reg));
        let value = self.spi.transfer(0);
        port::set_b(self.dp, SS);
        value
    }
}
