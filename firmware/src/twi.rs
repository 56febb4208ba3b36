//! TWI (I2C) master and the PCF8574 expander behind the 16x2 LCD.

use avr_device::atmega328p::TWI;
use labs_core::lcd::{self, Expander};

use crate::{delay_ms, delay_us};

/// TWI (I2C) clock prescaler and bit rate for ~100kHz at 16MHz CPU.
/// SCL freq = CPU_FREQ / (16 + 2 * TWBR * prescaler)
/// 100kHz = 16MHz / (16 + 2 * 72 * 1) => TWBR = 72
const TWBR_VALUE: u8 = 72;

// TWCR
const TWINT: u8 = 1 << 7;
const TWSTA: u8 = 1 << 5;
const TWSTO: u8 = 1 << 4;
const TWEN: u8 = 1 << 2;

/// TWI status codes
const TW_START: u8 = 0x08;
const TW_REP_START: u8 = 0x10;
const TW_MT_SLA_ACK: u8 = 0x18;
const TW_MT_DATA_ACK: u8 = 0x28;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TwiError {
    /// TWINT never rose.
    Timeout,
    /// START was not acknowledged by the bus.
    Start(u8),
    /// Address or data byte was NACKed.
    Nack(u8),
}

pub struct Twi<'a> {
    twi: &'a TWI,
}

impl<'a> Twi<'a> {
    /// Set the bit rate and enable the peripheral.
    pub fn new(twi: &'a TWI) -> Self {
        twi.twbr.write(|w| unsafe { w.bits(TWBR_VALUE) });
        // Prescaler = 1 (TWPS = 0)
        twi.twsr.write(|w| unsafe { w.bits(0) });
        twi.twcr.write(|w| unsafe { w.bits(TWEN) });
        Self { twi }
    }

    /// Write `bytes` to the 7-bit `address` in one transaction.
    pub fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), TwiError> {
        let result = self.transfer(address, bytes);
        self.stop();
        result
    }

    fn transfer(&mut self, address: u8, bytes: &[u8]) -> Result<(), TwiError> {
        self.start()?;
        self.send(address << 1)?;
        for &b in bytes {
            self.send(b)?;
        }
        Ok(())
    }

    fn start(&mut self) -> Result<(), TwiError> {
        self.twi
            .twcr
            .write(|w| unsafe { w.bits(TWINT | TWSTA | TWEN) });
        self.wait_twint()?;
        let status = self.status();
        if status != TW_START && status != TW_REP_START {
            return Err(TwiError::Start(status));
        }
        Ok(())
    }

    fn send(&mut self, data: u8) -> Result<(), TwiError> {
        self.twi.twdr.write(|w| unsafe { w.bits(data) });
        self.twi.twcr.write(|w| unsafe { w.bits(TWINT | TWEN) });
        self.wait_twint()?;
        let status = self.status();
        if status != TW_MT_SLA_ACK && status != TW_MT_DATA_ACK {
            return Err(TwiError::Nack(status));
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.twi
            .twcr
            .write(|w| unsafe { w.bits(TWINT | TWSTO | TWEN) });
    }

    fn status(&self) -> u8 {
        self.twi.twsr.read().bits() & 0xF8
    }

    fn wait_twint(&self) -> Result<(), TwiError> {
        // Busy-wait for TWI interrupt flag with a timeout counter
        let mut timeout: u16 = 0xFFFF;
        while self.twi.twcr.read().bits() & TWINT == 0 {
            timeout -= 1;
            if timeout == 0 {
                return Err(TwiError::Timeout);
            }
        }
        Ok(())
    }
}

/// PCF8574 port expander wired to the LCD.
pub struct Pcf8574<'a> {
    twi: Twi<'a>,
}

impl<'a> Pcf8574<'a> {
    pub fn new(twi: Twi<'a>) -> Self {
        Self { twi }
    }
}

impl Expander for Pcf8574<'_> {
    type Error = TwiError;

    fn strobe(&mut self, bytes: [u8; 2]) -> Result<(), TwiError> {
        self.twi.write(lcd::ADDRESS, &bytes)?;
        delay_us(50);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u16) {
        delay_ms(ms);
    }
}
