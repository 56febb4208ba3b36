//! On-chip EEPROM as a [`ByteStore`].

use avr_device::atmega328p::EEPROM;
use labs_core::ByteStore;

const EERE: u8 = 1 << 0;
const EEPE: u8 = 1 << 1;
const EEMPE: u8 = 1 << 2;

pub struct Eeprom<'a> {
    eeprom: &'a EEPROM,
}

impl<'a> Eeprom<'a> {
    pub fn new(eeprom: &'a EEPROM) -> Self {
        Self { eeprom }
    }

    fn wait_ready(&self) {
        while self.eeprom.eecr.read().bits() & EEPE != 0 {}
    }
}

impl ByteStore for Eeprom<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        self.wait_ready();
        self.eeprom.eear.write(|w| unsafe { w.bits(addr) });
        self.eeprom.eecr.write(|w| unsafe { w.bits(EERE) });
        self.eeprom.eedr.read().bits()
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.wait_ready();
        self.eeprom.eear.write(|w| unsafe { w.bits(addr) });
        self.eeprom.eedr.write(|w| unsafe { w.bits(value) });
        // EEPE has to follow EEMPE within four cycles.
        avr_device::interrupt::free(|_| {
            self.eeprom.eecr.write(|w| unsafe { w.bits(EEMPE) });
            self.eeprom.eecr.write(|w| unsafe { w.bits(EEMPE | EEPE) });
        });
    }
}
