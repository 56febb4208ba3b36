//! 10-bit ADC, AVcc reference, clock divided by 128 (125 kHz).

use avr_device::atmega328p::ADC;
use labs_core::color::{Channel, LED_SETTLE_MS, SAMPLES, SAMPLE_GAP_MS};

use crate::{delay_ms, port, Peripherals};

const REFS_AVCC: u8 = 1 << 6;
const ADEN: u8 = 1 << 7;
const ADSC: u8 = 1 << 6;
const PRESCALER_128: u8 = 0b111;

pub struct Adc<'a> {
    adc: &'a ADC,
}

impl<'a> Adc<'a> {
    pub fn new(adc: &'a ADC) -> Self {
        adc.admux.write(|w| unsafe { w.bits(REFS_AVCC) });
        adc.adcsra.write(|w| unsafe { w.bits(ADEN | PRESCALER_128) });
        Self { adc }
    }

    /// One conversion on `channel` (0-7).
    pub fn read(&mut self, channel: u8) -> u16 {
        self.adc
            .admux
            .write(|w| unsafe { w.bits(REFS_AVCC | (channel & 0x07)) });
        self.adc
            .adcsra
            .modify(|r, w| unsafe { w.bits(r.bits() | ADSC) });
        while self.adc.adcsra.read().bits() & ADSC != 0 {}
        self.adc.adc.read().bits()
    }

    /// Mean of `samples` conversions taken `gap_ms` apart.
    pub fn average(&mut self, channel: u8, samples: u8, gap_ms: u16) -> u16 {
        let mut sum: u32 = 0;
        for _ in 0..samples {
            sum += self.read(channel) as u32;
            delay_ms(gap_ms);
        }
        (sum / samples.max(1) as u32) as u16
    }

    /// Reflectance of one sensor channel: room light first, then with the
    /// PORTD `led` lit. ADC0 carries the photoresistor.
    pub fn channel(&mut self, dp: &Peripherals, led: u8) -> Channel {
        let ambient = self.average(0, SAMPLES, SAMPLE_GAP_MS);
        port::set_d(dp, led);
        delay_ms(LED_SETTLE_MS);
        let lit = self.average(0, SAMPLES, SAMPLE_GAP_MS);
        port::clear_d(dp, led);
        Channel { lit, ambient }
    }
}
