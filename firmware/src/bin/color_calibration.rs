//! Interactive reflectance measurements for building the color table.

#![no_std]
#![no_main]

use firmware::adc::Adc;
use firmware::uart::Serial;
use firmware::{delay_ms, peripherals, port};
use labs_core::color::{
    CalibrationLine, CALIBRATION_BANNER, CALIBRATION_DONE, CALIBRATION_MEASURING,
    CALIBRATION_NEXT, CALIBRATION_PROMPT, LED_B, LED_G, LED_MASK, LED_R,
};
use labs_core::text::{Feed, LineBuffer, Terminator};
use ufmt::uwrite;

/// LEDs-off pause before each ambient reading.
const DARK_MS: u16 = 50;

/// Read an echoed color name ending in `w`. `false` when the user typed `0`.
fn read_name(serial: &mut Serial, name: &mut LineBuffer<31>) -> bool {
    name.clear();
    serial.print(CALIBRATION_PROMPT);
    loop {
        let byte = serial.read_byte();
        if byte == b'0' && name.is_empty() {
            serial.print(CALIBRATION_DONE);
            return false;
        }
        match name.feed(byte) {
            Feed::Echo(b) => serial.write_byte(b),
            Feed::Submit => {
                serial.print("\r\n");
                return true;
            }
            Feed::Ignored => {}
        }
    }
}

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    let mut serial = Serial::new(&dp.USART0);
    let mut adc = Adc::new(&dp.ADC);
    port::output_d(&dp, LED_MASK);
    port::clear_d(&dp, LED_MASK);

    let mut name = LineBuffer::<31>::new(Terminator::Byte(b'w'));
    serial.print(CALIBRATION_BANNER);

    while read_name(&mut serial, &mut name) {
        serial.print(CALIBRATION_MEASURING);
        let mut measure = |led| {
            port::clear_d(&dp, LED_MASK);
            delay_ms(DARK_MS);
            adc.channel(&dp, led)
        };
        let line = CalibrationLine {
            name: name.as_str(),
            r: measure(LED_R),
            g: measure(LED_G),
            b: measure(LED_B),
        };
        uwrite!(serial, "{}", line).ok();
        serial.print(CALIBRATION_NEXT);
    }

    loop {}
}
