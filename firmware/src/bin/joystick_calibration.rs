//! Label a stick position, then sample it with `w`.

#![no_std]
#![no_main]

use firmware::adc::Adc;
use firmware::uart::Serial;
use firmware::{peripherals, port};
use labs_core::matrix::{
    CALIBRATION_BANNER, CALIBRATION_EMPTY, CALIBRATION_PROMPT, CALIBRATION_READY, SWITCH,
};
use labs_core::telemetry::StickSample;
use labs_core::text::{Feed, LineBuffer, Terminator};
use ufmt::uwrite;

const STICK_X: u8 = 0;
const STICK_Y: u8 = 1;

fn read_label(serial: &mut Serial, label: &mut LineBuffer<23>) {
    loop {
        label.clear();
        serial.print(CALIBRATION_PROMPT);
        loop {
            match label.feed(serial.read_byte()) {
                Feed::Echo(b) => serial.write_byte(b),
                Feed::Submit => break,
                Feed::Ignored => {}
            }
        }
        serial.print("\r\n");
        if !label.is_empty() {
            return;
        }
        serial.print(CALIBRATION_EMPTY);
    }
}

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    let mut serial = Serial::new(&dp.USART0);
    let mut adc = Adc::new(&dp.ADC);
    port::pullup_d(&dp, SWITCH);

    let mut label = LineBuffer::<23>::new(Terminator::Enter);
    serial.print(CALIBRATION_BANNER);

    loop {
        read_label(&mut serial, &mut label);
        serial.print(CALIBRATION_READY);
        while serial.read_byte() != b'w' {}

        let sample = StickSample {
            label: label.as_str(),
            x: adc.read(STICK_X),
            y: adc.read(STICK_Y),
            pressed: port::read_d(&dp) & SWITCH == 0,
        };
        uwrite!(serial, "{}", sample).ok();
    }
}
