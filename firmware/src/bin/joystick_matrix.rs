//! Move one lit pixel around an 8x8 WS2812 matrix with an analog joystick.
//! The stick button picks a new random color.

#![no_std]
#![no_main]

use firmware::adc::Adc;
use firmware::uart::Serial;
use firmware::{delay_ms, peripherals, port, ws2812};
use labs_core::matrix::{Cursor, Rng, BANNER, LOOP_MS, RANDOM_COLOR, SWITCH};
use labs_core::telemetry::JoystickReport;
use labs_core::ws2812::{Frame, NUM_LEDS};
use ufmt::uwrite;

const STICK_X: u8 = 0;
const STICK_Y: u8 = 1;
/// Unconnected input; its noise seeds the generator.
const FLOATING: u8 = 5;
const RELEASE_POLL_MS: u16 = 10;

fn seed(adc: &mut Adc) -> u32 {
    let mut seed = 0u32;
    for _ in 0..32 {
        seed = (seed << 1) ^ adc.read(FLOATING) as u32;
    }
    seed
}

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    let mut serial = Serial::new(&dp.USART0);
    let mut adc = Adc::new(&dp.ADC);
    port::pullup_d(&dp, SWITCH);
    ws2812::init(&dp);

    let mut rng = Rng::new(seed(&mut adc));
    let mut color = rng.color();
    let mut cursor = Cursor::default();
    let mut frame = Frame::<NUM_LEDS>::new();
    serial.print(BANNER);

    loop {
        let x = adc.read(STICK_X);
        let y = adc.read(STICK_Y);

        if port::read_d(&dp) & SWITCH == 0 {
            color = rng.color();
            serial.print(RANDOM_COLOR);
            while port::read_d(&dp) & SWITCH == 0 {
                delay_ms(RELEASE_POLL_MS);
            }
        }

        let heading = cursor.step(x, y);
        frame.clear();
        frame.set(cursor.index(), color);
        ws2812::write(&frame);

        let report = JoystickReport {
            x,
            y,
            heading,
            color,
            cursor,
        };
        uwrite!(serial, "{}", report).ok();

        delay_ms(LOOP_MS);
    }
}
