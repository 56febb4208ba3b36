//! Reflectance color sorter: classify, report, turn the servo, light the
//! indicator.

#![no_std]
#![no_main]

use firmware::adc::Adc;
use firmware::timers::Servo;
use firmware::uart::Serial;
use firmware::{delay_ms, peripherals, port, ws2812};
use labs_core::color::{
    classify, Reading, Report, INDICATOR_MS, LED_B, LED_G, LED_MASK, LED_R, SERVO_SETTLE_MS,
};
use labs_core::ws2812::{Frame, NUM_LEDS};
use ufmt::uwrite;

/// PORTB: servo on OC1A.
const SERVO: u8 = 1 << 1;

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    let mut serial = Serial::new(&dp.USART0);
    let mut adc = Adc::new(&dp.ADC);

    port::output_d(&dp, LED_MASK);
    port::clear_d(&dp, LED_MASK);
    port::output_b(&dp, SERVO);
    let mut servo = Servo::new(&dp.TC1);
    ws2812::init(&dp);
    let mut frame = Frame::<NUM_LEDS>::new();

    loop {
        let sample = Reading {
            r: adc.channel(&dp, LED_R).delta(),
            g: adc.channel(&dp, LED_G).delta(),
            b: adc.channel(&dp, LED_B).delta(),
        };
        let matched = classify(&sample);
        uwrite!(serial, "{}", Report { sample: &sample, matched }).ok();

        servo.set_angle(matched.angle);
        delay_ms(SERVO_SETTLE_MS);

        let (color, leds) = matched.name.indicator();
        frame.set(0, color);
        ws2812::write(&frame);
        port::set_d(&dp, leds);

        delay_ms(INDICATOR_MS);
        port::clear_d(&dp, LED_MASK);
    }
}
