//! DC motor that follows a reference potentiometer: proportional PWM on an
//! H-bridge, feedback from a second potentiometer on the shaft.

#![no_std]
#![no_main]

use firmware::adc::Adc;
use firmware::timers::Pwm0;
use firmware::uart::Serial;
use firmware::{delay_ms, peripherals, port};
use labs_core::motor::{drive, error, Spin, Throttle, BANNER, IN1, IN2, LOOP_MS};
use labs_core::telemetry::MotorReport;
use ufmt::uwrite;

const REFERENCE: u8 = 0;
const FEEDBACK: u8 = 1;
/// PORTD: OC0A.
const ENABLE: u8 = 1 << 6;

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    let mut serial = Serial::new(&dp.USART0);
    let mut adc = Adc::new(&dp.ADC);

    port::output_b(&dp, IN1 | IN2);
    port::clear_b(&dp, IN1 | IN2);
    port::output_d(&dp, ENABLE);
    let mut pwm = Pwm0::new(&dp.TC0);

    serial.print(BANNER);
    let mut throttle = Throttle::new();

    loop {
        let reference = adc.read(REFERENCE);
        let actual = adc.read(FEEDBACK);
        let err = error(reference, actual);
        let out = drive(err);

        port::clear_b(&dp, IN1 | IN2);
        port::set_b(&dp, out.spin.bridge());
        pwm.set_duty(out.pwm);

        if throttle.tick() {
            let report = MotorReport {
                reference,
                actual,
                pwm: out.pwm,
                spin: Spin::sensed(err),
            };
            uwrite!(serial, "{}", report).ok();
        }

        delay_ms(LOOP_MS);
    }
}
