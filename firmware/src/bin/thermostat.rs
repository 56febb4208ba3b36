//! LM35 thermostat: heater relay below the setpoint band, fan through an
//! H-bridge above it. Type `x` on the serial port to change the setpoint.

#![no_std]
#![no_main]

use firmware::adc::Adc;
use firmware::timers::Pwm0;
use firmware::uart::Serial;
use firmware::{delay_ms, peripherals, port};
use labs_core::telemetry::ThermostatReport;
use labs_core::thermostat::{
    adc_to_celsius, Band, Event, Setpoint, BANNER, BRIDGE_ENABLE, EDIT_OPENED, HEATER, IN1, IN2,
    OUT_OF_RANGE, REPORT_MS, RESUMING, UPDATED,
};
use ufmt::uwrite;

/// PORTD: OC0A drives the bridge enable through the fan PWM.
const FAN_PWM: u8 = 1 << 6;
const SENSOR: u8 = 0;

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    let mut serial = Serial::new(&dp.USART0);
    let mut adc = Adc::new(&dp.ADC);

    port::output_b(&dp, HEATER | BRIDGE_ENABLE);
    port::clear_b(&dp, HEATER);
    port::set_b(&dp, BRIDGE_ENABLE);
    port::output_d(&dp, IN1 | IN2 | FAN_PWM);
    port::clear_d(&dp, IN1 | IN2);
    let mut fan = Pwm0::new(&dp.TC0);

    let mut setpoint = Setpoint::new();
    serial.print(BANNER);

    let mut elapsed = REPORT_MS;
    loop {
        while let Some(byte) = serial.try_read() {
            match setpoint.handle(byte) {
                Event::Opened => serial.print(EDIT_OPENED),
                Event::Echo(b) => serial.write_byte(b),
                Event::Updated(_) => {
                    serial.print(UPDATED);
                    serial.print(RESUMING);
                }
                Event::OutOfRange => {
                    serial.print(OUT_OF_RANGE);
                    serial.print(RESUMING);
                }
                Event::Ignored => {}
            }
        }

        if setpoint.paused() {
            elapsed = REPORT_MS;
            delay_ms(1);
            continue;
        }

        if elapsed >= REPORT_MS {
            elapsed = 0;
            let temp = adc_to_celsius(adc.read(SENSOR));
            let band = Band::classify(temp, setpoint.value());

            if band.heater_on() {
                port::set_b(&dp, HEATER);
            } else {
                port::clear_b(&dp, HEATER);
            }
            port::clear_d(&dp, IN1 | IN2);
            port::set_d(&dp, band.bridge());
            fan.set_duty(band.duty());

            uwrite!(
                serial,
                "{}",
                ThermostatReport {
                    temp,
                    setpoint: setpoint.value(),
                    band,
                }
            )
            .ok();
        }

        delay_ms(1);
        elapsed += 1;
    }
}
