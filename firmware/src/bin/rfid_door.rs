//! RFID door lock: MFRC522 reader on SPI, 16x2 LCD on I2C, the authorised
//! UID in EEPROM. PD3 registers a new card, PD2 erases it.

#![no_std]
#![no_main]

use firmware::eeprom::Eeprom;
use firmware::spi::{Rc522Bus, Spi};
use firmware::twi::{Pcf8574, Twi};
use firmware::uart::Serial;
use firmware::{delay_ms, peripherals, port, Peripherals};
use labs_core::door::{
    Door, Event, Mode, BANNER, BEEP_MS, BUTTON_ERASE, BUTTON_REGISTER, BUTTON_RELEASE_MS,
    BUTTON_SETTLE_MS, BUZZER, DETECT_POLL_MS, ERASED, ERASED_MS, ERASE_MS, INVALID, LED_GREEN,
    LED_RED, LOG_ERASED, LOG_ERASING, LOG_INVALID, LOG_REGISTERED, LOG_WAITING, PROMPT,
    REGISTERED, REGISTERED_MS, REGISTER_POLL_MS, REGISTER_PROMPT, VERDICT_MS, WELCOME,
    WELCOME_MS,
};
use labs_core::lcd::{Expander, Lcd};
use labs_core::rc522::Rc522;
use labs_core::text::HexBytes;
use ufmt::uwrite;

fn beep(dp: &Peripherals, count: u8) {
    for _ in 0..count {
        port::set_d(dp, BUZZER);
        delay_ms(BEEP_MS);
        port::clear_d(dp, BUZZER);
        delay_ms(BEEP_MS);
    }
}

/// `true` after a debounced press and release of the PORTD button.
fn button(dp: &Peripherals, mask: u8) -> bool {
    if port::read_d(dp) & mask != 0 {
        return false;
    }
    delay_ms(BUTTON_SETTLE_MS);
    while port::read_d(dp) & mask == 0 {}
    delay_ms(BUTTON_RELEASE_MS);
    true
}

fn show<E: Expander>(lcd: &mut Lcd<E>, lines: (&str, &str)) {
    lcd.show(lines.0, lines.1).ok();
}

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    let mut serial = Serial::new(&dp.USART0);

    let mut lcd = Lcd::new(Pcf8574::new(Twi::new(&dp.TWI)));
    lcd.init().ok();
    let mut reader = Rc522::new(Rc522Bus::new(&dp, Spi::new(&dp)));
    reader.init(delay_ms);

    port::output_b(&dp, LED_GREEN | LED_RED);
    port::clear_b(&dp, LED_GREEN | LED_RED);
    port::pullup_d(&dp, BUTTON_ERASE | BUTTON_REGISTER);
    port::output_d(&dp, BUZZER);
    port::clear_d(&dp, BUZZER);

    let mut door = Door::new(Eeprom::new(&dp.EEPROM));

    show(&mut lcd, WELCOME);
    serial.print(BANNER);
    delay_ms(WELCOME_MS);
    show(&mut lcd, PROMPT);

    loop {
        if button(&dp, BUTTON_REGISTER) {
            door.select(Mode::Register);
            show(&mut lcd, REGISTER_PROMPT);
            serial.print(LOG_WAITING);
        }
        if button(&dp, BUTTON_ERASE) {
            door.select(Mode::Erase);
            serial.print(LOG_ERASING);
        }

        let mode = door.mode();
        let uid = match mode {
            Mode::Erase => None,
            _ => reader.read_uid().ok(),
        };
        let event = door.poll(uid.as_ref().map(|u| &u[..]));
        if let (Some(heading), Some(uid)) = (event.log_heading(), uid.as_ref()) {
            serial.print(heading);
            uwrite!(serial, "{}\r\n", HexBytes(uid)).ok();
        }

        match event {
            Event::Idle if mode == Mode::Register => delay_ms(REGISTER_POLL_MS),
            Event::Idle => delay_ms(DETECT_POLL_MS),
            Event::Checked(verdict) => {
                show(&mut lcd, verdict.lines());
                port::clear_b(&dp, LED_GREEN | LED_RED);
                port::set_b(&dp, verdict.led());
                beep(&dp, verdict.beeps());
                serial.print(verdict.log());
                delay_ms(VERDICT_MS);
                port::clear_b(&dp, LED_GREEN | LED_RED);
                show(&mut lcd, PROMPT);
                delay_ms(DETECT_POLL_MS);
            }
            Event::Registered => {
                show(&mut lcd, REGISTERED);
                serial.print(LOG_REGISTERED);
                beep(&dp, 1);
                delay_ms(REGISTER_POLL_MS + REGISTERED_MS);
                port::clear_b(&dp, LED_GREEN | LED_RED);
                show(&mut lcd, PROMPT);
            }
            Event::Rejected => {
                show(&mut lcd, INVALID);
                serial.print(LOG_INVALID);
                beep(&dp, 1);
                delay_ms(REGISTER_POLL_MS + REGISTERED_MS);
                show(&mut lcd, PROMPT);
            }
            Event::Erased => {
                delay_ms(ERASE_MS);
                show(&mut lcd, ERASED);
                serial.print(LOG_ERASED);
                delay_ms(ERASED_MS);
                show(&mut lcd, PROMPT);
            }
        }
    }
}
