//! Keypad lock: PIN entry on a 4x4 keypad, 16x2 LCD, PIN kept in EEPROM.

#![no_std]
#![no_main]

use firmware::eeprom::Eeprom;
use firmware::twi::{Pcf8574, Twi};
use firmware::{delay_ms, delay_us, keypad, peripherals, port, Peripherals};
use labs_core::lcd::Lcd;
use labs_core::lock::{
    Bottom, Led, LockMachine, Notice, Outcome, ALARM, ALARM_CYCLES, ALARM_END, ALARM_END_MS,
    ALARM_GAP_MS, ALARM_TONE_MS, BUZZER_HZ, CONFIRM_BEEP_MS, KEY_CLICK_MS, STARTUP, STARTUP_MS,
};

/// PORTB
const GREEN: u8 = 1 << 3;
const RED: u8 = 1 << 4;
const BUZZER: u8 = 1 << 5;

const DEBOUNCE_MS: u16 = 20;
const SCAN_MS: u16 = 10;

/// Square wave on the buzzer pin for `ms`.
fn beep(dp: &Peripherals, ms: u16) {
    let half_period_us = (500_000 / BUZZER_HZ as u32) as u16;
    let toggles = ms as u32 * 2 * BUZZER_HZ as u32 / 1000;
    for _ in 0..toggles {
        dp.PORTB.pinb.write(|w| unsafe { w.bits(BUZZER) });
        delay_us(half_period_us);
    }
    port::clear_b(dp, BUZZER);
}

fn led_mask(led: Led) -> u8 {
    match led {
        Led::Green => GREEN,
        Led::Red => RED,
    }
}

/// Block until a key is pressed and released; clicks on the press.
fn wait_key(dp: &Peripherals) -> u8 {
    loop {
        if let Some(key) = keypad::scan(dp) {
            delay_ms(DEBOUNCE_MS);
            if keypad::scan(dp) == Some(key) {
                beep(dp, KEY_CLICK_MS);
                while keypad::scan(dp).is_some() {
                    delay_ms(SCAN_MS);
                }
                return key;
            }
        }
        delay_ms(SCAN_MS);
    }
}

fn play<E: labs_core::lcd::Expander>(dp: &Peripherals, lcd: &mut Lcd<E>, notice: &Notice) {
    lcd.show(notice.top, notice.bottom).ok();
    if let Some((led, ms)) = notice.led {
        port::set_b(dp, led_mask(led));
        delay_ms(ms);
        port::clear_b(dp, led_mask(led));
    }
    if notice.beep_ms > 0 {
        beep(dp, notice.beep_ms);
    }
    delay_ms(notice.hold_ms);
}

fn alarm<E: labs_core::lcd::Expander>(dp: &Peripherals, lcd: &mut Lcd<E>) {
    lcd.show(ALARM.0, ALARM.1).ok();
    for _ in 0..ALARM_CYCLES {
        port::set_b(dp, RED);
        beep(dp, ALARM_TONE_MS);
        port::clear_b(dp, RED);
        delay_ms(ALARM_GAP_MS);
    }
    lcd.show(ALARM_END.0, ALARM_END.1).ok();
    delay_ms(ALARM_END_MS);
}

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    port::output_b(&dp, GREEN | RED | BUZZER);
    port::clear_b(&dp, GREEN | RED | BUZZER);
    keypad::init_gpio(&dp);

    let mut lcd = Lcd::new(Pcf8574::new(Twi::new(&dp.TWI)));
    lcd.init().ok();
    lcd.show(STARTUP.0, STARTUP.1).ok();
    delay_ms(STARTUP_MS);

    let mut lock = LockMachine::new(Eeprom::new(&dp.EEPROM));
    let mut redraw = true;

    loop {
        if redraw {
            let (title, bottom) = lock.screen();
            match bottom {
                Bottom::Text(text) => lcd.show(title, text).ok(),
                Bottom::Masked(count) => lcd
                    .show(title, "")
                    .and_then(|_| lcd.masked(count))
                    .ok(),
            };
        }

        let outcome = lock.key(wait_key(&dp));
        if outcome.confirmed() {
            beep(&dp, CONFIRM_BEEP_MS);
        }
        if let Some(notice) = outcome.notice() {
            play(&dp, &mut lcd, &notice);
        }
        if outcome == Outcome::Alarm {
            alarm(&dp, &mut lcd);
        }

        redraw = match outcome {
            Outcome::Typed => {
                if let (_, Bottom::Masked(count)) = lock.screen() {
                    lcd.masked(count).ok();
                    false
                } else {
                    true
                }
            }
            Outcome::Ignored => false,
            _ => true,
        };
    }
}
