//! LEDs on, LEDs off, then ten seconds in each sleep mode, forever.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use firmware::uart::Serial;
use firmware::{delay_ms, peripherals, port, timers, Peripherals};
use labs_core::sleep::{
    Countdown, Phase, SleepMode, SleepSchedule, WakeSource, LED_MASK, WDT_CHANGE_ENABLE,
    WDT_INTERRUPT_1S,
};
use ufmt::uwrite;

/// MCUSR watchdog reset flag.
const WDRF: u8 = 1 << 3;

// Both handlers only exist to wake the CPU.
#[avr_device::interrupt(atmega328p)]
fn TIMER1_COMPA() {}

#[avr_device::interrupt(atmega328p)]
fn WDT() {}

fn watchdog(dp: &Peripherals, mode: u8) {
    avr_device::interrupt::free(|_| {
        avr_device::asm::wdr();
        dp.CPU.mcusr.modify(|r, w| unsafe { w.bits(r.bits() & !WDRF) });
        dp.WDT.wdtcsr.write(|w| unsafe { w.bits(WDT_CHANGE_ENABLE) });
        dp.WDT.wdtcsr.write(|w| unsafe { w.bits(mode) });
    });
}

fn sleep(dp: &Peripherals, mode: SleepMode, ticks: u8) {
    match mode.wake_source() {
        WakeSource::Timer1 => timers::start_second_tick(&dp.TC1),
        WakeSource::Watchdog => watchdog(dp, WDT_INTERRUPT_1S),
    }

    let mut countdown = Countdown::new(ticks);
    loop {
        dp.CPU.smcr.write(|w| unsafe { w.bits(mode.smcr()) });
        avr_device::asm::sleep();
        dp.CPU.smcr.write(|w| unsafe { w.bits(0) });
        if !countdown.tick() {
            break;
        }
    }

    match mode.wake_source() {
        WakeSource::Timer1 => timers::stop_timer1(&dp.TC1),
        WakeSource::Watchdog => watchdog(dp, 0),
    }
}

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    let mut serial = Serial::new(&dp.USART0);

    port::output_b(&dp, LED_MASK);
    unsafe { avr_device::interrupt::enable() };

    let mut schedule = SleepSchedule::new();
    loop {
        match schedule.next() {
            Some(Phase::Lit(ms)) => {
                port::set_b(&dp, LED_MASK);
                delay_ms(ms);
            }
            Some(Phase::Dark(ms)) => {
                port::clear_b(&dp, LED_MASK);
                delay_ms(ms);
            }
            Some(Phase::Asleep { mode, ticks }) => {
                uwrite!(serial, "Modo: {}\r\n", mode.label()).ok();
                // Let the last byte leave before the clocks stop.
                delay_ms(5);
                sleep(&dp, mode, ticks);
            }
            None => {}
        }
    }
}
