//! Register drivers shared by the lab binaries (ATmega328P at 16 MHz).
//!
//! Every binary under `src/bin` is one exercise. The decisions, tables and
//! state machines come from `labs_core`; this crate only touches hardware.

#![no_std]
#![feature(abi_avr_interrupt)]
#![feature(asm_experimental_arch)]

pub mod adc;
pub mod eeprom;
pub mod keypad;
pub mod spi;
pub mod stepper;
pub mod timers;
pub mod twi;
pub mod uart;
pub mod ws2812;

pub use avr_device::atmega328p::Peripherals;

use labs_core::config::SPINS_PER_MS;

/// Stops the board in place.
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

/// Take the peripherals. Each binary calls this once at the top of `main`.
pub fn peripherals() -> Peripherals {
    unsafe { Peripherals::steal() }
}

/// Busy-wait delay in milliseconds (approximate, at 16MHz).
pub fn delay_ms(ms: u16) {
    for _ in 0..ms {
        // SPINS_PER_MS is calibrated against the nop plus the counter overhead
        for _ in 0..SPINS_PER_MS {
            unsafe { core::arch::asm!("nop") };
        }
    }
}

/// Busy-wait delay in microseconds, for bus timings.
#[inline(always)]
pub fn delay_us(us: u16) {
    for _ in 0..us {
        // 12 nops plus the loop counter make about 16 cycles
        unsafe {
            core::arch::asm!(
                "nop", "nop", "nop", "nop", "nop", "nop", "nop", "nop", "nop", "nop", "nop", "nop"
            )
        };
    }
}

/// Set, clear or read bits of the three I/O ports.
pub mod port {
    use avr_device::atmega328p::Peripherals;

    macro_rules! port_fns {
        ($set:ident, $clear:ident, $output:ident, $pullup:ident, $read:ident, $p:ident, $ddr:ident, $port:ident, $pin:ident) => {
            pub fn $set(dp: &Peripherals, mask: u8) {
                dp.$p.$port.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
            }

            pub fn $clear(dp: &Peripherals, mask: u8) {
                dp.$p.$port.modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
            }

            pub fn $output(dp: &Peripherals, mask: u8) {
                dp.$p.$ddr.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
            }

            /// Input with the internal pull-up enabled.
            pub fn $pullup(dp: &Peripherals, mask: u8) {
                dp.$p.$ddr.modify(|r, w| unsafe { w.bits(r.bits() & !mask) });
                dp.$p.$port.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
            }

            pub fn $read(dp: &Peripherals) -> u8 {
                dp.$p.$pin.read().bits()
            }
        };
    }

    port_fns!(set_b, clear_b, output_b, pullup_b, read_b, PORTB, ddrb, portb, pinb);
    port_fns!(set_c, clear_c, output_c, pullup_c, read_c, PORTC, ddrc, portc, pinc);
    port_fns!(set_d, clear_d, output_d, pullup_d, read_d, PORTD, ddrd, portd, pind);
}
