//! WS2812 output on PB0, bit-banged at 16 MHz.
//!
//! One bit lasts 20 cycles (1.25 µs). A one is high for 13 cycles, a zero
//! for 6. The whole frame goes out with interrupts disabled.

use labs_core::ws2812::{Frame, LATCH_US};

use crate::{delay_us, port, Peripherals};

pub const DATA: u8 = 1 << 0;

/// PORTB I/O address for `sbi`/`cbi`.
const PORTB_IO: u8 = 0x05;

pub fn init(dp: &Peripherals) {
    port::output_b(dp, DATA);
    port::clear_b(dp, DATA);
}

#[inline(always)]
fn send_byte(byte: u8) {
    for bit in (0..8).rev() {
        if byte & (1 << bit) != 0 {
            unsafe {
                core::arch::asm!(
                    "sbi {port}, 0",
                    "nop", "nop", "nop", "nop", "nop", "nop",
                    "nop", "nop", "nop", "nop", "nop",
                    "cbi {port}, 0",
                    "nop", "nop", "nop",
                    port = const PORTB_IO,
                )
            };
        } else {
            unsafe {
                core::arch::asm!(
                    "sbi {port}, 0",
                    "nop", "nop", "nop", "nop",
                    "cbi {port}, 0",
                    "nop", "nop", "nop", "nop", "nop", "nop", "nop", "nop", "nop", "nop",
                    port = const PORTB_IO,
                )
            };
        }
    }
}

/// Shift out the frame and latch it.
pub fn write<const N: usize>(frame: &Frame<N>) {
    avr_device::interrupt::free(|_| {
        for byte in frame.bytes() {
            send_byte(byte);
        }
    });
    delay_us(LATCH_US);
}
