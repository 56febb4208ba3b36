//! 4x4 membrane keypad scanning.
//!
//! Rows are driven low one at a time; columns are read with pull-ups, so a
//! pressed key reads as a low column bit.
//!
//! Pin mapping:
//!   Rows (active-low outputs):    PB1, PB0, PD7, PD6
//!   Columns (inputs w/ pull-up):  PD5, PD4, PD3, PD2

use labs_core::lock::KEYMAP;

use crate::{port, Peripherals};

pub const ROWS: usize = 4;
pub const COLS: usize = 4;

const ROWS_B: u8 = (1 << 1) | (1 << 0);
const ROWS_D: u8 = (1 << 7) | (1 << 6);
const COLS_D: u8 = 0x3C;

pub fn init_gpio(dp: &Peripherals) {
    // Row pins as outputs, initially high (inactive)
    port::output_b(dp, ROWS_B);
    port::set_b(dp, ROWS_B);
    port::output_d(dp, ROWS_D);
    port::set_d(dp, ROWS_D);

    port::pullup_d(dp, COLS_D);
}

/// Drive a specific row low. All other rows high.
fn drive_row(dp: &Peripherals, row: usize) {
    port::set_b(dp, ROWS_B);
    port::set_d(dp, ROWS_D);

    match row {
        0 => port::clear_b(dp, 1 << 1),
        1 => port::clear_b(dp, 1 << 0),
        2 => port::clear_d(dp, 1 << 7),
        3 => port::clear_d(dp, 1 << 6),
        _ => {}
    }
}

/// Column bits with 1 = pressed, column 0 first.
fn read_cols(dp: &Peripherals) -> u8 {
    let pind = port::read_d(dp);
    let mut cols = 0;
    // Column 0 = PD5, column 3 = PD2
    for col in 0..COLS {
        if pind & (1 << (5 - col)) == 0 {
            cols |= 1 << col;
        }
    }
    cols
}

/// Scan all rows and return the first pressed key.
pub fn scan(dp: &Peripherals) -> Option<u8> {
    let mut key = None;
    for row in 0..ROWS {
        drive_row(dp, row);
        tiny_delay();
        let cols = read_cols(dp);
        if key.is_none() && cols != 0 {
            key = Some(KEYMAP[row][cols.trailing_zeros() as usize]);
        }
    }

    // Deactivate all rows
    port::set_b(dp, ROWS_B);
    port::set_d(dp, ROWS_D);

    key
}

/// Short delay for pin settling (~5us at 16MHz).
#[inline(always)]
fn tiny_delay() {
    for _ in 0..20u8 {
        unsafe { core::arch::asm!("nop") };
    }
}
