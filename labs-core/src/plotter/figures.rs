//! Figure tables kept in program memory.
//!
//! Each entry is a motion code and an amount: milliseconds of motor time on
//! the timed plotter, raw steps (scaled by 3/10) on the stepper plotter.
//! Codes: `D` right, `I` left, `A` down, `U` up, `B` pen down, `S` pen up;
//! lowercase `d i a u` travel with the pen raised.

use avr_progmem::progmem;

use super::Step;

pub const CIRCLE_LEN: usize = 154;
pub const TIMED_FOX_LEN: usize = 826;
pub const TIMED_FLOWER_LEN: usize = 640;
pub const FOX_LEN: usize = 828;
pub const FLOWER_LEN: usize = 640;

progmem! {
    /// Circle for the timed plotter.
    pub static progmem CIRCLE: [Step; CIRCLE_LEN] = figure![
        B 250, D 600, A 100, D 400, A 100, D 200, A 100, D 300, A 100, D 100,
        A 100, D 200, A 100, D 100, A 100, D 200, A 100, D 100, A 100, D 100,
        A 100, D 100, A 100, D 100, A 200, D 100, A 100, D 100, A 200, D 100,
        A 100, D 100, A 300, D 100, A 200, D 100, A 400, D 100, A 500, A 600,
        I 100, A 400, I 100, A 200, I 100, A 300, I 100, A 100, I 100, A 200,
        I 100, A 100, I 100, A 200, I 100, A 100, I 100, A 100, I 100, A 100,
        I 100, A 100, I 200, A 100, I 100, A 100, I 200, A 100, I 100, A 100,
        I 300, A 100, I 200, A 100, I 400, A 100, I 500, I 600, U 100, I 400,
        U 100, I 200, U 100, I 300, U 100, I 100, U 100, I 200, U 100, I 100,
        U 100, I 200, U 100, I 100, U 100, I 100, U 100, I 100, U 100, I 100,
        U 200, I 100, U 100, I 100, U 200, I 100, U 100, I 100, U 300, I 100,
        U 200, I 100, U 300, I 100, U 500, U 600, D 100, U 400, D 100, U 200,
        D 100, U 300, D 100, U 100, D 100, U 200, D 100, U 100, D 100, U 200,
        D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 200, U 100,
        D 100, U 100, D 200, U 100, D 100, U 100, D 300, U 100, D 200, U 100,
        D 400, U 100, D 600, S 250,
    ];

    /// Fox for the timed plotter.
    pub static progmem TIMED_FOX: [Step; TIMED_FOX_LEN] = figure![
        i 10000, a 3000, D 3900, U 100, D 200, U 100, D 100, U 100, D 200, U 100,
        D 100, U 100, D 100, U 100, D 200, U 100, D 100, U 100, D 200, U 100,
        D 100, U 100, D 200, U 100, D 100, U 100, D 100, U 100, D 200, U 100,
        D 100, U 100, D 200, U 100, D 100, U 100, D 200, U 100, D 100, U 100,
        D 200, U 100, D 100, U 100, D 100, U 100, D 200, U 100, D 100, U 100,
        D 200, U 100, D 200, A 300, I 100, A 600, I 100, A 500, I 100, A 600,
        I 100, A 500, I 100, A 600, I 100, A 500, I 100, A 600, I 100, A 300,
        D 100, A 100, D 100, A 400, D 100, A 300, D 100, A 300, D 100, A 300,
        D 100, A 300, D 100, A 300, D 100, A 300, D 100, A 300, D 100, A 300,
        D 100, A 300, D 100, A 300, D 100, A 200, I 100, A 100, I 100, A 100,
        I 200, A 100, I 200, A 100, I 100, A 100, I 200, A 100, I 200, A 100,
        I 100, A 100, I 200, A 100, I 200, A 100, I 200, A 100, I 100, A 100,
        I 200, A 100, I 200, A 100, I 100, A 100, I 200, A 100, I 200, A 100,
        I 100, A 100, I 200, A 100, I 200, A 100, I 100, A 100, I 200, A 100,
        I 200, A 100, I 100, A 100, I 200, A 100, I 200, A 100, I 100, A 100,
        I 200, A 100, I 200, A 100, I 200, A 100, I 200, A 100, I 100, A 100,
        I 200, A 100, I 100, A 100, I 200, A 100, I 300, A 100, U 100, I 300,
        U 100, I 200, U 100, I 100, U 100, I 200, U 100, I 100, U 100, I 200,
        U 100, I 200, U 100, I 200, U 100, I 200, U 100, I 100, U 100, I 200,
        U 100, I 200, U 100, I 100, U 100, I 200, U 100, I 200, U 100, I 100,
        U 100, I 200, U 100, I 200, U 100, I 100, U 100, I 200, U 100, I 200,
        U 100, I 100, U 100, I 200, U 100, I 200, U 100, I 100, U 100, I 200,
        U 100, I 200, U 100, I 200, U 100, I 100, U 100, I 200, U 100, I 200,
        U 100, I 100, U 100, I 200, U 100, I 200, U 100, I 100, U 100, I 100,
        U 200, D 100, U 300, D 100, U 300, D 100, U 300, D 100, U 300, D 100,
        U 300, D 100, U 300, D 100, U 300, D 100, U 300, D 100, U 300, D 100,
        U 300, D 100, U 400, D 100, U 100, D 100, U 300, I 100, U 600, I 100,
        U 500, I 100, U 600, I 100, U 500, I 100, U 600, I 100, U 500, I 100,
        U 600, I 100, U 300, D 200, A 100, D 200, A 100, D 100, A 100, D 200,
        A 100, D 100, A 100, D 100, A 100, D 200, A 100, D 100, A 100, D 200,
        A 100, D 100, A 100, D 200, A 100, D 100, A 100, D 200, A 100, D 100,
        A 100, D 100, A 100, D 200, A 100, D 100, A 100, D 200, A 100, D 100,
        A 100, D 200, A 100, D 100, A 100, D 100, A 100, D 200, A 100, D 100,
        A 100, D 200, A 200, I 100, A 100, I 200, A 100, I 200, A 100, I 100,
        A 100, I 200, A 100, I 200, A 100, I 100, A 100, I 200, A 100, I 100,
        A 100, I 200, A 100, I 200, A 100, I 100, A 100, I 200, A 100, I 200,
        A 100, I 100, A 100, I 200, A 100, I 300, A 300, D 100, A 100, D 100,
        A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100,
        A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100,
        A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100,
        A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100,
        A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 200, I 200,
        A 100, I 400, A 100, I 300, A 100, I 500, A 100, I 400, A 100, I 400,
        A 100, I 400, A 100, I 400, A 100, I 400, A 100, I 500, S 250, d 500,
        u 100, d 400, u 100, d 400, u 100, d 400, u 100, d 400, u 100, d 400,
        u 100, d 500, u 100, d 300, u 100, d 400, u 100, d 200, B 250, D 200,
        A 300, D 100, A 400, D 100, A 400, D 100, A 400, D 100, A 400, D 100,
        A 300, D 100, A 400, D 100, A 400, D 100, A 400, D 100, A 300, D 100,
        A 200, D 200, U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100,
        U 100, D 100, U 200, D 100, U 100, D 100, U 100, D 200, A 100, D 100,
        A 100, D 100, A 200, D 100, A 100, D 100, A 100, D 100, A 100, D 100,
        A 100, D 100, A 100, D 200, U 200, D 100, U 300, D 100, U 400, D 100,
        U 400, D 100, U 400, D 100, U 300, D 100, U 400, D 100, U 400, D 100,
        U 400, D 100, U 400, D 100, U 300, D 300, A 100, D 400, A 100, D 400,
        A 100, D 400, A 100, D 400, A 100, D 400, A 100, D 400, A 100, D 400,
        A 100, D 400, A 100, D 600, S 250, i 600, u 100, i 400, u 100, i 400,
        u 100, i 400, u 100, i 400, u 100, i 400, u 100, i 400, u 100, i 400,
        u 100, i 400, u 100, i 100, B 250, U 200, D 100, U 100, D 100, U 100,
        D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100,
        D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100,
        D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100,
        D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100,
        D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 300, I 300, U 100,
        I 200, U 100, I 100, U 100, I 200, U 100, I 200, U 100, I 100, U 100,
        I 200, U 100, I 200, U 100, I 100, U 100, I 200, U 100, I 100, U 100,
        I 200, U 100, I 200, U 100, I 100, U 100, I 200, U 100, I 200, U 100,
        I 200, A 300, I 100, A 200, I 100, A 200, I 100, A 200, I 100, A 200,
        I 100, A 100, I 100, A 200, I 100, A 200, I 100, A 200, I 100, A 200,
        I 100, A 200, I 100, A 200, I 100, A 100, I 100, A 200, I 100, A 200,
        I 100, A 200, I 100, A 200, I 100, A 200, I 200, U 200, I 100, U 200,
        I 100, U 200, I 100, U 200, I 100, U 200, I 100, U 100, I 100, U 200,
        I 100, U 200, I 100, U 200, I 100, U 200, I 100, U 200, I 100, U 200,
        I 100, U 100, I 100, U 200, I 100, U 200, I 100, U 200, I 100, U 200,
        I 100, U 400, S 250, d 1800, a 3400, A 4300, S 250, u 4300, B 250, D 200,
        A 100, D 200, A 100, D 200, A 100, D 200, A 100, D 100, A 100, D 200,
        A 100, D 200, A 100, D 100, A 100, D 200, A 100, D 200, A 100, D 200,
        A 100, S 250, a 300, i 100, a 400, i 100, a 300, B 250, D 200, U 100,
        D 200, U 100, D 200, U 100, D 100, U 100, D 200, U 100, D 200, U 100,
        D 200, U 100, S 250, i 6300, B 250, A 100, D 200, A 100, D 200, A 100,
        D 200, A 100, D 100, A 100, D 200, A 100, D 200, A 100, D 200, S 250,
        u 1000, i 200, B 250, U 100, D 200, U 100, D 200, U 100, D 200, U 100,
        D 100, U 100, D 200, U 100, D 200, U 100, D 100, U 100, D 200, U 100,
        D 200, U 100, D 200, U 100, D 200, S 250,
    ];

    /// Flower for the timed plotter.
    pub static progmem TIMED_FLOWER: [Step; TIMED_FLOWER_LEN] = figure![
        i 10000, B 250, D 200, A 100, D 100, A 100, D 100, A 100, D 100, A 200,
        D 100, A 100, D 500, U 100, D 100, U 100, D 200, U 100, D 200, U 100,
        D 400, A 400, D 100, A 700, D 200, U 100, D 300, U 100, D 700, A 600,
        I 200, A 400, D 800, A 100, D 300, A 100, D 100, A 200, I 100, A 100,
        I 100, A 100, I 100, A 100, I 100, A 100, I 200, A 100, I 300, A 200,
        D 500, A 100, D 300, A 100, D 100, A 100, D 100, A 100, D 100, A 200,
        I 100, A 100, I 100, A 100, I 100, A 100, I 200, A 100, I 500, A 200,
        D 200, A 100, D 200, A 100, D 200, A 100, D 100, A 100, D 100, A 200,
        I 100, A 100, I 100, A 100, I 200, A 100, I 900, A 200, D 100, A 200,
        D 100, A 100, D 100, A 500, I 700, U 100, I 300, U 100, I 200, A 700,
        I 100, A 400, I 500, U 100, I 400, U 100, I 100, U 200, I 500, A 100,
        I 100, A 200, I 100, A 200, I 200, A 100, I 100, U 100, I 200, U 200,
        I 100, U 200, I 100, U 100, I 500, A 200, I 100, A 100, I 400, A 100,
        I 400, U 400, I 100, U 700, I 200, A 100, I 300, A 100, I 700, U 500,
        D 100, U 100, D 100, U 200, D 100, U 100, I 900, U 100, I 200, U 100,
        I 100, U 100, I 100, U 200, D 100, U 100, D 100, U 100, D 200, U 100,
        D 200, U 100, D 200, U 200, I 500, U 100, I 200, U 100, I 100, U 100,
        I 100, U 100, I 100, U 200, D 100, U 100, D 100, U 100, D 100, U 100,
        D 300, U 100, D 500, U 200, I 300, U 100, I 200, U 100, I 100, U 100,
        I 100, U 100, I 100, U 100, I 100, U 200, D 100, U 100, D 300, U 100,
        D 800, U 400, I 200, U 600, D 700, A 100, D 300, A 100, D 200, U 700,
        D 100, U 400, D 400, A 100, D 200, A 100, D 200, A 100, D 100, A 100,
        D 500, U 100, D 100, U 200, D 100, U 100, D 100, U 100, D 100, U 100,
        S 250, a 1700, B 250, D 500, A 100, D 300, A 100, D 200, A 100, D 200,
        A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100,
        A 100, D 100, A 200, D 100, A 200, D 100, A 300, D 100, A 800, I 100,
        A 300, I 100, A 200, I 100, A 200, I 100, A 100, I 100, A 100, I 100,
        A 100, I 100, A 100, I 100, A 100, I 100, A 100, I 200, A 100, I 200,
        A 100, I 300, A 100, I 900, U 100, I 300, U 100, I 200, U 100, I 200,
        U 100, I 100, U 100, I 100, U 100, I 100, U 100, I 100, U 100, I 100,
        U 100, I 100, U 200, I 100, U 200, I 100, U 300, I 100, U 800, D 100,
        U 300, D 100, U 200, D 100, U 200, D 100, U 100, D 100, U 100, D 100,
        U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 200, U 100, D 200,
        U 100, D 300, U 100, D 400, S 250, a 5600, i 200, B 250, A 5400, D 500,
        U 5400, S 250, a 1100, B 250, D 200, U 100, D 100, U 200, D 200, U 200,
        D 200, U 100, D 500, U 200, D 700, U 100, D 1300, A 100, D 500, A 100,
        D 100, A 100, D 400, A 100, D 300, A 100, D 100, A 100, D 100, A 400,
        I 400, U 100, I 600, A 100, I 700, A 100, I 300, A 100, I 100, A 100,
        I 300, A 100, I 200, A 100, I 400, A 100, I 100, A 100, I 600, U 100,
        I 300, U 100, I 100, U 100, I 100, U 100, I 200, U 100, I 300, D 300,
        U 100, D 500, U 100, D 500, U 100, D 500, U 100, D 100, U 100, D 300,
        U 100, D 1500, S 250, i 7900, B 250, D 1500, A 100, D 300, A 100, D 100,
        A 100, D 500, A 100, D 500, A 100, D 500, A 100, D 300, U 300, I 300,
        U 100, I 100, U 200, I 200, U 200, I 200, U 100, I 500, U 200, I 700,
        U 100, I 1300, A 100, I 500, A 100, I 100, A 100, I 400, A 100, I 300,
        A 100, I 100, A 100, I 100, A 400, D 400, U 100, D 600, A 100, D 700,
        A 100, D 300, A 100, D 100, A 100, D 300, A 100, D 200, A 100, D 400,
        A 100, D 100, A 100, D 600, U 100, D 300, U 100, D 100, U 100, D 100,
        U 100, D 200, U 100, S 250, u 1900, B 250, U 300, I 100, U 100, I 100,
        U 800, I 400, A 100, I 200, A 100, I 100, A 100, I 200, A 100, I 100,
        A 100, I 200, S 250, U 1600, B 250, I 300, A 100, I 200, A 100, I 100,
        A 100, I 100, A 100, I 100, A 200, I 100, A 200, S 250, i 500, u 900,
        B 250, D 1400, S 250, d 3900, B 250, D 1400, S 250, u 1300, B 250, I 1400,
        U 100, D 200, U 100, D 100, U 100, D 200, U 100, D 100, U 100, D 200,
        U 200, D 100, U 300, D 100, S 250, i 5800, B 250, A 300, D 100, A 200,
        D 200, A 100, D 100, A 100, D 200, A 100, D 100, A 100, D 300, A 100,
        i 1300, S 250, u 1700, d 1300, B 250, D 200, A 100, D 200, A 100, D 100,
        A 100, D 200, A 100, D 200, A 100, D 100, A 100, D 200, U 900, D 100,
        U 100, D 100, U 300, S 250, d 1100, B 250, A 300, D 100, A 100, D 100,
        A 900, D 200, U 100, D 100, U 100, D 200, U 100, D 200, U 100, D 100,
        U 100, D 200, U 100, D 200, S 250, a 3200, B 250, D 300, A 100, D 200,
        A 100, D 100, A 100, D 100, A 100, D 100, A 200, D 100, A 200, S 250,
        a 800, i 800, B 250, I 300, U 100, I 100, U 100, I 200, U 100, I 100,
        U 100, I 200, U 100, I 400, A 800, I 100, A 100, I 100, A 300, S 250,
    ];

    /// Fox for the stepper plotter, before table scaling.
    pub static progmem FOX: [Step; FOX_LEN] = figure![
        i 3000, a 3000, B 0, D 3900, U 100, D 200, U 100, D 100, U 100, D 200,
        U 100, D 100, U 100, D 100, U 100, D 200, U 100, D 100, U 100, D 200,
        U 100, D 100, U 100, D 200, U 100, D 100, U 100, D 100, U 100, D 200,
        U 100, D 100, U 100, D 200, U 100, D 100, U 100, D 200, U 100, D 100,
        U 100, D 200, U 100, D 100, U 100, D 100, U 100, D 200, U 100, D 100,
        U 100, D 200, U 100, D 200, A 300, I 100, A 600, I 100, A 500, I 100,
        A 600, I 100, A 500, I 100, A 600, I 100, A 500, I 100, A 600, I 100,
        A 300, D 100, A 100, D 100, A 400, D 100, A 300, D 100, A 300, D 100,
        A 300, D 100, A 300, D 100, A 300, D 100, A 300, D 100, A 300, D 100,
        A 300, D 100, A 300, D 100, A 300, D 100, A 200, I 100, A 100, I 100,
        A 100, I 200, A 100, I 200, A 100, I 100, A 100, I 200, A 100, I 200,
        A 100, I 100, A 100, I 200, A 100, I 200, A 100, I 200, A 100, I 100,
        A 100, I 200, A 100, I 200, A 100, I 100, A 100, I 200, A 100, I 200,
        A 100, I 100, A 100, I 200, A 100, I 200, A 100, I 100, A 100, I 200,
        A 100, I 200, A 100, I 100, A 100, I 200, A 100, I 200, A 100, I 100,
        A 100, I 200, A 100, I 200, A 100, I 200, A 100, I 200, A 100, I 100,
        A 100, I 200, A 100, I 100, A 100, I 200, A 100, I 300, A 100, U 100,
        I 300, U 100, I 200, U 100, I 100, U 100, I 200, U 100, I 100, U 100,
        I 200, U 100, I 200, U 100, I 200, U 100, I 200, U 100, I 100, U 100,
        I 200, U 100, I 200, U 100, I 100, U 100, I 200, U 100, I 200, U 100,
        I 100, U 100, I 200, U 100, I 200, U 100, I 100, U 100, I 200, U 100,
        I 200, U 100, I 100, U 100, I 200, U 100, I 200, U 100, I 100, U 100,
        I 200, U 100, I 200, U 100, I 200, U 100, I 100, U 100, I 200, U 100,
        I 200, U 100, I 100, U 100, I 200, U 100, I 200, U 100, I 100, U 100,
        I 100, U 200, D 100, U 300, D 100, U 300, D 100, U 300, D 100, U 300,
        D 100, U 300, D 100, U 300, D 100, U 300, D 100, U 300, D 100, U 300,
        D 100, U 300, D 100, U 400, D 100, U 100, D 100, U 300, I 100, U 600,
        I 100, U 500, I 100, U 600, I 100, U 500, I 100, U 600, I 100, U 500,
        I 100, U 600, I 100, U 300, D 200, A 100, D 200, A 100, D 100, A 100,
        D 200, A 100, D 100, A 100, D 100, A 100, D 200, A 100, D 100, A 100,
        D 200, A 100, D 100, A 100, D 200, A 100, D 100, A 100, D 200, A 100,
        D 100, A 100, D 100, A 100, D 200, A 100, D 100, A 100, D 200, A 100,
        D 100, A 100, D 200, A 100, D 100, A 100, D 100, A 100, D 200, A 100,
        D 100, A 100, D 200, A 200, I 100, A 100, I 200, A 100, I 200, A 100,
        I 100, A 100, I 200, A 100, I 200, A 100, I 100, A 100, I 200, A 100,
        I 100, A 100, I 200, A 100, I 200, A 100, I 100, A 100, I 200, A 100,
        I 200, A 100, I 100, A 100, I 200, A 100, I 300, A 300, D 100, A 100,
        D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100,
        D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100,
        D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100,
        D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100,
        D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 200,
        I 200, A 100, I 400, A 100, I 300, A 100, I 500, A 100, I 400, A 100,
        I 400, A 100, I 400, A 100, I 400, A 100, I 400, A 100, I 500, S 250,
        d 500, u 100, d 400, u 100, d 400, u 100, d 400, u 100, d 400, u 100,
        d 400, u 100, d 500, u 100, d 300, u 100, d 400, u 100, d 200, B 250,
        D 200, A 300, D 100, A 400, D 100, A 400, D 100, A 400, D 100, A 400,
        D 100, A 300, D 100, A 400, D 100, A 400, D 100, A 400, D 100, A 300,
        D 100, A 200, D 200, U 100, D 100, U 100, D 100, U 100, D 100, U 100,
        D 100, U 100, D 100, U 200, D 100, U 100, D 100, U 100, D 200, A 100,
        D 100, A 100, D 100, A 200, D 100, A 100, D 100, A 100, D 100, A 100,
        D 100, A 100, D 100, A 100, D 200, U 200, D 100, U 300, D 100, U 400,
        D 100, U 400, D 100, U 400, D 100, U 300, D 100, U 400, D 100, U 400,
        D 100, U 400, D 100, U 400, D 100, U 300, D 300, A 100, D 400, A 100,
        D 400, A 100, D 400, A 100, D 400, A 100, D 400, A 100, D 400, A 100,
        D 400, A 100, D 400, A 100, D 600, S 250, i 600, u 100, i 400, u 100,
        i 400, u 100, i 400, u 100, i 400, u 100, i 400, u 100, i 400, u 100,
        i 400, u 100, i 400, u 100, i 100, B 250, U 200, D 100, U 100, D 100,
        U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100,
        U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100,
        U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100,
        U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100,
        U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 100, U 300, I 300,
        U 100, I 200, U 100, I 100, U 100, I 200, U 100, I 200, U 100, I 100,
        U 100, I 200, U 100, I 200, U 100, I 100, U 100, I 200, U 100, I 100,
        U 100, I 200, U 100, I 200, U 100, I 100, U 100, I 200, U 100, I 200,
        U 100, I 200, A 300, I 100, A 200, I 100, A 200, I 100, A 200, I 100,
        A 200, I 100, A 100, I 100, A 200, I 100, A 200, I 100, A 200, I 100,
        A 200, I 100, A 200, I 100, A 200, I 100, A 100, I 100, A 200, I 100,
        A 200, I 100, A 200, I 100, A 200, I 100, A 200, I 200, U 200, I 100,
        U 200, I 100, U 200, I 100, U 200, I 100, U 200, I 100, U 100, I 100,
        U 200, I 100, U 200, I 100, U 200, I 100, U 200, I 100, U 200, I 100,
        U 200, I 100, U 100, I 100, U 200, I 100, U 200, I 100, U 200, I 100,
        U 200, I 100, U 400, S 250, d 1800, a 3400, B 0, A 4300, S 250, u 4300,
        B 250, D 200, A 100, D 200, A 100, D 200, A 100, D 200, A 100, D 100,
        A 100, D 200, A 100, D 200, A 100, D 100, A 100, D 200, A 100, D 200,
        A 100, D 200, A 100, S 250, a 300, i 100, a 400, i 100, a 300, B 250,
        D 200, U 100, D 200, U 100, D 200, U 100, D 100, U 100, D 200, U 100,
        D 200, U 100, D 200, U 100, S 250, i 6300, B 250, A 100, D 200, A 100,
        D 200, A 100, D 200, A 100, D 100, A 100, D 200, A 100, D 200, A 100,
        D 200, S 250, u 1000, i 200, B 250, U 100, D 200, U 100, D 200, U 100,
        D 200, U 100, D 100, U 100, D 200, U 100, D 200, U 100, D 100, U 100,
        D 200, U 100, D 200, U 100, D 200, U 100, D 200, S 250,
    ];

    /// Flower for the stepper plotter, before table scaling.
    pub static progmem FLOWER: [Step; FLOWER_LEN] = figure![
        i 10000, B 250, D 200, A 100, D 100, A 100, D 100, A 100, D 100, A 200,
        D 100, A 100, D 500, U 100, D 100, U 100, D 200, U 100, D 200, U 100,
        D 400, A 400, D 100, A 700, D 200, U 100, D 300, U 100, D 700, A 600,
        I 200, A 400, D 800, A 100, D 300, A 100, D 100, A 200, I 100, A 100,
        I 100, A 100, I 100, A 100, I 100, A 100, I 200, A 100, I 300, A 200,
        D 500, A 100, D 300, A 100, D 100, A 100, D 100, A 100, D 100, A 200,
        I 100, A 100, I 100, A 100, I 100, A 100, I 200, A 100, I 500, A 200,
        D 200, A 100, D 200, A 100, D 200, A 100, D 100, A 100, D 100, A 200,
        I 100, A 100, I 100, A 100, I 200, A 100, I 900, A 200, D 100, A 200,
        D 100, A 100, D 100, A 500, I 700, U 100, I 300, U 100, I 200, A 700,
        I 100, A 400, I 500, U 100, I 400, U 100, I 100, U 200, I 500, A 100,
        I 100, A 200, I 100, A 200, I 200, A 100, I 100, U 100, I 200, U 200,
        I 100, U 200, I 100, U 100, I 500, A 200, I 100, A 100, I 400, A 100,
        I 400, U 400, I 100, U 700, I 200, A 100, I 300, A 100, I 700, U 500,
        D 100, U 100, D 100, U 200, D 100, U 100, I 900, U 100, I 200, U 100,
        I 100, U 100, I 100, U 200, D 100, U 100, D 100, U 100, D 200, U 100,
        D 200, U 100, D 200, U 200, I 500, U 100, I 200, U 100, I 100, U 100,
        I 100, U 100, I 100, U 200, D 100, U 100, D 100, U 100, D 100, U 100,
        D 300, U 100, D 500, U 200, I 300, U 100, I 200, U 100, I 100, U 100,
        I 100, U 100, I 100, U 100, I 100, U 200, D 100, U 100, D 300, U 100,
        D 800, U 400, I 200, U 600, D 700, A 100, D 300, A 100, D 200, U 700,
        D 100, U 400, D 400, A 100, D 200, A 100, D 200, A 100, D 100, A 100,
        D 500, U 100, D 100, U 200, D 100, U 100, D 100, U 100, D 100, U 100,
        S 250, a 1700, B 250, D 500, A 100, D 300, A 100, D 200, A 100, D 200,
        A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100, A 100, D 100,
        A 100, D 100, A 200, D 100, A 200, D 100, A 300, D 100, A 800, I 100,
        A 300, I 100, A 200, I 100, A 200, I 100, A 100, I 100, A 100, I 100,
        A 100, I 100, A 100, I 100, A 100, I 100, A 100, I 200, A 100, I 200,
        A 100, I 300, A 100, I 900, U 100, I 300, U 100, I 200, U 100, I 200,
        U 100, I 100, U 100, I 100, U 100, I 100, U 100, I 100, U 100, I 100,
        U 100, I 100, U 200, I 100, U 200, I 100, U 300, I 100, U 800, D 100,
        U 300, D 100, U 200, D 100, U 200, D 100, U 100, D 100, U 100, D 100,
        U 100, D 100, U 100, D 100, U 100, D 100, U 100, D 200, U 100, D 200,
        U 100, D 300, U 100, D 400, S 250, a 5400, i 200, B 250, A 5400, D 500,
        U 5400, S 250, a 1100, B 250, D 200, U 100, D 100, U 200, D 200, U 200,
        D 200, U 100, D 500, U 200, D 700, U 100, D 1300, A 100, D 500, A 100,
        D 100, A 100, D 400, A 100, D 300, A 100, D 100, A 100, D 100, A 400,
        I 400, U 100, I 600, A 100, I 700, A 100, I 300, A 100, I 100, A 100,
        I 300, A 100, I 200, A 100, I 400, A 100, I 100, A 100, I 600, U 100,
        I 300, U 100, I 100, U 100, I 100, U 100, I 200, U 100, I 300, D 300,
        U 100, D 500, U 100, D 500, U 100, D 500, U 100, D 100, U 100, D 300,
        U 100, D 1500, S 250, i 7900, B 250, D 1500, A 100, D 300, A 100, D 100,
        A 100, D 500, A 100, D 500, A 100, D 500, A 100, D 300, U 300, I 300,
        U 100, I 100, U 200, I 200, U 200, I 200, U 100, I 500, U 200, I 700,
        U 100, I 1300, A 100, I 500, A 100, I 100, A 100, I 400, A 100, I 300,
        A 100, I 100, A 100, I 100, A 400, D 400, U 100, D 600, A 100, D 700,
        A 100, D 300, A 100, D 100, A 100, D 300, A 100, D 200, A 100, D 400,
        A 100, D 100, A 100, D 600, U 100, D 300, U 100, D 100, U 100, D 100,
        U 100, D 200, U 100, S 250, u 1900, B 250, U 300, I 100, U 100, I 100,
        U 800, I 400, A 100, I 200, A 100, I 100, A 100, I 200, A 100, I 100,
        A 100, I 200, S 250, U 1600, B 250, I 300, A 100, I 200, A 100, I 100,
        A 100, I 100, A 100, I 100, A 200, I 100, A 200, S 250, i 500, u 900,
        B 250, D 1400, S 250, d 3900, B 250, D 1400, S 250, u 1300, B 250, I 1400,
        U 100, D 200, U 100, D 100, U 100, D 200, U 100, D 100, U 100, D 200,
        U 200, D 100, U 300, D 100, S 250, i 5800, B 250, A 300, D 100, A 200,
        D 200, A 100, D 100, A 100, D 200, A 100, D 100, A 100, D 300, A 100,
        i 1300, S 250, u 1700, d 1300, B 250, D 200, A 100, D 200, A 100, D 100,
        A 100, D 200, A 100, D 200, A 100, D 100, A 100, D 200, U 900, D 100,
        U 100, D 100, U 300, S 250, d 1100, B 250, A 300, D 100, A 100, D 100,
        A 900, D 200, U 100, D 100, U 100, D 200, U 100, D 200, U 100, D 100,
        U 100, D 200, U 100, D 200, S 250, a 3200, B 250, D 300, A 100, D 200,
        A 100, D 100, A 100, D 100, A 100, D 100, A 200, D 100, A 200, S 250,
        a 800, i 800, B 250, I 300, U 100, I 100, U 100, I 200, U 100, I 100,
        U 100, I 200, U 100, I 400, A 800, I 100, A 100, I 100, A 300, S 250,
    ];
}
