//! Board-wide build constants.

/// CPU clock of the lab boards (16 MHz crystal).
pub const F_CPU: u32 = 16_000_000;

/// UART speed used by every exercise (8N1).
pub const BAUD: u32 = 9600;

/// Loops of the calibrated busy-wait that take about one millisecond.
/// A `nop` loop iteration costs about 4 cycles at 16 MHz.
pub const SPINS_PER_MS: u16 = (F_CPU / 4 / 1000) as u16;
