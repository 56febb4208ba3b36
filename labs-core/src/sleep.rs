//! Sleep-mode demonstration cycle.
//!
//! The board lights its LEDs, turns them off, then visits three sleep modes
//! in turn, staying asleep in each one for a fixed number of wake-up ticks.
//! Timer1 keeps running in idle mode only, so the deeper modes are woken
//! by the watchdog interrupt instead.

/// LEDs on PB0-PB4.
pub const LED_MASK: u8 = 0b0001_1111;

/// How long the LEDs stay lit at the start of the cycle.
pub const LIT_MS: u16 = 2000;
/// Pause between LEDs off and the first sleep.
pub const DARK_MS: u16 = 50;
/// Wake-up ticks (one per second) spent in each sleep mode.
pub const SECONDS_PER_MODE: u8 = 10;

/// SMCR sleep-enable bit.
const SE: u8 = 1 << 0;

/// WDTCSR: change-enable sequence, then interrupt mode with a 1 s period.
pub const WDT_CHANGE_ENABLE: u8 = (1 << 4) | (1 << 3);
pub const WDT_INTERRUPT_1S: u8 = (1 << 6) | (1 << 2) | (1 << 1);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SleepMode {
    Idle,
    Standby,
    PowerDown,
}

/// What brings the CPU back from a given sleep mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WakeSource {
    Timer1,
    Watchdog,
}

impl SleepMode {
    /// SMCR value selecting this mode with the sleep-enable bit set.
    pub const fn smcr(self) -> u8 {
        let sm = match self {
            SleepMode::Idle => 0b000,
            SleepMode::PowerDown => 0b010,
            SleepMode::Standby => 0b110,
        };
        (sm << 1) | SE
    }

    pub const fn wake_source(self) -> WakeSource {
        match self {
            SleepMode::Idle => WakeSource::Timer1,
            SleepMode::Standby | SleepMode::PowerDown => WakeSource::Watchdog,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SleepMode::Idle => "IDLE",
            SleepMode::Standby => "STANDBY",
            SleepMode::PowerDown => "POWER DOWN",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// LEDs on for the given milliseconds.
    Lit(u16),
    /// LEDs off for the given milliseconds.
    Dark(u16),
    /// Sleep in `mode` until `ticks` wake-ups have happened.
    Asleep { mode: SleepMode, ticks: u8 },
}

const CYCLE: [Phase; 5] = [
    Phase::Lit(LIT_MS),
    Phase::Dark(DARK_MS),
    Phase::Asleep {
        mode: SleepMode::Idle,
        ticks: SECONDS_PER_MODE,
    },
    Phase::Asleep {
        mode: SleepMode::Standby,
        ticks: SECONDS_PER_MODE,
    },
    Phase::Asleep {
        mode: SleepMode::PowerDown,
        ticks: SECONDS_PER_MODE,
    },
];

/// Endless iterator over the phases of the demonstration.
pub struct SleepSchedule {
    index: usize,
}

impl SleepSchedule {
    pub const fn new() -> Self {
        Self { index: 0 }
    }
}

impl Iterator for SleepSchedule {
    type Item = Phase;

    fn next(&mut self) -> Option<Phase> {
        let phase = CYCLE[self.index];
        self.index = (self.index + 1) % CYCLE.len();
        Some(phase)
    }
}

/// Counts wake-ups until a sleep phase is over.
pub struct Countdown {
    remaining: u8,
}

impl Countdown {
    pub const fn new(ticks: u8) -> Self {
        Self { remaining: ticks }
    }

    /// Record one wake-up. Returns `true` while the CPU should go back to sleep.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smcr_encodings() {
        assert_eq!(SleepMode::Idle.smcr(), 0x01);
        assert_eq!(SleepMode::PowerDown.smcr(), 0x05);
        assert_eq!(SleepMode::Standby.smcr(), 0x0D);
    }

    #[test]
    fn deep_modes_wake_on_watchdog() {
        assert_eq!(SleepMode::Idle.wake_source(), WakeSource::Timer1);
        assert_eq!(SleepMode::Standby.wake_source(), WakeSource::Watchdog);
        assert_eq!(SleepMode::PowerDown.wake_source(), WakeSource::Watchdog);
    }

    #[test]
    fn schedule_repeats() {
        let phases: Vec<Phase> = SleepSchedule::new().take(7).collect();
        assert_eq!(phases[0], Phase::Lit(2000));
        assert_eq!(phases[1], Phase::Dark(50));
        assert_eq!(
            phases[4],
            Phase::Asleep {
                mode: SleepMode::PowerDown,
                ticks: 10
            }
        );
        assert_eq!(phases[5], Phase::Lit(2000));
    }

    #[test]
    fn countdown_sleeps_ten_ticks() {
        let mut c = Countdown::new(SECONDS_PER_MODE);
        let mut wakeups = 1;
        while c.tick() {
            wakeups += 1;
        }
        assert_eq!(wakeups, 10);
    }

    #[test]
    fn watchdog_one_second_interrupt() {
        assert_eq!(WDT_INTERRUPT_1S, 0x46);
        assert_eq!(WDT_CHANGE_ENABLE, 0x18);
    }
}
