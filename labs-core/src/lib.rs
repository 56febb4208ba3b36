//! Shared logic for the ATmega328P lab exercises.
//!
//! Everything that is not a register access lives here: timer arithmetic,
//! plotter figure tables, sensor classifiers, the lock and door state
//! machines, LCD/WS2812/RC522 encodings and the telemetry line formats.
//!
//! This crate is `no_std` so it can be used by both the AVR firmware and
//! the native CLI tool.

#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod config;
pub mod debounce;
pub mod door;
pub mod lcd;
pub mod lock;
pub mod matrix;
pub mod motor;
pub mod music;
pub mod plotter;
pub mod rc522;
pub mod sleep;
pub mod telemetry;
pub mod text;
pub mod thermostat;
pub mod timing;
pub mod ws2812;

/// Byte-addressed non-volatile storage (the on-chip EEPROM).
pub trait ByteStore {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ByteStore;

    /// Erased EEPROM image for tests.
    pub struct MemStore {
        pub bytes: [u8; 64],
        pub writes: usize,
    }

    impl MemStore {
        pub fn erased() -> Self {
            Self {
                bytes: [0xFF; 64],
                writes: 0,
            }
        }
    }

    impl ByteStore for MemStore {
        fn read(&mut self, addr: u16) -> u8 {
            self.bytes[addr as usize]
        }

        fn write(&mut self, addr: u16, value: u8) {
            self.writes += 1;
            self.bytes[addr as usize] = value;
        }
    }
}
