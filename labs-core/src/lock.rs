//! Keypad door lock with a PIN kept in EEPROM.
//!
//! [`LockMachine`] consumes one key at a time and answers with an
//! [`Outcome`]. Outcomes that need the user's attention carry a
//! [`Notice`]: two LCD lines, an optional LED flash and a beep, played by
//! the firmware before it redraws [`LockMachine::screen`].

use crate::ByteStore;

pub const MIN_LEN: usize = 4;
pub const MAX_LEN: usize = 6;
pub const MAX_ATTEMPTS: u8 = 3;

const ADDR_MAGIC: u16 = 0;
const ADDR_LEN: u16 = 1;
const ADDR_DIGITS: u16 = 2;
const MAGIC: u8 = 0xA5;

pub const DEFAULT_PIN: &[u8] = b"1234";

/// Rows top to bottom, columns left to right.
pub const KEYMAP: [[u8; 4]; 4] = [
    *b"123A",
    *b"456B",
    *b"789C",
    *b"*0#D",
];

/// Buzzer frequency and feedback timings.
pub const BUZZER_HZ: u16 = 2000;
pub const KEY_CLICK_MS: u16 = 40;
pub const CONFIRM_BEEP_MS: u16 = 80;
pub const STARTUP_MS: u16 = 800;
pub const ALARM_CYCLES: u8 = 20;
pub const ALARM_TONE_MS: u16 = 200;
pub const ALARM_GAP_MS: u16 = 50;
pub const ALARM_END_MS: u16 = 800;

pub const ALARM: (&str, &str) = ("ALARMA! 3 fallos", "Bloqueo temporal");
pub const ALARM_END: (&str, &str) = ("Intente nuevamente", "");
pub const STARTUP: (&str, &str) = ("Cerradura lista", "OK: #");

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinError {
    /// No valid PIN in EEPROM.
    Unset,
    Length,
    NotDigit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pin {
    digits: [u8; MAX_LEN],
    len: u8,
}

impl Pin {
    pub fn new(digits: &[u8]) -> Result<Pin, PinError> {
        if !(MIN_LEN..=MAX_LEN).contains(&digits.len()) {
            return Err(PinError::Length);
        }
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(PinError::NotDigit);
        }
        let mut pin = Pin {
            digits: [0; MAX_LEN],
            len: digits.len() as u8,
        };
        pin.digits[..digits.len()].copy_from_slice(digits);
        Ok(pin)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.digits[..self.len as usize]
    }

    /// Read the stored PIN: magic byte, length, then ASCII digits.
    pub fn load<S: ByteStore>(store: &mut S) -> Result<Pin, PinError> {
        let len = store.read(ADDR_LEN) as usize;
        if store.read(ADDR_MAGIC) != MAGIC || !(MIN_LEN..=MAX_LEN).contains(&len) {
            return Err(PinError::Unset);
        }
        let mut digits = [0; MAX_LEN];
        for (i, d) in digits.iter_mut().take(len).enumerate() {
            *d = store.read(ADDR_DIGITS + i as u16);
        }
        Pin::new(&digits[..len])
    }

    pub fn save<S: ByteStore>(&self, store: &mut S) {
        store.write(ADDR_MAGIC, MAGIC);
        store.write(ADDR_LEN, self.len);
        for (i, &d) in self.as_bytes().iter().enumerate() {
            store.write(ADDR_DIGITS + i as u16, d);
        }
    }
}

/// Typed digits, shown masked.
#[derive(Clone, Debug, Default)]
struct Entry {
    digits: [u8; MAX_LEN],
    len: usize,
}

impl Entry {
    fn push(&mut self, d: u8) {
        if self.len < MAX_LEN {
            self.digits[self.len] = d;
            self.len += 1;
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.digits[..self.len]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    Unlock,
    Current,
    New,
    Confirm(Pin),
    Menu,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Led {
    Green,
    Red,
}

/// Transient feedback for one outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub top: &'static str,
    pub bottom: &'static str,
    /// LED lit for the given milliseconds, before the beep.
    pub led: Option<(Led, u16)>,
    pub beep_ms: u16,
    /// Pause after the feedback, with the notice still on screen.
    pub hold_ms: u16,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Entry changed; redraw the masked digits.
    Typed,
    Ignored,
    /// `#` with fewer than 4 digits.
    BadLength,
    Granted,
    Denied,
    /// Third wrong PIN in a row; the counter restarts.
    Alarm,
    /// `A` in the menu opened the change flow.
    Changing,
    /// Moved to the next prompt of the change flow.
    Prompt,
    /// Current PIN wrong while changing it.
    ChangeRejected,
    Mismatch,
    Saved,
    Locked,
}

impl Outcome {
    /// `#` accepted a full-length entry; gets a short confirmation beep.
    pub fn confirmed(self) -> bool {
        matches!(
            self,
            Outcome::Granted
                | Outcome::Denied
                | Outcome::Alarm
                | Outcome::Prompt
                | Outcome::ChangeRejected
                | Outcome::Mismatch
                | Outcome::Saved
        )
    }

    pub fn notice(self) -> Option<Notice> {
        let n = |top, bottom, led, beep_ms, hold_ms| {
            Some(Notice {
                top,
                bottom,
                led,
                beep_ms,
                hold_ms,
            })
        };
        match self {
            Outcome::BadLength => n("Longitud invalida", "Debe ser 4 a 6", None, 150, 700),
            Outcome::Granted => n("Acceso concedido", "", Some((Led::Green, 600)), 80, 600),
            Outcome::Denied | Outcome::Alarm => {
                n("Clave incorrecta", "", Some((Led::Red, 500)), 120, 600)
            }
            Outcome::ChangeRejected => {
                n("Clave incorrecta", "", Some((Led::Red, 700)), 150, 800)
            }
            Outcome::Mismatch => n(
                "No coincide",
                "Intente otra vez",
                Some((Led::Red, 600)),
                150,
                900,
            ),
            Outcome::Saved => n("Clave guardada", "", Some((Led::Green, 800)), 0, 900),
            Outcome::Locked => n("Bloqueado", "OK: #", None, 0, 700),
            Outcome::Typed | Outcome::Ignored | Outcome::Changing | Outcome::Prompt => None,
        }
    }
}

/// Second LCD line of the resting screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bottom {
    Text(&'static str),
    /// This many `*`, padded to the display width.
    Masked(u8),
}

pub struct LockMachine<S: ByteStore> {
    store: S,
    pin: Pin,
    stage: Stage,
    entry: Entry,
    failures: u8,
}

impl<S: ByteStore> LockMachine<S> {
    /// Loads the PIN, writing the default one if EEPROM holds none.
    pub fn new(mut store: S) -> Self {
        let pin = match Pin::load(&mut store) {
            Ok(pin) => pin,
            Err(_) => {
                let pin = default_pin();
                pin.save(&mut store);
                pin
            }
        };
        Self {
            store,
            pin,
            stage: Stage::Unlock,
            entry: Entry::default(),
            failures: 0,
        }
    }

    pub fn pin(&self) -> &Pin {
        &self.pin
    }

    pub fn failures(&self) -> u8 {
        self.failures
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn screen(&self) -> (&'static str, Bottom) {
        let title = match self.stage {
            Stage::Menu => return ("Bienvenido", Bottom::Text("A:Cambiar  B:Salir")),
            Stage::Unlock => "Ingrese clave:",
            Stage::Current => "Clave actual:",
            Stage::New => "Nueva clave:",
            Stage::Confirm(_) => "Confirmar clave",
        };
        if self.entry.len == 0 {
            (title, Bottom::Text("OK: #"))
        } else {
            (title, Bottom::Masked(self.entry.len as u8))
        }
    }

    pub fn key(&mut self, key: u8) -> Outcome {
        if self.stage == Stage::Menu {
            return match key {
                b'A' => {
                    self.enter(Stage::Current);
                    Outcome::Changing
                }
                b'B' | b'#' => {
                    self.enter(Stage::Unlock);
                    Outcome::Locked
                }
                _ => Outcome::Ignored,
            };
        }
        match key {
            b'0'..=b'9' => {
                self.entry.push(key);
                Outcome::Typed
            }
            b'*' => {
                self.entry = Entry::default();
                Outcome::Typed
            }
            b'#' => self.submit(),
            _ => Outcome::Ignored,
        }
    }

    fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        self.entry = Entry::default();
    }

    fn submit(&mut self) -> Outcome {
        if self.entry.len < MIN_LEN {
            self.entry = Entry::default();
            return Outcome::BadLength;
        }
        let typed = self.entry.as_bytes();
        let matches = typed == self.pin.as_bytes();
        match self.stage {
            Stage::Unlock if matches => {
                self.failures = 0;
                self.enter(Stage::Menu);
                Outcome::Granted
            }
            Stage::Unlock => {
                self.failures += 1;
                self.entry = Entry::default();
                if self.failures >= MAX_ATTEMPTS {
                    self.failures = 0;
                    Outcome::Alarm
                } else {
                    Outcome::Denied
                }
            }
            Stage::Current if matches => {
                self.enter(Stage::New);
                Outcome::Prompt
            }
            Stage::Current => {
                self.enter(Stage::Menu);
                Outcome::ChangeRejected
            }
            Stage::New => match Pin::new(typed) {
                Ok(pin) => {
                    self.enter(Stage::Confirm(pin));
                    Outcome::Prompt
                }
                Err(_) => {
                    self.entry = Entry::default();
                    Outcome::BadLength
                }
            },
            Stage::Confirm(new) if typed == new.as_bytes() => {
                new.save(&mut self.store);
                self.pin = new;
                self.enter(Stage::Menu);
                Outcome::Saved
            }
            Stage::Confirm(_) => {
                self.enter(Stage::Menu);
                Outcome::Mismatch
            }
            Stage::Menu => Outcome::Ignored,
        }
    }
}

fn default_pin() -> Pin {
    let mut digits = [0; MAX_LEN];
    digits[..DEFAULT_PIN.len()].copy_from_slice(DEFAULT_PIN);
    Pin {
        digits,
        len: DEFAULT_PIN.len() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemStore;

    fn type_pin(lock: &mut LockMachine<MemStore>, digits: &[u8]) -> Outcome {
        for &d in digits {
            assert_eq!(lock.key(d), Outcome::Typed);
        }
        lock.key(b'#')
    }

    #[test]
    fn blank_eeprom_gets_default() {
        let lock = LockMachine::new(MemStore::erased());
        assert_eq!(lock.pin().as_bytes(), b"1234");
        assert_eq!(&lock.store().bytes[..6], &[0xA5, 4, b'1', b'2', b'3', b'4']);
    }

    #[test]
    fn stored_pin_survives() {
        let mut store = MemStore::erased();
        Pin::new(b"908172").unwrap().save(&mut store);
        let lock = LockMachine::new(store);
        assert_eq!(lock.pin().as_bytes(), b"908172");
    }

    #[test]
    fn bad_length_in_eeprom_resets() {
        let mut store = MemStore::erased();
        store.bytes[0] = 0xA5;
        store.bytes[1] = 9;
        assert_eq!(Pin::load(&mut store), Err(PinError::Unset));
        assert_eq!(LockMachine::new(store).pin().as_bytes(), b"1234");
    }

    #[test]
    fn pin_validation() {
        assert_eq!(Pin::new(b"123"), Err(PinError::Length));
        assert_eq!(Pin::new(b"1234567"), Err(PinError::Length));
        assert_eq!(Pin::new(b"12a4"), Err(PinError::NotDigit));
    }

    #[test]
    fn unlock_and_lock_again() {
        let mut lock = LockMachine::new(MemStore::erased());
        assert_eq!(lock.screen(), ("Ingrese clave:", Bottom::Text("OK: #")));
        lock.key(b'1');
        assert_eq!(lock.screen().1, Bottom::Masked(1));
        for &d in b"234" {
            lock.key(d);
        }
        assert_eq!(lock.key(b'#'), Outcome::Granted);
        assert_eq!(lock.screen().0, "Bienvenido");
        assert_eq!(lock.key(b'5'), Outcome::Ignored);
        assert_eq!(lock.key(b'B'), Outcome::Locked);
        assert_eq!(lock.screen().0, "Ingrese clave:");
    }

    #[test]
    fn short_entry_is_rejected() {
        let mut lock = LockMachine::new(MemStore::erased());
        assert_eq!(type_pin(&mut lock, b"12"), Outcome::BadLength);
        assert_eq!(lock.screen().1, Bottom::Text("OK: #"));
        assert_eq!(lock.failures(), 0);
    }

    #[test]
    fn seventh_digit_is_dropped() {
        let mut lock = LockMachine::new(MemStore::erased());
        for &d in b"1234567" {
            lock.key(d);
        }
        assert_eq!(lock.screen().1, Bottom::Masked(6));
    }

    #[test]
    fn star_clears() {
        let mut lock = LockMachine::new(MemStore::erased());
        lock.key(b'9');
        lock.key(b'*');
        assert_eq!(type_pin(&mut lock, b"1234"), Outcome::Granted);
    }

    #[test]
    fn third_failure_raises_alarm() {
        let mut lock = LockMachine::new(MemStore::erased());
        assert_eq!(type_pin(&mut lock, b"0000"), Outcome::Denied);
        assert_eq!(type_pin(&mut lock, b"0000"), Outcome::Denied);
        assert_eq!(type_pin(&mut lock, b"0000"), Outcome::Alarm);
        assert_eq!(lock.failures(), 0);
        assert_eq!(type_pin(&mut lock, b"0000"), Outcome::Denied);
    }

    #[test]
    fn success_resets_failures() {
        let mut lock = LockMachine::new(MemStore::erased());
        type_pin(&mut lock, b"0000");
        type_pin(&mut lock, b"0000");
        assert_eq!(type_pin(&mut lock, b"1234"), Outcome::Granted);
        assert_eq!(lock.failures(), 0);
    }

    #[test]
    fn change_pin() {
        let mut lock = LockMachine::new(MemStore::erased());
        type_pin(&mut lock, b"1234");
        assert_eq!(lock.key(b'A'), Outcome::Changing);
        assert_eq!(lock.screen().0, "Clave actual:");
        assert_eq!(type_pin(&mut lock, b"1234"), Outcome::Prompt);
        assert_eq!(lock.screen().0, "Nueva clave:");
        assert_eq!(type_pin(&mut lock, b"55501"), Outcome::Prompt);
        assert_eq!(lock.screen().0, "Confirmar clave");
        assert_eq!(type_pin(&mut lock, b"55501"), Outcome::Saved);
        assert_eq!(lock.screen().0, "Bienvenido");
        assert_eq!(&lock.store().bytes[..7], &[0xA5, 5, b'5', b'5', b'5', b'0', b'1']);

        lock.key(b'#');
        assert_eq!(type_pin(&mut lock, b"1234"), Outcome::Denied);
        assert_eq!(type_pin(&mut lock, b"55501"), Outcome::Granted);
    }

    #[test]
    fn change_rejections() {
        let mut lock = LockMachine::new(MemStore::erased());
        type_pin(&mut lock, b"1234");
        lock.key(b'A');
        assert_eq!(type_pin(&mut lock, b"4321"), Outcome::ChangeRejected);
        assert_eq!(lock.screen().0, "Bienvenido");

        lock.key(b'A');
        type_pin(&mut lock, b"1234");
        type_pin(&mut lock, b"1111");
        let writes = lock.store().writes;
        assert_eq!(type_pin(&mut lock, b"2222"), Outcome::Mismatch);
        assert_eq!(lock.store().writes, writes);
        assert_eq!(lock.pin().as_bytes(), b"1234");
    }

    #[test]
    fn notices() {
        let denied = Outcome::Denied.notice().unwrap();
        assert_eq!(denied.led, Some((Led::Red, 500)));
        assert_eq!(denied.beep_ms, 120);
        assert_eq!(Outcome::Locked.notice().unwrap().bottom, "OK: #");
        assert!(Outcome::Typed.notice().is_none());
        assert!(Outcome::Granted.confirmed());
        assert!(Outcome::Prompt.confirmed());
        assert!(!Outcome::BadLength.confirmed());
        assert!(!Outcome::Locked.confirmed());
        assert!(!Outcome::Changing.confirmed());
    }
}
