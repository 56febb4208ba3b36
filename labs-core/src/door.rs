//! RFID door: one authorised card kept in EEPROM.
//!
//! EEPROM layout: byte 0 holds the UID length (1 to 10 is valid), the UID
//! bytes follow from byte 1. An erased card slot reads as 0xFF.

use crate::ByteStore;

const ADDR_LEN: u16 = 0;
const ADDR_UID: u16 = 1;
pub const MAX_UID: usize = 10;

/// Red and green LEDs on PORTB, buzzer and buttons on PORTD.
pub const LED_GREEN: u8 = 1 << 0;
pub const LED_RED: u8 = 1 << 1;
pub const BUZZER: u8 = 1 << 7;
pub const BUTTON_ERASE: u8 = 1 << 2;
pub const BUTTON_REGISTER: u8 = 1 << 3;

pub const BEEP_MS: u16 = 100;
/// Button handling: settle, wait for release, settle again.
pub const BUTTON_SETTLE_MS: u16 = 500;
pub const BUTTON_RELEASE_MS: u16 = 300;
pub const DETECT_POLL_MS: u16 = 100;
pub const REGISTER_POLL_MS: u16 = 150;
pub const VERDICT_MS: u16 = 1500;
pub const REGISTERED_MS: u16 = 1000;
pub const ERASE_MS: u16 = 800;
pub const ERASED_MS: u16 = 1000;
pub const WELCOME_MS: u16 = 1000;

pub const WELCOME: (&str, &str) = ("Bienvenido al", "sistema RFID");
pub const PROMPT: (&str, &str) = ("Acerque su", "tarjeta RFID");
pub const REGISTER_PROMPT: (&str, &str) = ("Registrar", "acerque tarjeta");
pub const REGISTERED: (&str, &str) = ("Nueva tarjeta", "registrada");
pub const INVALID: (&str, &str) = ("UID invalido", "no se guardo");
pub const ERASED: (&str, &str) = ("Tarjeta", "borrada");

pub const BANNER: &str = "=== Sistema Cerradura RFID Iniciado ===\r\n";
pub const LOG_DETECTED: &str = "UID detectado: ";
pub const LOG_READ: &str = "UID leído: ";
pub const LOG_WAITING: &str = "[REGISTRO] Esperando tarjeta...\r\n";
pub const LOG_REGISTERED: &str = "[REGISTRO] Tarjeta registrada.\r\n";
pub const LOG_INVALID: &str = "[REGISTRO] UID invalido, no se guarda.\r\n";
pub const LOG_ERASING: &str = "[BORRAR] Eliminando tarjeta registrada...\r\n";
pub const LOG_ERASED: &str = "[BORRAR] Tarjeta borrada.\r\n";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CardError {
    /// UID empty or longer than the slot.
    InvalidLength,
}

/// The stored card.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Card {
    uid: [u8; MAX_UID],
    len: u8,
}

impl Card {
    pub fn new(uid: &[u8]) -> Result<Card, CardError> {
        if uid.is_empty() || uid.len() > MAX_UID {
            return Err(CardError::InvalidLength);
        }
        let mut card = Card {
            uid: [0; MAX_UID],
            len: uid.len() as u8,
        };
        card.uid[..uid.len()].copy_from_slice(uid);
        Ok(card)
    }

    pub fn uid(&self) -> &[u8] {
        &self.uid[..self.len as usize]
    }

    pub fn load<S: ByteStore>(store: &mut S) -> Option<Card> {
        let len = store.read(ADDR_LEN) as usize;
        if len == 0 || len > MAX_UID {
            return None;
        }
        let mut uid = [0; MAX_UID];
        for (i, b) in uid.iter_mut().take(len).enumerate() {
            *b = store.read(ADDR_UID + i as u16);
        }
        Card::new(&uid[..len]).ok()
    }

    pub fn save<S: ByteStore>(&self, store: &mut S) {
        store.write(ADDR_LEN, self.len);
        for (i, &b) in self.uid().iter().enumerate() {
            store.write(ADDR_UID + i as u16, b);
        }
    }

    /// Blank the length byte and the whole UID slot.
    pub fn erase<S: ByteStore>(store: &mut S) {
        for addr in ADDR_LEN..=ADDR_UID + MAX_UID as u16 - 1 {
            store.write(addr, 0xFF);
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    NoCardStored,
    Granted,
    Denied,
}

impl Verdict {
    pub fn check(stored: Option<&Card>, presented: &[u8]) -> Verdict {
        match stored {
            None => Verdict::NoCardStored,
            Some(card) if card.uid() == presented => Verdict::Granted,
            Some(_) => Verdict::Denied,
        }
    }

    pub const fn lines(self) -> (&'static str, &'static str) {
        match self {
            Verdict::NoCardStored => ("No hay", "tarjeta guardada"),
            Verdict::Granted => ("Acceso", "permitido"),
            Verdict::Denied => ("Acceso", "denegado"),
        }
    }

    /// PORTB LED mask to light.
    pub const fn led(self) -> u8 {
        match self {
            Verdict::Granted => LED_GREEN,
            _ => LED_RED,
        }
    }

    pub const fn beeps(self) -> u8 {
        match self {
            Verdict::Granted => 1,
            _ => 2,
        }
    }

    pub const fn log(self) -> &'static str {
        match self {
            Verdict::NoCardStored => "[VERIFICAR] No hay tarjeta registrada.\r\n",
            Verdict::Granted => "[VERIFICAR] Acceso permitido.\r\n",
            Verdict::Denied => "[VERIFICAR] Acceso denegado.\r\n",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Detect,
    Register,
    Erase,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Nothing to report.
    Idle,
    /// A new card was presented in detect mode.
    Checked(Verdict),
    Registered,
    /// The card was read but could not be stored.
    Rejected,
    Erased,
}

impl Event {
    /// Serial heading for the UID behind this event. Only events that
    /// consumed a card have one, so a card left on the reader is logged once.
    pub const fn log_heading(self) -> Option<&'static str> {
        match self {
            Event::Checked(_) => Some(LOG_DETECTED),
            Event::Registered | Event::Rejected => Some(LOG_READ),
            Event::Idle | Event::Erased => None,
        }
    }
}

/// Detect/register/erase controller.
///
/// In detect mode each card is checked once: it has to leave the reader
/// before it (or another card) is checked again.
pub struct Door<S: ByteStore> {
    store: S,
    mode: Mode,
    present: bool,
}

impl<S: ByteStore> Door<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store,
            mode: Mode::Detect,
            present: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn select(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// One pass of the main loop with the UID read this pass, if any.
    pub fn poll(&mut self, card: Option<&[u8]>) -> Event {
        match self.mode {
            Mode::Detect => match card {
                Some(uid) if !self.present => {
                    self.present = true;
                    let stored = Card::load(&mut self.store);
                    Event::Checked(Verdict::check(stored.as_ref(), uid))
                }
                Some(_) => Event::Idle,
                None => {
                    self.present = false;
                    Event::Idle
                }
            },
            Mode::Register => {
                let Some(uid) = card else {
                    return Event::Idle;
                };
                self.finish();
                match Card::new(uid) {
                    Ok(c) => {
                        c.save(&mut self.store);
                        Event::Registered
                    }
                    Err(CardError::InvalidLength) => Event::Rejected,
                }
            }
            Mode::Erase => {
                Card::erase(&mut self.store);
                self.finish();
                Event::Erased
            }
        }
    }

    fn finish(&mut self) {
        self.mode = Mode::Detect;
        self.present = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemStore;

    const CARD: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];
    const OTHER: [u8; 4] = [0x01, 0x02, 0x03, 0x04];

    #[test]
    fn empty_eeprom_has_no_card() {
        let mut store = MemStore::erased();
        assert_eq!(Card::load(&mut store), None);
        store.bytes[0] = 0;
        assert_eq!(Card::load(&mut store), None);
        store.bytes[0] = 11;
        assert_eq!(Card::load(&mut store), None);
    }

    #[test]
    fn save_and_erase() {
        let mut store = MemStore::erased();
        Card::new(&CARD).unwrap().save(&mut store);
        assert_eq!(&store.bytes[..5], &[4, 0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(Card::load(&mut store).unwrap().uid(), &CARD);

        store.bytes[11] = 0x42;
        Card::erase(&mut store);
        assert!(store.bytes[..=10].iter().all(|&b| b == 0xFF));
        assert_eq!(store.bytes[11], 0x42);
    }

    #[test]
    fn length_limits() {
        assert_eq!(Card::new(&[]), Err(CardError::InvalidLength));
        assert_eq!(Card::new(&[1; 11]), Err(CardError::InvalidLength));
        assert!(Card::new(&[1; 10]).is_ok());
    }

    #[test]
    fn verdicts() {
        let card = Card::new(&CARD).unwrap();
        assert_eq!(Verdict::check(None, &CARD), Verdict::NoCardStored);
        assert_eq!(Verdict::check(Some(&card), &CARD), Verdict::Granted);
        assert_eq!(Verdict::check(Some(&card), &OTHER), Verdict::Denied);
        assert_eq!(Verdict::Granted.beeps(), 1);
        assert_eq!(Verdict::Denied.led(), LED_RED);
        assert_eq!(Verdict::NoCardStored.lines(), ("No hay", "tarjeta guardada"));
    }

    #[test]
    fn card_checked_once_per_presentation() {
        let mut door = Door::new(MemStore::erased());
        assert_eq!(door.poll(Some(&CARD)), Event::Checked(Verdict::NoCardStored));
        assert_eq!(door.poll(Some(&CARD)), Event::Idle);
        assert_eq!(door.poll(None), Event::Idle);
        assert_eq!(door.poll(Some(&CARD)), Event::Checked(Verdict::NoCardStored));
    }

    #[test]
    fn held_card_is_logged_once() {
        let mut door = Door::new(MemStore::erased());
        let logged = (0..10)
            .filter_map(|_| door.poll(Some(&CARD)).log_heading())
            .collect::<Vec<_>>();
        assert_eq!(logged, vec![LOG_DETECTED]);

        door.poll(None);
        assert_eq!(door.poll(Some(&CARD)).log_heading(), Some(LOG_DETECTED));
    }

    #[test]
    fn register_logs_the_read_uid() {
        let mut door = Door::new(MemStore::erased());
        door.select(Mode::Register);
        assert_eq!(door.poll(None).log_heading(), None);
        assert_eq!(door.poll(Some(&CARD)).log_heading(), Some(LOG_READ));
        door.select(Mode::Register);
        assert_eq!(door.poll(Some(&[7; 12])).log_heading(), Some(LOG_READ));
        door.select(Mode::Erase);
        assert_eq!(door.poll(None).log_heading(), None);
    }

    #[test]
    fn register_then_open() {
        let mut door = Door::new(MemStore::erased());
        door.select(Mode::Register);
        assert_eq!(door.poll(None), Event::Idle);
        assert_eq!(door.mode(), Mode::Register);
        assert_eq!(door.poll(Some(&CARD)), Event::Registered);
        assert_eq!(door.mode(), Mode::Detect);
        // Still on the reader, but the token was reset by registration.
        assert_eq!(door.poll(Some(&CARD)), Event::Checked(Verdict::Granted));
        door.poll(None);
        assert_eq!(door.poll(Some(&OTHER)), Event::Checked(Verdict::Denied));
    }

    #[test]
    fn erase_forgets_card() {
        let mut door = Door::new(MemStore::erased());
        door.select(Mode::Register);
        door.poll(Some(&CARD));
        door.select(Mode::Erase);
        assert_eq!(door.poll(Some(&CARD)), Event::Erased);
        assert_eq!(door.mode(), Mode::Detect);
        assert_eq!(door.poll(Some(&CARD)), Event::Checked(Verdict::NoCardStored));
    }

    #[test]
    fn oversized_uid_is_rejected() {
        let mut door = Door::new(MemStore::erased());
        door.select(Mode::Register);
        assert_eq!(door.poll(Some(&[7; 12])), Event::Rejected);
        assert_eq!(Card::load(door.store_mut()), None);
    }
}
