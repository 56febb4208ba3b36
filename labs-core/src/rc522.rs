//! MFRC522 RFID reader: register map, setup and UID read.

pub const COMMAND: u8 = 0x01;
pub const COMM_IRQ: u8 = 0x04;
pub const ERROR: u8 = 0x06;
pub const FIFO_DATA: u8 = 0x09;
pub const FIFO_LEVEL: u8 = 0x0A;
pub const BIT_FRAMING: u8 = 0x0D;
pub const MODE: u8 = 0x11;
pub const TX_CONTROL: u8 = 0x14;
pub const TX_ASK: u8 = 0x15;
pub const RF_CFG: u8 = 0x26;
pub const T_MODE: u8 = 0x2A;
pub const T_PRESCALER: u8 = 0x2B;
pub const T_RELOAD_H: u8 = 0x2C;
pub const T_RELOAD_L: u8 = 0x2D;
pub const VERSION: u8 = 0x37;

pub const PCD_IDLE: u8 = 0x00;
pub const PCD_TRANSCEIVE: u8 = 0x0C;
pub const PCD_SOFT_RESET: u8 = 1 << 4;

pub const PICC_REQIDL: u8 = 0x26;
pub const PICC_ANTICOLL: u8 = 0x93;

/// Register values written after the soft reset, in order.
pub const SETUP: [(u8, u8); 8] = [
    (T_MODE, 0x8D),
    (T_PRESCALER, 0x3E),
    (T_RELOAD_L, 30),
    (T_RELOAD_H, 0),
    (TX_ASK, 0x40),
    (MODE, 0x3D),
    (RF_CFG, 0x7F),
    (TX_CONTROL, 0x83),
];

pub const RESET_MS: u16 = 50;
pub const SETUP_MS: u16 = 5;

/// CommIrqReg polls before a transceive is given up.
pub const POLL_LIMIT: u16 = 1000;
/// RxIRq or IdleIRq.
const IRQ_DONE: u8 = 0x30;
/// BitFramingReg StartSend.
const START_SEND: u8 = 0x80;
/// FIFOLevelReg FlushBuffer.
const FLUSH: u8 = 0x80;

/// UID bytes the door keeps.
pub const UID_LEN: usize = 4;
const FIFO_SIZE: usize = 16;

pub type Uid = [u8; UID_LEN];

/// SPI address byte for a register write.
pub const fn write_address(reg: u8) -> u8 {
    (reg << 1) & 0x7E
}

/// SPI address byte for a register read.
pub const fn read_address(reg: u8) -> u8 {
    write_address(reg) | 0x80
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rc522Error {
    /// Nothing answered the idle request.
    NoCard,
    /// A card answered the request but not the anticollision command.
    Timeout,
}

/// Register access to the reader.
pub trait RegisterBus {
    fn write(&mut self, reg: u8, value: u8);
    fn read(&mut self, reg: u8) -> u8;
}

pub struct Rc522<B> {
    bus: B,
}

impl<B: RegisterBus> Rc522<B> {
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn release(self) -> B {
        self.bus
    }

    /// Soft reset, timer and antenna setup. `delay` waits milliseconds.
    pub fn init(&mut self, mut delay: impl FnMut(u16)) {
        self.bus.write(COMMAND, PCD_SOFT_RESET);
        delay(RESET_MS);
        for (reg, value) in SETUP {
            self.bus.write(reg, value);
        }
        delay(SETUP_MS);
    }

    pub fn version(&mut self) -> u8 {
        self.bus.read(VERSION)
    }

    fn set_bits(&mut self, reg: u8, mask: u8) {
        let v = self.bus.read(reg);
        self.bus.write(reg, v | mask);
    }

    fn clear_bits(&mut self, reg: u8, mask: u8) {
        let v = self.bus.read(reg);
        self.bus.write(reg, v & !mask);
    }

    /// Send `data` and wait for the card. Returns the FIFO level on success.
    fn transceive(&mut self, data: &[u8], last_bits: u8) -> Option<u8> {
        self.bus.write(BIT_FRAMING, last_bits);
        self.bus.write(COMM_IRQ, 0x7F);
        self.bus.write(FIFO_LEVEL, FLUSH);
        for &b in data {
            self.bus.write(FIFO_DATA, b);
        }
        self.bus.write(COMMAND, PCD_TRANSCEIVE);
        self.set_bits(BIT_FRAMING, START_SEND);

        let mut done = false;
        for _ in 0..POLL_LIMIT {
            if self.bus.read(COMM_IRQ) & IRQ_DONE != 0 {
                done = true;
                break;
            }
        }
        self.clear_bits(BIT_FRAMING, START_SEND);
        if done {
            Some(self.bus.read(FIFO_LEVEL))
        } else {
            None
        }
    }

    /// Wake an idle card and read the first bytes of its UID.
    pub fn read_uid(&mut self) -> Result<Uid, Rc522Error> {
        let level = self.transceive(&[PICC_REQIDL], 0x07).ok_or(Rc522Error::NoCard)?;
        if level == 0 {
            return Err(Rc522Error::NoCard);
        }
        for _ in 0..level {
            self.bus.read(FIFO_DATA);
        }

        let level = self
            .transceive(&[PICC_ANTICOLL, 0x20], 0x00)
            .ok_or(Rc522Error::Timeout)?;
        let mut buf = [0u8; FIFO_SIZE];
        for i in 0..level as usize {
            let v = self.bus.read(FIFO_DATA);
            if let Some(slot) = buf.get_mut(i) {
                *slot = v;
            }
        }
        let mut uid = [0; UID_LEN];
        uid.copy_from_slice(&buf[..UID_LEN]);
        // An all-zero first byte reads as no card.
        if uid[0] == 0 {
            return Err(Rc522Error::NoCard);
        }
        Ok(uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted reader: registers hold values, the FIFO replays queued bytes.
    struct FakeReader {
        regs: [u8; 0x40],
        writes: Vec<(u8, u8)>,
        /// Responses for successive transceives (`None` = never completes).
        answers: VecDeque<Option<Vec<u8>>>,
        fifo: VecDeque<u8>,
        irq: u8,
        polls: u32,
    }

    impl Default for FakeReader {
        fn default() -> Self {
            Self {
                regs: [0; 0x40],
                writes: Vec::new(),
                answers: VecDeque::new(),
                fifo: VecDeque::new(),
                irq: 0,
                polls: 0,
            }
        }
    }

    impl RegisterBus for FakeReader {
        fn write(&mut self, reg: u8, value: u8) {
            self.writes.push((reg, value));
            if reg == BIT_FRAMING && value & START_SEND != 0 {
                match self.answers.pop_front().flatten() {
                    Some(bytes) => {
                        self.fifo = bytes.into();
                        self.irq = 0x30;
                    }
                    None => {
                        self.fifo.clear();
                        self.irq = 0;
                    }
                }
            }
            self.regs[reg as usize] = value;
        }

        fn read(&mut self, reg: u8) -> u8 {
            match reg {
                COMM_IRQ => {
                    self.polls += 1;
                    self.irq
                }
                FIFO_LEVEL => self.fifo.len() as u8,
                FIFO_DATA => self.fifo.pop_front().unwrap_or(0),
                _ => self.regs[reg as usize],
            }
        }
    }

    #[test]
    fn address_bytes() {
        assert_eq!(write_address(COMMAND), 0x02);
        assert_eq!(read_address(VERSION), 0xEE);
        assert_eq!(write_address(0x3F), 0x7E);
    }

    #[test]
    fn init_writes_setup() {
        let mut reader = Rc522::new(FakeReader::default());
        let mut waited = Vec::new();
        reader.init(|ms| waited.push(ms));
        let bus = reader.release();
        assert_eq!(bus.writes[0], (COMMAND, PCD_SOFT_RESET));
        assert_eq!(&bus.writes[1..], &SETUP);
        assert_eq!(waited, vec![50, 5]);
    }

    #[test]
    fn reads_uid() {
        let mut bus = FakeReader::default();
        bus.answers.push_back(Some(vec![0x04, 0x00]));
        bus.answers.push_back(Some(vec![0xDE, 0xAD, 0xBE, 0xEF, 0x22]));
        let mut reader = Rc522::new(bus);
        assert_eq!(reader.read_uid(), Ok([0xDE, 0xAD, 0xBE, 0xEF]));
        let bus = reader.release();
        assert!(bus.writes.contains(&(FIFO_DATA, PICC_ANTICOLL)));
        assert!(bus.writes.contains(&(BIT_FRAMING, 0x07)));
        // StartSend is cleared after each exchange.
        assert_eq!(bus.regs[BIT_FRAMING as usize] & START_SEND, 0);
    }

    #[test]
    fn no_card_times_out() {
        let mut bus = FakeReader::default();
        bus.answers.push_back(None);
        let mut reader = Rc522::new(bus);
        assert_eq!(reader.read_uid(), Err(Rc522Error::NoCard));
        assert_eq!(reader.release().polls, POLL_LIMIT as u32);
    }

    #[test]
    fn anticollision_timeout() {
        let mut bus = FakeReader::default();
        bus.answers.push_back(Some(vec![0x04, 0x00]));
        bus.answers.push_back(None);
        let mut reader = Rc522::new(bus);
        assert_eq!(reader.read_uid(), Err(Rc522Error::Timeout));
    }

    #[test]
    fn empty_fifo_is_no_card() {
        let mut bus = FakeReader::default();
        bus.answers.push_back(Some(vec![]));
        let mut reader = Rc522::new(bus);
        assert_eq!(reader.read_uid(), Err(Rc522Error::NoCard));
    }
}
