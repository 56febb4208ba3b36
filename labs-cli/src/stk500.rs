//! STK500v1 programming over a serial port, as spoken by the Optiboot
//! bootloader on ATmega328P boards.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Read, Write};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// ATmega328P flash page size in bytes.
pub const PAGE_SIZE: usize = 128;

/// Application flash: 32 KiB minus the 512-byte bootloader section.
pub const MAX_IMAGE: usize = 32256;

const GET_SYNC: u8 = 0x30;
const ENTER_PROGMODE: u8 = 0x50;
const LEAVE_PROGMODE: u8 = 0x51;
const LOAD_ADDRESS: u8 = 0x55;
const PROG_PAGE: u8 = 0x64;
const CRC_EOP: u8 = 0x20;
const MEMTYPE_FLASH: u8 = b'F';

const INSYNC: u8 = 0x14;
const OK: u8 = 0x10;

const SYNC_ATTEMPTS: usize = 10;
const SYNC_RETRY_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum Stk500Error {
    #[error("bootloader did not answer after {0} sync attempts (is the board reset?)")]
    NoSync(usize),
    #[error("expected INSYNC (0x14), got 0x{0:02X}")]
    NotInSync(u8),
    #[error("command 0x{command:02X} failed: got 0x{status:02X} instead of OK")]
    Failed { command: u8, status: u8 },
    #[error("firmware too large: {size} bytes at 0x{base:04X} exceed {max} bytes of flash")]
    TooLarge { base: u32, size: usize, max: usize },
    #[error("image does not start on a page boundary: 0x{0:04X}")]
    Unaligned(u32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A bootloader session over any byte stream.
pub struct Programmer<P: Read + Write> {
    port: P,
}

impl<P: Read + Write> Programmer<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    #[cfg(test)]
    fn into_inner(self) -> P {
        self.port
    }

    fn reply(&mut self, command: u8) -> Result<(), Stk500Error> {
        let mut buf = [0u8; 2];
        self.port.read_exact(&mut buf)?;
        if buf[0] != INSYNC {
            return Err(Stk500Error::NotInSync(buf[0]));
        }
        if buf[1] != OK {
            return Err(Stk500Error::Failed {
                command,
                status: buf[1],
            });
        }
        Ok(())
    }

    fn command(&mut self, bytes: &[u8]) -> Result<(), Stk500Error> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        self.reply(bytes[0])
    }

    /// Repeat GET_SYNC until the bootloader answers.
    pub fn sync(&mut self) -> Result<(), Stk500Error> {
        for attempt in 1..=SYNC_ATTEMPTS {
            match self.command(&[GET_SYNC, CRC_EOP]) {
                Ok(()) => {
                    debug!(attempt, "in sync");
                    return Ok(());
                }
                Err(e) => debug!(attempt, error = %e, "sync failed"),
            }
            thread::sleep(SYNC_RETRY_DELAY);
        }
        Err(Stk500Error::NoSync(SYNC_ATTEMPTS))
    }

    pub fn enter_progmode(&mut self) -> Result<(), Stk500Error> {
        self.command(&[ENTER_PROGMODE, CRC_EOP])
    }

    pub fn leave_progmode(&mut self) -> Result<(), Stk500Error> {
        self.command(&[LEAVE_PROGMODE, CRC_EOP])
    }

    /// Set the page address. Flash is addressed in 16-bit words.
    pub fn load_address(&mut self, byte_address: u32) -> Result<(), Stk500Error> {
        let word = (byte_address / 2) as u16;
        let [lo, hi] = word.to_le_bytes();
        self.command(&[LOAD_ADDRESS, lo, hi, CRC_EOP])
    }

    pub fn program_page(&mut self, data: &[u8]) -> Result<(), Stk500Error> {
        let [hi, lo] = (data.len() as u16).to_be_bytes();
        let mut frame = Vec::with_capacity(data.len() + 5);
        frame.extend_from_slice(&[PROG_PAGE, hi, lo, MEMTYPE_FLASH]);
        frame.extend_from_slice(data);
        frame.push(CRC_EOP);
        self.command(&frame)
    }

    /// Write `data` starting at `base`. Pages left fully erased (0xFF) are
    /// skipped.
    pub fn flash(&mut self, base: u32, data: &[u8]) -> Result<(), Stk500Error> {
        check_image(base, data.len())?;

        self.sync()?;
        self.enter_progmode()?;

        let total_pages = data.len().div_ceil(PAGE_SIZE);
        let pb = ProgressBar::new(total_pages as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{msg} [{bar:40.cyan/blue}] {pos}/{len} pages")
        {
            pb.set_style(style.progress_chars("=> "));
        }
        pb.set_message("Flashing");

        let mut written = 0usize;
        for (index, chunk) in data.chunks(PAGE_SIZE).enumerate() {
            if chunk.iter().all(|&b| b == 0xFF) {
                pb.inc(1);
                continue;
            }
            let address = base + (index * PAGE_SIZE) as u32;
            let mut page = [0xFFu8; PAGE_SIZE];
            page[..chunk.len()].copy_from_slice(chunk);

            self.load_address(address)?;
            self.program_page(&page)?;
            written += 1;
            pb.inc(1);
        }

        self.leave_progmode()?;
        pb.finish_with_message("Flashed");
        info!(pages = written, skipped = total_pages - written, "flash complete");
        Ok(())
    }
}

fn check_image(base: u32, size: usize) -> Result<(), Stk500Error> {
    if base as usize % PAGE_SIZE != 0 {
        return Err(Stk500Error::Unaligned(base));
    }
    if base as usize + size > MAX_IMAGE {
        return Err(Stk500Error::TooLarge {
            base,
            size,
            max: MAX_IMAGE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;

    /// Answers every request with the scripted bytes and keeps what was sent.
    #[derive(Default)]
    struct FakeBoard {
        sent: Vec<u8>,
        replies: VecDeque<u8>,
    }

    impl FakeBoard {
        fn answering(pairs: usize) -> Self {
            let mut board = Self::default();
            for _ in 0..pairs {
                board.replies.extend([INSYNC, OK]);
            }
            board
        }
    }

    impl Read for FakeBoard {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let mut n = 0;
            while n < buf.len() {
                match self.replies.pop_front() {
                    Some(b) => {
                        buf[n] = b;
                        n += 1;
                    }
                    None => break,
                }
            }
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::TimedOut, "no reply"));
            }
            Ok(n)
        }
    }

    impl Write for FakeBoard {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.sent.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn load_address_uses_words() {
        let mut prog = Programmer::new(FakeBoard::answering(1));
        prog.load_address(0x0100).unwrap();
        assert_eq!(prog.into_inner().sent, vec![LOAD_ADDRESS, 0x80, 0x00, CRC_EOP]);
    }

    #[test]
    fn program_page_frame() {
        let mut prog = Programmer::new(FakeBoard::answering(1));
        prog.program_page(&[0xAA; PAGE_SIZE]).unwrap();
        let sent = prog.into_inner().sent;
        assert_eq!(&sent[..4], &[PROG_PAGE, 0x00, 0x80, b'F']);
        assert_eq!(sent.len(), 4 + PAGE_SIZE + 1);
        assert_eq!(sent.last(), Some(&CRC_EOP));
    }

    #[test]
    fn flash_skips_erased_pages() {
        let mut image = vec![0xFF; 3 * PAGE_SIZE];
        image[0] = 0x0C;
        image[2 * PAGE_SIZE + 5] = 0x94;
        // sync, enter, 2 x (address + page), leave
        let mut prog = Programmer::new(FakeBoard::answering(7));
        prog.flash(0, &image).unwrap();
        let sent = prog.into_inner().sent;

        assert_eq!(&sent[..4], &[GET_SYNC, CRC_EOP, ENTER_PROGMODE, CRC_EOP]);
        let loads: Vec<&[u8]> = sent
            .windows(4)
            .filter(|w| w[0] == LOAD_ADDRESS && w[3] == CRC_EOP)
            .collect();
        assert_eq!(loads, vec![&[LOAD_ADDRESS, 0, 0, CRC_EOP][..], &[LOAD_ADDRESS, 128, 0, CRC_EOP][..]]);
        assert_eq!(&sent[sent.len() - 2..], &[LEAVE_PROGMODE, CRC_EOP]);
    }

    #[test]
    fn short_last_page_is_padded() {
        let mut prog = Programmer::new(FakeBoard::answering(5));
        prog.flash(0, &[1, 2, 3]).unwrap();
        let sent = prog.into_inner().sent;
        // sync, enter, load address
        let page_at = 2 + 2 + 4;
        assert_eq!(&sent[page_at..page_at + 7], &[PROG_PAGE, 0, 0x80, b'F', 1, 2, 3]);
        assert_eq!(sent[page_at + 7], 0xFF);
    }

    #[test]
    fn oversized_image_is_refused_before_talking() {
        let mut prog = Programmer::new(FakeBoard::default());
        let err = prog.flash(0, &vec![0; MAX_IMAGE + 1]).unwrap_err();
        assert!(matches!(err, Stk500Error::TooLarge { size, .. } if size == MAX_IMAGE + 1));
        assert!(prog.into_inner().sent.is_empty());
    }

    #[test]
    fn unaligned_base_is_refused() {
        assert!(matches!(check_image(0x40, 16), Err(Stk500Error::Unaligned(0x40))));
        assert!(check_image(0x80, MAX_IMAGE - 0x80).is_ok());
    }

    #[test]
    fn status_errors() {
        let mut board = FakeBoard::default();
        board.replies.extend([INSYNC, 0x11]);
        let mut prog = Programmer::new(board);
        assert!(matches!(
            prog.enter_progmode(),
            Err(Stk500Error::Failed { command: ENTER_PROGMODE, status: 0x11 })
        ));

        let mut board = FakeBoard::default();
        board.replies.extend([0x15, OK]);
        let mut prog = Programmer::new(board);
        assert!(matches!(prog.leave_progmode(), Err(Stk500Error::NotInSync(0x15))));
    }
}
