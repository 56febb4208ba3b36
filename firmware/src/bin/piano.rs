//! Eight-key piano and two songs on a buzzer, switched over UART.

#![no_std]
#![no_main]

use firmware::timers::Tone;
use firmware::uart::Serial;
use firmware::{delay_ms, peripherals, port};
use labs_core::debounce::Debouncer;
use labs_core::music::{
    key_levels, Command, Commands, Mode, Performance, Song, HELP, INITIAL_MODE, KEYS, KEYS_C,
    KEYS_D, KEY_DEBOUNCE_POLLS, KEY_POLL_MS, READY, USAGE,
};

/// PORTB: OC1A.
const BUZZER: u8 = 1 << 1;

struct Console<'a> {
    serial: Serial<'a>,
    commands: Commands,
    mode: Mode,
}

impl Console<'_> {
    fn line(&mut self, text: &str) {
        self.serial.print(text);
        self.serial.print("\r\n");
    }

    /// Handle pending bytes. Returns `true` if a mode was selected.
    fn poll(&mut self) -> bool {
        let mut selected = false;
        while let Some(byte) = self.serial.try_read() {
            match self.commands.feed(byte) {
                Some(Command::Select(mode)) => {
                    self.mode = mode;
                    self.line(mode.announcement());
                    selected = true;
                }
                Some(Command::Help) => self.line(HELP),
                None => {}
            }
        }
        selected
    }

    /// Wait `ms`, polling every millisecond. `true` if interrupted.
    fn wait(&mut self, ms: u16) -> bool {
        for _ in 0..ms {
            if self.poll() {
                return true;
            }
            delay_ms(1);
        }
        false
    }
}

/// One pass through the song budget; stops early on a mode change.
fn perform(console: &mut Console, tone: &mut Tone, song: Song) {
    for note in Performance::new(song) {
        let (sound, silence) = note.articulate();
        if sound > 0 {
            tone.play(note.hz);
            let stopped = console.wait(sound);
            tone.stop();
            if stopped {
                return;
            }
        }
        if console.wait(silence) {
            return;
        }
    }
}

#[no_mangle]
pub extern "C" fn main() -> ! {
    let dp = peripherals();
    port::output_b(&dp, BUZZER);
    port::pullup_c(&dp, KEYS_C);
    port::pullup_d(&dp, KEYS_D);

    let mut tone = Tone::new(&dp.TC1);
    let mut console = Console {
        serial: Serial::new(&dp.USART0),
        commands: Commands::new(),
        mode: Mode::Piano,
    };
    console.line(READY);
    console.line(USAGE);
    console.line(INITIAL_MODE);

    let mut keys = Debouncer::<8>::new(KEY_DEBOUNCE_POLLS);
    let mut sounding = None;

    loop {
        console.poll();
        match console.mode {
            Mode::Piano => {
                let levels = key_levels(port::read_c(&dp), port::read_d(&dp));
                keys.update(&levels);
                let pressed = keys.first_pressed();
                if pressed != sounding {
                    match pressed {
                        Some(i) => tone.play(KEYS[i]),
                        None => tone.stop(),
                    }
                    sounding = pressed;
                }
                delay_ms(KEY_POLL_MS);
            }
            Mode::Song(song) => {
                sounding = None;
                perform(&mut console, &mut tone, song);
            }
            Mode::Pause => {
                if sounding.take().is_some() {
                    tone.stop();
                }
                delay_ms(1);
            }
        }
    }
}
