//! Square-wave piano and the two built-in songs.
//!
//! Notes are played on OC1A with Timer1 in fast PWM mode; see
//! [`crate::timing::tone_top`]. Songs are stored in program memory.

use avr_progmem::progmem;

/// Note frequencies in Hz.
pub mod pitch {
    pub const REST: u16 = 0;

    pub const A4: u16 = 440;
    pub const B4: u16 = 494;
    pub const C4: u16 = 262;
    pub const D4: u16 = 294;
    pub const E4: u16 = 330;
    pub const F4: u16 = 349;
    pub const G4: u16 = 392;

    pub const C5: u16 = 523;
    pub const D5: u16 = 587;
    pub const E5: u16 = 659;
    pub const F5: u16 = 698;
    pub const FS5: u16 = 740;
    pub const G5: u16 = 784;
    pub const A5: u16 = 880;

    pub const E6: u16 = 1319;
    pub const G6: u16 = 1568;
    pub const A6: u16 = 1760;
    pub const AS6: u16 = 1865;
    pub const B6: u16 = 1976;

    pub const C7: u16 = 2093;
    pub const D7: u16 = 2349;
    pub const E7: u16 = 2637;
    pub const F7: u16 = 2794;
    pub const G7: u16 = 3136;
    pub const A7: u16 = 3520;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Length {
    Quarter,
    Eighth,
    Sixteenth,
    DottedEighth,
    DottedQuarter,
}

/// Milliseconds of a note length at `bpm` quarter notes per minute.
pub const fn duration(bpm: u16, length: Length) -> u16 {
    let beat_fraction: u32 = match length {
        Length::Quarter => 60_000,
        Length::Eighth => 30_000,
        Length::Sixteenth => 15_000,
        Length::DottedEighth => 45_000,
        Length::DottedQuarter => 90_000,
    };
    (beat_fraction / bpm as u32) as u16
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    /// 0 is a rest.
    pub hz: u16,
    pub ms: u16,
}

impl Note {
    pub const fn new(hz: u16, ms: u16) -> Self {
        Self { hz, ms }
    }

    /// Split into sounding and silent time. Notes longer than 6 ms end
    /// with 4 ms of silence so repeated notes stay distinct.
    pub const fn articulate(&self) -> (u16, u16) {
        if self.hz == pitch::REST || self.ms == 0 {
            (0, self.ms)
        } else if self.ms > 6 {
            (self.ms - 4, 4)
        } else {
            (self.ms, 0)
        }
    }
}

macro_rules! length {
    (Q) => {
        Length::Quarter
    };
    (E) => {
        Length::Eighth
    };
    (S) => {
        Length::Sixteenth
    };
    (ED) => {
        Length::DottedEighth
    };
    (QD) => {
        Length::DottedQuarter
    };
}

macro_rules! tune {
    ($bpm:expr; $($pitch:ident $len:ident),* $(,)?) => {
        [$(Note::new(pitch::$pitch, duration($bpm, length!($len)))),*]
    };
}

pub const MARIO_BPM: u16 = 200;
pub const TETRIS_BPM: u16 = 180;

pub const MARIO_LEN: usize = 55;
pub const TETRIS_LEN: usize = 49;

progmem! {
    /// Super Mario Bros. overworld theme, opening bars.
    pub static progmem MARIO: [Note; MARIO_LEN] = tune![MARIO_BPM;
        E7 E, E7 E, REST E, E7 E, REST E, C7 E, E7 E, REST E,
        G7 E, REST Q, G6 E, REST Q,
        C7 E, REST Q, G6 E, REST Q, E6 E, REST Q,
        A6 E, REST E, B6 E, REST E, AS6 E, A6 E,
        G6 E, E7 E, G7 E, A7 E, REST E, F7 E, G7 E, REST E,
        E7 E, REST E, C7 E, D7 E, B6 E, REST Q,
        C7 E, REST Q, G6 E, REST Q, E6 E, REST Q,
        A6 E, REST E, B6 E, REST E, AS6 E, A6 E,
        G6 E, E7 E, G7 E, A7 E, REST Q,
    ];

    /// Korobeiniki (Tetris theme A).
    pub static progmem TETRIS: [Note; TETRIS_LEN] = tune![TETRIS_BPM;
        E5 E, B4 E, C5 E, D5 E, C5 E, B4 E, A4 E, A4 E,
        C5 E, E5 E, D5 E, C5 E, B4 E, B4 E, REST E,
        C5 E, D5 E, E5 E, C5 E, D5 E, E5 E, FS5 E, D5 E,
        E5 Q, C5 E, A4 E, A4 Q,
        D5 E, F5 E, A5 E, G5 E, F5 E, E5 E, C5 E, E5 E,
        D5 Q, C5 E, B4 E, B4 Q,
        C5 E, D5 E, E5 E, C5 E, D5 E, E5 E, FS5 E, D5 E,
        E5 QD, REST E,
    ];
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Song {
    Mario,
    Tetris,
}

impl Song {
    pub fn len(self) -> usize {
        match self {
            Song::Mario => MARIO_LEN,
            Song::Tetris => TETRIS_LEN,
        }
    }

    pub fn note(self, index: usize) -> Note {
        match self {
            Song::Mario => MARIO.load_at(index),
            Song::Tetris => TETRIS.load_at(index),
        }
    }
}

/// How long one selection of a song plays.
pub const SONG_BUDGET_MS: u32 = 15_000;

/// Notes of one 15 s performance: the song loops and the last note is cut
/// short to fit.
pub struct Performance {
    song: Song,
    index: usize,
    elapsed: u32,
}

impl Performance {
    pub const fn new(song: Song) -> Self {
        Self {
            song,
            index: 0,
            elapsed: 0,
        }
    }
}

impl Iterator for Performance {
    type Item = Note;

    fn next(&mut self) -> Option<Note> {
        if self.elapsed >= SONG_BUDGET_MS {
            return None;
        }
        let note = self.song.note(self.index);
        self.index = (self.index + 1) % self.song.len();
        let ms = (note.ms as u32).min(SONG_BUDGET_MS - self.elapsed);
        self.elapsed += ms;
        Some(Note::new(note.hz, ms as u16))
    }
}

/// Piano keys C4..C5, in scan order.
pub const KEYS: [u16; 8] = [
    pitch::C4,
    pitch::D4,
    pitch::E4,
    pitch::F4,
    pitch::G4,
    pitch::A4,
    pitch::B4,
    pitch::C5,
];

/// Keys 0-3 on PC0-PC3 and keys 4-7 on PD2-PD5, active low.
pub const KEYS_C: u8 = 0x0F;
pub const KEYS_D: u8 = 0x3C;

pub const KEY_POLL_MS: u16 = 2;
/// Polls a key must read pressed before it sounds (8 ms).
pub const KEY_DEBOUNCE_POLLS: u8 = 4;

/// Raw key states from the PINC and PIND readings.
pub fn key_levels(pinc: u8, pind: u8) -> [bool; 8] {
    let mut keys = [false; 8];
    for (i, key) in keys.iter_mut().enumerate() {
        *key = if i < 4 {
            pinc & (1 << i) == 0
        } else {
            pind & (1 << (i - 2)) == 0
        };
    }
    keys
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Piano,
    Song(Song),
    Pause,
}

impl Mode {
    pub const fn announcement(self) -> &'static str {
        match self {
            Mode::Piano => "[Modo] Piano",
            Mode::Song(Song::Mario) => "[Modo] Cancion 1 (Mario)",
            Mode::Song(Song::Tetris) => "[Modo] Cancion 2 (Tetris)",
            Mode::Pause => "[Modo] Pausa",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Select(Mode),
    Help,
}

/// Single-character command decoder. `C1`/`C2` are accepted as aliases
/// of `1`/`2`.
pub struct Commands {
    prefix: bool,
}

impl Commands {
    pub const fn new() -> Self {
        Self { prefix: false }
    }

    pub fn feed(&mut self, byte: u8) -> Option<Command> {
        let after_prefix = core::mem::replace(&mut self.prefix, false);
        match byte.to_ascii_uppercase() {
            b'H' => Some(Command::Help),
            b'P' => Some(Command::Select(Mode::Piano)),
            b'1' => Some(Command::Select(Mode::Song(Song::Mario))),
            b'2' => Some(Command::Select(Mode::Song(Song::Tetris))),
            b'S' => Some(Command::Select(Mode::Pause)),
            b'C' if !after_prefix => {
                self.prefix = true;
                None
            }
            _ => None,
        }
    }
}

pub const READY: &str = "UART 9600 8N1 listo";
pub const USAGE: &str = "P=piano | 1/C1=Mario | 2/C2=Tetris | S=pause | H=help";
pub const HELP: &str = "Comandos: P=piano | 1/C1=Mario | 2/C2=Tetris | S=pause | H=help";
pub const INITIAL_MODE: &str = "Modo inicial: Piano";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(duration(MARIO_BPM, Length::Quarter), 300);
        assert_eq!(duration(MARIO_BPM, Length::Eighth), 150);
        assert_eq!(duration(TETRIS_BPM, Length::Eighth), 166);
        assert_eq!(duration(TETRIS_BPM, Length::DottedQuarter), 500);
        assert_eq!(duration(120, Length::Sixteenth), 125);
        assert_eq!(duration(120, Length::DottedEighth), 375);
    }

    #[test]
    fn songs_load() {
        assert_eq!(Song::Mario.note(0), Note::new(pitch::E7, 150));
        assert_eq!(Song::Mario.note(9), Note::new(pitch::REST, 300));
        assert_eq!(Song::Tetris.note(TETRIS_LEN - 2), Note::new(pitch::E5, 500));
    }

    #[test]
    fn articulation() {
        assert_eq!(Note::new(440, 150).articulate(), (146, 4));
        assert_eq!(Note::new(440, 6).articulate(), (6, 0));
        assert_eq!(Note::new(pitch::REST, 300).articulate(), (0, 300));
    }

    #[test]
    fn performance_fills_budget() {
        for song in [Song::Mario, Song::Tetris] {
            let notes: Vec<Note> = Performance::new(song).collect();
            let total: u32 = notes.iter().map(|n| n.ms as u32).sum();
            assert_eq!(total, SONG_BUDGET_MS);
            // Loops past the end of the table.
            assert!(notes.len() > song.len());
        }
    }

    #[test]
    fn last_note_is_truncated() {
        let notes: Vec<Note> = Performance::new(Song::Tetris).collect();
        // One pass is 9136 ms; 52 ms are left for the 34th note of the second.
        assert_eq!(notes.len(), TETRIS_LEN + 34);
        assert_eq!(notes[notes.len() - 1], Note::new(pitch::C5, 52));
    }

    #[test]
    fn key_scan() {
        assert_eq!(key_levels(0xFF, 0xFF), [false; 8]);
        let keys = key_levels(0xFF & !(1 << 2), 0xFF & !(1 << 5));
        assert_eq!(keys, [false, false, true, false, false, false, false, true]);
        assert_eq!(KEYS[keys.iter().position(|&k| k).unwrap()], pitch::E4);
    }

    #[test]
    fn commands() {
        let mut c = Commands::new();
        assert_eq!(c.feed(b'h'), Some(Command::Help));
        assert_eq!(c.feed(b's'), Some(Command::Select(Mode::Pause)));
        assert_eq!(c.feed(b'c'), None);
        assert_eq!(c.feed(b'2'), Some(Command::Select(Mode::Song(Song::Tetris))));
        assert_eq!(c.feed(b'\r'), None);
        assert_eq!(c.feed(b'1'), Some(Command::Select(Mode::Song(Song::Mario))));
        assert_eq!(c.feed(b'C'), None);
        assert_eq!(c.feed(b'x'), None);
        assert_eq!(c.feed(b'P'), Some(Command::Select(Mode::Piano)));
    }

    #[test]
    fn announcements() {
        assert_eq!(Mode::Song(Song::Tetris).announcement(), "[Modo] Cancion 2 (Tetris)");
        assert_eq!(Mode::Pause.announcement(), "[Modo] Pausa");
    }
}
