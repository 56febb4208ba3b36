//! Pen plotter motions, figures and programs.
//!
//! Two plotters share this module. The timed plotter drives its motors
//! through PORTD and measures every move in milliseconds; the stepper
//! plotter counts STEP pulses on two A4988-style drivers. Both execute the
//! same [`Step`] sequences.

#[cfg(not(test))]
use micromath::F32Ext;

use Direction::*;

macro_rules! figure {
    (@motion D) => { $crate::plotter::Motion::Draw($crate::plotter::Direction::Right) };
    (@motion I) => { $crate::plotter::Motion::Draw($crate::plotter::Direction::Left) };
    (@motion A) => { $crate::plotter::Motion::Draw($crate::plotter::Direction::Down) };
    (@motion U) => { $crate::plotter::Motion::Draw($crate::plotter::Direction::Up) };
    (@motion d) => { $crate::plotter::Motion::Travel($crate::plotter::Direction::Right) };
    (@motion i) => { $crate::plotter::Motion::Travel($crate::plotter::Direction::Left) };
    (@motion a) => { $crate::plotter::Motion::Travel($crate::plotter::Direction::Down) };
    (@motion u) => { $crate::plotter::Motion::Travel($crate::plotter::Direction::Up) };
    (@motion B) => { $crate::plotter::Motion::PenDown };
    (@motion S) => { $crate::plotter::Motion::PenUp };
    ($($code:ident $amount:literal),* $(,)?) => {
        [$($crate::plotter::Step {
            motion: figure!(@motion $code),
            amount: $amount,
        }),*]
    };
}

mod figures;
mod trace;

pub use figures::*;
pub use trace::{Point, Segment, Tracer};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpRight,
    DownRight,
    DownLeft,
    UpLeft,
}

impl Direction {
    /// Unit vector on screen axes (x right, y down).
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpRight => (1, -1),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (-1, 1),
            Direction::UpLeft => (-1, -1),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Motion {
    PenDown,
    PenUp,
    /// Move with the pen as it is (down when drawing a figure).
    Draw(Direction),
    /// Move with the pen raised.
    Travel(Direction),
}

impl Motion {
    /// Decode a one-letter table code. Diagonals have no code.
    pub const fn from_code(code: u8) -> Option<Motion> {
        let motion = match code {
            b'D' => Motion::Draw(Direction::Right),
            b'I' => Motion::Draw(Direction::Left),
            b'A' => Motion::Draw(Direction::Down),
            b'U' => Motion::Draw(Direction::Up),
            b'd' => Motion::Travel(Direction::Right),
            b'i' => Motion::Travel(Direction::Left),
            b'a' => Motion::Travel(Direction::Down),
            b'u' => Motion::Travel(Direction::Up),
            b'B' => Motion::PenDown,
            b'S' => Motion::PenUp,
            _ => return None,
        };
        Some(motion)
    }

    pub const fn code(self) -> Option<u8> {
        let code = match self {
            Motion::Draw(Direction::Right) => b'D',
            Motion::Draw(Direction::Left) => b'I',
            Motion::Draw(Direction::Down) => b'A',
            Motion::Draw(Direction::Up) => b'U',
            Motion::Travel(Direction::Right) => b'd',
            Motion::Travel(Direction::Left) => b'i',
            Motion::Travel(Direction::Down) => b'a',
            Motion::Travel(Direction::Up) => b'u',
            Motion::PenDown => b'B',
            Motion::PenUp => b'S',
            _ => return None,
        };
        Some(code)
    }
}

/// One plotter instruction: a motion and its amount (ms or steps).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub motion: Motion,
    pub amount: u16,
}

impl Step {
    pub const fn new(motion: Motion, amount: u16) -> Self {
        Self { motion, amount }
    }

    pub const fn draw(dir: Direction, amount: u16) -> Self {
        Self::new(Motion::Draw(dir), amount)
    }

    pub const fn travel(dir: Direction, amount: u16) -> Self {
        Self::new(Motion::Travel(dir), amount)
    }
}

/// Figure tables stored in program memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Table {
    Circle,
    TimedFox,
    TimedFlower,
    Fox,
    Flower,
}

impl Table {
    pub fn len(self) -> usize {
        match self {
            Table::Circle => CIRCLE_LEN,
            Table::TimedFox => TIMED_FOX_LEN,
            Table::TimedFlower => TIMED_FLOWER_LEN,
            Table::Fox => FOX_LEN,
            Table::Flower => FLOWER_LEN,
        }
    }

    /// Load one entry out of flash.
    pub fn step(self, index: usize) -> Step {
        match self {
            Table::Circle => CIRCLE.load_at(index),
            Table::TimedFox => TIMED_FOX.load_at(index),
            Table::TimedFlower => TIMED_FLOWER.load_at(index),
            Table::Fox => FOX.load_at(index),
            Table::Flower => FLOWER.load_at(index),
        }
    }

    pub fn steps(self) -> impl Iterator<Item = Step> {
        (0..self.len()).map(move |i| self.step(i))
    }
}

/// How table amounts translate to machine units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableScale {
    /// Amounts are used as they are.
    Unit,
    /// Amounts are multiplied by 3/10.
    Stepper,
}

impl TableScale {
    pub fn apply(self, amount: u16) -> u16 {
        match self {
            TableScale::Unit => amount,
            TableScale::Stepper => (amount as u32 * 3 / 10) as u16,
        }
    }
}

/// A piece of a plotter program.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Part {
    Steps(&'static [Step]),
    Table(Table),
    Circle { radius: u16, y_factor: f32 },
}

/// Calls `f` for every step of a program, in order.
pub fn for_each_step(parts: &[Part], scale: TableScale, mut f: impl FnMut(Step)) {
    for part in parts {
        match *part {
            Part::Steps(steps) => steps.iter().copied().for_each(&mut f),
            Part::Table(table) => table.steps().for_each(|s| {
                let amount = match s.motion {
                    Motion::PenDown | Motion::PenUp => s.amount,
                    _ => scale.apply(s.amount),
                };
                f(Step::new(s.motion, amount))
            }),
            Part::Circle { radius, y_factor } => CirclePath::new(radius, y_factor).for_each(&mut f),
        }
    }
}

/// Something that can execute plotter steps.
pub trait Plotter {
    fn execute(&mut self, step: Step);

    /// Unit conversion for table figures.
    fn table_scale(&self) -> TableScale {
        TableScale::Unit
    }

    fn run(&mut self, parts: &[Part]) {
        let scale = self.table_scale();
        for_each_step(parts, scale, |s| self.execute(s));
    }
}

const PI: f32 = core::f32::consts::PI;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CircleStage {
    Approach,
    PenDown,
    Sweep,
    PenUp,
    Done,
}

/// Parametric circle as a sequence of single-axis draw steps.
///
/// The pen travels right by the radius, drops, and then follows one-degree
/// increments; each increment becomes at most one horizontal and one
/// vertical move of the rounded delta. `y_factor` compensates for axes with
/// different steps per millimetre.
pub struct CirclePath {
    radius: f32,
    y_factor: f32,
    stage: CircleStage,
    degree: u16,
    prev: (f32, f32),
    pending: Option<Step>,
}

impl CirclePath {
    pub fn new(radius: u16, y_factor: f32) -> Self {
        Self {
            radius: radius as f32,
            y_factor,
            stage: CircleStage::Approach,
            degree: 1,
            prev: (radius as f32, 0.0),
            pending: None,
        }
    }

    fn point(&self, degree: u16) -> (f32, f32) {
        let rad = degree as f32 * (PI / 180.0);
        (self.radius * rad.cos(), self.radius * rad.sin() * self.y_factor)
    }
}

impl Iterator for CirclePath {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if let Some(step) = self.pending.take() {
            return Some(step);
        }
        loop {
            match self.stage {
                CircleStage::Approach => {
                    self.stage = CircleStage::PenDown;
                    if self.radius >= 1.0 {
                        return Some(Step::travel(Direction::Right, self.radius as u16));
                    }
                }
                CircleStage::PenDown => {
                    self.stage = CircleStage::Sweep;
                    return Some(Step::new(Motion::PenDown, 0));
                }
                CircleStage::Sweep => {
                    if self.degree > 360 {
                        self.stage = CircleStage::PenUp;
                        continue;
                    }
                    let (x, y) = self.point(self.degree);
                    let dx = (x - self.prev.0).round() as i16;
                    let dy = (y - self.prev.1).round() as i16;
                    self.prev = (x, y);
                    self.degree += 1;

                    let horizontal = match dx {
                        0 => None,
                        d if d > 0 => Some(Step::draw(Direction::Right, d as u16)),
                        d => Some(Step::draw(Direction::Left, d.unsigned_abs())),
                    };
                    let vertical = match dy {
                        0 => None,
                        d if d > 0 => Some(Step::draw(Direction::Up, d as u16)),
                        d => Some(Step::draw(Direction::Down, d.unsigned_abs())),
                    };
                    match (horizontal, vertical) {
                        (Some(h), v) => {
                            self.pending = v;
                            return Some(h);
                        }
                        (None, Some(v)) => return Some(v),
                        (None, None) => continue,
                    }
                }
                CircleStage::PenUp => {
                    self.stage = CircleStage::Done;
                    return Some(Step::new(Motion::PenUp, 0));
                }
                CircleStage::Done => return None,
            }
        }
    }
}

/// PORTD patterns of the timed plotter.
pub mod timed {
    use super::{Direction, Motion};

    /// PD2..PD7 are outputs; PD0/PD1 stay with the UART.
    pub const DDR: u8 = 0xFC;

    const PEN_DOWN: u8 = 1 << 2;
    const PEN_UP: u8 = 1 << 3;
    const DOWN: u8 = 1 << 4;
    const UP: u8 = 1 << 5;
    const RIGHT: u8 = 1 << 6;
    const LEFT: u8 = 1 << 7;

    /// Solenoid settle time after every pen change.
    pub const PEN_SETTLE_MS: u16 = 250;

    const fn direction_bits(dir: Direction) -> u8 {
        match dir {
            Direction::Up => UP,
            Direction::Down => DOWN,
            Direction::Left => LEFT,
            Direction::Right => RIGHT,
            Direction::UpRight => UP | RIGHT,
            Direction::DownRight => DOWN | RIGHT,
            Direction::DownLeft => DOWN | LEFT,
            Direction::UpLeft => UP | LEFT,
        }
    }

    /// PORTD value held for the duration of a motion.
    pub const fn pattern(motion: Motion) -> u8 {
        match motion {
            Motion::PenDown => PEN_DOWN,
            Motion::PenUp => PEN_UP,
            Motion::Draw(dir) => direction_bits(dir) | PEN_DOWN,
            Motion::Travel(dir) => direction_bits(dir),
        }
    }

    /// Total hold time of a step in milliseconds.
    pub const fn hold_ms(motion: Motion, amount: u16) -> u32 {
        match motion {
            Motion::PenDown | Motion::PenUp => PEN_SETTLE_MS as u32 + amount as u32,
            _ => amount as u32,
        }
    }
}

/// Axis wiring of the stepper plotter.
pub mod stepper {
    use super::Direction;

    /// Settle time after lowering the solenoid.
    pub const PEN_DOWN_SETTLE_MS: u16 = 30;

    /// PORTB: X axis.
    pub const CLK_X: u8 = 1 << 3;
    pub const DIR_X: u8 = 1 << 4;
    pub const EN_X: u8 = 1 << 5;
    /// PORTC: solenoid and Y axis.
    pub const SOLENOID: u8 = 1 << 0;
    pub const CLK_Y: u8 = 1 << 3;
    pub const DIR_Y: u8 = 1 << 4;
    pub const EN_Y: u8 = 1 << 5;

    /// Axes a direction moves: `Some(true)` = right / down.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct AxisMove {
        pub x: Option<bool>,
        pub y: Option<bool>,
    }

    pub const fn axes(dir: Direction) -> AxisMove {
        let (dx, dy) = dir.delta();
        AxisMove {
            x: if dx == 0 { None } else { Some(dx > 0) },
            y: if dy == 0 { None } else { Some(dy > 0) },
        }
    }
}

/// Menu selection of the timed plotter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Choice {
    Triangle,
    Circle,
    Cross,
    All,
    Fox,
    Flower,
}

pub const MENU: &str = "\r\nSeleccione: 1 = Triangulo, 2 = Circulo, 3 = Cruz, 4 = Todas las figuras, Z = Zorro, F = Flor\r\n";
pub const INVALID_CHOICE: &str = "\r\n¡Error! Opción inválida\r\n";

impl Choice {
    pub const fn from_byte(byte: u8) -> Option<Choice> {
        match byte {
            b'1' => Some(Choice::Triangle),
            b'2' => Some(Choice::Circle),
            b'3' => Some(Choice::Cross),
            b'4' => Some(Choice::All),
            b'Z' => Some(Choice::Fox),
            b'F' => Some(Choice::Flower),
            _ => None,
        }
    }

    /// Program drawn by the timed plotter for this choice.
    pub const fn timed_program(self) -> &'static [Part] {
        match self {
            Choice::Triangle => &[Part::Steps(&TIMED_TRIANGLE)],
            Choice::Circle => &[Part::Table(Table::Circle)],
            Choice::Cross => &[Part::Steps(&TIMED_CROSS)],
            Choice::All => &TIMED_ALL,
            Choice::Fox => &[Part::Table(Table::TimedFox)],
            Choice::Flower => &[Part::Table(Table::TimedFlower)],
        }
    }
}

/// Triangle in milliseconds of motor time.
pub const TIMED_TRIANGLE: [Step; 5] = [
    Step::new(Motion::PenDown, 250),
    Step::draw(Left, 6000),
    Step::draw(DownRight, 3000),
    Step::draw(UpRight, 3000),
    Step::new(Motion::PenUp, 250),
];

pub const TIMED_CROSS: [Step; 7] = [
    Step::travel(Left, 2500),
    Step::draw(Down, 5000),
    Step::new(Motion::PenUp, 250),
    Step::travel(Up, 2500),
    Step::travel(Right, 2500),
    Step::draw(Left, 5000),
    Step::new(Motion::PenUp, 250),
];

const TIMED_GAP_WIDE: [Step; 1] = [Step::travel(Left, 10000)];
const TIMED_GAP: [Step; 1] = [Step::travel(Left, 5000)];

pub const TIMED_ALL: [Part; 5] = [
    Part::Steps(&TIMED_TRIANGLE),
    Part::Steps(&TIMED_GAP_WIDE),
    Part::Table(Table::Circle),
    Part::Steps(&TIMED_GAP),
    Part::Steps(&TIMED_CROSS),
];

/// Triangle in stepper steps.
pub const STEPPER_TRIANGLE: [Step; 4] = [
    Step::new(Motion::PenDown, 0),
    Step::draw(Right, 3000),
    Step::draw(DownLeft, 1500),
    Step::draw(UpLeft, 1500),
];

pub const STEPPER_CROSS: [Step; 5] = [
    Step::new(Motion::PenDown, 0),
    Step::draw(DownRight, 2000),
    Step::travel(Left, 2000),
    Step::new(Motion::PenDown, 0),
    Step::draw(UpRight, 2000),
];

const TO_CROSS: [Step; 1] = [Step::travel(Right, 4000)];
const TO_CIRCLE: [Step; 2] = [Step::travel(Right, 2000), Step::travel(Down, 1000)];
const TO_FOX: [Step; 1] = [Step::travel(Down, 1000)];
const TO_FLOWER: [Step; 2] = [Step::travel(Left, 3000), Step::travel(Up, 1500)];

/// Full sheet drawn by the stepper plotter at power-up.
pub const STEPPER_SHEET: [Part; 9] = [
    Part::Steps(&STEPPER_TRIANGLE),
    Part::Steps(&TO_CROSS),
    Part::Steps(&STEPPER_CROSS),
    Part::Steps(&TO_CIRCLE),
    Part::Circle {
        radius: 1000,
        y_factor: 0.91,
    },
    Part::Steps(&TO_FOX),
    Part::Table(Table::Fox),
    Part::Steps(&TO_FLOWER),
    Part::Table(Table::Flower),
];
