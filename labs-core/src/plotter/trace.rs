//! Dry-run of a plotter program into pen segments.

use super::{Motion, Plotter, Step, TableScale};

/// Pen position in machine units (x right, y down).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    /// Whether the pen touched the paper along this segment.
    pub inked: bool,
}

/// Follows steps like a plotter would and reports every movement.
///
/// Timed plotters lift the pen for travel moves and lower it for draw
/// moves; stepper plotters lift it for travel moves and otherwise leave it
/// where the last pen step put it.
pub struct Tracer<F: FnMut(Segment)> {
    pos: Point,
    pen_down: bool,
    scale: TableScale,
    sink: F,
}

impl<F: FnMut(Segment)> Tracer<F> {
    pub fn new(scale: TableScale, sink: F) -> Self {
        Self {
            pos: Point::default(),
            pen_down: false,
            scale,
            sink,
        }
    }

    pub fn position(&self) -> Point {
        self.pos
    }
}

impl<F: FnMut(Segment)> Plotter for Tracer<F> {
    fn execute(&mut self, step: Step) {
        let (dir, inked) = match step.motion {
            Motion::PenDown => {
                self.pen_down = true;
                return;
            }
            Motion::PenUp => {
                self.pen_down = false;
                return;
            }
            Motion::Travel(dir) => {
                self.pen_down = false;
                (dir, false)
            }
            Motion::Draw(dir) => match self.scale {
                TableScale::Unit => (dir, true),
                TableScale::Stepper => (dir, self.pen_down),
            },
        };
        if step.amount == 0 {
            return;
        }
        let (dx, dy) = dir.delta();
        let from = self.pos;
        let to = Point {
            x: from.x + dx as i32 * step.amount as i32,
            y: from.y + dy as i32 * step.amount as i32,
        };
        self.pos = to;
        (self.sink)(Segment { from, to, inked });
    }

    fn table_scale(&self) -> TableScale {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotter::{Choice, Direction, Part, STEPPER_TRIANGLE};

    #[test]
    fn timed_triangle_closes() {
        let mut segments = Vec::new();
        let mut tracer = Tracer::new(TableScale::Unit, |s| segments.push(s));
        tracer.run(Choice::Triangle.timed_program());
        assert_eq!(tracer.position(), Point { x: 0, y: 0 });
        drop(tracer);
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| s.inked));
        assert_eq!(segments[0].to, Point { x: -6000, y: 0 });
        assert_eq!(segments[1].to, Point { x: -3000, y: 3000 });
    }

    const HOP: [Step; 1] = [Step::travel(Direction::Right, 10)];

    #[test]
    fn stepper_travel_lifts_pen() {
        let mut segments = Vec::new();
        let mut tracer = Tracer::new(TableScale::Stepper, |s| segments.push(s));
        tracer.run(&[
            Part::Steps(&STEPPER_TRIANGLE),
            Part::Steps(&HOP),
        ]);
        tracer.execute(Step::draw(Direction::Right, 5));
        drop(tracer);
        assert_eq!(segments.len(), 5);
        assert!(segments[..3].iter().all(|s| s.inked));
        assert!(!segments[3].inked);
        // Pen stays up after travel until the next pen-down step.
        assert!(!segments[4].inked);
    }
}
