//! SVG rendering of the built-in plotter figures.
//! Inked segments are solid strokes, pen-up moves are dashed.

use clap::ValueEnum;
use labs_core::plotter::{Choice, Part, Plotter, Segment, TableScale, Tracer, STEPPER_SHEET};

/// Margin around the drawing, in SVG pixels.
const MARGIN: f64 = 20.0;
const INK: &str = "#1a1a2e";
const TRAVEL: &str = "#e94560";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Figure {
    Triangle,
    Circle,
    Cross,
    All,
    Fox,
    Flower,
    /// Everything the stepper plotter draws at power-up.
    Sheet,
}

impl Figure {
    fn program(self) -> (&'static [Part], TableScale) {
        let choice = match self {
            Figure::Sheet => return (&STEPPER_SHEET, TableScale::Stepper),
            Figure::Triangle => Choice::Triangle,
            Figure::Circle => Choice::Circle,
            Figure::Cross => Choice::Cross,
            Figure::All => Choice::All,
            Figure::Fox => Choice::Fox,
            Figure::Flower => Choice::Flower,
        };
        (choice.timed_program(), TableScale::Unit)
    }
}

/// Every pen movement of a figure, in plotter units.
pub fn trace(figure: Figure) -> Vec<Segment> {
    let (program, scale) = figure.program();
    let mut segments = Vec::new();
    Tracer::new(scale, |s| segments.push(s)).run(program);
    segments
}

/// Bounding box of all segment endpoints: (min_x, min_y, max_x, max_y).
fn bounds(segments: &[Segment]) -> (i32, i32, i32, i32) {
    segments
        .iter()
        .flat_map(|s| [s.from, s.to])
        .fold((0, 0, 0, 0), |(x0, y0, x1, y1), p| {
            (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))
        })
}

/// Render segments as a standalone SVG document. `scale` is pixels per
/// plotter unit.
pub fn render_svg(segments: &[Segment], scale: f64) -> String {
    let (x0, y0, x1, y1) = bounds(segments);
    let width = (x1 - x0) as f64 * scale + 2.0 * MARGIN;
    let height = (y1 - y0) as f64 * scale + 2.0 * MARGIN;
    let px = |v: i32, origin: i32| (v - origin) as f64 * scale + MARGIN;

    let mut svg = format!(
        r##"<svg width="{width:.1}" height="{height:.1}" xmlns="http://www.w3.org/2000/svg">
<rect width="100%" height="100%" fill="#fdfdf8"/>
"##
    );
    for s in segments {
        let style = if s.inked {
            format!(r#"stroke="{INK}" stroke-width="2""#)
        } else {
            format!(r#"stroke="{TRAVEL}" stroke-width="1" stroke-dasharray="4 3""#)
        };
        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" {style}/>"#,
            px(s.from.x, x0),
            px(s.from.y, y0),
            px(s.to.x, x0),
            px(s.to.y, y0),
        ));
        svg.push('\n');
    }
    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use labs_core::plotter::Point;

    #[test]
    fn triangle_trace() {
        let segments = trace(Figure::Triangle);
        assert_eq!(segments.len(), 3);
        assert_eq!(bounds(&segments), (-6000, 0, 0, 3000));
    }

    #[test]
    fn cross_has_travel_moves() {
        let segments = trace(Figure::Cross);
        assert!(segments.iter().any(|s| s.inked));
        assert!(segments.iter().any(|s| !s.inked));
    }

    #[test]
    fn sheet_uses_stepper_scale() {
        let segments = trace(Figure::Sheet);
        assert!(!segments.is_empty());
        // The triangle leads the sheet, drawn at full step counts.
        assert_eq!(
            segments[0].to,
            Point {
                x: 3000,
                y: 0
            }
        );
    }

    #[test]
    fn svg_places_lines_inside_margin() {
        let segments = trace(Figure::Triangle);
        let svg = render_svg(&segments, 0.1);
        assert!(svg.starts_with(r#"<svg width="640.0" height="340.0""#));
        assert_eq!(svg.matches("<line ").count(), 3);
        assert!(svg.contains(r#"<line x1="620.0" y1="20.0" x2="20.0" y2="20.0""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn empty_drawing_is_just_the_margin() {
        let svg = render_svg(&[], 1.0);
        assert!(svg.starts_with(r#"<svg width="40.0" height="40.0""#));
        assert!(!svg.contains("<line"));
    }
}
