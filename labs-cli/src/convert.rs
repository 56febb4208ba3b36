//! Turn hand-written plotter C code into a figure table.
//!
//! Each line of the form `PLOTTER_<MOVE>(); _delay_ms(<ms>);` becomes one
//! step. Lines without that shape are skipped silently; unknown moves are
//! skipped with a warning.

use labs_core::plotter::{Direction, Motion, Step};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("line {line}: delay {value} does not fit in a step amount")]
    Amount { line: usize, value: String },
    #[error("`{0}` is not a valid table name (use A-Z, 0-9 and _)")]
    Name(String),
    #[error("no plotter steps found")]
    Empty,
}

const STEPS_PER_LINE: usize = 10;

/// Motion for a `PLOTTER_*` function name.
pub fn motion(call: &str) -> Option<Motion> {
    let name = call.strip_prefix("PLOTTER_")?;
    let (name, travel) = match name.strip_suffix("_NO_BAJAR") {
        Some(base) => (base, true),
        None => (name, false),
    };
    let dir = match name {
        "SUBIR" if !travel => return Some(Motion::PenUp),
        "BAJAR" if !travel => return Some(Motion::PenDown),
        "DERECHA" => Direction::Right,
        "IZQUIERDA" => Direction::Left,
        "ARRIBA" => Direction::Up,
        "ABAJO" => Direction::Down,
        _ => return None,
    };
    Some(if travel {
        Motion::Travel(dir)
    } else {
        Motion::Draw(dir)
    })
}

/// A `PLOTTER_*` call and its delay argument, if the line has both.
fn split_call(line: &str) -> Option<(&str, &str)> {
    let start = line.find("PLOTTER_")?;
    let rest = &line[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_uppercase() || c == '_'))
        .unwrap_or(rest.len());
    let call = &rest[..end];

    let after = &rest[end..];
    let open = after.find("_delay_ms(")? + "_delay_ms(".len();
    let digits = &after[open..];
    let len = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if len == 0 || !digits[len..].starts_with(')') {
        return None;
    }
    Some((call, &digits[..len]))
}

/// Steps found in `source`, in order, and the names of unknown calls.
pub fn extract(source: &str) -> Result<(Vec<Step>, Vec<String>), ConvertError> {
    let mut steps = Vec::new();
    let mut unknown = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let Some((call, delay)) = split_call(line) else {
            continue;
        };
        let Some(motion) = motion(call) else {
            unknown.push(call.to_string());
            continue;
        };
        let amount = delay.parse::<u16>().map_err(|_| ConvertError::Amount {
            line: index + 1,
            value: delay.to_string(),
        })?;
        steps.push(Step::new(motion, amount));
    }
    Ok((steps, unknown))
}

fn valid_name(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Render steps as a `progmem!` figure table named `name`.
pub fn render(name: &str, steps: &[Step]) -> Result<String, ConvertError> {
    if !valid_name(name) {
        return Err(ConvertError::Name(name.to_string()));
    }
    if steps.is_empty() {
        return Err(ConvertError::Empty);
    }

    let mut out = format!("pub const {name}_LEN: usize = {};\n\n", steps.len());
    out.push_str("progmem! {\n");
    out.push_str(&format!(
        "    pub static progmem {name}: [Step; {name}_LEN] = figure![\n"
    ));
    for line in steps.chunks(STEPS_PER_LINE) {
        let entries: Vec<String> = line
            .iter()
            .filter_map(|s| {
                s.motion
                    .code()
                    .map(|c| format!("{} {}", c as char, s.amount))
            })
            .collect();
        out.push_str(&format!("        {},\n", entries.join(", ")));
    }
    out.push_str("    ];\n}\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "\
void FIGURA(void){
\tPLOTTER_BAJAR(); _delay_ms(250); // baja
\tPLOTTER_IZQUIERDA(); _delay_ms(6000);
\tPLOTTER_ABAJO_DERECHA(); _delay_ms(3000);
\tPLOTTER_DERECHA_NO_BAJAR(); _delay_ms(2500);
\tPLOTTER_SUBIR(); _delay_ms(250);
\t_delay_ms(100);
}
";

    #[test]
    fn names_map_to_motions() {
        assert_eq!(motion("PLOTTER_DERECHA"), Some(Motion::Draw(Direction::Right)));
        assert_eq!(
            motion("PLOTTER_ARRIBA_NO_BAJAR"),
            Some(Motion::Travel(Direction::Up))
        );
        assert_eq!(motion("PLOTTER_SUBIR"), Some(Motion::PenUp));
        assert_eq!(motion("PLOTTER_BAJAR"), Some(Motion::PenDown));
        assert_eq!(motion("PLOTTER_SUBIR_NO_BAJAR"), None);
        assert_eq!(motion("PLOTTER_ABAJO_DERECHA"), None);
        assert_eq!(motion("DERECHA"), None);
    }

    #[test]
    fn extracts_known_calls_and_reports_unknown() {
        let (steps, unknown) = extract(SOURCE).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::new(Motion::PenDown, 250),
                Step::draw(Direction::Left, 6000),
                Step::travel(Direction::Right, 2500),
                Step::new(Motion::PenUp, 250),
            ]
        );
        assert_eq!(unknown, vec!["PLOTTER_ABAJO_DERECHA".to_string()]);
    }

    #[test]
    fn skips_declarations_and_bare_delays() {
        let source = "void PLOTTER_DERECHA(void){ PORTD = 0x44; }\n_delay_ms(5);\n";
        let (steps, unknown) = extract(source).unwrap();
        assert!(steps.is_empty());
        assert!(unknown.is_empty());
    }

    #[test]
    fn oversized_delay() {
        let err = extract("PLOTTER_DERECHA(); _delay_ms(70000);\n").unwrap_err();
        assert_eq!(
            err,
            ConvertError::Amount {
                line: 1,
                value: "70000".into()
            }
        );
    }

    #[test]
    fn renders_ten_steps_per_line() {
        let steps: Vec<Step> = (1..=12)
            .map(|i| Step::draw(Direction::Down, i * 100))
            .collect();
        let table = render("STAR", &steps).unwrap();
        assert!(table.starts_with("pub const STAR_LEN: usize = 12;\n"));
        assert!(table.contains("pub static progmem STAR: [Step; STAR_LEN] = figure![\n"));
        assert!(table.contains(
            "        A 100, A 200, A 300, A 400, A 500, A 600, A 700, A 800, A 900, A 1000,\n"
        ));
        assert!(table.contains("        A 1100, A 1200,\n    ];\n}\n"));
    }

    #[test]
    fn render_checks_input() {
        let steps = [Step::new(Motion::PenDown, 250)];
        assert_eq!(
            render("star", &steps),
            Err(ConvertError::Name("star".into()))
        );
        assert_eq!(render("STAR", &[]), Err(ConvertError::Empty));
    }
}
