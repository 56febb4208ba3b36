//! Reading the status lines the lab boards print, and talking back to the
//! thermostat.

use labs_core::telemetry::{ParseError, Sample};
use labs_core::thermostat::{MAX_SETPOINT, MIN_SETPOINT};
use std::io::{self, BufRead, Read, Write};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CSV_HEADER: &str = "elapsed_ms,kind,a,b,c,d,e,f,g,h";

/// Text the thermostat prints once it is ready for a new setpoint.
const EDIT_PROMPT: &str = "Ingrese nuevo valor";
const ACCEPTED: &str = "actualizado";
const REJECTED: &str = "fuera de rango";
const PROMPT_TIMEOUT: Duration = Duration::from_secs(2);
const ANSWER_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("unrecognised line {line:?}: {reason:?}")]
    Parse { line: String, reason: ParseError },
    #[error("setpoint {0} is outside 10-50")]
    Range(i32),
    #[error("thermostat did not ask for a value within {0:?}")]
    NoPrompt(Duration),
    #[error("thermostat rejected setpoint {0}")]
    Rejected(i32),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub fn parse_line(line: &str) -> Result<Sample, TelemetryError> {
    Sample::parse(line).map_err(|reason| TelemetryError::Parse {
        line: line.trim_end().to_string(),
        reason,
    })
}

/// One CSV row for a sample, without the trailing newline.
pub fn csv_row(elapsed: Duration, sample: &Sample) -> String {
    let ms = elapsed.as_millis();
    match sample {
        Sample::Thermostat(t) => {
            format!("{ms},thermostat,{},{},{}", t.temp, t.setpoint, t.band.label())
        }
        Sample::Motor(m) => format!(
            "{ms},motor,{},{},{},{}",
            m.reference,
            m.actual,
            m.pwm,
            m.spin.label()
        ),
        Sample::Joystick(j) => format!(
            "{ms},joystick,{},{},{},{},{},{},{},{}",
            j.x,
            j.y,
            j.heading.label(),
            j.color.r,
            j.color.g,
            j.color.b,
            j.cursor.x,
            j.cursor.y
        ),
    }
}

/// Follow a board's output until the stream ends. Report lines are logged
/// and, with `csv`, appended as rows; anything else is echoed.
/// Returns the number of samples seen.
pub fn follow<R: BufRead, W: Write>(
    mut input: R,
    mut csv: Option<W>,
) -> Result<usize, TelemetryError> {
    if let Some(out) = csv.as_mut() {
        writeln!(out, "{CSV_HEADER}")?;
    }
    let start = Instant::now();
    let mut samples = 0;
    let mut line = String::new();
    loop {
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
            Err(e) => return Err(e.into()),
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Ok(sample) => {
                samples += 1;
                info!(?sample, "sample");
                if let Some(out) = csv.as_mut() {
                    writeln!(out, "{}", csv_row(start.elapsed(), &sample))?;
                }
            }
            Err(e) => {
                debug!(error = %e, "not a report line");
                println!("{}", line.trim_end());
            }
        }
    }
    if let Some(out) = csv.as_mut() {
        out.flush()?;
    }
    Ok(samples)
}

/// Read whatever arrives for up to `timeout`, stopping early once the text
/// contains one of `needles`.
fn collect_until<P: Read>(
    port: &mut P,
    needles: &[&str],
    timeout: Duration,
) -> io::Result<String> {
    let deadline = Instant::now() + timeout;
    let mut text = Vec::new();
    let mut buf = [0u8; 64];
    while Instant::now() < deadline {
        match port.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => text.extend_from_slice(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {}
            Err(e) => return Err(e),
        }
        let seen = String::from_utf8_lossy(&text);
        if needles.iter().any(|n| seen.contains(n)) {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&text).into_owned())
}

/// Ask the thermostat for a new setpoint: `x`, wait for its prompt, then
/// the value and a carriage return.
pub fn send_setpoint<P: Read + Write>(port: &mut P, value: i32) -> Result<(), TelemetryError> {
    if !(MIN_SETPOINT..=MAX_SETPOINT).contains(&value) {
        return Err(TelemetryError::Range(value));
    }
    port.write_all(b"x")?;
    port.flush()?;
    let seen = collect_until(port, &[EDIT_PROMPT], PROMPT_TIMEOUT)?;
    if !seen.contains(EDIT_PROMPT) {
        return Err(TelemetryError::NoPrompt(PROMPT_TIMEOUT));
    }

    port.write_all(format!("{value}\r").as_bytes())?;
    port.flush()?;
    let answer = collect_until(port, &[ACCEPTED, REJECTED], ANSWER_TIMEOUT)?;
    if answer.contains(REJECTED) {
        return Err(TelemetryError::Rejected(value));
    }
    if !answer.contains(ACCEPTED) {
        warn!(value, "no confirmation from thermostat");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use labs_core::motor::Spin;
    use labs_core::telemetry::MotorReport;
    use std::io::Cursor;

    const LOG: &str = "=== Control ===\r\n\
        Temp:31C | PM:26 | Todo OFF\r\n\
        \r\n\
        Ref:512 | Act:480 | PWM:91 | Sent:Horario\r\n\
        Temp:zz | PM:26 | Todo OFF\r\n";

    #[test]
    fn follow_counts_and_writes_rows() {
        let mut csv = Vec::new();
        let samples = follow(Cursor::new(LOG), Some(&mut csv)).unwrap();
        assert_eq!(samples, 2);
        let text = String::from_utf8(csv).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].ends_with(",thermostat,31,26,Todo OFF"));
        assert!(lines[2].ends_with(",motor,512,480,91,Horario"));
    }

    #[test]
    fn follow_without_csv() {
        assert_eq!(follow(Cursor::new(LOG), None::<Vec<u8>>).unwrap(), 2);
    }

    #[test]
    fn parse_errors_keep_the_line() {
        match parse_line("Temp:zz | PM:26 | Todo OFF\r\n") {
            Err(TelemetryError::Parse { line, .. }) => {
                assert_eq!(line, "Temp:zz | PM:26 | Todo OFF")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn csv_motor_row() {
        let sample = Sample::Motor(MotorReport {
            reference: 1,
            actual: 2,
            pwm: 80,
            spin: Spin::Stopped,
        });
        assert_eq!(
            csv_row(Duration::from_millis(1500), &sample),
            "1500,motor,1,2,80,Detenido"
        );
    }

    /// Queues the next scripted reply after every write.
    struct Thermostat {
        sent: Vec<u8>,
        replies: Vec<&'static str>,
        pending: Vec<u8>,
    }

    impl Read for Thermostat {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pending.is_empty() {
                return Err(io::Error::new(io::ErrorKind::TimedOut, "idle"));
            }
            let n = buf.len().min(self.pending.len());
            buf[..n].copy_from_slice(&self.pending[..n]);
            self.pending.drain(..n);
            Ok(n)
        }
    }

    impl Write for Thermostat {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.sent.extend_from_slice(buf);
            if !self.replies.is_empty() {
                let reply = self.replies.remove(0);
                self.pending.extend_from_slice(reply.as_bytes());
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn thermostat(replies: Vec<&'static str>) -> Thermostat {
        Thermostat {
            sent: Vec::new(),
            replies,
            pending: Vec::new(),
        }
    }

    #[test]
    fn setpoint_exchange() {
        let mut port = thermostat(vec![
            "\r\n>> Ajuste de punto medio activado\r\nIngrese nuevo valor (10–50): ",
            "30\r\nPunto medio actualizado correctamente\r\n",
        ]);
        send_setpoint(&mut port, 30).unwrap();
        assert_eq!(port.sent, b"x30\r");
    }

    #[test]
    fn setpoint_rejected_by_board() {
        let mut port = thermostat(vec![
            "Ingrese nuevo valor (10–50): ",
            "\r\nValor fuera de rango (10–50)\r\n",
        ]);
        assert!(matches!(
            send_setpoint(&mut port, 20),
            Err(TelemetryError::Rejected(20))
        ));
    }

    #[test]
    fn setpoint_range_checked_locally() {
        let mut port = thermostat(vec![]);
        assert!(matches!(
            send_setpoint(&mut port, 51),
            Err(TelemetryError::Range(51))
        ));
        assert!(port.sent.is_empty());
    }
}
