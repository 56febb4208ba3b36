mod convert;
mod hex;
mod monitor;
mod preview;
mod stk500;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::{self, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_PORT: &str = "/dev/ttyUSB0";
/// Optiboot on a 16 MHz board.
const BOOTLOADER_BAUD: u32 = 115_200;
const LAB_BAUD: u32 = 9600;
const READ_TIMEOUT: Duration = Duration::from_millis(500);
/// Opening the port resets the board; wait for its banner before talking.
const BOOT_WAIT: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "labs-cli")]
#[command(about = "Flash, monitor and prepare figures for the ATmega328P labs")]
struct Cli {
    /// Log protocol details.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Program an Intel HEX file through the Optiboot bootloader
    Flash {
        /// Path to the Intel HEX firmware file
        firmware: PathBuf,
        #[arg(short, long, env = "LABS_PORT", default_value = DEFAULT_PORT)]
        port: String,
        #[arg(short, long, default_value_t = BOOTLOADER_BAUD)]
        baud: u32,
    },
    /// List serial ports
    Detect,
    /// Extract PLOTTER_* calls from C source into a figure table
    Convert {
        source: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Table name; defaults to the source file name in capitals
        #[arg(long)]
        name: Option<String>,
    },
    /// Render a built-in figure as SVG
    Preview {
        #[arg(value_enum)]
        figure: preview::Figure,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pixels per plotter unit
        #[arg(long, default_value_t = 0.05)]
        scale: f64,
    },
    /// Print and record the status lines of a running lab
    Monitor {
        #[arg(short, long, env = "LABS_PORT", default_value = DEFAULT_PORT)]
        port: String,
        #[arg(short, long, default_value_t = LAB_BAUD)]
        baud: u32,
        /// Append parsed samples to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Change the thermostat setpoint (10-50)
    Setpoint {
        value: i32,
        #[arg(short, long, env = "LABS_PORT", default_value = DEFAULT_PORT)]
        port: String,
    },
}

fn open(port: &str, baud: u32) -> Result<Box<dyn serialport::SerialPort>> {
    serialport::new(port, baud)
        .timeout(READ_TIMEOUT)
        .open()
        .with_context(|| format!("opening serial port {port}"))
}

/// Pulse DTR/RTS so the auto-reset circuit starts the bootloader.
fn reset_into_bootloader(port: &mut dyn serialport::SerialPort) -> Result<()> {
    port.write_data_terminal_ready(false).context("clearing DTR")?;
    port.write_request_to_send(false).context("clearing RTS")?;
    thread::sleep(Duration::from_millis(250));
    port.write_data_terminal_ready(true).context("setting DTR")?;
    port.write_request_to_send(true).context("setting RTS")?;
    thread::sleep(Duration::from_millis(50));
    port.clear(serialport::ClearBuffer::Input)
        .context("clearing input buffer")?;
    Ok(())
}

fn run_flash(firmware: &Path, port: &str, baud: u32) -> Result<()> {
    let contents = fs::read_to_string(firmware)
        .with_context(|| format!("reading {}", firmware.display()))?;
    let segments = hex::parse(&contents).context("parsing Intel HEX file")?;
    let (base, data) = hex::flatten(&segments).context("flattening HEX segments")?;
    println!(
        "Firmware: {} bytes at base address 0x{:04X}",
        data.len(),
        base
    );

    let mut serial = open(port, baud)?;
    reset_into_bootloader(serial.as_mut())?;
    let mut programmer = stk500::Programmer::new(serial);
    programmer
        .flash(base, &data)
        .with_context(|| format!("programming through {port}"))?;
    println!("Done. The board restarts into the new firmware.");
    Ok(())
}

fn run_detect() -> Result<()> {
    let ports = serialport::available_ports().context("listing serial ports")?;
    if ports.is_empty() {
        println!("No serial ports found. Is the board plugged in?");
    }
    for p in ports {
        match p.port_type {
            serialport::SerialPortType::UsbPort(usb) => println!(
                "{}  USB {:04x}:{:04x} {}",
                p.port_name,
                usb.vid,
                usb.pid,
                usb.product.unwrap_or_default()
            ),
            _ => println!("{}", p.port_name),
        }
    }
    Ok(())
}

fn run_convert(source: &Path, output: Option<PathBuf>, name: Option<String>) -> Result<()> {
    let text = fs::read_to_string(source)
        .with_context(|| format!("reading {}", source.display()))?;
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "figure".into());
    let name = name.unwrap_or_else(|| stem.to_uppercase().replace(['-', ' ', '.'], "_"));
    let output = output.unwrap_or_else(|| source.with_extension("rs"));

    let (steps, unknown) = convert::extract(&text)?;
    for call in &unknown {
        warn!(call = %call, "unknown direction, skipped");
    }
    let table = convert::render(&name, &steps)?;
    fs::write(&output, table).with_context(|| format!("writing {}", output.display()))?;
    println!("{} steps generated -> {}", steps.len(), output.display());
    Ok(())
}

fn run_preview(figure: preview::Figure, output: Option<PathBuf>, scale: f64) -> Result<()> {
    if scale <= 0.0 {
        bail!("scale must be positive");
    }
    let segments = preview::trace(figure);
    let svg = preview::render_svg(&segments, scale);
    let output = output.unwrap_or_else(|| {
        PathBuf::from(format!("{}.svg", format!("{figure:?}").to_lowercase()))
    });
    fs::write(&output, svg).with_context(|| format!("writing {}", output.display()))?;
    println!("{} segments -> {}", segments.len(), output.display());
    Ok(())
}

fn run_monitor(port: &str, baud: u32, csv: Option<PathBuf>) -> Result<()> {
    let serial = open(port, baud)?;
    let csv = match csv {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening {}", path.display()))?,
        ),
        None => None,
    };
    info!(port, baud, "monitoring, Ctrl-C to stop");
    let samples = monitor::follow(BufReader::new(serial), csv)?;
    info!(samples, "port closed");
    Ok(())
}

fn run_setpoint(value: i32, port: &str) -> Result<()> {
    let mut serial = open(port, LAB_BAUD)?;
    thread::sleep(BOOT_WAIT);
    serial
        .clear(serialport::ClearBuffer::Input)
        .context("clearing input buffer")?;
    monitor::send_setpoint(&mut serial, value)?;
    println!("Setpoint {value} sent.");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Command::Flash {
            firmware,
            port,
            baud,
        } => run_flash(&firmware, &port, baud),
        Command::Detect => run_detect(),
        Command::Convert {
            source,
            output,
            name,
        } => run_convert(&source, output, name),
        Command::Preview {
            figure,
            output,
            scale,
        } => run_preview(figure, output, scale),
        Command::Monitor { port, baud, csv } => run_monitor(&port, baud, csv),
        Command::Setpoint { value, port } => run_setpoint(value, &port),
    }
}
