use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use aircode::{
    perfectaire::{encode, encode_checked, DeviceCapabilities, Intent, Timing},
    smartir::gen_smartir,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Perfect Aire IR command encoder")]
struct Args {
    /// Device capability file (JSON) replacing the built-in Perfect Aire descriptor
    #[arg(long, global = true)]
    device: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encode a single state into packets
    Encode {
        #[arg(long)]
        mode: String,
        #[arg(long, default_value = "auto")]
        fan: String,
        #[arg(long, default_value = "on")]
        swing: String,
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        #[arg(long)]
        turbo: bool,
        #[arg(long)]
        self_cleaning: bool,
        /// Reject values the device doesn't declare instead of falling back to defaults
        #[arg(long)]
        strict: bool,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Print a SmartIR code file covering every declared state
    Codes,

    /// Print the device capability descriptor
    Capabilities,

    /// Print the timing descriptor sent with every command
    Timing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Hex,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let capabilities = match &args.device {
        Some(path) => load_capabilities(path)?,
        None => DeviceCapabilities::perfect_aire(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Cmd::Encode {
            mode,
            fan,
            swing,
            temperature,
            turbo,
            self_cleaning,
            strict,
            format,
        } => {
            let command = if strict {
                let intent = Intent::parse(&mode, &swing, &fan, temperature, turbo, self_cleaning)?;
                encode_checked(&capabilities, &intent)?
            } else {
                let intent =
                    Intent::parse_lenient(&mode, &swing, &fan, temperature, turbo, self_cleaning)?;
                encode(&intent)
            };

            match format {
                Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&command)?)?,
                Format::Hex => {
                    for packet in &command.packets {
                        writeln!(out, "{}", packet)?;
                    }
                }
            }
        }
        Cmd::Codes => {
            let code_file = gen_smartir(&capabilities)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&code_file)?)?;
        }
        Cmd::Capabilities => {
            writeln!(out, "{}", serde_json::to_string_pretty(&capabilities)?)?;
        }
        Cmd::Timing => {
            let timing = Timing::NEC;
            writeln!(out, "{}", timing)?;
            writeln!(out, "{:#?}", timing)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn load_capabilities(path: &Path) -> Result<DeviceCapabilities> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read device file {}", path.display()))?;
    let capabilities: DeviceCapabilities = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse device file {}", path.display()))?;
    info!(manufacturer = %capabilities.manufacturer, "loaded device capabilities");
    Ok(capabilities)
}
