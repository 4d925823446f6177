//! gf1patch - extract raw PCM from Gravis Ultrasound patch files

use anyhow::Context;
use clap::{CommandFactory, Parser};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use gf1patch::export::{export_samples, ExportConfig, ExportFormat, DEFAULT_PREFIX};
use gf1patch::{HeaderInfo, PatchError, SampleInfo, SampleObserver, TracingObserver};

#[derive(Parser)]
#[command(name = "gf1patch")]
#[command(about = "Converts Gravis .PAT files to raw PCM data.")]
#[command(version)]
struct Cli {
    /// Path to a Gravis .PAT file.
    filename: Option<PathBuf>,

    /// Directory for the extracted samples
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// File name prefix, followed by the sample index
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Write WAV files instead of raw PCM
    #[cfg(feature = "export-wav")]
    #[arg(long)]
    wav: bool,

    /// Print the decoded header and sample metadata as JSON
    #[arg(long)]
    info: bool,

    /// Pretty print JSON output
    #[arg(long, requires = "info")]
    pretty: bool,

    /// Log every decoded sample record
    #[arg(short, long)]
    verbose: bool,
}

/// Header and per-sample metadata gathered while decoding
#[derive(Default, Serialize)]
struct PatchMetadata {
    header: Option<HeaderInfo>,
    samples: Vec<SampleInfo>,
}

impl SampleObserver for PatchMetadata {
    fn on_header(&mut self, header: &HeaderInfo) {
        self.header = Some(*header);
    }

    fn on_sample(&mut self, _index: usize, info: &SampleInfo) {
        self.samples.push(*info);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn export_config(cli: &Cli) -> ExportConfig {
    #[cfg(feature = "export-wav")]
    let config = if cli.wav {
        ExportConfig::wav()
    } else {
        ExportConfig::default()
    };
    #[cfg(not(feature = "export-wav"))]
    let config = ExportConfig::default();

    config
        .output_dir(cli.output_dir.clone())
        .prefix(cli.prefix.clone())
}

fn run(cli: &Cli, filename: &Path) -> anyhow::Result<()> {
    let mut observer = (TracingObserver, PatchMetadata::default());
    // Decoding finishes before any file is written
    let samples = gf1patch::read_with_observer(filename, &mut observer)?;
    let (_, metadata) = observer;

    if cli.info {
        let json = if cli.pretty {
            serde_json::to_string_pretty(&metadata)
        } else {
            serde_json::to_string(&metadata)
        }
        .context("Failed to serialize patch metadata")?;
        println!("{json}");
    }

    let config = export_config(cli);
    let kind = match config.format {
        ExportFormat::Raw => "raw PCM",
        #[cfg(feature = "export-wav")]
        ExportFormat::Wav => "WAV",
    };
    // Every sample is validated before the first file is created
    for path in export_samples(&samples, &metadata.samples, &config)? {
        println!("Wrote {} data to {}.", kind, path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Some(filename) = cli.filename.clone() else {
        return match Cli::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: {err}");
                ExitCode::FAILURE
            }
        };
    };

    init_logging(cli.verbose);

    match run(&cli, &filename) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error: {err}");
            let code = err
                .downcast_ref::<PatchError>()
                .map(PatchError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}
