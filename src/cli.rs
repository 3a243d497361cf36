//! Command-line interface components.

use crate::config::{ConversionConfig, default_output_path};
use crate::layout::LayoutChoice;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "collision-csv")]
#[command(about = "Convert space-delimited particle collision event logs to CSV")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the collision event log (first line is a header)
    #[arg(value_name = "INPUT")]
    pub input_path: PathBuf,

    /// Output CSV file (defaults to the input path with a .csv extension, or
    /// <stem>.out.csv when the input is already a .csv file)
    #[arg(short, long = "output", value_name = "OUTPUT")]
    pub output_path: Option<PathBuf>,

    /// Column layout: decide from the first data row, or force one
    #[arg(long, value_enum, default_value_t = LayoutChoice::Auto)]
    pub layout: LayoutChoice,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Input path with any surrounding quotes removed
    pub fn input(&self) -> PathBuf {
        sanitize_path(&self.input_path)
    }

    /// Output path, defaulting to the input with a `.csv` extension
    pub fn output(&self) -> PathBuf {
        match &self.output_path {
            Some(path) => sanitize_path(path),
            None => default_output_path(&self.input()),
        }
    }

    pub fn to_config(&self) -> ConversionConfig {
        ConversionConfig::default()
            .with_layout(self.layout)
            .with_progress(!self.no_progress && !self.quiet)
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Strip double quotes left over from paths copied out of a file manager
pub fn sanitize_path(path: &std::path::Path) -> PathBuf {
    let raw = path.to_string_lossy();
    if raw.contains('"') {
        PathBuf::from(raw.replace('"', "").trim())
    } else {
        path.to_path_buf()
    }
}

/// Install the stderr tracing subscriber; `RUST_LOG` overrides the level
pub fn setup_logging(args: &Args) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("collision_csv={}", args.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
