mod commands;
mod output;

use clap::{Parser, Subcommand};
use infestation_core::config::{load_config, ExtractionConfig};
use infestation_core::error::InfestationError;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "infestation",
    version,
    about = "Extract disease incidence statistics from epidemiological report scans"
)]
struct Cli {
    /// JSON file overriding the extraction settings
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log parsing decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reconstructed lines of an OCR response, indented as on the page
    Lines {
        /// Path to the saved OCR response (JSON)
        input_file: PathBuf,

        /// Only print lines that carry statistics
        #[arg(long)]
        stat_only: bool,
    },
    /// Extract statistic records from an OCR response
    Stats {
        /// Path to the saved OCR response (JSON)
        input_file: PathBuf,

        /// Report period as DD.MM.YYYY-DD.MM.YYYY (default: taken from the file name)
        #[arg(short, long, value_name = "START-END")]
        period: Option<String>,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the records to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Repair and parse the table dump of a report (PDF via tabula, or CSV)
    Table {
        /// Path to the report PDF or an existing CSV dump
        input_file: PathBuf,

        /// Path to the tabula-java jar (required for PDF input)
        #[arg(long, value_name = "JAR")]
        tabula_jar: Option<PathBuf>,

        /// Report period as DD.MM.YYYY-DD.MM.YYYY; converts rows to records
        #[arg(short, long, value_name = "START-END")]
        period: Option<String>,

        /// Output format: csv (default), json or table
        #[arg(short, long, default_value = "csv")]
        output: String,

        /// Write the output to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn config(path: Option<&Path>) -> Result<ExtractionConfig, InfestationError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ExtractionConfig::default()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Lines {
            input_file,
            stat_only,
        } => commands::lines::run(&input_file, stat_only, &config),
        Commands::Stats {
            input_file,
            period,
            output,
            out,
        } => commands::stats::run(&input_file, period.as_deref(), &output, out, &config),
        Commands::Table {
            input_file,
            tabula_jar,
            period,
            output,
            out,
        } => commands::table::run(
            &input_file,
            tabula_jar,
            period.as_deref(),
            &output,
            out,
            &config,
        ),
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
