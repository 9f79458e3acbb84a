use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use zipmd::config::DEFAULT_PYTHON;
use zipmd::scratch::{DEFAULT_MAX_ENTRY_SIZE, DEFAULT_MAX_TOTAL_SIZE};
use zipmd::{process_archive, MergeOptions, MergeReport};

/// Extract text files from a zip and merge them into one markdown file
#[derive(Parser, Debug)]
#[command(name = "zipmd", version, about)]
struct Cli {
    /// Path to the zip file
    archive: PathBuf,

    /// Where to write the merged document [default: <ARCHIVE>.md]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not run pandoc or jupytext; read every file as text
    #[arg(long)]
    no_convert: bool,

    /// Python interpreter used to run jupytext
    #[arg(long, env = "ZIPMD_PYTHON", default_value = DEFAULT_PYTHON)]
    python: String,

    /// Largest uncompressed entry to extract, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_ENTRY_SIZE)]
    max_entry_size: u64,

    /// Largest total uncompressed size to extract, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_TOTAL_SIZE)]
    max_total_size: u64,

    /// Directory to unpack into [default: system temp dir]
    #[arg(long, env = "ZIPMD_SCRATCH_DIR")]
    scratch_dir: Option<PathBuf>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }

    fn options(&self) -> MergeOptions {
        let mut options = MergeOptions::new()
            .convert(!self.no_convert)
            .python(self.python.clone())
            .max_entry_size(self.max_entry_size)
            .max_total_size(self.max_total_size);
        if let Some(output) = &self.output {
            options = options.output(output);
        }
        if let Some(dir) = &self.scratch_dir {
            options = options.scratch_dir(dir);
        }
        options
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let report = process_archive(&cli.archive, &cli.options())?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_summary(&report);
    }

    Ok(())
}

fn print_summary(report: &MergeReport) {
    tracing::info!(
        extracted = report.extracted,
        converted = report.converted,
        text = report.text,
        skipped = report.skipped,
        rejected = report.rejected,
        "Merge finished"
    );
    println!("Done! Output saved to {}", report.output.display());
}
