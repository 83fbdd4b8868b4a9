//! # pclps CLI
//!
//! Command-line filter converting PCL to PostScript.
//!
//! ## Usage
//!
//! ```bash
//! # Convert a file
//! pclps job.pcl -o job.ps
//!
//! # Use as a pipe filter with A4 defaults
//! pclps --paper a4 < job.pcl > job.ps
//!
//! # Trace every command as JSON on stderr
//! pclps --trace-json job.pcl > /dev/null
//!
//! # Debug logging
//! pclps -v job.pcl -o job.ps
//! ```

use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use pclps::{
    CoreError, JobConfig, convert,
    events::{EventSink, JsonLinesSink, LogSink},
};

/// pclps - PCL to PostScript filter
#[derive(Parser, Debug)]
#[command(name = "pclps")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PCL input file (reads stdin if omitted)
    input: Option<PathBuf>,

    /// PostScript output file (writes stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Job defaults preset
    #[arg(long, default_value = "letter", value_parser = parse_paper)]
    paper: JobConfig,

    /// Write one JSON record per command to stderr
    #[arg(long)]
    trace_json: bool,

    /// Log every command at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn parse_paper(name: &str) -> Result<JobConfig, String> {
    JobConfig::by_name(name).ok_or_else(|| {
        format!(
            "unknown paper '{}', expected one of: {}",
            name,
            JobConfig::list_presets().join(", ")
        )
    })
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CoreError> {
    let input: Box<dyn Read> = match &cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let sink: Box<dyn EventSink> = if cli.trace_json {
        Box::new(JsonLinesSink::new(io::stderr()))
    } else {
        Box::new(LogSink)
    };

    convert(input, output, cli.paper, sink)?;
    Ok(())
}
