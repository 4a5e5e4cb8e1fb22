//! Process command - extract records from a single report.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use shiprep_core::pipeline::extract_from_path;

use super::{load_config, Outcome};
use crate::output::{format_records, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input report (PDF, or a pre-extracted .txt dump)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from the output file extension, else table)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Show block statistics after the records
    #[arg(long)]
    stats: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<Outcome> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.pretty {
        config.output.pretty_json = true;
    }

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let format = OutputFormat::resolve(args.format, args.output.as_deref());
    if format.is_binary() && args.output.is_none() {
        anyhow::bail!(
            "{} output must go to a file, pass -o <path>.{}",
            format.extension(),
            format.extension()
        );
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Reading report...");

    let result = extract_from_path(&args.input, &config);
    pb.finish_and_clear();
    let result = result?;

    if result.is_empty() {
        eprintln!(
            "{} No shipment records found in {}",
            style("!").yellow(),
            args.input.display()
        );
        return Ok(Outcome::NoRecords);
    }

    let color = args.output.is_none() && console::colors_enabled();
    let output = format_records(&result.records, format, &config.output, color)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            result.records.len(),
            output_path.display()
        );
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&output)?;
        if !output.ends_with(b"\n") {
            stdout.write_all(b"\n")?;
        }
    }

    if args.stats {
        eprintln!(
            "{} {} lines, {} blocks, {} skipped, {} void",
            style("ℹ").blue(),
            result.lines_read,
            result.blocks_found,
            result.blocks_skipped,
            result.void_count()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(Outcome::Success)
}
