//! Batch processing command for multiple reports.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use shiprep_core::pipeline::extract_from_path;
use shiprep_core::{ExtractionResult, ShipConfig};

use super::{load_config, Outcome};
use crate::output::{format_records, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    extraction: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl BatchResult {
    fn status(&self) -> &'static str {
        match (&self.extraction, &self.error) {
            (_, Some(_)) => "error",
            (Some(e), None) if e.is_empty() => "empty",
            _ => "success",
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<Outcome> {
    let start = Instant::now();

    let config = Arc::new(load_config(config_path)?);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt" | "text")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} reports to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} reports")?
            .progress_chars("=>-"),
    );

    // Each report is parsed independently on the blocking pool; handles are
    // awaited in input order so results line up with `files`.
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for path in files {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let config = Arc::clone(&config);
        let pb = overall_pb.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            let file_start = Instant::now();
            let outcome = extract_from_path(&path, &config);
            drop(permit);
            pb.inc(1);
            (path, outcome, file_start.elapsed().as_millis() as u64)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let (path, outcome, processing_time_ms) = handle.await?;

        match outcome {
            Ok(extraction) => results.push(BatchResult {
                path,
                extraction: Some(extraction),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(BatchResult {
                        path,
                        extraction: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    overall_pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }
    }

    overall_pb.finish_with_message("Complete");

    // Write outputs
    if let Some(output_dir) = &args.output_dir {
        let names = output_names(&results);
        for (result, name) in results.iter().zip(&names) {
            if let Some(extraction) = result.extraction.as_ref().filter(|e| !e.is_empty()) {
                let output_path = output_dir.join(format!("{}.{}", name, args.format.extension()));
                write_report_output(&output_path, extraction, args.format, &config)?;
            }
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = results.iter().filter(|r| r.status() == "success").count();
    let empty = results.iter().filter(|r| r.status() == "empty").count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let total_records: usize = results
        .iter()
        .filter_map(|r| r.extraction.as_ref())
        .map(|e| e.records.len())
        .sum();

    // Print summary
    println!();
    println!(
        "{} Processed {} reports in {:?}, {} records",
        style("✓").green(),
        results.len(),
        start.elapsed(),
        total_records
    );
    println!(
        "   {} with records, {} empty, {} failed",
        style(successful).green(),
        style(empty).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if total_records == 0 {
        Ok(Outcome::NoRecords)
    } else {
        Ok(Outcome::Success)
    }
}

/// Output base name per result: the file stem, or the full file name when
/// two inputs share a stem (`a.pdf` and `a.txt`).
fn output_names(results: &[BatchResult]) -> Vec<String> {
    let stem = |path: &Path| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("report")
            .to_string()
    };

    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for result in results {
        *stem_counts.entry(stem(&result.path)).or_default() += 1;
    }

    results
        .iter()
        .map(|result| {
            let name = stem(&result.path);
            if stem_counts[&name] > 1 {
                result
                    .path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
                    .unwrap_or(name)
            } else {
                name
            }
        })
        .collect()
}

fn write_report_output(
    output_path: &Path,
    extraction: &ExtractionResult,
    format: OutputFormat,
    config: &ShipConfig,
) -> anyhow::Result<()> {
    let content = format_records(&extraction.records, format, &config.output, false)?;

    fs::write(output_path, content)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

fn write_summary(path: &Path, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "records",
        "void",
        "skipped_blocks",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let (records, void, skipped) = result
            .extraction
            .as_ref()
            .map(|e| {
                (
                    e.records.len().to_string(),
                    e.void_count().to_string(),
                    e.blocks_skipped.to_string(),
                )
            })
            .unwrap_or_default();

        wtr.write_record([
            filename,
            result.status(),
            &records,
            &void,
            &skipped,
            &result.processing_time_ms.to_string(),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
