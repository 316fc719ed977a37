//! PDF Merger CLI - Command line tool for merging PDF documents.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_merger_core::{AppConfig, UploadPolicy, merge_with_progress};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "pdf-merge")]
#[command(author, version, about = "Merge PDF documents, pages in argument order", long_about = None)]
struct Args {
    /// Input PDF files, merged in the order given
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output PDF file
    #[arg(short, long, default_value = "merged.pdf")]
    output: PathBuf,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Read one input, holding it to the same size cap as web uploads.
fn read_input(path: &Path, policy: &UploadPolicy) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    policy.check_size(&path.display().to_string(), bytes.len())?;
    Ok(bytes)
}

fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path).context("Failed to load config file")?
    } else {
        AppConfig::load()
    };

    let policy = UploadPolicy::new(&config.upload);
    policy.check_count(args.inputs.len())?;

    let inputs = args
        .inputs
        .iter()
        .map(|path| read_input(path, &policy))
        .collect::<Result<Vec<_>>>()?;

    info!("Merging {} files", inputs.len());

    #[allow(clippy::cast_possible_truncation)]
    let pb = ProgressBar::new(inputs.len() as u64);
    // Template is hardcoded and valid, unwrap is safe
    #[allow(clippy::unwrap_used)]
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let output = merge_with_progress(&inputs, |done, _| {
        pb.set_message(format!("{}", args.inputs[done - 1].display()));
        pb.inc(1);
    })
    .map_err(|e| match e {
        pdf_merger_core::Error::PdfParse { index, reason } => anyhow::anyhow!(
            "Failed to parse {}: {}",
            args.inputs[index].display(),
            reason
        ),
        other => other.into(),
    })?;

    pb.finish_with_message("Merge complete");

    for (path, pages) in args.inputs.iter().zip(&output.input_page_counts) {
        info!("{}: {} pages", path.display(), pages);
    }

    std::fs::write(&args.output, &output.bytes)
        .with_context(|| format!("Failed to write output: {}", args.output.display()))?;

    // CLI output is intentional
    #[allow(clippy::print_stdout)]
    {
        println!(
            "Merged {} pages into {}",
            output.page_count(),
            args.output.display()
        );
    }

    Ok(())
}
