// Tue Jan 20 2026 - Alex

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use sigscan::{
    output::{ReportFormatter, ScanReport},
    utils::{format_duration, LoggingUtils},
    Scanner, ScannerConfig, SignatureTable,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Identifies file formats by anchored signatures", long_about = None)]
struct Args {
    /// Files to scan
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Signature definitions file
    #[arg(short = 'c', long)]
    signatures: Option<PathBuf>,

    /// Scanner configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    json: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long)]
    buffer_size: Option<usize>,

    #[arg(short = 'j', long)]
    threads: Option<usize>,

    #[arg(long)]
    no_progress: bool,

    #[arg(long)]
    no_color: bool,

    /// Omit input sizes from text output
    #[arg(long)]
    no_size: bool,

    /// Abort the remaining scans after the first failure
    #[arg(long)]
    fail_fast: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> anyhow::Result<ScannerConfig> {
    let mut config = match args.config {
        Some(ref path) => ScannerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ScannerConfig::default(),
    };

    if let Some(ref path) = args.signatures {
        config = config.with_signatures_file(path.clone());
    }
    if let Some(size) = args.buffer_size {
        config = config.with_scan_buffer_size(size);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if args.json {
        config = config.with_json_output(true);
    }
    if args.no_progress || args.json {
        config.enable_progress_bars = false;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    LoggingUtils::init(
        LoggingUtils::level_from_verbosity(args.verbose),
        args.log_file.as_deref(),
    )
    .context("Failed to open log file")?;

    let config = load_config(&args)?;
    let start_time = Instant::now();

    let table = SignatureTable::from_definitions_file(&config.signatures_file).with_context(|| {
        format!(
            "Failed to read signature definitions {}",
            config.signatures_file.display()
        )
    })?;
    if table.is_empty() {
        log::warn!("No signatures defined in {}", config.signatures_file.display());
    }
    log::info!("Loaded {} signature(s)", table.len());

    let scanner = Scanner::with_config(Arc::new(table), &config)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .context("Failed to build thread pool")?;

    let progress = if config.enable_progress_bars {
        let pb = ProgressBar::new(args.inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let reports: Vec<ScanReport> = pool.install(|| {
        args.inputs
            .par_iter()
            .map(|path| {
                let report = match scanner.scan_file(path) {
                    Ok(session) => ScanReport::from_session(path, session),
                    Err(e) => {
                        log::error!("Failed to scan {}: {}", path.display(), e);
                        if args.fail_fast && !scanner.is_aborted() {
                            scanner.signal_abort();
                        }
                        ScanReport::failed(path, &e)
                    }
                };
                if let Some(ref pb) = progress {
                    pb.inc(1);
                }
                report
            })
            .collect()
    });

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let formatter = ReportFormatter::new().with_size(!args.no_size);
    if config.json_output {
        println!("{}", formatter.format_json(&reports)?);
    } else {
        print!("{}", formatter.format_text(&reports));
        eprintln!(
            "{} Scan complete in {}",
            "[+]".green(),
            format_duration(start_time.elapsed())
        );
    }

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        bail!("{} input(s) could not be scanned", failed);
    }
    Ok(())
}
