use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use env_logger::{Env, Target};
use tn_archiver::config::{DEFAULT_OUT_DIR, ENGLISH_GO_PAGES, TAMIL_GO_PAGES};
use tn_archiver::{GoArchiver, GoListing, HttpFetcher};

/// Harvests the Tamil Nadu government order listings in English and Tamil
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory the JSON dumps are written to
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Number of English listing pages to walk
    #[arg(long, default_value_t = ENGLISH_GO_PAGES)]
    english_pages: u32,

    /// Number of Tamil listing pages to walk
    #[arg(long, default_value_t = TAMIL_GO_PAGES)]
    tamil_pages: u32,

    /// Write the log to a timestamped file in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn init_logging(log_dir: Option<&PathBuf>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        let path = dir.join(format!(
            "GO_Archiver{}.log",
            Local::now().format("%Y%m%d-%H%M%S")
        ));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_dir.as_ref())?;

    let fetcher = HttpFetcher::insecure().context("Failed to create HTTP client")?;
    let archiver = GoArchiver {
        fetcher: &fetcher,
        out_dir: cli.out_dir.clone(),
    };

    let listings = vec![
        GoListing::english(cli.english_pages),
        GoListing::tamil(cli.tamil_pages),
    ];
    let all = archiver.run(&listings)?;

    for (listing, orders) in listings.iter().zip(&all) {
        println!("{:?}: {} government orders", listing.lang, orders.len());
    }
    println!("Orders saved to {}", cli.out_dir.display());

    Ok(())
}
