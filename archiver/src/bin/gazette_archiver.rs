use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::Parser;
use env_logger::Env;
use log::info;
use tn_archiver::config::{DEFAULT_OUT_DIR, DEFAULT_SITE_URL, DEFAULT_WAYBACK_URL};
use tn_archiver::{
    write_tables, ArchiveMode, ExistenceChecker, GazetteArchiver, HttpFetcher, SiteConfig,
    WaybackConfig, WaybackMachine,
};

/// Archives the Tamil Nadu gazette listings and pins each document to the Wayback Machine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Which slice of the site to harvest
    #[arg(long, value_enum, default_value_t = ArchiveMode::CurrentYear)]
    archive_mode: ArchiveMode,

    /// Directory the CSV tables are written to
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Origin site root
    #[arg(long, default_value = DEFAULT_SITE_URL)]
    site_url: String,

    /// Archival service root
    #[arg(long, default_value = DEFAULT_WAYBACK_URL)]
    wayback_url: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
    let probe = ExistenceChecker::new().context("Failed to create HTTP client")?;
    let archive = WaybackMachine::new(WaybackConfig::new(&cli.wayback_url))
        .context("Failed to create Wayback Machine client")?;

    info!("archive mode {:?}, site {}", cli.archive_mode, cli.site_url);
    let archiver = GazetteArchiver {
        site: SiteConfig::new(&cli.site_url),
        mode: cli.archive_mode,
        fetcher: &fetcher,
        probe: &probe,
        archive: &archive,
    };

    let (tables, summary) = archiver.run();
    println!(
        "Collected {} extraordinary gazettes, {} issues, {} gazette entries",
        tables.extraordinary.len(),
        tables.issues.len(),
        tables.entries.len()
    );
    if cli.archive_mode.archives_snapshots() {
        println!(
            "Archived: {} already in the Wayback Machine, {} newly captured, {} failed",
            summary.found_existing, summary.created_new, summary.failed
        );
    }

    write_tables(&tables, cli.archive_mode, Utc::now().year(), &cli.out_dir)?;
    println!("Tables saved to {}", cli.out_dir.display());

    Ok(())
}
