use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tn_archiver::extractor::PageKind;
use tn_archiver::{HttpFetcher, PageFetcher};

/// Saves a live site page as a regression fixture and reports what the extractor makes of it
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Page to capture
    url: String,

    /// Fixture name; saved as <kind>-<name>.html
    name: String,

    /// Which extractor the page is for
    #[arg(long, value_enum)]
    kind: PageKind,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("Fetching HTML from {}...", cli.url);
    let fetcher = match cli.kind {
        PageKind::Go => HttpFetcher::insecure(),
        _ => HttpFetcher::new(),
    }
    .context("Failed to create HTTP client")?;
    let html = fetcher.fetch(&cli.url).context("Failed to fetch page")?;

    let pages_dir = Path::new("src/tests/fixtures/pages");
    fs::create_dir_all(pages_dir).context("Failed to create fixtures directory")?;

    let file_path = pages_dir.join(format!("{}-{}.html", cli.kind.name(), cli.name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;
    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    println!("\nAttempting to extract {} records:", cli.kind.name());
    match cli.kind.count_records(&html, &cli.url) {
        Ok(0) => println!("⚠️ Page parsed but yielded no records. The layout may have changed."),
        Ok(count) => println!("✅ Extracted {} records", count),
        Err(e) => println!("❌ Extraction failed: {}", e),
    }

    Ok(())
}
