//! Gazette batch run: walks year partitions, builds the three gazette
//! tables, probes every document link and, in current-year mode, pins each
//! one to the archive before writing.

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::{ArchiveMode, SiteConfig};
use crate::existence::ReachabilityProbe;
use crate::extractor::{
    extract_table, extraordinary_gazettes, gazette_entries, gazette_issues, TableRow,
};
use crate::fetch::PageFetcher;
use crate::models::{ExtraordinaryGazette, GazetteEntry, GazetteIssue, Harvested};
use crate::output::{write_csv, ArchivedGazetteEntryRow, ExtraordinaryRow, GazetteEntryRow};
use crate::parse::parse_issue_label;
use crate::resolver::{ArchiveOutcome, ArchiveResolver};
use crate::wayback::ArchiveService;

pub const EXTRAORDINARY_STEM: &str = "ExtraOrdinaryGazattes";
pub const ISSUES_STEM: &str = "GazatteIssues";
pub const ENTRIES_STEM: &str = "Gazattes";

/// Everything one run collected, in output order.
#[derive(Debug, Default)]
pub struct GazetteTables {
    pub extraordinary: Vec<ExtraordinaryGazette>,
    pub issues: Vec<GazetteIssue>,
    pub entries: Vec<GazetteEntry>,
}

/// Tally of archive outcomes, for the end-of-run summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub found_existing: usize,
    pub created_new: usize,
    pub failed: usize,
}

impl ArchiveSummary {
    fn record(&mut self, outcome: ArchiveOutcome) {
        match outcome {
            ArchiveOutcome::FoundExisting => self.found_existing += 1,
            ArchiveOutcome::CreatedNew => self.created_new += 1,
            ArchiveOutcome::Failed => self.failed += 1,
        }
    }
}

pub struct GazetteArchiver<'a, F, P, S>
where
    F: PageFetcher,
    P: ReachabilityProbe,
    S: ArchiveService,
{
    pub site: SiteConfig,
    pub mode: ArchiveMode,
    pub fetcher: &'a F,
    pub probe: &'a P,
    pub archive: &'a S,
}

impl<'a, F, P, S> GazetteArchiver<'a, F, P, S>
where
    F: PageFetcher,
    P: ReachabilityProbe,
    S: ArchiveService,
{
    /// Collects, probes and (per mode) archives every table. Individual page
    /// or record failures are logged and skipped.
    pub fn run(&self) -> (GazetteTables, ArchiveSummary) {
        let mut tables = self.collect();

        info!(
            "checking {} extraordinary and {} gazette links",
            tables.extraordinary.len(),
            tables.entries.len()
        );
        mark_deleted(&mut tables.extraordinary, self.probe);
        mark_deleted(&mut tables.entries, self.probe);

        let mut summary = ArchiveSummary::default();
        if self.mode.archives_snapshots() {
            let resolver = ArchiveResolver::new(self.archive);
            archive_all(&mut tables.extraordinary, &resolver, &mut summary);
            archive_all(&mut tables.entries, &resolver, &mut summary);
            info!(
                "archive: {} existing, {} new, {} failed",
                summary.found_existing, summary.created_new, summary.failed
            );
        }

        (tables, summary)
    }

    /// Walks every year partition and assembles the tables, entries sorted
    /// newest first.
    pub fn collect(&self) -> GazetteTables {
        let mut tables = GazetteTables::default();

        for year in self.mode.year_partitions() {
            let partition = if year.is_empty() { "current" } else { year.as_str() };
            info!("collecting {} listings", partition);

            let url = self.site.extraordinary_list_url(&year);
            let rows = self.listing(&url, &self.site.extraordinary_base());
            tables.extraordinary.extend(extraordinary_gazettes(rows));

            let url = self.site.gazette_list_url(&year);
            let issues = gazette_issues(self.listing(&url, &format!("{}/", self.site.gazette_base())));

            for issue in &issues {
                tables.entries.extend(self.issue_entries(issue));
            }
            tables.issues.extend(issues);
        }

        // Stable, so entries of one issue keep their page order.
        tables.entries.sort_by(|a, b| b.date.cmp(&a.date));
        tables
    }

    fn issue_entries(&self, issue: &GazetteIssue) -> Vec<GazetteEntry> {
        let (number, date) = match parse_issue_label(&issue.label) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("skipping issue at {}: {}", issue.url, e);
                return Vec::new();
            }
        };
        if issue.url.is_empty() {
            warn!("issue {} has no link", number);
            return Vec::new();
        }

        let mut entries = gazette_entries(self.listing(&issue.url, &self.site.gazette_base()));
        for entry in &mut entries {
            entry.date = Some(date);
            entry.issue = number.clone();
        }
        entries
    }

    /// Fetches and extracts one listing table. Unreachable or malformed pages
    /// count as empty.
    fn listing(&self, url: &str, link_base: &str) -> Vec<TableRow> {
        let html = match self.fetcher.fetch(url) {
            Ok(html) => html,
            Err(e) => {
                warn!("could not fetch {}: {}", url, e);
                return Vec::new();
            }
        };
        match extract_table(&html, url, link_base) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        }
    }
}

fn mark_deleted<R: Harvested, P: ReachabilityProbe>(rows: &mut [R], probe: &P) {
    for row in rows {
        let record = row.source_record();
        let deleted = probe.is_deleted(&record.url);
        if deleted {
            info!("{} is no longer on the site: {}", record.label(), record.url);
        }
        row.mark_deleted(deleted);
    }
}

fn archive_all<R: Harvested, S: ArchiveService>(
    rows: &mut [R],
    resolver: &ArchiveResolver<S>,
    summary: &mut ArchiveSummary,
) {
    for row in rows {
        let record = row.source_record();
        let result = resolver.resolve(&record.url);
        if result.outcome == ArchiveOutcome::Failed {
            warn!("no archive snapshot for {}", record.label());
        }
        summary.record(result.outcome);
        row.attach_archive(result);
    }
}

/// Writes the three tables under `out_dir`, naming them per `mode`.
pub fn write_tables(
    tables: &GazetteTables,
    mode: ArchiveMode,
    year: i32,
    out_dir: &Path,
) -> Result<()> {
    let path = out_dir.join(mode.output_file_name(EXTRAORDINARY_STEM, year));
    write_csv(&path, tables.extraordinary.iter().map(ExtraordinaryRow::from))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let path = out_dir.join(mode.output_file_name(ISSUES_STEM, year));
    write_csv(&path, &tables.issues)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    let path = out_dir.join(mode.output_file_name(ENTRIES_STEM, year));
    let written = if mode.archives_snapshots() {
        write_csv(&path, tables.entries.iter().map(ArchivedGazetteEntryRow::from))
    } else {
        write_csv(&path, tables.entries.iter().map(GazetteEntryRow::from))
    };
    written.with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
