use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::Serialize;

use crate::error::Result;
use crate::models::{ExtraordinaryGazette, GazetteEntry, GazetteIssue};

/// A row type with a fixed column list, written as the header even when the
/// table is empty. Must match the serialized field names in order.
pub trait CsvTable {
    const COLUMNS: &'static [&'static str];
}

impl<T: CsvTable> CsvTable for &T {
    const COLUMNS: &'static [&'static str] = T::COLUMNS;
}

#[derive(Debug, Serialize)]
pub struct ExtraordinaryRow {
    #[serde(rename = "Issue No")]
    pub issue_no: String,
    #[serde(rename = "Issue Date")]
    pub issue_date: Option<NaiveDate>,
    #[serde(rename = "Gazette Number")]
    pub gazette_number: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Archived URL")]
    pub archived_url: Option<String>,
    #[serde(rename = "Archived Date")]
    pub archived_date: Option<DateTime<Utc>>,
    #[serde(rename = "Deleted")]
    pub deleted: Option<bool>,
}

impl CsvTable for ExtraordinaryRow {
    const COLUMNS: &'static [&'static str] = &[
        "Issue No",
        "Issue Date",
        "Gazette Number",
        "Category",
        "Department",
        "URL",
        "Archived URL",
        "Archived Date",
        "Deleted",
    ];
}

impl From<&ExtraordinaryGazette> for ExtraordinaryRow {
    fn from(gazette: &ExtraordinaryGazette) -> Self {
        let archive = gazette.archive.as_ref();
        ExtraordinaryRow {
            issue_no: gazette.issue_no.clone(),
            issue_date: gazette.issue_date,
            gazette_number: gazette.gazette_number.clone(),
            category: gazette.category.clone(),
            department: gazette.department.clone(),
            url: gazette.url.clone(),
            archived_url: archive.and_then(|a| a.archived_url.clone()),
            archived_date: archive.and_then(|a| a.archived_at),
            deleted: gazette.deleted,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GazetteEntryRow {
    #[serde(rename = "Part")]
    pub part: String,
    #[serde(rename = "Content")]
    pub content: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Issue")]
    pub issue: String,
    #[serde(rename = "Deleted")]
    pub deleted: Option<bool>,
}

impl CsvTable for GazetteEntryRow {
    const COLUMNS: &'static [&'static str] = &["Part", "Content", "URL", "Date", "Issue", "Deleted"];
}

impl From<&GazetteEntry> for GazetteEntryRow {
    fn from(entry: &GazetteEntry) -> Self {
        GazetteEntryRow {
            part: entry.part.clone(),
            content: entry.content.clone(),
            url: entry.url.clone(),
            date: entry.date,
            issue: entry.issue.clone(),
            deleted: entry.deleted,
        }
    }
}

/// Entry row for runs that resolved archive snapshots.
#[derive(Debug, Serialize)]
pub struct ArchivedGazetteEntryRow {
    #[serde(rename = "Part")]
    pub part: String,
    #[serde(rename = "Content")]
    pub content: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Issue")]
    pub issue: String,
    #[serde(rename = "Deleted")]
    pub deleted: Option<bool>,
    #[serde(rename = "Archived URL")]
    pub archived_url: Option<String>,
    #[serde(rename = "Archived Date")]
    pub archived_date: Option<DateTime<Utc>>,
}

impl CsvTable for ArchivedGazetteEntryRow {
    const COLUMNS: &'static [&'static str] = &[
        "Part",
        "Content",
        "URL",
        "Date",
        "Issue",
        "Deleted",
        "Archived URL",
        "Archived Date",
    ];
}

impl CsvTable for GazetteIssue {
    const COLUMNS: &'static [&'static str] = &["Issue No and Date", "Particulars", "URL"];
}

impl From<&GazetteEntry> for ArchivedGazetteEntryRow {
    fn from(entry: &GazetteEntry) -> Self {
        let archive = entry.archive.as_ref();
        ArchivedGazetteEntryRow {
            part: entry.part.clone(),
            content: entry.content.clone(),
            url: entry.url.clone(),
            date: entry.date,
            issue: entry.issue.clone(),
            deleted: entry.deleted,
            archived_url: archive.and_then(|a| a.archived_url.clone()),
            archived_date: archive.and_then(|a| a.archived_at),
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Writes `rows` as CSV under the `T::COLUMNS` header. An empty table still
/// gets its header line.
pub fn write_csv<T, I>(path: &Path, rows: I) -> Result<usize>
where
    T: Serialize + CsvTable,
    I: IntoIterator<Item = T>,
{
    ensure_parent(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(T::COLUMNS)?;
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    info!("wrote {} rows to {}", count, path.display());
    Ok(count)
}

/// Writes `value` as pretty-printed UTF-8 JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
