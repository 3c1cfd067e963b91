use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::{user_agent, WaybackConfig};
use crate::error::{ArchiverError, Result};

/// A capture the archival index already holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// 14-digit `YYYYMMDDhhmmss` capture time.
    pub timestamp: String,
    pub archive_url: String,
}

/// Outcome of asking the service to take a new capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureStatus {
    Saved,
    Declined { status: u16 },
}

/// The two calls the resolver needs from an archival service.
pub trait ArchiveService {
    /// Oldest capture of `url`. `Err(RecordNotFound)` when there is none.
    fn oldest_snapshot(&self, url: &str) -> Result<Snapshot>;

    /// Requests a fresh capture of `url`.
    fn capture(&self, url: &str) -> Result<CaptureStatus>;

    /// Address under which a fresh capture of `url` can be reached.
    fn snapshot_address(&self, url: &str) -> String;
}

/// Internet Archive client: CDX index for lookups, Save Page Now for captures.
pub struct WaybackMachine {
    client: Client,
    config: WaybackConfig,
}

impl WaybackMachine {
    pub fn new(config: WaybackConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent())
            // Save Page Now can take minutes to fetch a slow origin.
            .timeout(Duration::from_secs(180))
            .build()
            .map_err(|e| ArchiverError::network("<client>", e))?;
        Ok(WaybackMachine { client, config })
    }
}

impl ArchiveService for WaybackMachine {
    fn oldest_snapshot(&self, url: &str) -> Result<Snapshot> {
        let cdx_url = self.config.cdx_url();
        debug!("CDX lookup for {}", url);
        let response = self
            .client
            .get(&cdx_url)
            .query(&[
                ("url", url),
                ("output", "json"),
                ("limit", "1"),
                ("fl", "timestamp,original"),
            ])
            .send()
            .map_err(|e| ArchiverError::network(&cdx_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiverError::HttpStatus {
                url: cdx_url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| ArchiverError::network(&cdx_url, e))?;
        let (timestamp, original) = parse_cdx_response(&body)?
            .ok_or_else(|| ArchiverError::RecordNotFound(url.to_string()))?;

        Ok(Snapshot {
            archive_url: self.config.timestamped_snapshot_url(&timestamp, &original),
            timestamp,
        })
    }

    fn capture(&self, url: &str) -> Result<CaptureStatus> {
        let save_url = self.config.save_url(url);
        debug!("requesting capture via {}", save_url);
        let response = self
            .client
            .get(&save_url)
            .send()
            .map_err(|e| ArchiverError::network(&save_url, e))?;

        match response.status() {
            StatusCode::OK => Ok(CaptureStatus::Saved),
            other => Ok(CaptureStatus::Declined {
                status: other.as_u16(),
            }),
        }
    }

    fn snapshot_address(&self, url: &str) -> String {
        self.config.snapshot_url(url)
    }
}

/// Parses a CDX `output=json` body into the first `(timestamp, original)` pair.
///
/// The body is an array of rows whose first row names the fields. An empty
/// body, an empty array, or a header with no data rows all mean "no record".
pub fn parse_cdx_response(body: &str) -> Result<Option<(String, String)>> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let rows: Vec<Vec<String>> = serde_json::from_str(body)?;
    let Some(header) = rows.first() else {
        return Ok(None);
    };

    let column = |name: &str| {
        header
            .iter()
            .position(|field| field == name)
            .ok_or_else(|| ArchiverError::IndexResponse(format!("missing {} column", name)))
    };
    let timestamp_col = column("timestamp")?;
    let original_col = column("original")?;

    let Some(row) = rows.get(1) else {
        return Ok(None);
    };

    match (row.get(timestamp_col), row.get(original_col)) {
        (Some(timestamp), Some(original)) => Ok(Some((timestamp.clone(), original.clone()))),
        _ => Err(ArchiverError::IndexResponse(format!(
            "short row: {:?}",
            row
        ))),
    }
}
