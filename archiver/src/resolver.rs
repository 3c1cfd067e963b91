//! Pins an origin URL to a durable archive snapshot.
//!
//! Resolution looks for the oldest capture the service already holds and
//! only asks for a new capture when there is none. Every path ends in an
//! [`ArchiveResult`]; nothing here returns an error to the caller.

use chrono::{DateTime, SubsecRound, Utc};
use log::{debug, info, warn};

use crate::error::ArchiverError;
use crate::parse::parse_snapshot_timestamp;
use crate::wayback::{ArchiveService, CaptureStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOutcome {
    FoundExisting,
    CreatedNew,
    Failed,
}

/// Archive reference for one URL. Both fields are `None` exactly when the
/// outcome is `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveResult {
    pub archived_url: Option<String>,
    pub archived_at: Option<DateTime<Utc>>,
    pub outcome: ArchiveOutcome,
}

impl ArchiveResult {
    pub fn found(archived_url: String, archived_at: DateTime<Utc>) -> Self {
        ArchiveResult {
            archived_url: Some(archived_url),
            archived_at: Some(archived_at),
            outcome: ArchiveOutcome::FoundExisting,
        }
    }

    pub fn created(archived_url: String, archived_at: DateTime<Utc>) -> Self {
        ArchiveResult {
            archived_url: Some(archived_url),
            archived_at: Some(archived_at),
            outcome: ArchiveOutcome::CreatedNew,
        }
    }

    pub fn failed() -> Self {
        ArchiveResult {
            archived_url: None,
            archived_at: None,
            outcome: ArchiveOutcome::Failed,
        }
    }
}

/// Stateless resolver over an [`ArchiveService`]. Holds no cache: resolving
/// the same URL twice asks the service twice.
pub struct ArchiveResolver<'a, S: ArchiveService> {
    service: &'a S,
    clock: fn() -> DateTime<Utc>,
}

impl<'a, S: ArchiveService> ArchiveResolver<'a, S> {
    pub fn new(service: &'a S) -> Self {
        ArchiveResolver {
            service,
            clock: Utc::now,
        }
    }

    pub fn with_clock(service: &'a S, clock: fn() -> DateTime<Utc>) -> Self {
        ArchiveResolver { service, clock }
    }

    pub fn resolve(&self, url: &str) -> ArchiveResult {
        if url.is_empty() {
            debug!("row has no link, nothing to archive");
            return ArchiveResult::failed();
        }

        match self.lookup_existing(url) {
            Some(result) => result,
            None => self.capture_new(url),
        }
    }

    /// `None` means "go and capture", whether the index had no record or
    /// could not be asked.
    fn lookup_existing(&self, url: &str) -> Option<ArchiveResult> {
        let snapshot = match self.service.oldest_snapshot(url) {
            Ok(snapshot) => snapshot,
            Err(ArchiverError::RecordNotFound(_)) => {
                debug!("no existing snapshot of {}", url);
                return None;
            }
            Err(e) => {
                warn!("index lookup for {} failed, capturing instead: {}", url, e);
                return None;
            }
        };

        match parse_snapshot_timestamp(&snapshot.timestamp) {
            Ok(archived_at) => {
                info!("{} already archived at {}", url, snapshot.archive_url);
                Some(ArchiveResult::found(snapshot.archive_url, archived_at))
            }
            Err(e) => {
                warn!("ignoring snapshot of {} with bad timestamp: {}", url, e);
                None
            }
        }
    }

    fn capture_new(&self, url: &str) -> ArchiveResult {
        let reason = match self.service.capture(url) {
            Ok(CaptureStatus::Saved) => {
                let archived_at = (self.clock)().trunc_subsecs(0);
                let archived_url = self.service.snapshot_address(url);
                info!("captured {} as {}", url, archived_url);
                return ArchiveResult::created(archived_url, archived_at);
            }
            Ok(CaptureStatus::Declined { status }) => format!("HTTP {}", status),
            Err(e) => e.to_string(),
        };

        let failure = ArchiverError::CaptureFailure {
            url: url.to_string(),
            reason,
        };
        warn!("{}", failure);
        ArchiveResult::failed()
    }
}
