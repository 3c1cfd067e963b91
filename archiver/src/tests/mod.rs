use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use crate::error::{ArchiverError, Result};
use crate::existence::ReachabilityProbe;
use crate::fetch::PageFetcher;
use crate::wayback::{ArchiveService, CaptureStatus, Snapshot};

pub mod fixtures;
pub mod gazette_tests;

pub const SITE: &str = "http://site";

/// Serves pages from memory; unknown URLs answer 404.
#[derive(Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    pub requested: RefCell<Vec<String>>,
}

impl FixtureFetcher {
    pub fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }
}

impl PageFetcher for FixtureFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.requested.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ArchiverError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Reports the listed URLs as deleted and counts probes.
#[derive(Default)]
pub struct FakeProbe {
    pub deleted: HashSet<String>,
    pub probes: Cell<usize>,
}

impl ReachabilityProbe for FakeProbe {
    fn is_deleted(&self, url: &str) -> bool {
        self.probes.set(self.probes.get() + 1);
        url.is_empty() || self.deleted.contains(url)
    }
}

/// Archive with a fixed set of existing snapshots; captures succeed unless
/// the URL is listed in `refuse`.
#[derive(Default)]
pub struct FakeArchive {
    pub snapshots: HashMap<String, String>,
    pub refuse: HashSet<String>,
    pub captured: RefCell<Vec<String>>,
}

impl ArchiveService for FakeArchive {
    fn oldest_snapshot(&self, url: &str) -> Result<Snapshot> {
        let timestamp = self
            .snapshots
            .get(url)
            .ok_or_else(|| ArchiverError::RecordNotFound(url.to_string()))?;
        Ok(Snapshot {
            timestamp: timestamp.clone(),
            archive_url: format!("https://web.archive.org/web/{}/{}", timestamp, url),
        })
    }

    fn capture(&self, url: &str) -> Result<CaptureStatus> {
        self.captured.borrow_mut().push(url.to_string());
        if self.refuse.contains(url) {
            Ok(CaptureStatus::Declined { status: 523 })
        } else {
            Ok(CaptureStatus::Saved)
        }
    }

    fn snapshot_address(&self, url: &str) -> String {
        format!("https://web.archive.org/web/{}", url)
    }
}
