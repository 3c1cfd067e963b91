use std::ops::RangeInclusive;

use clap::ValueEnum;

pub const DEFAULT_SITE_URL: &str = "http://www.stationeryprinting.tn.gov.in";
pub const DEFAULT_WAYBACK_URL: &str = "https://web.archive.org";
pub const DEFAULT_OUT_DIR: &str = "data";
pub const PAGE_EXTENSION: &str = ".php";

/// Year partitions walked in addition to the current listing in full mode.
pub const HISTORICAL_YEARS: RangeInclusive<u16> = 2008..=2022;

pub const ENGLISH_GO_URL: &str = "https://www.tn.gov.in/go_view/atoz/All?page=";
pub const TAMIL_GO_URL: &str = "https://www.tn.gov.in/ta/go_view/atoz/All?page=";
pub const ENGLISH_GO_PAGES: u32 = 390;
pub const TAMIL_GO_PAGES: u32 = 87;

/// Anchor target used by the GO listing for rows that have no document.
pub const GO_PLACEHOLDER_LINK: &str = "http://cms.tn.gov.in/";

pub fn user_agent() -> String {
    format!("tn-archiver/{}", env!("CARGO_PKG_VERSION"))
}

/// Which slice of the gazette site a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "kebab-case")]
pub enum ArchiveMode {
    /// Current listing only; archives every row and suffixes outputs with the year
    CurrentYear,
    /// Current listing plus every historical year partition, no archival step
    Full,
}

impl Default for ArchiveMode {
    fn default() -> Self {
        ArchiveMode::CurrentYear
    }
}

impl ArchiveMode {
    /// Year partition suffixes appended to listing page names. The empty
    /// string is the current listing.
    pub fn year_partitions(&self) -> Vec<String> {
        let mut years = vec![String::new()];
        match self {
            ArchiveMode::CurrentYear => {}
            ArchiveMode::Full => years.extend(HISTORICAL_YEARS.map(|y| y.to_string())),
        }
        years
    }

    pub fn archives_snapshots(&self) -> bool {
        match self {
            ArchiveMode::CurrentYear => true,
            ArchiveMode::Full => false,
        }
    }

    /// Output file name for a table, e.g. `Gazattes_2024.csv` or `Gazattes.csv`.
    pub fn output_file_name(&self, stem: &str, year: i32) -> String {
        match self {
            ArchiveMode::CurrentYear => format!("{}_{}.csv", stem, year),
            ArchiveMode::Full => format!("{}.csv", stem),
        }
    }
}

/// Origin site layout. All listing URLs hang off `site_url`.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig::new(DEFAULT_SITE_URL)
    }
}

impl SiteConfig {
    pub fn new(site_url: &str) -> Self {
        SiteConfig {
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn gazette_base(&self) -> String {
        format!("{}/gazette", self.site_url)
    }

    pub fn extraordinary_base(&self) -> String {
        format!("{}/extraordinary/", self.site_url)
    }

    pub fn gazette_list_url(&self, year: &str) -> String {
        format!("{}/gazette_list{}{}", self.gazette_base(), year, PAGE_EXTENSION)
    }

    pub fn extraordinary_list_url(&self, year: &str) -> String {
        format!(
            "{}extraord_list{}{}",
            self.extraordinary_base(),
            year,
            PAGE_EXTENSION
        )
    }
}

/// Location of the archival service.
#[derive(Debug, Clone)]
pub struct WaybackConfig {
    pub base_url: String,
}

impl Default for WaybackConfig {
    fn default() -> Self {
        WaybackConfig::new(DEFAULT_WAYBACK_URL)
    }
}

impl WaybackConfig {
    pub fn new(base_url: &str) -> Self {
        WaybackConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn cdx_url(&self) -> String {
        format!("{}/cdx/search/cdx", self.base_url)
    }

    pub fn save_url(&self, url: &str) -> String {
        format!("{}/save/{}", self.base_url, url)
    }

    /// Snapshot namespace address; the service redirects it to the latest capture.
    pub fn snapshot_url(&self, url: &str) -> String {
        format!("{}/web/{}", self.base_url, url)
    }

    pub fn timestamped_snapshot_url(&self, timestamp: &str, url: &str) -> String {
        format!("{}/web/{}/{}", self.base_url, timestamp, url)
    }
}
