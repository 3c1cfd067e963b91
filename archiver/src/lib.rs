pub mod config;
pub mod error;
pub mod existence;
pub mod extractor;
pub mod fetch;
pub mod gazette;
pub mod go;
pub mod models;
pub mod output;
pub mod parse;
pub mod resolver;
pub mod wayback;

// Fixture-driven tests for the extractors and orchestrators
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::config::{ArchiveMode, SiteConfig, WaybackConfig};
pub use crate::error::ArchiverError;
pub use crate::existence::{ExistenceChecker, ReachabilityProbe};
pub use crate::fetch::{HttpFetcher, PageFetcher};
pub use crate::gazette::{write_tables, GazetteArchiver, GazetteTables};
pub use crate::go::{GoArchiver, GoListing};
pub use crate::resolver::{ArchiveOutcome, ArchiveResolver, ArchiveResult};
pub use crate::wayback::{ArchiveService, WaybackMachine};
