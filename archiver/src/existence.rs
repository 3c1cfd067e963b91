//! Reachability probe for origin documents.
//!
//! The signal is coarse: any status other than 200, and any connection
//! failure that survives the retries, reads as "deleted". A server that is
//! merely down for the day is indistinguishable from a removed document.

use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::user_agent;
use crate::error::{ArchiverError, Result};

pub const MAX_RETRIES: u32 = 3;

pub trait ReachabilityProbe {
    /// `true` when the URL no longer answers with HTTP 200.
    fn is_deleted(&self, url: &str) -> bool;
}

pub struct ExistenceChecker {
    client: Client,
    max_retries: u32,
}

impl ExistenceChecker {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent())
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ArchiverError::network("<client>", e))?;
        Ok(ExistenceChecker {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    fn status(&self, url: &str) -> Option<StatusCode> {
        let mut attempt = 0;
        loop {
            // The body is never read, so only the headers come down the wire.
            match self.client.get(url).send() {
                Ok(response) => return Some(response.status()),
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    debug!("retry {}/{} for {}: {}", attempt, self.max_retries, url, e);
                }
                Err(e) => {
                    warn!("giving up on {} after {} retries: {}", url, self.max_retries, e);
                    return None;
                }
            }
        }
    }
}

impl ReachabilityProbe for ExistenceChecker {
    fn is_deleted(&self, url: &str) -> bool {
        if url.is_empty() {
            return true;
        }
        !matches!(self.status(url), Some(StatusCode::OK))
    }
}
