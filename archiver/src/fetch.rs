use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::config::user_agent;
use crate::error::{ArchiverError, Result};

/// Source of listing pages. The orchestrators only ever see this trait so
/// they can be driven from saved fixtures.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::build(false)
    }

    /// Client that skips certificate verification. The GO site serves an
    /// incomplete certificate chain.
    pub fn insecure() -> Result<Self> {
        Self::build(true)
    }

    fn build(insecure: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent())
            .timeout(Duration::from_secs(60))
            .danger_accept_invalid_certs(insecure)
            .build()
            .map_err(|e| ArchiverError::network("<client>", e))?;
        Ok(HttpFetcher { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ArchiverError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiverError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| ArchiverError::network(url, e))
    }
}
