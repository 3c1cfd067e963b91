//! Government order run: pages through the English and Tamil listings,
//! keeps a raw dump per language, then writes the cleaned, merged list.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::config::{ENGLISH_GO_PAGES, ENGLISH_GO_URL, TAMIL_GO_PAGES, TAMIL_GO_URL};
use crate::extractor::{extract_go_abstracts, DepartmentContext};
use crate::fetch::PageFetcher;
use crate::models::{GoAbstract, GovernmentOrder, Language};
use crate::output::write_json;
use crate::parse::split_go_number_date;

/// One paginated listing: `base_url` + page number for pages `0..pages`.
#[derive(Debug, Clone)]
pub struct GoListing {
    pub base_url: String,
    pub pages: u32,
    pub lang: Language,
    pub raw_file: String,
}

impl GoListing {
    pub fn english(pages: u32) -> Self {
        GoListing {
            base_url: ENGLISH_GO_URL.to_string(),
            pages,
            lang: Language::English,
            raw_file: "all_go_english.json".to_string(),
        }
    }

    pub fn tamil(pages: u32) -> Self {
        GoListing {
            base_url: TAMIL_GO_URL.to_string(),
            pages,
            lang: Language::Tamil,
            raw_file: "all_go_tamil.json".to_string(),
        }
    }

    pub fn defaults() -> Vec<GoListing> {
        vec![
            GoListing::english(ENGLISH_GO_PAGES),
            GoListing::tamil(TAMIL_GO_PAGES),
        ]
    }
}

pub const MERGED_FILE: &str = "all_go.json";

pub struct GoArchiver<'a, F: PageFetcher> {
    pub fetcher: &'a F,
    pub out_dir: PathBuf,
}

impl<'a, F: PageFetcher> GoArchiver<'a, F> {
    /// Scrapes every page of `listing`. The raw dump is rewritten after each
    /// page so an interrupted run keeps what it had.
    pub fn scrape_listing(&self, listing: &GoListing) -> Result<Vec<GoAbstract>> {
        let raw_path = self.out_dir.join(&listing.raw_file);
        let mut abstracts = Vec::new();
        let mut context = DepartmentContext::default();

        for page in 0..listing.pages {
            let url = format!("{}{}", listing.base_url, page);
            info!("{}", url);

            match self.fetcher.fetch(&url) {
                Ok(html) => {
                    let (orders, next) = extract_go_abstracts(&html, context.clone())
                        .with_context(|| format!("Failed to extract {}", url))?;
                    debug!("{} orders on page {}", orders.len(), page);
                    abstracts.extend(orders);
                    context = next;
                }
                Err(e) => warn!("Failed to retrieve page {}: {}", page, e),
            }

            write_json(&raw_path, &abstracts)
                .with_context(|| format!("Failed to write {}", raw_path.display()))?;
        }

        Ok(abstracts)
    }

    /// Scrapes every listing and writes the merged, cleaned `all_go.json`.
    /// The merged file holds one array per listing, in listing order.
    pub fn run(&self, listings: &[GoListing]) -> Result<Vec<Vec<GovernmentOrder>>> {
        let mut all = Vec::new();
        for listing in listings {
            let abstracts = self.scrape_listing(listing)?;
            info!("start of extract date for {:?}", listing.lang);
            all.push(clean_orders(abstracts, listing.lang));
        }

        let merged = self.out_dir.join(MERGED_FILE);
        write_json(&merged, &all)
            .with_context(|| format!("Failed to write {}", merged.display()))?;
        info!("wrote {}", merged.display());
        Ok(all)
    }
}

/// Splits each order's link text into number and date and tags the language.
pub fn clean_orders(abstracts: Vec<GoAbstract>, lang: Language) -> Vec<GovernmentOrder> {
    abstracts
        .into_iter()
        .map(|go| {
            let (number, go_date) = match go.go_number_date.as_deref() {
                Some(text) => {
                    let (number, date) = split_go_number_date(text);
                    (Some(number), date)
                }
                None => (None, None),
            };
            GovernmentOrder {
                deptname: go.deptname,
                go_text: go.go_text,
                url: go.url,
                number,
                go_date,
                lang,
                file_size: go.file_size,
            }
        })
        .collect()
}
