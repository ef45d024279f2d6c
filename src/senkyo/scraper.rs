use std::time::Duration;

use super::parser;
use crate::fetch::{FetchError, Fetcher};
use crate::types::Candidate;

/// Tottori (code 32) shares a merged district with Shimane and has no page
/// of its own.
const MERGED_DISTRICT_CODE: u32 = 32;
const PAGE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct WebScraper {
    fetcher: Fetcher,
    base_url: String,
    page_delay: Duration,
}

impl WebScraper {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new()?,
            base_url: super::BASE_URL.to_string(),
            page_delay: PAGE_DELAY,
        })
    }

    /// Override the inter-page politeness delay.
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Sub-pages to scrape: scan the election top page for district and
    /// proportional-party links, falling back to a static enumeration when
    /// the scan comes up empty. Never returns an empty set.
    pub async fn discover_pages(&self) -> (Vec<String>, Vec<String>) {
        let url = format!("{}{}", self.base_url, super::ELECTION_PATH);
        log::info!("Discovering district pages from {}", url);
        let html = self.fetcher.fetch(&url).await;

        let (prefecture_paths, hirei_paths) = parser::parse_index_paths(&html);
        if prefecture_paths.is_empty() && hirei_paths.is_empty() {
            log::warn!("Index scan found no district links; using static enumeration");
            return (fallback_prefecture_paths(), fallback_hirei_paths());
        }
        (prefecture_paths, hirei_paths)
    }

    pub async fn scrape_all(&self) -> Vec<Candidate> {
        let (prefecture_paths, hirei_paths) = self.discover_pages().await;
        let mut all = Vec::new();

        for path in &prefecture_paths {
            let url = self.absolutize(path);
            log::info!("Scraping {}", url);
            let html = self.fetcher.fetch(&url).await;
            let district = parser::extract_district(&html)
                .unwrap_or_else(|| last_path_segment(path).to_string());
            let rows = parser::parse_candidates(&html, &district, false);
            if rows.is_empty() {
                log::warn!("  ! No candidates found for {}", path);
            }
            all.extend(rows);
            tokio::time::sleep(self.page_delay).await;
        }

        for path in &hirei_paths {
            let url = self.absolutize(path);
            log::info!("Scraping {}", url);
            let html = self.fetcher.fetch(&url).await;
            let rows = parser::parse_candidates(&html, last_path_segment(path), true);
            if rows.is_empty() {
                log::warn!("  ! No candidates found for {}", path);
            }
            all.extend(rows);
            tokio::time::sleep(self.page_delay).await;
        }

        all
    }

    fn absolutize(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }
}

fn fallback_prefecture_paths() -> Vec<String> {
    (1..=47)
        .filter(|n| *n != MERGED_DISTRICT_CODE)
        .map(|n| format!("{}/prefecture/{}/", super::ELECTION_PATH, n))
        .collect()
}

fn fallback_hirei_paths() -> Vec<String> {
    vec![format!("{}/hirei/", super::ELECTION_PATH)]
}

fn last_path_segment(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}
