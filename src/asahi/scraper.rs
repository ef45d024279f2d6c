use std::time::Duration;

use super::parser;
use crate::fetch::{FetchError, Fetcher};
use crate::types::Candidate;

/// Tottori (B32) shares a merged district page with Shimane; no standalone
/// page exists for it.
const MERGED_DISTRICT_CODE: u32 = 32;
const PROPORTIONAL_CODE: &str = "C01";
const PAGE_DELAY: Duration = Duration::from_millis(500);

/// The fixed page set: B01..B47 minus the merged district, plus the
/// proportional block.
pub fn district_codes() -> Vec<String> {
    let mut codes: Vec<String> = (1..=47)
        .filter(|n| *n != MERGED_DISTRICT_CODE)
        .map(|n| format!("B{:02}", n))
        .collect();
    codes.push(PROPORTIONAL_CODE.to_string());
    codes
}

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

    /// Fetch and parse every district page in order, one at a time, with a
    /// fixed delay between pages to go easy on the server.
    pub async fn scrape_all(&self) -> Vec<Candidate> {
        let mut all = Vec::new();
        for code in district_codes() {
            let url = format!("{}{}.html", self.base_url, code);
            log::info!("Scraping {}", url);
            let html = self.fetcher.fetch(&url).await;

            if html.is_empty() {
                log::warn!("  ! Empty page for {}", code);
            } else {
                let proportional = code.starts_with('C');
                let rows = parser::parse_candidates(&html, &code, proportional);
                if rows.is_empty() {
                    log::warn!("  ! No candidates found for {}", code);
                }
                all.extend(rows);
            }

            tokio::time::sleep(self.page_delay).await;
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_codes_skip_the_merged_district() {
        let codes = district_codes();
        assert_eq!(codes.len(), 47); // 46 prefecture pages + proportional
        assert!(!codes.contains(&"B32".to_string()));
        assert_eq!(codes.first().unwrap(), "B01");
        assert_eq!(codes.last().unwrap(), "C01");
    }

    #[test]
    fn district_codes_are_order_stable() {
        assert_eq!(district_codes(), district_codes());
    }
}
