mod parser;
pub mod scraper;

pub use scraper::WebScraper;

pub(crate) const BASE_URL: &str = "https://go2senkyo.com";
pub(crate) const ELECTION_PATH: &str = "/sangiin/20376";
