mod parser;
pub mod scraper;

pub use scraper::{WebScraper, district_codes};

pub(crate) const BASE_URL: &str = "https://www.asahi.com/senkyo/saninsen/koho/";
