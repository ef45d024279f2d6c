pub mod asahi;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod senkyo;
pub mod types;

pub use fetch::Fetcher;
pub use types::{Candidate, Source};
