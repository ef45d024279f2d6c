//! Retrying page fetcher shared by both site scrapers.
//!
//! A missing page (404) and exhausted retries both degrade to an empty
//! string so a single bad page never aborts the run.

use std::time::Duration;

use reqwest::{Client, StatusCode};

pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (CandidateFetcher/1.0)";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP client build failed: {0}")]
    Client(#[from] reqwest::Error),
}

enum FetchOutcome {
    Body(String),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    retries: u32,
    retry_delay: Duration,
}

impl Fetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Override the retry count and inter-retry delay. Tests pass
    /// `Duration::ZERO` so retry loops run without wall-clock waits.
    pub fn with_retry_policy(mut self, retries: u32, retry_delay: Duration) -> Self {
        self.retries = retries.max(1);
        self.retry_delay = retry_delay;
        self
    }

    /// GET `url` and return the body text. Returns `""` when the page is
    /// absent (404) or every attempt failed.
    pub async fn fetch(&self, url: &str) -> String {
        for attempt in 1..=self.retries {
            match self.try_get(url).await {
                Ok(FetchOutcome::Body(text)) => return text,
                Ok(FetchOutcome::NotFound) => {
                    log::warn!("  ! {} returned 404", url);
                    return String::new();
                }
                Err(e) => {
                    log::warn!("Retrying {} because {}", url, e);
                    if attempt < self.retries {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }
        log::error!("Failed to fetch {} after {} attempts. Skipping.", url, self.retries);
        String::new()
    }

    async fn try_get(&self, url: &str) -> Result<FetchOutcome, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(FetchOutcome::NotFound);
        }
        let body = response.error_for_status()?.text().await?;
        Ok(FetchOutcome::Body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve_once(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response).await;
        });
        format!("http://{}/koho", addr)
    }

    fn quick_fetcher() -> Fetcher {
        Fetcher::new().unwrap().with_retry_policy(2, Duration::ZERO)
    }

    #[tokio::test]
    async fn fetch_returns_body_on_success() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\ncontent-length: 5\r\nconnection: close\r\n\r\nhello",
        )
        .await;
        let body = quick_fetcher().fetch(&url).await;
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn fetch_returns_empty_on_404_without_retrying() {
        let url = serve_once(
            b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let body = quick_fetcher().fetch(&url).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn fetch_returns_empty_after_exhausting_retries() {
        // Server errors on every attempt; the fetcher degrades to "".
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                    )
                    .await;
            }
        });
        let url = format!("http://{}/koho", addr);
        let body = quick_fetcher().fetch(&url).await;
        assert!(body.is_empty());
    }
}
