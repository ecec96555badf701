use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::parser::{ParseError, parse_bracket, parse_pool_play};
use crate::types::{BracketResults, PoolPlayResults, TournamentResults};

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
}

/// Capability to fetch a page body. The scraper is generic over this so tests
/// can substitute an in-memory fake for the HTTP client.
pub trait FetchPage {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html)
    }
}

#[derive(Debug, Clone)]
pub struct TournamentScraper<F = HttpFetcher> {
    fetcher: F,
}

impl TournamentScraper<HttpFetcher> {
    pub fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            fetcher: HttpFetcher::new()?,
        })
    }
}

impl<F: FetchPage> TournamentScraper<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub async fn pool_play_results(&self, url: &str) -> Result<PoolPlayResults, ScraperError> {
        let html = self.fetcher.fetch(url).await?;
        Ok(parse_pool_play(&html)?)
    }

    pub async fn bracket_results(&self, url: &str) -> Result<BracketResults, ScraperError> {
        let html = self.fetcher.fetch(url).await?;
        Ok(parse_bracket(&html)?)
    }

    /// Fetches the schedule page once and runs both extractors over the same
    /// body.
    pub async fn tournament_results(&self, url: &str) -> Result<TournamentResults, ScraperError> {
        let html = self.fetcher.fetch(url).await?;
        Ok(TournamentResults {
            pool_play: parse_pool_play(&html)?,
            bracket: parse_bracket(&html)?,
        })
    }
}
