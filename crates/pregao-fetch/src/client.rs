//! HTTP client for the Yahoo Finance chart endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use pregao_normalize::RawTable;
use pregao_types::{DateRange, Symbol};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::chart::decode_chart;
use crate::{FetchError, SeriesSource};

/// Default chart endpoint.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Configuration for the chart client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Chart endpoint, without the trailing symbol.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
    /// Scale OHLC by the dividend and split adjusted close.
    pub auto_adjust: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
            // The endpoint rejects requests without a browser-like agent
            user_agent: format!("Mozilla/5.0 (compatible; pregao/{})", env!("CARGO_PKG_VERSION")),
            auto_adjust: true,
        }
    }
}

impl ClientConfig {
    /// Sets the chart endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry attempts.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Enables or disables price adjustment.
    #[must_use]
    pub const fn with_auto_adjust(mut self, auto_adjust: bool) -> Self {
        self.auto_adjust = auto_adjust;
        self
    }
}

/// Daily price history client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    config: ClientConfig,
}

impl YahooClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the chart URL for a symbol and inclusive date range.
    #[must_use]
    pub fn chart_url(&self, symbol: &Symbol, range: DateRange) -> String {
        format!(
            "{}/{}?period1={}&period2={}&interval=1d&events=div%2Csplits&includeAdjustedClose=true",
            self.config.base_url.trim_end_matches('/'),
            symbol,
            unix_midnight(range.start),
            unix_midnight(range.end_exclusive()),
        )
    }

    /// Downloads a response body, returning `Ok(None)` on 404.
    async fn get_body(&self, url: &str) -> Result<Option<String>, FetchError> {
        let mut attempts = 0;

        loop {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::NOT_FOUND {
                        return Ok(None);
                    }

                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            warn!(url, %status, attempts, ?delay, "retrying chart request");
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(FetchError::ServerError {
                            status: status.as_u16(),
                        });
                    }

                    response.error_for_status_ref()?;
                    return Ok(Some(response.text().await?));
                }
                Err(e) if Self::is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    warn!(url, error = %e, attempts, ?delay, "retrying chart request");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));
        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter in [-25%, +25%) keyed on the attempt number
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(100) as u64;
        Duration::from_millis(final_delay)
    }

    fn is_retryable_error(error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }
        error.is_timeout() || error.is_connect() || error.is_request()
    }
}

#[async_trait]
impl SeriesSource for YahooClient {
    async fn fetch_raw(
        &self,
        symbol: &Symbol,
        range: DateRange,
    ) -> Result<Option<RawTable>, FetchError> {
        let url = self.chart_url(symbol, range);
        debug!(%symbol, %range, "requesting chart");

        let Some(body) = self.get_body(&url).await? else {
            debug!(%symbol, "chart endpoint returned 404");
            return Ok(None);
        };
        decode_chart(&body, self.config.auto_adjust)
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
