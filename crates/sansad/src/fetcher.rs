use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::config::{MIN_PROFILE_BODY_LEN, REQUEST_TIMEOUT, RetryPolicy};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Transient failure for {url}: {reason}")]
    Transient { url: String, reason: String },
    #[error("Permanent failure for {url}: {reason}")]
    Permanent { url: String, reason: String },
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient { .. })
    }
}

/// Source of raw page markup. Retries and timeouts are the implementor's
/// business; callers treat any error as a miss for that URL.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    retry: RetryPolicy,
    min_body_len: usize,
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_options(REQUEST_TIMEOUT, RetryPolicy::default())
    }

    pub fn with_options(timeout: Duration, retry: RetryPolicy) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            retry,
            min_body_len: MIN_PROFILE_BODY_LEN,
        })
    }

    pub fn with_min_body_len(mut self, min_body_len: usize) -> Self {
        self.min_body_len = min_body_len;
        self
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Err(FetchError::Transient {
                    url: url.to_string(),
                    reason: "request timed out".to_string(),
                });
            }
            Err(e) if e.is_connect() => {
                return Err(FetchError::Permanent {
                    url: url.to_string(),
                    reason: format!("connection failed: {e}"),
                });
            }
            Err(e) => {
                log::error!("HTTP error: {e:?}");
                return Err(e.into());
            }
        };

        let status = response.status();
        if is_retryable_status(status) {
            return Err(FetchError::Transient {
                url: url.to_string(),
                reason: format!("status {status}"),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Permanent {
                url: url.to_string(),
                reason: format!("status {status}"),
            });
        }

        let body = response
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?;

        if body.trim().len() < self.min_body_len {
            return Err(FetchError::Transient {
                url: url.to_string(),
                reason: format!("short body ({} bytes)", body.len()),
            });
        }
        Ok(body)
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url).await {
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    attempt += 1;
                    log::warn!(
                        "Retrying {} (attempt {}/{}, delay {:?}): {}",
                        url,
                        attempt,
                        self.retry.max_retries,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}
