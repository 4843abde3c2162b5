use std::time::Duration;

pub const BASE_URL: &str = "https://prsindia.org";

/// Lok Sabha terms probed for MPs, newest first.
pub const MP_SESSIONS: [&str; 3] = ["18th-lok-sabha", "17th-lok-sabha", "16th-lok-sabha"];

pub const DISAMBIGUATION_SUFFIXES: [&str; 4] = ["", "-1", "-2", "-3"];
pub const REDUCED_SUFFIXES: [&str; 2] = ["", "-1"];
pub const REDUCED_CANDIDATE_CAP: usize = 5;

pub const MAX_CONCURRENT_FETCHES: usize = 8;
pub const MIN_PROFILE_BODY_LEN: usize = 500;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub factor: f32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(4),
            factor: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    pub fn delay_for(&self, attempt: usize) -> Duration {
        let delay = self.initial_delay.mul_f32(self.factor.powi(attempt as i32));
        delay.min(self.max_delay)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    pub base_url: String,
    pub sessions: Vec<String>,
    pub max_concurrent_fetches: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            sessions: MP_SESSIONS.iter().map(|s| s.to_string()).collect(),
            max_concurrent_fetches: MAX_CONCURRENT_FETCHES,
        }
    }
}

impl ResolverConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}
