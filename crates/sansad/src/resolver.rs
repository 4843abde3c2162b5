use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::Semaphore;

use crate::candidates::{CandidateUrl, build_candidates};
use crate::config::ResolverConfig;
use crate::fetcher::{FetchError, HttpFetcher, PageFetcher};
use crate::normalizer::{SlugCandidate, slug_candidates};
use crate::scheduler::{ProbeHit, ProbeReport, ProbeScheduler};
use crate::types::{MemberProfile, NameQuery, ResolutionResult, Role};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Name '{0}' has nothing left to search for once honorifics are removed")]
    EmptyName(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchPhase {
    Primary,
    Alternate,
}

impl SearchPhase {
    fn role(&self, requested: Role) -> Role {
        match self {
            SearchPhase::Primary => requested,
            SearchPhase::Alternate => requested.opposite(),
        }
    }

    fn reduced(&self) -> bool {
        matches!(self, SearchPhase::Alternate)
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchPlan {
    pub role: Role,
    pub reduced: bool,
    pub slugs: Vec<SlugCandidate>,
    pub candidates: Vec<CandidateUrl>,
}

#[derive(Debug, Clone)]
pub struct MemberResolver<F = HttpFetcher> {
    fetcher: F,
    config: ResolverConfig,
}

impl MemberResolver<HttpFetcher> {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self::with_fetcher(HttpFetcher::new()?, ResolverConfig::default()))
    }
}

impl<F: PageFetcher> MemberResolver<F> {
    pub fn with_fetcher(fetcher: F, config: ResolverConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn plan(&self, name: &str, role: Role, reduced: bool) -> SearchPlan {
        let slugs = slug_candidates(name);
        let candidates = build_candidates(&slugs, role, reduced, &self.config);
        SearchPlan {
            role,
            reduced,
            slugs,
            candidates,
        }
    }

    pub async fn resolve(&self, name: &str, role: Role) -> Result<ResolutionResult, ResolveError> {
        self.resolve_member(&NameQuery::new(name, role)).await
    }

    /// Searches the requested role first and, on a total miss, the opposite
    /// role with a reduced budget. A miss on both is an `Ok` result with
    /// `found == false`.
    pub async fn resolve_member(
        &self,
        query: &NameQuery,
    ) -> Result<ResolutionResult, ResolveError> {
        let started = Instant::now();
        let slugs = slug_candidates(&query.name);
        if slugs.is_empty() {
            return Err(ResolveError::EmptyName(query.name.clone()));
        }

        log::info!(
            "Resolving '{}' as {} ({} slug candidate(s))",
            query.name,
            query.role,
            slugs.len()
        );
        if query.constituency.is_some() || query.state.is_some() {
            log::debug!(
                "Hints (not used for matching): constituency={:?}, state={:?}",
                query.constituency,
                query.state
            );
        }

        let limiter = Semaphore::new(self.config.max_concurrent_fetches);
        let mut urls_checked = 0;
        let mut probed_urls = Vec::new();

        for phase in [SearchPhase::Primary, SearchPhase::Alternate] {
            let role = phase.role(query.role);
            let candidates = build_candidates(&slugs, role, phase.reduced(), &self.config);
            if phase == SearchPhase::Alternate {
                log::info!(
                    "No {} profile found; trying {} with {} candidate(s)",
                    query.role,
                    role,
                    candidates.len()
                );
            }

            let report = ProbeScheduler::new(&self.fetcher, &limiter)
                .run(&candidates, role)
                .await;
            log::debug!(
                "{} pass: {} URL(s) over {} tier(s), {} miss(es), {} error(s) in {:?}",
                role,
                report.urls_checked,
                report.tiers_run,
                report.misses,
                report.errors,
                report.elapsed
            );

            let ProbeReport {
                hit,
                urls_checked: checked,
                probed_urls: probed,
                ..
            } = report;
            urls_checked += checked;
            probed_urls.extend(probed);

            if let Some(hit) = hit {
                return Ok(assemble(
                    query,
                    Some((role, hit)),
                    urls_checked,
                    probed_urls,
                    started.elapsed(),
                ));
            }
        }

        log::info!(
            "'{}' not found under either role ({} URL(s) checked)",
            query.name,
            urls_checked
        );
        Ok(assemble(
            query,
            None,
            urls_checked,
            probed_urls,
            started.elapsed(),
        ))
    }
}

fn assemble(
    query: &NameQuery,
    hit: Option<(Role, ProbeHit)>,
    urls_checked: usize,
    probed_urls: Vec<String>,
    elapsed: Duration,
) -> ResolutionResult {
    let (found_as, source_url, profile) = match hit {
        Some((role, hit)) => (Some(role), Some(hit.url), hit.profile),
        None => (None, None, MemberProfile::empty(query.role)),
    };

    ResolutionResult {
        found: found_as.is_some(),
        searched_as: query.role,
        found_as,
        source_url,
        urls_checked,
        probed_urls,
        elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        resolved_at: Utc::now(),
        query: query.clone(),
        profile,
    }
}
