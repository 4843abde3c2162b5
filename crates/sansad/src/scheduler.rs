use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::candidates::CandidateUrl;
use crate::extract::extract_profile;
use crate::fetcher::PageFetcher;
use crate::types::{MemberProfile, Role};
use crate::validator::{PageClass, classify};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    NotAProfile,
    NameUnresolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Hit(Box<MemberProfile>),
    Miss(MissReason),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHit {
    pub url: String,
    pub tier: usize,
    pub profile: MemberProfile,
}

#[derive(Debug, Clone, Default)]
pub struct ProbeReport {
    pub hit: Option<ProbeHit>,
    pub urls_checked: usize,
    pub probed_urls: Vec<String>,
    pub tiers_run: usize,
    pub misses: usize,
    pub errors: usize,
    pub elapsed: Duration,
}

/// Parses and extracts in one synchronous step so the parsed document never
/// lives across an await point.
fn evaluate(html: &str, role: Role, url: &str) -> ProbeOutcome {
    if classify(html, role) != PageClass::Profile {
        return ProbeOutcome::Miss(MissReason::NotAProfile);
    }
    let profile = extract_profile(html, role, url);
    if profile.has_name() {
        ProbeOutcome::Hit(Box::new(profile))
    } else {
        ProbeOutcome::Miss(MissReason::NameUnresolved)
    }
}

pub struct ProbeScheduler<'a, F> {
    fetcher: &'a F,
    limiter: &'a Semaphore,
    checked: AtomicUsize,
}

impl<'a, F: PageFetcher> ProbeScheduler<'a, F> {
    pub fn new(fetcher: &'a F, limiter: &'a Semaphore) -> Self {
        Self {
            fetcher,
            limiter,
            checked: AtomicUsize::new(0),
        }
    }

    async fn probe(&self, candidate: &CandidateUrl, role: Role) -> ProbeOutcome {
        let Ok(_permit) = self.limiter.acquire().await else {
            return ProbeOutcome::Error("fetch limiter closed".to_string());
        };
        self.checked.fetch_add(1, Ordering::Relaxed);

        match self.fetcher.fetch(&candidate.url).await {
            Ok(html) => {
                let outcome = evaluate(&html, role, &candidate.url);
                log::debug!("{} -> {}", candidate, outcome_label(&outcome));
                outcome
            }
            Err(e) => {
                log::debug!("{} -> error: {}", candidate, e);
                ProbeOutcome::Error(e.to_string())
            }
        }
    }

    /// Probes `candidates` tier by tier and stops after the first tier that
    /// produces a hit. Every probe in that tier still runs to completion.
    pub async fn run(&self, candidates: &[CandidateUrl], role: Role) -> ProbeReport {
        let started = Instant::now();
        let mut report = ProbeReport::default();

        let mut tiers: BTreeMap<usize, Vec<&CandidateUrl>> = BTreeMap::new();
        for candidate in candidates {
            tiers.entry(candidate.tier).or_default().push(candidate);
        }

        for (tier, members) in tiers {
            report.tiers_run += 1;
            log::debug!("Probing tier {} ({} URL(s))", tier, members.len());

            let outcomes = join_all(members.iter().map(|c| self.probe(c, role))).await;
            report
                .probed_urls
                .extend(members.iter().map(|c| c.url.clone()));

            for (candidate, outcome) in members.iter().zip(outcomes) {
                match outcome {
                    ProbeOutcome::Hit(profile) if report.hit.is_none() => {
                        report.hit = Some(ProbeHit {
                            url: candidate.url.clone(),
                            tier,
                            profile: *profile,
                        });
                    }
                    ProbeOutcome::Hit(_) => {}
                    ProbeOutcome::Miss(_) => report.misses += 1,
                    ProbeOutcome::Error(_) => report.errors += 1,
                }
            }

            if let Some(hit) = &report.hit {
                log::info!("Found {} profile at {} (tier {})", role, hit.url, tier);
                break;
            }
        }

        report.urls_checked = self.checked.load(Ordering::Relaxed);
        report.elapsed = started.elapsed();
        report
    }
}

fn outcome_label(outcome: &ProbeOutcome) -> &'static str {
    match outcome {
        ProbeOutcome::Hit(_) => "hit",
        ProbeOutcome::Miss(MissReason::NotAProfile) => "miss (not a profile)",
        ProbeOutcome::Miss(MissReason::NameUnresolved) => "miss (no name)",
        ProbeOutcome::Error(_) => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::build_candidates;
    use crate::config::{MAX_CONCURRENT_FETCHES, ResolverConfig};
    use crate::fixtures;
    use crate::normalizer::slug_candidates;
    use crate::testing::MockFetcher;

    const BASE: &str = "http://tracker.test";

    fn plan(name: &str, role: Role) -> Vec<CandidateUrl> {
        let config = ResolverConfig::default().with_base_url(BASE);
        build_candidates(&slug_candidates(name), role, false, &config)
    }

    #[tokio::test]
    async fn test_stops_after_first_successful_tier() {
        let fetcher = MockFetcher::new().with_page(
            format!("{BASE}/mptrack/18th-lok-sabha/rahul-gandhi"),
            fixtures::mp_profile("Rahul Gandhi"),
        );
        let limiter = Semaphore::new(MAX_CONCURRENT_FETCHES);
        let candidates = plan("Rahul Gandhi", Role::Mp);

        let report = ProbeScheduler::new(&fetcher, &limiter)
            .run(&candidates, Role::Mp)
            .await;

        let hit = report.hit.expect("should find the profile");
        assert_eq!(hit.tier, 0);
        assert_eq!(hit.profile.name, "Rahul Gandhi");
        assert_eq!(report.tiers_run, 1);
        assert_eq!(report.urls_checked, 1);
        assert!(
            fetcher
                .requested()
                .iter()
                .all(|u| u.ends_with("/18th-lok-sabha/rahul-gandhi"))
        );
    }

    #[tokio::test]
    async fn test_later_tiers_never_issued_after_hit() {
        let fetcher = MockFetcher::new()
            .with_page(
                format!("{BASE}/mptrack/18th-lok-sabha/rahul-gandhi-2"),
                fixtures::mp_profile("Rahul Gandhi"),
            )
            .with_page(
                format!("{BASE}/mptrack/17th-lok-sabha/rahul-gandhi"),
                fixtures::mp_profile("Rahul Gandhi"),
            );
        let limiter = Semaphore::new(MAX_CONCURRENT_FETCHES);
        let candidates = plan("Rahul Gandhi", Role::Mp);

        let report = ProbeScheduler::new(&fetcher, &limiter)
            .run(&candidates, Role::Mp)
            .await;

        let hit = report.hit.expect("should find the suffixed profile");
        assert_eq!(hit.tier, 1);
        assert!(hit.url.ends_with("rahul-gandhi-2"));
        assert_eq!(report.tiers_run, 2);
        assert_eq!(report.urls_checked, 4);
        assert!(
            fetcher
                .requested()
                .iter()
                .all(|u| u.contains("/18th-lok-sabha/"))
        );
    }

    #[tokio::test]
    async fn test_lowest_index_wins_within_tier() {
        let fetcher = MockFetcher::new()
            .with_page(
                format!("{BASE}/mlatrack/adhir-chowdhury"),
                fixtures::mla_profile("Adhir Chowdhury"),
            )
            .with_page(
                format!("{BASE}/mlatrack/adhir-r-chowdhury"),
                fixtures::mla_profile("Adhir R Chowdhury"),
            )
            .with_delay(Duration::from_millis(5));
        let limiter = Semaphore::new(MAX_CONCURRENT_FETCHES);
        let candidates = plan("Adhir Ranjan Chowdhury", Role::Mla);

        let report = ProbeScheduler::new(&fetcher, &limiter)
            .run(&candidates, Role::Mla)
            .await;

        let hit = report.hit.expect("should hit in tier 0");
        assert!(hit.url.ends_with("/mlatrack/adhir-chowdhury"));
        assert_eq!(report.urls_checked, 3);
    }

    #[tokio::test]
    async fn test_never_exceeds_concurrency_limit() {
        let fetcher = MockFetcher::new().with_delay(Duration::from_millis(20));
        let limiter = Semaphore::new(MAX_CONCURRENT_FETCHES);
        let candidates = plan("Nara Chandrababu Naidu Garu", Role::Mla);
        assert_eq!(candidates.len(), 12);

        let report = ProbeScheduler::new(&fetcher, &limiter)
            .run(&candidates, Role::Mla)
            .await;

        assert!(report.hit.is_none());
        assert_eq!(report.urls_checked, 12);
        assert_eq!(report.probed_urls.len(), 12);
        assert_eq!(report.tiers_run, 2);
        assert_eq!(report.errors, 12);
        assert!(fetcher.peak_in_flight() <= MAX_CONCURRENT_FETCHES);
        assert!(fetcher.peak_in_flight() > 1);
    }

    #[tokio::test]
    async fn test_placeholder_and_error_pages_are_misses() {
        let fetcher = MockFetcher::new()
            .with_page(
                format!("{BASE}/mptrack/18th-lok-sabha/mahua-moitra"),
                fixtures::placeholder_profile(),
            )
            .with_page(
                format!("{BASE}/mptrack/18th-lok-sabha/mahua-moitra-1"),
                fixtures::not_found_page(),
            );
        let limiter = Semaphore::new(MAX_CONCURRENT_FETCHES);
        let candidates = plan("Mahua Moitra", Role::Mp);

        let report = ProbeScheduler::new(&fetcher, &limiter)
            .run(&candidates, Role::Mp)
            .await;

        assert!(report.hit.is_none());
        assert_eq!(report.tiers_run, 6);
        assert_eq!(report.urls_checked, 12);
        assert_eq!(report.misses, 2);
        assert_eq!(report.errors, 10);
    }

    #[test]
    fn test_evaluate_outcomes() {
        let url = "http://tracker.test/mptrack/18th-lok-sabha/x";
        assert!(matches!(
            evaluate(&fixtures::mp_profile("X Y"), Role::Mp, url),
            ProbeOutcome::Hit(_)
        ));
        assert_eq!(
            evaluate(&fixtures::placeholder_profile(), Role::Mp, url),
            ProbeOutcome::Miss(MissReason::NameUnresolved)
        );
        assert_eq!(
            evaluate(&fixtures::mla_profile("X Y"), Role::Mp, url),
            ProbeOutcome::Miss(MissReason::NotAProfile)
        );
    }
}
