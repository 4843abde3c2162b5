use std::collections::HashSet;
use std::fmt::Display;

use serde::Serialize;

use crate::config::{
    DISAMBIGUATION_SUFFIXES, REDUCED_CANDIDATE_CAP, REDUCED_SUFFIXES, ResolverConfig,
};
use crate::normalizer::SlugCandidate;
use crate::types::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateUrl {
    pub url: String,
    pub slug: String,
    pub session: Option<String>,
    pub suffix: &'static str,
    /// Lower runs first. Newer sessions rank above older ones and a bare
    /// slug above a suffixed one.
    pub tier: usize,
}

impl CandidateUrl {
    pub fn has_suffix(&self) -> bool {
        !self.suffix.is_empty()
    }
}

impl Display for CandidateUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[tier {}] {}", self.tier, self.url)
    }
}

fn tier_of(session_index: usize, suffix: &str) -> usize {
    session_index * 2 + usize::from(!suffix.is_empty())
}

/// Expands slugs into the ordered, deduplicated list of profile URLs to probe.
///
/// `reduced` is used for the opposite-role pass: only the newest session, a
/// shorter suffix list, and at most [`REDUCED_CANDIDATE_CAP`] URLs.
pub fn build_candidates(
    slugs: &[SlugCandidate],
    role: Role,
    reduced: bool,
    config: &ResolverConfig,
) -> Vec<CandidateUrl> {
    let suffixes: &[&'static str] = if reduced {
        &REDUCED_SUFFIXES
    } else {
        &DISAMBIGUATION_SUFFIXES
    };
    let base = config.base_url.trim_end_matches('/');

    let mut built = Vec::new();
    match role {
        Role::Mp => {
            let sessions = if reduced {
                &config.sessions[..config.sessions.len().min(1)]
            } else {
                &config.sessions[..]
            };
            for (session_index, session) in sessions.iter().enumerate() {
                for &suffix in suffixes {
                    for candidate in slugs {
                        built.push(CandidateUrl {
                            url: format!(
                                "{}/{}/{}/{}{}",
                                base,
                                role.track(),
                                session,
                                candidate.slug,
                                suffix
                            ),
                            slug: candidate.slug.clone(),
                            session: Some(session.clone()),
                            suffix,
                            tier: tier_of(session_index, suffix),
                        });
                    }
                }
            }
        }
        Role::Mla => {
            for &suffix in suffixes {
                for candidate in slugs {
                    built.push(CandidateUrl {
                        url: format!("{}/{}/{}{}", base, role.track(), candidate.slug, suffix),
                        slug: candidate.slug.clone(),
                        session: None,
                        suffix,
                        tier: tier_of(0, suffix),
                    });
                }
            }
        }
    }

    let mut seen = HashSet::new();
    built.retain(|c| seen.insert(c.url.clone()));

    if reduced {
        built.truncate(REDUCED_CANDIDATE_CAP);
    }
    built
}

pub fn tier_count(role: Role, config: &ResolverConfig) -> usize {
    match role {
        Role::Mp => config.sessions.len() * 2,
        Role::Mla => 2,
    }
}
