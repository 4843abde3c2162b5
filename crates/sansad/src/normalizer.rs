use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static RE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+_\-.,/]+").expect("invalid regex: separators"));

static RE_NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("invalid regex: non-alphanumeric"));

static RE_HONORIFIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:(?:dr|shri|sri|smt|prof|mr|mrs|ms|kumari|adv)\.\s*)+")
        .expect("invalid regex: honorific prefix")
});

const HONORIFICS: [&str; 10] = [
    "dr", "shri", "sri", "smt", "prof", "mr", "mrs", "ms", "kumari", "adv",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlugKind {
    Full,
    SkipMiddle,
    MiddleInitial,
    FirstLast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugCandidate {
    pub slug: String,
    pub kind: SlugKind,
}

fn is_honorific(token: &str) -> bool {
    let bare = token.trim_end_matches('.').to_lowercase();
    HONORIFICS.contains(&bare.as_str())
}

fn is_initial(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(c), Some('.'), None) if c.is_alphabetic()
    )
}

/// Drops honorifics and leading initials such as "S." while another token
/// remains behind them.
fn strip_prefixes(raw: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = raw
        .split(|c: char| c.is_whitespace() || c == '+' || c == '_')
        .filter(|t| !t.is_empty())
        .collect();

    while let Some(first) = tokens.first() {
        if is_honorific(first) || (is_initial(first) && tokens.len() > 1) {
            tokens.remove(0);
        } else {
            break;
        }
    }
    tokens
}

pub fn clean_name(raw: &str) -> String {
    let unprefixed = RE_HONORIFIC_PREFIX.replace(raw, "");
    let stripped = strip_prefixes(&unprefixed).join(" ");
    let spaced = RE_SEPARATORS.replace_all(&stripped, " ").to_lowercase();
    let alnum = RE_NON_ALNUM.replace_all(&spaced, "");
    alnum.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn slug_candidates(raw: &str) -> Vec<SlugCandidate> {
    let cleaned = clean_name(raw);
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    let Some((first, rest)) = parts.split_first() else {
        return Vec::new();
    };

    let mut generated = vec![(parts.join("-"), SlugKind::Full)];

    if let Some(last) = rest.last() {
        if parts.len() >= 3 {
            generated.push((format!("{}-{}", first, last), SlugKind::SkipMiddle));

            let initial: String = parts[1].chars().take(1).collect();
            generated.push((
                format!("{}-{}-{}", first, initial, last),
                SlugKind::MiddleInitial,
            ));
        }
        generated.push((format!("{}-{}", first, last), SlugKind::FirstLast));
    }

    let mut seen = HashSet::new();
    generated
        .into_iter()
        .filter(|(slug, _)| seen.insert(slug.clone()))
        .map(|(slug, kind)| SlugCandidate { slug, kind })
        .collect()
}
