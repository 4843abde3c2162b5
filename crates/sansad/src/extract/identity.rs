use scraper::{Html, Selector};

use super::first_text;
use crate::types::{MemberProfile, Role};

struct FieldRule {
    mp: &'static str,
    mla: Option<&'static str>,
}

impl FieldRule {
    const fn shared(css: &'static str) -> Self {
        Self { mp: css, mla: None }
    }

    const fn split(mp: &'static str, mla: &'static str) -> Self {
        Self { mp, mla: Some(mla) }
    }

    fn selector(&self, role: Role) -> &'static str {
        match role {
            Role::Mp => self.mp,
            Role::Mla => self.mla.unwrap_or(self.mp),
        }
    }
}

const NAME: FieldRule = FieldRule::split("div.mp-name h1", "div.mla-name h1");
const IMAGE: FieldRule = FieldRule::shared("div.member-image img");
const STATE: FieldRule = FieldRule::shared("div.member-state .field-item");
const CONSTITUENCY: FieldRule = FieldRule::split(
    "div.mp-constituency .field-item",
    "div.mla-constituency .field-item",
);
const PARTY: FieldRule = FieldRule::shared("div.member-party .field-item");
const TERM_START: FieldRule = FieldRule::shared("div.term-start .field-item");
const TERM_END: FieldRule = FieldRule::shared("div.term-end .field-item");
const NO_OF_TERMS: FieldRule = FieldRule::shared("div.no-of-terms .field-item");
const AGE: FieldRule = FieldRule::shared("div.member-age .field-item");
const GENDER: FieldRule = FieldRule::shared("div.member-gender .field-item");
const EDUCATION: FieldRule = FieldRule::shared("div.member-education .field-item");

fn image_src(document: &Html, role: Role, page_url: &str) -> Option<String> {
    let selector = Selector::parse(IMAGE.selector(role)).ok()?;
    let src = document
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())?;
    Some(absolute_url(src, page_url))
}

fn origin(url: &str) -> &str {
    let Some(scheme_end) = url.find("://") else {
        return "";
    };
    let rest = &url[scheme_end + 3..];
    match rest.find('/') {
        Some(path_start) => &url[..scheme_end + 3 + path_start],
        None => url,
    }
}

fn absolute_url(src: &str, page_url: &str) -> String {
    if src.starts_with("http://") || src.starts_with("https://") {
        src.to_string()
    } else if let Some(rest) = src.strip_prefix("//") {
        let scheme = page_url.split("://").next().unwrap_or("https");
        format!("{}://{}", scheme, rest)
    } else {
        format!("{}/{}", origin(page_url), src.trim_start_matches('/'))
    }
}

pub(super) fn fill(document: &Html, role: Role, page_url: &str, profile: &mut MemberProfile) {
    let root = document.root_element();
    let text_fields: [(&FieldRule, &mut String); 10] = [
        (&NAME, &mut profile.name),
        (&STATE, &mut profile.state),
        (&CONSTITUENCY, &mut profile.constituency),
        (&PARTY, &mut profile.party),
        (&TERM_START, &mut profile.term_start),
        (&TERM_END, &mut profile.term_end),
        (&NO_OF_TERMS, &mut profile.no_of_terms),
        (&AGE, &mut profile.age),
        (&GENDER, &mut profile.gender),
        (&EDUCATION, &mut profile.education),
    ];

    for (rule, slot) in text_fields {
        if let Some(value) = first_text(root, rule.selector(role)) {
            *slot = value;
        }
    }

    if let Some(src) = image_src(document, role, page_url) {
        profile.image = src;
    }
}
