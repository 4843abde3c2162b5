//! Field extraction from a validated profile page.
//!
//! Every field is looked up independently through an ordered list of
//! strategies. The first one that yields a non-empty value wins and a field
//! nobody resolves keeps its sentinel from [`MemberProfile::empty`].

mod identity;
mod metrics;
mod tables;

use scraper::{ElementRef, Html, Selector};

use crate::types::{MemberProfile, Role};

pub const DATA_NOT_AVAILABLE_NOTE: &str = "Data not available";
pub const MLA_PROVENANCE_NOTE: &str = "Activity tables are published for MPs only. \
     MLA figures are as reported on the PRS Legislative Research MLA Track.";

const DATA_NOT_AVAILABLE_BANNER: &str = "data not available";

pub(crate) fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn first_text(scope: ElementRef, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    scope
        .select(&selector)
        .map(|e| normalize_whitespace(&elem_text(e)))
        .find(|s| !s.is_empty())
}

pub(crate) const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";

pub(crate) fn is_heading(element: ElementRef) -> bool {
    matches!(
        element.value().name(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

fn contains_heading(element: ElementRef) -> bool {
    Selector::parse(HEADINGS).is_ok_and(|s| element.select(&s).next().is_some())
}

/// Element siblings after `heading`, up to the next heading or an element
/// holding one.
pub(crate) fn section_after<'a>(heading: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|e| !is_heading(*e) && !contains_heading(*e))
}

pub(crate) fn enclosing_section(heading: ElementRef) -> Option<ElementRef> {
    heading
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|p| !matches!(p.value().name(), "body" | "html"))
}

pub(crate) fn has_banner(document: &Html) -> bool {
    elem_text(document.root_element())
        .to_lowercase()
        .contains(DATA_NOT_AVAILABLE_BANNER)
}

pub fn extract_profile(html: &str, role: Role, page_url: &str) -> MemberProfile {
    let document = Html::parse_document(html);
    let mut profile = MemberProfile::empty(role);

    identity::fill(&document, role, page_url, &mut profile);
    let metrics_found = metrics::fill(&document, &mut profile);
    let banner = has_banner(&document);

    let tables_found = match role {
        Role::Mp => tables::fill(&document, &mut profile),
        Role::Mla => {
            profile.note = if banner {
                DATA_NOT_AVAILABLE_NOTE.to_string()
            } else {
                MLA_PROVENANCE_NOTE.to_string()
            };
            false
        }
    };

    profile.data_available = !banner && (metrics_found || tables_found);
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::types::{NO_BILLS, NOT_AVAILABLE, UNKNOWN};

    const MP_URL: &str = "https://prsindia.org/mptrack/18th-lok-sabha/rahul-gandhi";

    #[test]
    fn test_extract_mp_profile() {
        let html = fixtures::mp_profile("Rahul Gandhi");
        let profile = extract_profile(&html, Role::Mp, MP_URL);

        assert_eq!(profile.member_type, Role::Mp);
        assert_eq!(profile.name, "Rahul Gandhi");
        assert_eq!(
            profile.image,
            "https://prsindia.org/files/mp/rahul-gandhi.jpg"
        );
        assert_eq!(profile.state, "Uttar Pradesh");
        assert_eq!(profile.constituency, "Rae Bareli");
        assert_eq!(profile.party, "Indian National Congress");
        assert_eq!(profile.term_start, "04-Jun-2024");
        assert_eq!(profile.term_end, "In Office");
        assert_eq!(profile.no_of_terms, "5");
        assert_eq!(profile.age, "54");
        assert_eq!(profile.gender, "Male");
        assert_eq!(profile.education, "Post Graduate");

        assert_eq!(profile.attendance, "51%");
        assert_eq!(profile.national_attendance_average, "87%");
        assert_eq!(profile.state_attendance_average, "88%");
        assert_eq!(profile.debates, "7");
        assert_eq!(profile.national_debates_average, "29.4");
        assert_eq!(profile.state_debates_average, "21.6");
        assert_eq!(profile.questions, "12");
        assert_eq!(profile.national_questions_average, "63.1");
        assert_eq!(profile.state_questions_average, "58.2");
        assert_eq!(profile.private_member_bills, "1");
        assert_eq!(profile.national_pmb_average, "0.9");
        assert_eq!(profile.state_pmb_average, "0.4");

        assert!(profile.attendance_table.starts_with("<table"));
        assert!(profile.attendance_table.contains("Budget Session"));
        assert!(profile.debates_table.contains("Motion of Thanks"));
        assert!(profile.questions_table.contains("Ministry of Railways"));
        assert!(profile.questions_table.contains("<th>"));

        assert!(profile.note.is_empty());
        assert!(profile.data_available);
    }

    #[test]
    fn test_extract_mla_profile() {
        let html = fixtures::mla_profile("Atishi");
        let profile = extract_profile(&html, Role::Mla, "https://prsindia.org/mlatrack/atishi");

        assert_eq!(profile.name, "Atishi");
        assert_eq!(profile.constituency, "Kalkaji");
        assert_eq!(profile.state, "Delhi");
        assert_eq!(profile.attendance, NOT_AVAILABLE);
        assert_eq!(profile.private_member_bills, NO_BILLS);
        assert_eq!(profile.attendance_table, "");
        assert_eq!(profile.debates_table, "");
        assert_eq!(profile.questions_table, "");
        assert_eq!(profile.note, MLA_PROVENANCE_NOTE);
    }

    #[test]
    fn test_mla_banner_sets_note() {
        let html = fixtures::mla_profile_without_data("Atishi");
        let profile = extract_profile(&html, Role::Mla, "https://prsindia.org/mlatrack/atishi");

        assert_eq!(profile.note, DATA_NOT_AVAILABLE_NOTE);
        assert!(!profile.data_available);
    }

    #[test]
    fn test_name_and_constituency_follow_role() {
        let html = fixtures::mla_profile("Atishi");
        let profile = extract_profile(&html, Role::Mp, MP_URL);

        assert_eq!(profile.name, UNKNOWN);
        assert_eq!(profile.constituency, UNKNOWN);
        assert_eq!(profile.state, "Delhi");
    }

    #[test]
    fn test_garbage_keeps_every_sentinel() {
        let profile = extract_profile("<html><body><p>hello</p></body></html>", Role::Mp, MP_URL);
        assert_eq!(profile, MemberProfile::empty(Role::Mp));
    }
}
