use scraper::{ElementRef, Html, Selector};

use super::{
    HEADINGS, elem_text, enclosing_section, first_text, is_heading, normalize_whitespace,
    section_after,
};
use crate::types::{MemberProfile, NO_BILLS, NOT_AVAILABLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricGroup {
    Attendance,
    Debates,
    Questions,
    PrivateMemberBills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricVariant {
    Member,
    NationalAverage,
    StateAverage,
}

impl MetricGroup {
    pub const ALL: [MetricGroup; 4] = [
        MetricGroup::Attendance,
        MetricGroup::Debates,
        MetricGroup::Questions,
        MetricGroup::PrivateMemberBills,
    ];

    fn container(&self) -> &'static str {
        match self {
            MetricGroup::Attendance => "div.attendance-block",
            MetricGroup::Debates => "div.debates-block",
            MetricGroup::Questions => "div.questions-block",
            MetricGroup::PrivateMemberBills => "div.pmb-block",
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            MetricGroup::Attendance => "attendance",
            MetricGroup::Debates => "debates",
            MetricGroup::Questions => "questions",
            MetricGroup::PrivateMemberBills => "private member",
        }
    }

    pub fn sentinel(&self) -> &'static str {
        match self {
            MetricGroup::PrivateMemberBills => NO_BILLS,
            _ => NOT_AVAILABLE,
        }
    }
}

impl MetricVariant {
    pub const ALL: [MetricVariant; 3] = [
        MetricVariant::Member,
        MetricVariant::NationalAverage,
        MetricVariant::StateAverage,
    ];

    fn field_class(&self) -> &'static str {
        match self {
            MetricVariant::Member => ".member-value",
            MetricVariant::NationalAverage => ".national-value",
            MetricVariant::StateAverage => ".state-value",
        }
    }

    fn position(&self) -> usize {
        match self {
            MetricVariant::Member => 0,
            MetricVariant::NationalAverage => 1,
            MetricVariant::StateAverage => 2,
        }
    }

    fn captions(&self) -> &'static [&'static str] {
        match self {
            MetricVariant::Member => &["selected mp", "selected mla", "selected member"],
            MetricVariant::NationalAverage => &["national average"],
            MetricVariant::StateAverage => &["state average"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetricStrategy {
    FieldSelector,
    Positional,
    CaptionLabel,
}

const METRIC_STRATEGIES: [MetricStrategy; 3] = [
    MetricStrategy::FieldSelector,
    MetricStrategy::Positional,
    MetricStrategy::CaptionLabel,
];

impl MetricStrategy {
    fn apply(&self, document: &Html, group: MetricGroup, variant: MetricVariant) -> Option<String> {
        match self {
            MetricStrategy::FieldSelector => first_text(
                document.root_element(),
                &format!("{} {}", group.container(), variant.field_class()),
            ),
            MetricStrategy::Positional => {
                let selector =
                    Selector::parse(&format!("{} .metric-item", group.container())).ok()?;
                document
                    .select(&selector)
                    .nth(variant.position())
                    .map(|e| normalize_whitespace(&elem_text(e)))
                    .filter(|s| !s.is_empty())
            }
            MetricStrategy::CaptionLabel => caption_scopes(document, group)
                .into_iter()
                .find_map(|scope| value_by_caption(scope, variant)),
        }
    }
}

/// Where to look for caption labels: the group's container when the page has
/// one, otherwise what follows a heading naming the group up to the next
/// heading, then the heading's own section if it names nothing else.
fn caption_scopes(document: &Html, group: MetricGroup) -> Vec<ElementRef<'_>> {
    if let Ok(selector) = Selector::parse(group.container())
        && let Some(container) = document.select(&selector).next()
    {
        return vec![container];
    }

    let Ok(headings) = Selector::parse(HEADINGS) else {
        return Vec::new();
    };
    let mut scopes = Vec::new();
    for heading in document
        .select(&headings)
        .filter(|h| elem_text(*h).to_lowercase().contains(group.keyword()))
    {
        scopes.extend(section_after(heading));
        if let Some(section) = enclosing_section(heading)
            && section.select(&headings).count() == 1
        {
            scopes.push(section);
        }
    }
    scopes
}

fn is_leaf(element: ElementRef) -> bool {
    element.children().all(|c| !c.value().is_element())
}

fn value_by_caption(scope: ElementRef, variant: MetricVariant) -> Option<String> {
    let selector = Selector::parse("*").ok()?;

    let labels = std::iter::once(scope).chain(scope.select(&selector));
    for label in labels.filter(|e| is_leaf(*e)) {
        let text = normalize_whitespace(&elem_text(label));
        let lower = text.to_lowercase();
        let Some(caption) = variant.captions().iter().find(|c| lower.starts_with(**c)) else {
            continue;
        };

        let rest = text
            .get(caption.len()..)
            .unwrap_or_default()
            .trim_start_matches([':', ' '])
            .trim();
        if !rest.is_empty() {
            return Some(rest.to_string());
        }

        let sibling = label
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .take_while(|e| !is_heading(*e))
            .map(|e| normalize_whitespace(&elem_text(e)))
            .find(|s| !s.is_empty());
        if sibling.is_some() {
            return sibling;
        }
    }
    None
}

fn resolve(document: &Html, group: MetricGroup, variant: MetricVariant) -> Option<String> {
    METRIC_STRATEGIES
        .iter()
        .find_map(|strategy| strategy.apply(document, group, variant))
}

fn slot(profile: &mut MemberProfile, group: MetricGroup, variant: MetricVariant) -> &mut String {
    use MetricGroup::*;
    use MetricVariant::*;

    match (group, variant) {
        (Attendance, Member) => &mut profile.attendance,
        (Attendance, NationalAverage) => &mut profile.national_attendance_average,
        (Attendance, StateAverage) => &mut profile.state_attendance_average,
        (Debates, Member) => &mut profile.debates,
        (Debates, NationalAverage) => &mut profile.national_debates_average,
        (Debates, StateAverage) => &mut profile.state_debates_average,
        (Questions, Member) => &mut profile.questions,
        (Questions, NationalAverage) => &mut profile.national_questions_average,
        (Questions, StateAverage) => &mut profile.state_questions_average,
        (PrivateMemberBills, Member) => &mut profile.private_member_bills,
        (PrivateMemberBills, NationalAverage) => &mut profile.national_pmb_average,
        (PrivateMemberBills, StateAverage) => &mut profile.state_pmb_average,
    }
}

pub(super) fn fill(document: &Html, profile: &mut MemberProfile) -> bool {
    let mut any = false;
    for group in MetricGroup::ALL {
        for variant in MetricVariant::ALL {
            let value = resolve(document, group, variant);
            any |= value.is_some();
            *slot(profile, group, variant) = value.unwrap_or_else(|| group.sentinel().to_string());
        }
    }
    any
}
