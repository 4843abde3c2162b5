use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{HEADINGS, elem_text, enclosing_section, normalize_whitespace, section_after};
use crate::types::MemberProfile;

static RE_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?\s*%").expect("invalid regex: percent"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActivityTable {
    Attendance,
    Debates,
    Questions,
}

impl ActivityTable {
    const ALL: [ActivityTable; 3] = [
        ActivityTable::Attendance,
        ActivityTable::Debates,
        ActivityTable::Questions,
    ];

    fn known_ids(&self) -> &'static [&'static str] {
        match self {
            ActivityTable::Attendance => &[
                "attendance-table",
                "mp-attendance-table",
                "block-views-mp-attendance",
            ],
            ActivityTable::Debates => &[
                "debates-table",
                "mp-debates-table",
                "block-views-mp-debates",
            ],
            ActivityTable::Questions => &[
                "questions-table",
                "mp-questions-table",
                "block-views-mp-questions",
            ],
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            ActivityTable::Attendance => "attendance",
            ActivityTable::Debates => "debate",
            ActivityTable::Questions => "question",
        }
    }

    fn columns(&self) -> &'static [&'static str] {
        match self {
            ActivityTable::Attendance => &["session", "attendance"],
            ActivityTable::Debates => &["date", "debate"],
            ActivityTable::Questions => &["date", "ministry"],
        }
    }

    fn heading_matches(&self, heading: &str) -> bool {
        let lower = heading.to_lowercase();
        lower.contains(self.keyword())
            || (*self == ActivityTable::Attendance && RE_PERCENT.is_match(&lower))
    }

    fn slot<'p>(&self, profile: &'p mut MemberProfile) -> &'p mut String {
        match self {
            ActivityTable::Attendance => &mut profile.attendance_table,
            ActivityTable::Debates => &mut profile.debates_table,
            ActivityTable::Questions => &mut profile.questions_table,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableStrategy {
    KnownId,
    Heading,
    IdSubstring,
    HeaderColumns,
}

const TABLE_STRATEGIES: [TableStrategy; 4] = [
    TableStrategy::KnownId,
    TableStrategy::Heading,
    TableStrategy::IdSubstring,
    TableStrategy::HeaderColumns,
];

fn sel(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn is_table(element: ElementRef) -> bool {
    element.value().name() == "table"
}

fn has_rows(table: ElementRef) -> bool {
    sel("td").is_some_and(|td| table.select(&td).next().is_some())
}

fn table_within(element: ElementRef) -> Option<ElementRef> {
    if is_table(element) {
        return has_rows(element).then_some(element);
    }
    let tables = sel("table")?;
    element.select(&tables).find(|t| has_rows(*t))
}

impl TableStrategy {
    fn apply<'d>(&self, document: &'d Html, kind: ActivityTable) -> Option<ElementRef<'d>> {
        match self {
            TableStrategy::KnownId => kind.known_ids().iter().find_map(|id| {
                let selector = sel(&format!("#{}", id))?;
                document.select(&selector).find_map(table_within)
            }),
            TableStrategy::Heading => {
                let headings = sel(HEADINGS)?;
                document
                    .select(&headings)
                    .filter(|h| kind.heading_matches(&elem_text(*h)))
                    .find_map(|h| table_near_heading(h, kind))
            }
            TableStrategy::IdSubstring => {
                let keyword = kind.keyword();
                let selector = sel(&format!("[id*=\"{keyword}\"], [class*=\"{keyword}\"]"))?;
                document.select(&selector).find_map(table_within)
            }
            TableStrategy::HeaderColumns => {
                let tables = sel("table")?;
                let header_cells = sel("th")?;
                document.select(&tables).filter(|t| has_rows(*t)).find(|table| {
                    let headers: Vec<String> = table
                        .select(&header_cells)
                        .map(|th| normalize_whitespace(&elem_text(th)).to_lowercase())
                        .collect();
                    kind.columns()
                        .iter()
                        .all(|col| headers.iter().any(|h| h.contains(col)))
                })
            }
        }
    }
}

/// A table between the heading and the next one, else one inside the
/// heading's enclosing section when no other kind's heading shares it.
fn table_near_heading(heading: ElementRef, kind: ActivityTable) -> Option<ElementRef> {
    let following = section_after(heading).find_map(table_within);
    if following.is_some() {
        return following;
    }

    let section = enclosing_section(heading)?;
    let headings = sel(HEADINGS)?;
    let shared = section.select(&headings).any(|h| {
        let text = elem_text(h);
        ActivityTable::ALL
            .iter()
            .any(|other| *other != kind && other.heading_matches(&text))
    });
    if shared {
        return None;
    }
    table_within(section)
}

fn discover(document: &Html, kind: ActivityTable) -> Option<String> {
    TABLE_STRATEGIES
        .iter()
        .find_map(|strategy| strategy.apply(document, kind))
        .map(|table| table.html())
}

pub(super) fn fill(document: &Html, profile: &mut MemberProfile) -> bool {
    let mut any = false;
    for kind in ActivityTable::ALL {
        if let Some(markup) = discover(document, kind) {
            *kind.slot(profile) = markup;
            any = true;
        }
    }
    any
}
