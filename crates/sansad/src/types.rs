use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_BILLS: &str = "0";

#[derive(Debug, thiserror::Error)]
#[error("Invalid role '{0}'. Accepted values: 'mp', 'mla'")]
pub struct RoleParseError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Role {
    #[serde(rename = "MP", alias = "mp")]
    Mp,
    #[serde(rename = "MLA", alias = "mla")]
    Mla,
}

impl Role {
    /// Path segment the tracker site files this role's profiles under.
    pub fn track(&self) -> &'static str {
        match self {
            Role::Mp => "mptrack",
            Role::Mla => "mlatrack",
        }
    }

    pub fn opposite(&self) -> Role {
        match self {
            Role::Mp => Role::Mla,
            Role::Mla => Role::Mp,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Role::Mp => "MP",
            Role::Mla => "MLA",
        }
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mp" | "MP" | "Mp" => Ok(Role::Mp),
            "mla" | "MLA" | "Mla" => Ok(Role::Mla),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NameQuery {
    pub name: String,
    pub role: Role,
    /// Advisory only; never used to narrow the candidate set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl NameQuery {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            constituency: None,
            state: None,
        }
    }

    pub fn with_constituency(mut self, constituency: impl Into<String>) -> Self {
        self.constituency = Some(constituency.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub member_type: Role,

    pub name: String,
    pub image: String,
    pub state: String,
    pub constituency: String,
    pub party: String,

    pub term_start: String,
    pub term_end: String,
    pub no_of_terms: String,

    pub age: String,
    pub gender: String,
    pub education: String,

    pub attendance: String,
    pub national_attendance_average: String,
    pub state_attendance_average: String,
    pub debates: String,
    pub national_debates_average: String,
    pub state_debates_average: String,
    pub questions: String,
    pub national_questions_average: String,
    pub state_questions_average: String,
    pub private_member_bills: String,
    pub national_pmb_average: String,
    pub state_pmb_average: String,

    pub attendance_table: String,
    pub debates_table: String,
    pub questions_table: String,

    pub note: String,
    pub data_available: bool,
}

impl MemberProfile {
    pub fn empty(member_type: Role) -> Self {
        Self {
            member_type,
            name: UNKNOWN.into(),
            image: UNKNOWN.into(),
            state: UNKNOWN.into(),
            constituency: UNKNOWN.into(),
            party: UNKNOWN.into(),
            term_start: NOT_AVAILABLE.into(),
            term_end: NOT_AVAILABLE.into(),
            no_of_terms: NOT_AVAILABLE.into(),
            age: NOT_AVAILABLE.into(),
            gender: NOT_AVAILABLE.into(),
            education: NOT_AVAILABLE.into(),
            attendance: NOT_AVAILABLE.into(),
            national_attendance_average: NOT_AVAILABLE.into(),
            state_attendance_average: NOT_AVAILABLE.into(),
            debates: NOT_AVAILABLE.into(),
            national_debates_average: NOT_AVAILABLE.into(),
            state_debates_average: NOT_AVAILABLE.into(),
            questions: NOT_AVAILABLE.into(),
            national_questions_average: NOT_AVAILABLE.into(),
            state_questions_average: NOT_AVAILABLE.into(),
            private_member_bills: NO_BILLS.into(),
            national_pmb_average: NO_BILLS.into(),
            state_pmb_average: NO_BILLS.into(),
            attendance_table: String::new(),
            debates_table: String::new(),
            questions_table: String::new(),
            note: String::new(),
            data_available: false,
        }
    }

    pub fn has_name(&self) -> bool {
        self.name != UNKNOWN && !self.name.is_empty()
    }
}

impl Display for MemberProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({})", self.name, self.member_type)?;
        writeln!(f, "  Party:        {}", self.party)?;
        writeln!(f, "  Constituency: {}, {}", self.constituency, self.state)?;
        writeln!(
            f,
            "  Term:         {} – {} ({} term(s))",
            self.term_start, self.term_end, self.no_of_terms
        )?;
        writeln!(
            f,
            "  Personal:     age {}, {}, {}",
            self.age, self.gender, self.education
        )?;
        writeln!(f, "  {:<22} {:>8} {:>10} {:>8}", "", "Member", "National", "State")?;
        let rows = [
            (
                "Attendance",
                &self.attendance,
                &self.national_attendance_average,
                &self.state_attendance_average,
            ),
            (
                "Debates",
                &self.debates,
                &self.national_debates_average,
                &self.state_debates_average,
            ),
            (
                "Questions",
                &self.questions,
                &self.national_questions_average,
                &self.state_questions_average,
            ),
            (
                "Private member bills",
                &self.private_member_bills,
                &self.national_pmb_average,
                &self.state_pmb_average,
            ),
        ];
        for (label, own, national, state) in rows {
            writeln!(f, "  {:<22} {:>8} {:>10} {:>8}", label, own, national, state)?;
        }
        let tables = [
            ("attendance", &self.attendance_table),
            ("debates", &self.debates_table),
            ("questions", &self.questions_table),
        ]
        .iter()
        .filter(|(_, t)| !t.is_empty())
        .map(|(n, _)| *n)
        .collect::<Vec<_>>();
        if !tables.is_empty() {
            writeln!(f, "  Activity tables: {}", tables.join(", "))?;
        }
        if !self.note.is_empty() {
            writeln!(f, "  Note: {}", self.note)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub found: bool,
    pub searched_as: Role,
    pub found_as: Option<Role>,
    pub source_url: Option<String>,
    pub urls_checked: usize,
    pub probed_urls: Vec<String>,
    pub elapsed_ms: u64,
    pub resolved_at: DateTime<Utc>,
    pub query: NameQuery,
    pub profile: MemberProfile,
}

impl ResolutionResult {
    pub fn found_under_other_role(&self) -> bool {
        self.found_as.is_some_and(|role| role != self.searched_as)
    }
}

impl Display for ResolutionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.found {
            writeln!(
                f,
                "No {} profile found for '{}' ({} URL(s) checked in {} ms)",
                self.searched_as, self.query.name, self.urls_checked, self.elapsed_ms
            )?;
            return Ok(());
        }
        if let Some(found_as) = self.found_as
            && self.found_under_other_role()
        {
            writeln!(
                f,
                "Note: searched as {} but found as {}",
                self.searched_as, found_as
            )?;
        }
        if let Some(url) = &self.source_url {
            writeln!(f, "Source: {}", url)?;
        }
        writeln!(
            f,
            "Checked {} URL(s) in {} ms",
            self.urls_checked, self.elapsed_ms
        )?;
        writeln!(f)?;
        write!(f, "{}", self.profile)
    }
}
