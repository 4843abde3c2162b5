use crate::config::MIN_PROFILE_BODY_LEN;
use crate::types::Role;

const ERROR_MARKERS: [&str; 3] = ["page not found", "404", "no member found"];

const MP_INDICATORS: [&str; 6] = [
    "mptrack",
    "mp-profile",
    "lok sabha",
    "attendance",
    "debates",
    "private member bills",
];
const MP_MIN_INDICATORS: usize = 2;

const MLA_INDICATORS: [&str; 3] = ["mlatrack", "mla-profile", "legislative assembly"];
const MLA_MIN_INDICATORS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageClass {
    Profile,
    ErrorPage,
    Indeterminate,
}

pub fn classify(html: &str, role: Role) -> PageClass {
    if html.len() < MIN_PROFILE_BODY_LEN {
        return PageClass::ErrorPage;
    }

    let lower = html.to_lowercase();
    if ERROR_MARKERS.iter().any(|m| lower.contains(m)) {
        return PageClass::ErrorPage;
    }

    let (indicators, required): (&[&str], usize) = match role {
        Role::Mp => (&MP_INDICATORS, MP_MIN_INDICATORS),
        Role::Mla => (&MLA_INDICATORS, MLA_MIN_INDICATORS),
    };
    let present = indicators.iter().filter(|i| lower.contains(*i)).count();

    if present >= required {
        PageClass::Profile
    } else {
        PageClass::Indeterminate
    }
}

pub fn is_profile_page(html: &str, role: Role) -> bool {
    classify(html, role) == PageClass::Profile
}
