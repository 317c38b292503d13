//! Query construction — maps a normalized profile onto JSearch search parameters.

use serde::Serialize;

use crate::search::normalize::NormalizedProfile;

pub const FALLBACK_QUERY: &str = "software developer";
pub const DEFAULT_COUNTRY_CODE: &str = "US";
const QUERY_SEPARATOR: &str = " OR ";

/// Country display names (as picked in the profile wizard) to ISO 3166-1 alpha-2.
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("United States", "US"),
    ("Canada", "CA"),
    ("United Kingdom", "GB"),
    ("Australia", "AU"),
    ("Germany", "DE"),
    ("India", "IN"),
    ("France", "FR"),
    ("Netherlands", "NL"),
    ("Ireland", "IE"),
    ("Singapore", "SG"),
    ("New Zealand", "NZ"),
];

/// JSearch `employment_types` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contractor,
}

impl EmploymentType {
    pub fn as_str(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "FULLTIME",
            EmploymentType::PartTime => "PARTTIME",
            EmploymentType::Contractor => "CONTRACTOR",
        }
    }
}

/// Profile `workType` values (lower-cased) to the employment types they search.
const WORK_TYPES: &[(&str, &[EmploymentType])] = &[
    ("full-time", &[EmploymentType::FullTime]),
    ("fulltime", &[EmploymentType::FullTime]),
    ("part-time", &[EmploymentType::PartTime]),
    ("parttime", &[EmploymentType::PartTime]),
    ("contract", &[EmploymentType::Contractor]),
    (
        "flexible",
        &[EmploymentType::FullTime, EmploymentType::PartTime],
    ),
];

/// JSearch `date_posted` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePosted {
    Week,
    Month,
}

impl DatePosted {
    pub fn as_str(self) -> &'static str {
        match self {
            DatePosted::Week => "week",
            DatePosted::Month => "month",
        }
    }
}

/// Search parameters derived from a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query_string: String,
    /// Comma-joined, e.g. `FULLTIME,PARTTIME`.
    pub employment_types: String,
    pub country_code: &'static str,
    pub date_posted: DatePosted,
}

/// Pure mapping: the same profile always yields the same query.
pub fn build_query(profile: &NormalizedProfile) -> SearchQuery {
    SearchQuery {
        query_string: query_string(profile),
        employment_types: employment_types(profile.work_type.as_deref()),
        country_code: country_code(&profile.target_countries),
        date_posted: date_posted(profile.availability.as_deref()),
    }
}

/// Roles, then skills, then industries, OR-joined. Falls back to the
/// precomputed searchable text, then to a generic query.
pub fn query_string(profile: &NormalizedProfile) -> String {
    let mut parts: Vec<&str> = profile
        .job_roles
        .iter()
        .chain(&profile.skills)
        .chain(&profile.industries)
        .map(String::as_str)
        .filter(|part| !part.trim().is_empty())
        .collect();

    if parts.is_empty() {
        parts.extend(
            [&profile.searchable_roles, &profile.searchable_skills]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .filter(|part| !part.trim().is_empty()),
        );
    }

    if parts.is_empty() {
        return FALLBACK_QUERY.to_string();
    }
    parts.join(QUERY_SEPARATOR)
}

/// Unknown or missing work types search full-time roles.
pub fn employment_types(work_type: Option<&str>) -> String {
    let work_type = work_type.map(str::to_lowercase);
    let types = work_type
        .as_deref()
        .and_then(|wt| WORK_TYPES.iter().find(|(key, _)| *key == wt))
        .map(|(_, types)| *types)
        .unwrap_or(&[EmploymentType::FullTime]);

    types
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Only the first target country is searched.
pub fn country_code(target_countries: &[String]) -> &'static str {
    target_countries
        .first()
        .map(|name| name.trim())
        .and_then(|name| {
            COUNTRY_CODES
                .iter()
                .find(|(country, _)| country.eq_ignore_ascii_case(name))
        })
        .map(|(_, code)| *code)
        .unwrap_or(DEFAULT_COUNTRY_CODE)
}

pub fn date_posted(availability: Option<&str>) -> DatePosted {
    match availability {
        Some("immediate") => DatePosted::Week,
        _ => DatePosted::Month,
    }
}
