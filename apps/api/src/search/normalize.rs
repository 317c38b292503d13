//! Profile normalization — the single boundary where the raw `skills` union is
//! resolved. Everything downstream reads `NormalizedProfile` only.

use crate::models::profile::{RawSkills, UserProfile};

/// A `UserProfile` with skills resolved into plain names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedProfile {
    pub job_roles: Vec<String>,
    pub skills: Vec<String>,
    pub industries: Vec<String>,
    pub searchable_roles: Option<String>,
    pub searchable_skills: Option<String>,
    pub work_type: Option<String>,
    pub target_countries: Vec<String>,
    pub is_remote_preferred: bool,
    pub salary_expectation: Option<f64>,
    pub availability: Option<String>,
    pub experience: Option<String>,
}

impl NormalizedProfile {
    /// Salary expectation when it is a usable positive amount.
    pub fn min_salary(&self) -> Option<f64> {
        self.salary_expectation.filter(|amount| *amount > 0.0)
    }
}

/// Total: never fails, whatever shape the stored document had.
pub fn normalize(profile: UserProfile) -> NormalizedProfile {
    let UserProfile {
        job_roles,
        skills,
        industries,
        searchable_roles,
        searchable_skills,
        work_type,
        target_countries,
        is_remote_preferred,
        salary_expectation,
        availability,
        experience,
    } = profile;

    NormalizedProfile {
        job_roles,
        skills: normalize_skills(skills),
        industries,
        searchable_roles,
        searchable_skills,
        work_type,
        target_countries,
        is_remote_preferred: is_remote_preferred.unwrap_or(false),
        salary_expectation,
        availability,
        experience,
    }
}

fn normalize_skills(skills: Option<RawSkills>) -> Vec<String> {
    match skills {
        Some(RawSkills::List(items)) => items
            .iter()
            .filter_map(|skill| skill.name())
            .map(str::to_string)
            .collect(),
        Some(RawSkills::Text(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}
