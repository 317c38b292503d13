//! Relevance scoring — pluggable, trait-based scorer that measures a normalized
//! profile against one job listing.
//!
//! Default: `KeywordRelevanceScorer` (pure-Rust, deterministic, fully testable).
//! `AppState` holds an `Arc<dyn RelevanceScorer>`.

use serde::Serialize;

use crate::models::listing::{JobListing, MatchReasons};
use crate::search::normalize::NormalizedProfile;

pub const ROLE_MATCH_POINTS: u32 = 10;
pub const SKILL_MATCH_POINTS: u32 = 5;
pub const DEFAULT_EXPERIENCE_LEVEL: &str = "entry";

/// Additive score plus the fixed-shape match reasons.
///
/// The score is a raw sum and has no upper bound; it is not a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelevanceScore {
    pub score: u32,
    pub reasons: MatchReasons,
}

/// The relevance scorer trait. Implement this to swap scoring backends without
/// touching the search pipeline or handlers.
pub trait RelevanceScorer: Send + Sync {
    fn score(&self, profile: &NormalizedProfile, job: &JobListing) -> RelevanceScore;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordRelevanceScorer
// ────────────────────────────────────────────────────────────────────────────

/// Substring scorer over the listing title and description.
///
/// Algorithm:
/// 1. Each profile job role found in the title or description → +10
/// 2. Each normalized skill found in the title or description → +5
/// 3. Blank roles/skills never match; duplicates in the profile count twice.
pub struct KeywordRelevanceScorer;

impl RelevanceScorer for KeywordRelevanceScorer {
    fn score(&self, profile: &NormalizedProfile, job: &JobListing) -> RelevanceScore {
        compute_keyword_relevance(profile, job)
    }
}

fn compute_keyword_relevance(profile: &NormalizedProfile, job: &JobListing) -> RelevanceScore {
    let haystack = JobText::new(job);

    let role_points: u32 = profile
        .job_roles
        .iter()
        .filter(|role| haystack.mentions(role))
        .map(|_| ROLE_MATCH_POINTS)
        .sum();

    let skill_points: u32 = profile
        .skills
        .iter()
        .filter(|skill| haystack.mentions(skill))
        .map(|_| SKILL_MATCH_POINTS)
        .sum();

    RelevanceScore {
        score: role_points + skill_points,
        reasons: match_reasons(profile, job),
    }
}

fn match_reasons(profile: &NormalizedProfile, job: &JobListing) -> MatchReasons {
    MatchReasons {
        salary_match: salary_matches(profile, job),
        location_preference: !profile.is_remote_preferred || job.is_remote(),
        experience_level: profile
            .experience
            .clone()
            .filter(|level| !level.is_empty())
            .unwrap_or_else(|| DEFAULT_EXPERIENCE_LEVEL.to_string()),
    }
}

/// True unless both sides state an amount and the listing pays less.
pub fn salary_matches(profile: &NormalizedProfile, job: &JobListing) -> bool {
    match (profile.min_salary(), job.min_salary()) {
        (Some(expected), Some(offered)) => offered >= expected,
        _ => true,
    }
}

/// Lower-cased title and description of one listing.
struct JobText {
    title: String,
    description: String,
}

impl JobText {
    fn new(job: &JobListing) -> Self {
        Self {
            title: job.title().to_lowercase(),
            description: job.description().to_lowercase(),
        }
    }

    fn mentions(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }
        let term = term.to_lowercase();
        self.title.contains(&term) || self.description.contains(&term)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
