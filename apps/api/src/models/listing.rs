use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::models::de;

/// One job listing from the JSearch `data` array.
///
/// Kept as the upstream JSON object so every field the API sends is passed
/// back to callers untouched. Typed accessors cover the fields scoring reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobListing(Map<String, Value>);

impl JobListing {
    pub fn title(&self) -> &str {
        self.str_field("job_title").unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.str_field("job_description").unwrap_or("")
    }

    pub fn employer_name(&self) -> Option<&str> {
        self.str_field("employer_name")
    }

    /// `job_is_remote`; anything other than `true` counts as on-site.
    pub fn is_remote(&self) -> bool {
        self.0
            .get("job_is_remote")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// `job_salary_min`. Missing, null, non-numeric and non-positive values
    /// all mean the listing states no minimum.
    pub fn min_salary(&self) -> Option<f64> {
        self.0
            .get("job_salary_min")
            .and_then(de::number)
            .filter(|amount| *amount > 0.0)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Why a listing fits the user, independent of the relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReasons {
    pub salary_match: bool,
    pub location_preference: bool,
    pub experience_level: String,
}

/// A listing with the personalization fields attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredJobListing {
    #[serde(flatten)]
    pub listing: JobListing,
    pub relevance_score: u32,
    pub user_match_reasons: MatchReasons,
}

impl ScoredJobListing {
    pub fn new(mut listing: JobListing, relevance_score: u32, reasons: MatchReasons) -> Self {
        // Upstream copies of the derived keys would serialize twice.
        listing.0.remove("relevance_score");
        listing.0.remove("user_match_reasons");
        Self {
            listing,
            relevance_score,
            user_match_reasons: reasons,
        }
    }
}

/// One page of the JSearch `/search` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingsPage {
    #[serde(default, deserialize_with = "listing_array")]
    pub data: Vec<JobListing>,
    /// `status`, `request_id`, `parameters` and anything else the API returns.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Null or non-array `data` reads as empty; non-object elements are skipped.
fn listing_array<'de, D>(deserializer: D) -> Result<Vec<JobListing>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(fields) => Some(JobListing(fields)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing(value: Value) -> JobListing {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_accessors_default_when_fields_missing() {
        let job = listing(json!({}));
        assert_eq!(job.title(), "");
        assert_eq!(job.description(), "");
        assert!(job.employer_name().is_none());
        assert!(!job.is_remote());
        assert!(job.min_salary().is_none());
    }

    #[test]
    fn test_min_salary_zero_or_null_is_absent() {
        assert!(listing(json!({"job_salary_min": 0})).min_salary().is_none());
        assert!(listing(json!({"job_salary_min": null})).min_salary().is_none());
        assert_eq!(
            listing(json!({"job_salary_min": 100000})).min_salary(),
            Some(100000.0)
        );
    }

    #[test]
    fn test_scored_listing_keeps_upstream_fields() {
        let job = listing(json!({
            "job_id": "abc",
            "job_title": "Engineer",
            "relevance_score": 99
        }));
        let scored = ScoredJobListing::new(
            job,
            10,
            MatchReasons {
                salary_match: true,
                location_preference: false,
                experience_level: "entry".to_string(),
            },
        );

        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["job_id"], "abc");
        assert_eq!(value["job_title"], "Engineer");
        assert_eq!(value["relevance_score"], 10);
        assert_eq!(value["user_match_reasons"]["location_preference"], false);
        assert_eq!(value["user_match_reasons"]["experience_level"], "entry");
    }

    #[test]
    fn test_page_tolerates_null_data_and_keeps_rest() {
        let page: ListingsPage = serde_json::from_value(json!({
            "status": "OK",
            "request_id": "r-1",
            "data": null
        }))
        .unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.rest["status"], "OK");
        assert_eq!(page.rest["request_id"], "r-1");
    }

    #[test]
    fn test_page_skips_non_object_listings() {
        let page: ListingsPage = serde_json::from_value(json!({
            "data": [{"job_title": "A"}, "junk", 3]
        }))
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].title(), "A");
    }
}
