use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::de;

/// A profile document exactly as stored, keyed by user id.
pub type ProfileDocument = Value;

/// Typed view over a profile document.
///
/// Every field is optional and read leniently: a wrong JSON type reads as
/// absent. Building a `UserProfile` from a document never fails.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "de::string_list")]
    pub job_roles: Vec<String>,
    #[serde(default, deserialize_with = "raw_skills")]
    pub skills: Option<RawSkills>,
    #[serde(default, deserialize_with = "de::string_list")]
    pub industries: Vec<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub searchable_roles: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub searchable_skills: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub work_type: Option<String>,
    #[serde(default, deserialize_with = "de::string_list")]
    pub target_countries: Vec<String>,
    #[serde(default, deserialize_with = "de::opt_bool")]
    pub is_remote_preferred: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_number")]
    pub salary_expectation: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub availability: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub experience: Option<String>,
}

impl UserProfile {
    /// Reads the typed view out of a stored document. Non-object documents
    /// yield an empty profile.
    pub fn from_document(document: &ProfileDocument) -> Self {
        UserProfile::deserialize(document).unwrap_or_default()
    }
}

/// The `skills` field as found in stored documents.
/// Resolved into plain names once, by `search::normalize`.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSkills {
    /// Comma-separated list, e.g. `"Python, React, SQL"`.
    Text(String),
    List(Vec<RawSkill>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawSkill {
    Plain(String),
    /// `{name, preferred?}` object; `name` is `None` when missing or not a string.
    Entry { name: Option<String> },
    /// Numbers, nulls, nested arrays.
    Other,
}

impl RawSkill {
    pub fn name(&self) -> Option<&str> {
        match self {
            RawSkill::Plain(name) => Some(name),
            RawSkill::Entry { name } => name.as_deref(),
            RawSkill::Other => None,
        }
    }
}

impl From<Value> for RawSkill {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RawSkill::Plain(s),
            Value::Object(mut fields) => RawSkill::Entry {
                name: match fields.remove("name") {
                    Some(Value::String(name)) => Some(name),
                    _ => None,
                },
            },
            _ => RawSkill::Other,
        }
    }
}

fn raw_skills<'de, D>(deserializer: D) -> Result<Option<RawSkills>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(RawSkills::Text(s)),
        Value::Array(items) => Some(RawSkills::List(
            items.into_iter().map(RawSkill::from).collect(),
        )),
        _ => None,
    })
}
