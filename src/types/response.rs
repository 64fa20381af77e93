// src/types/response.rs
//! Wire payloads exchanged with the scoring service

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

use crate::types::profile::{new_entry_id, Education, Experience, Profile};

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub job_title: String,
    /// Skills joined with `|`.
    pub key_skills: String,
}

impl PredictRequest {
    pub fn new(job_title: &str, skills: &[String]) -> Self {
        Self {
            job_title: job_title.to_string(),
            key_skills: skills.join("|"),
        }
    }
}

/// Error body some endpoints send alongside a failure status.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
}

// ===== Résumé parsing =====

#[derive(Debug, Default, Deserialize)]
pub struct ResumeParseResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub experience: Vec<ResumeExperience>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub education: Vec<ResumeEducation>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub career_goals: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResumeExperience {
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResumeEducation {
    #[serde(default, deserialize_with = "lenient_text")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub year: Option<String>,
}

/// Strings pass through, numbers and booleans are rendered as text and
/// anything else (objects, lists, `null`) is treated as missing.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Accept a JSON array, keeping only the elements that parse as `T`.
/// Anything that is not an array (including `null`) becomes empty.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

impl ResumeParseResponse {
    /// Map the parsed résumé into a profile, assigning fresh entry ids.
    pub fn into_profile(self) -> Profile {
        let mut profile = Profile {
            full_name: self.full_name.unwrap_or_default().trim().to_string(),
            email: self.email.unwrap_or_default().trim().to_string(),
            skills: self.skills,
            experience: self
                .experience
                .into_iter()
                .map(|exp| Experience {
                    id: new_entry_id(),
                    job_title: exp.job_title.unwrap_or_default(),
                    company: exp.company.unwrap_or_default(),
                    duration: exp.duration.unwrap_or_default(),
                    description: Some(exp.description.unwrap_or_default()),
                })
                .collect(),
            education: self
                .education
                .into_iter()
                .map(|edu| Education {
                    id: new_entry_id(),
                    degree: edu.degree.unwrap_or_default(),
                    institution: edu.institution.unwrap_or_default(),
                    year: edu.year.unwrap_or_default(),
                })
                .collect(),
            career_goals: self.career_goals.unwrap_or_default(),
            resume_url: None,
        };
        profile.dedup_skills();
        profile
    }
}
