// src/types/job.rs
use serde::{Deserialize, Serialize};

/// Canonical job record used for ranking, display and the recommendation cache.
///
/// Ids are positional within the batch that produced them and are only unique
/// inside one rendered list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary: String,
    /// Experience required, e.g. "3 - 6 yrs".
    pub experience: String,
    pub skills: Vec<String>,
    /// Match strength in [0, 1]; `None` when the record was not scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Job {
    /// Score used for ordering only. Unscored jobs compare as 0.
    pub fn sort_score(&self) -> f64 {
        self.confidence.unwrap_or(0.0)
    }
}
