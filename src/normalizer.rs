// src/normalizer.rs
//! Reshape job records from any historical API shape into [`Job`].
//!
//! Three overlapping shapes are accepted:
//! - canonical: `title`, `company`, `skills: [..]`, `confidence`
//! - catalog: `"Job Title"`, `"Key Skills": "A| B"`, `"Industry"`, ...
//! - prediction: catalog keys plus a `details` object carrying
//!   `Company`, `Description`, `"Job Salary"`, `confidence`, ...
//!
//! Every field is resolved independently through its own fallback chain, so a
//! missing or mistyped field degrades to empty without affecting the rest of
//! the record or the batch.

use serde_json::{Map, Value};

use crate::types::Job;

const DETAILS: &str = "details";

/// Where a field may be found, tried in order.
enum Source {
    Top(&'static str),
    Nested(&'static str),
}

use self::Source::{Nested, Top};

const TITLE: &[Source] = &[Top("title"), Top("Job Title"), Nested("Job Title")];

// Industry is the legacy stand-in for company on catalog records.
const COMPANY: &[Source] = &[
    Top("company"),
    Top("Company"),
    Nested("Company"),
    Top("Industry"),
    Nested("Industry"),
];

const LOCATION: &[Source] = &[
    Top("location"),
    Top("Location"),
    Nested("Location"),
    Top("Functional Area"),
    Nested("Functional Area"),
];

const DESCRIPTION: &[Source] = &[
    Top("description"),
    Top("Description"),
    Nested("Description"),
    Top("Role Category"),
    Nested("Role Category"),
];

const SALARY: &[Source] = &[Top("salary"), Top("Job Salary"), Nested("Job Salary")];

const EXPERIENCE: &[Source] = &[
    Top("experience"),
    Top("Job Experience Required"),
    Nested("Job Experience Required"),
];

const KEY_SKILLS: &[Source] = &[Top("Key Skills"), Nested("Key Skills")];

const CONFIDENCE: &[Source] = &[
    Top("confidence"),
    Top("confidenceScore"),
    Nested("confidence"),
];

/// Normalize a whole batch. Records without an id get their position.
pub fn normalize_batch(records: &[Value]) -> Vec<Job> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_job(record, index))
        .collect()
}

/// Normalize one record; `index` is its position in the batch.
pub fn normalize_job(record: &Value, index: usize) -> Job {
    let empty = Map::new();
    let top = record.as_object().unwrap_or(&empty);
    let details = top.get(DETAILS).and_then(Value::as_object);

    Job {
        id: explicit_id(top).unwrap_or_else(|| index.to_string()),
        title: text(top, details, TITLE),
        company: text(top, details, COMPANY),
        location: text(top, details, LOCATION),
        description: text(top, details, DESCRIPTION),
        salary: text(top, details, SALARY),
        experience: text(top, details, EXPERIENCE),
        skills: skills(top, details),
        confidence: confidence(top, details),
    }
}

fn lookup<'a>(
    top: &'a Map<String, Value>,
    details: Option<&'a Map<String, Value>>,
    source: &Source,
) -> Option<&'a Value> {
    match source {
        Top(key) => top.get(*key),
        Nested(key) => details.and_then(|d| d.get(*key)),
    }
}

/// First non-empty string along the chain, or empty.
fn text(
    top: &Map<String, Value>,
    details: Option<&Map<String, Value>>,
    chain: &[Source],
) -> String {
    chain
        .iter()
        .filter_map(|source| lookup(top, details, source))
        .filter_map(scalar_text)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn explicit_id(top: &Map<String, Value>) -> Option<String> {
    top.get("id")
        .and_then(scalar_text)
        .filter(|id| !id.is_empty())
}

fn skills(top: &Map<String, Value>, details: Option<&Map<String, Value>>) -> Vec<String> {
    // A pre-split list is taken as-is; numbers are kept as their text.
    if let Some(Value::Array(items)) = top.get("skills") {
        return items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect();
    }

    KEY_SKILLS
        .iter()
        .filter_map(|source| lookup(top, details, source))
        .find_map(Value::as_str)
        .map(split_key_skills)
        .unwrap_or_default()
}

/// Split a `|`-delimited skills string, trimming and dropping empty segments.
pub fn split_key_skills(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn confidence(top: &Map<String, Value>, details: Option<&Map<String, Value>>) -> Option<f64> {
    CONFIDENCE
        .iter()
        .filter_map(|source| lookup(top, details, source))
        .find_map(score)
}

fn score(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    raw.is_finite().then(|| raw.clamp(0.0, 1.0))
}
