// src/recommendation.rs
//! Recommendation client: catalog reads, cached recommendation reads and the
//! network write path that refreshes the cache.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::app_log;
use crate::core::{KeyValueStore, ServiceClient, RECOMMENDED_JOBS_KEY};
use crate::error::{JobMatchError, JobMatchResult};
use crate::normalizer::normalize_batch;
use crate::notify::{Notification, Notifier};
use crate::types::{Job, PredictRequest, Profile};

const FETCH_JOBS_FAILED: &str = "Failed to fetch jobs. Please try again.";
const FETCH_RECOMMENDED_FAILED: &str = "Failed to fetch recommended jobs. Please try again.";
const REQUEST_RECOMMENDED_FAILED: &str = "Failed to get job recommendations. Please try again.";
const PARSE_RESUME_FAILED: &str = "Failed to parse resume. Please try again.";

pub struct RecommendationClient {
    service: ServiceClient,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
}

impl RecommendationClient {
    pub fn new(
        service: ServiceClient,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            service,
            store,
            notifier,
        }
    }

    /// Full unranked catalog. Failures are reported and yield an empty list.
    pub async fn fetch_sample_jobs(&self) -> Vec<Job> {
        match self.service.sample_jobs().await {
            Ok(records) => {
                app_log!(info, "Fetched {} catalog jobs", records.len());
                normalize_batch(&records)
            }
            Err(e) => {
                app_log!(error, "Error fetching sample jobs: {:#}", e);
                self.notifier.notify(Notification::error(FETCH_JOBS_FAILED));
                Vec::new()
            }
        }
    }

    /// Last successful recommendation list, read from the cache only.
    ///
    /// Never touches the network. An absent or unreadable entry yields an
    /// empty list so the caller asks for an explicit refresh.
    pub async fn fetch_recommended_jobs(&self, skills: Option<&[String]>) -> Vec<Job> {
        if let Some(skills) = skills {
            app_log!(debug, "Reading recommended jobs for skills: {:?}", skills);
        }

        let cached = match self.store.get(RECOMMENDED_JOBS_KEY).await {
            Ok(cached) => cached,
            Err(e) => {
                app_log!(error, "Error reading recommended jobs cache: {:#}", e);
                self.notifier
                    .notify(Notification::error(FETCH_RECOMMENDED_FAILED));
                return Vec::new();
            }
        };

        let Some(raw) = cached else {
            app_log!(info, "No cached recommended jobs found");
            return Vec::new();
        };

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(records) => {
                app_log!(info, "Using {} cached recommended jobs", records.len());
                normalize_batch(&records)
            }
            Err(e) => {
                app_log!(warn, "Ignoring corrupt recommended jobs cache: {}", e);
                Vec::new()
            }
        }
    }

    /// Score jobs for `job_title` and `skills`, then replace the cache.
    ///
    /// Fails before any I/O when the title or skills are missing. On failure
    /// the previous cache entry is left as it was and the error propagates;
    /// there is no retry and no substitute data.
    pub async fn request_recommended_jobs(
        &self,
        job_title: &str,
        skills: &[String],
    ) -> JobMatchResult<Vec<Job>> {
        let job_title = job_title.trim();
        let skills: Vec<String> = skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if job_title.is_empty() || skills.is_empty() {
            return Err(JobMatchError::Validation(
                "Job title and skills are required for recommendations".to_string(),
            ));
        }

        let request = PredictRequest::new(job_title, &skills);

        let body = self.service.predict(&request).await.map_err(|e| {
            app_log!(error, "Error requesting recommended jobs: {:#}", e);
            self.notifier
                .notify(Notification::error(REQUEST_RECOMMENDED_FAILED));
            JobMatchError::Service(e)
        })?;

        let records = match body {
            Value::Array(records) => records,
            other => {
                app_log!(error, "Prediction response is not a list: {}", other);
                self.notifier
                    .notify(Notification::error(REQUEST_RECOMMENDED_FAILED));
                return Err(JobMatchError::UnexpectedResponse(
                    "prediction response is not a JSON array".to_string(),
                ));
            }
        };

        let jobs = normalize_batch(&records);
        self.store_recommendations(&jobs).await?;

        app_log!(
            info,
            "Cached {} recommended jobs for '{}'",
            jobs.len(),
            job_title
        );
        Ok(jobs)
    }

    async fn store_recommendations(&self, jobs: &[Job]) -> JobMatchResult<()> {
        // Serialize fully before writing so a failure never leaves a partial entry.
        let serialized = serde_json::to_string(jobs)
            .map_err(|e| JobMatchError::Storage(anyhow::Error::new(e)))?;

        self.store
            .set(RECOMMENDED_JOBS_KEY, &serialized)
            .await
            .map_err(|e| {
                app_log!(error, "Failed to cache recommended jobs: {:#}", e);
                self.notifier
                    .notify(Notification::error(REQUEST_RECOMMENDED_FAILED));
                JobMatchError::Storage(e)
            })
    }

    /// When the cache entry was last replaced, if the store tracks it.
    pub async fn cached_at(&self) -> Option<DateTime<Utc>> {
        self.store
            .updated_at(RECOMMENDED_JOBS_KEY)
            .await
            .unwrap_or_else(|e| {
                app_log!(warn, "Failed to read cache timestamp: {:#}", e);
                None
            })
    }

    pub async fn clear_cache(&self) -> JobMatchResult<()> {
        self.store
            .remove(RECOMMENDED_JOBS_KEY)
            .await
            .map_err(JobMatchError::Storage)
    }

    /// Upload a résumé and map the extracted fields into a fresh profile.
    pub async fn parse_resume(&self, file_path: &Path) -> JobMatchResult<Profile> {
        match self.service.upload_resume(file_path).await {
            Ok(parsed) => Ok(parsed.into_profile()),
            Err(e) => {
                app_log!(error, "Error parsing resume: {:#}", e);
                self.notifier.notify(Notification::error(PARSE_RESUME_FAILED));
                Err(JobMatchError::Service(e))
            }
        }
    }

    /// POST the profile to the remote profile store.
    pub async fn save_profile_remote(&self, profile: &Profile) -> JobMatchResult<()> {
        self.service
            .save_profile(profile)
            .await
            .map_err(JobMatchError::Service)
    }
}
