// src/context.rs
//! Application context handed to every command: the profile store, the
//! recommendation client and the policies that tie them together.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::app_log;
use crate::core::{ConfigManager, Database, KeyValueStore, ServiceClient};
use crate::error::{JobMatchError, JobMatchResult};
use crate::notify::{Notification, Notifier};
use crate::profile_store::ProfileStore;
use crate::ranking::{filter_jobs, RecommendedView};
use crate::recommendation::RecommendationClient;
use crate::types::{Job, Profile};

/// Title sent to the scoring service when the profile lists no experience.
pub const DEFAULT_JOB_TITLE: &str = "Software Developer";

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub job_title: String,
    pub jobs: Vec<Job>,
}

pub struct AppContext {
    pub profiles: ProfileStore,
    pub recommendations: RecommendationClient,
    notifier: Arc<dyn Notifier>,
    remote_profile: bool,
}

impl AppContext {
    pub async fn new(
        store: Arc<dyn KeyValueStore>,
        service: ServiceClient,
        notifier: Arc<dyn Notifier>,
        remote_profile: bool,
    ) -> Self {
        let profiles = ProfileStore::load(store.clone()).await;
        let recommendations = RecommendationClient::new(service, store, notifier.clone());
        Self {
            profiles,
            recommendations,
            notifier,
            remote_profile,
        }
    }

    /// Open the SQLite store and service client described by `config`
    pub async fn from_config(config: &ConfigManager, notifier: Arc<dyn Notifier>) -> Result<Self> {
        config.ensure_directories().await?;
        let database = Database::new(&config.environment.database_path).await?;
        let service = ServiceClient::from_config(&config.service)?;

        Ok(Self::new(
            Arc::new(database),
            service,
            notifier,
            config.service.remote_profile,
        )
        .await)
    }

    pub fn profile(&self) -> Profile {
        self.profiles.current()
    }

    /// Request fresh recommendations for the current profile and replace the cache.
    ///
    /// Refused for incomplete profiles. Failures propagate; retrying is up to the user.
    pub async fn refresh_recommendations(&self) -> JobMatchResult<RefreshOutcome> {
        let profile = self.profiles.current();
        if !profile.is_complete() {
            return Err(JobMatchError::IncompleteProfile);
        }

        let job_title = profile
            .most_recent_job_title()
            .unwrap_or(DEFAULT_JOB_TITLE)
            .to_string();

        app_log!(
            info,
            "Refreshing recommendations as '{}' with {} skills",
            job_title,
            profile.skills.len()
        );

        let jobs = self
            .recommendations
            .request_recommended_jobs(&job_title, &profile.skills)
            .await?;

        Ok(RefreshOutcome { job_title, jobs })
    }

    /// Recommended-jobs view. Incomplete profiles get the call-to-action and
    /// no fetch is attempted.
    pub async fn recommended_view(&self) -> RecommendedView {
        let profile = self.profiles.current();
        if let Some(gated) = RecommendedView::gate(&profile) {
            return gated;
        }

        let jobs = self
            .recommendations
            .fetch_recommended_jobs(Some(profile.skills.as_slice()))
            .await;
        RecommendedView::from_jobs(jobs)
    }

    /// Catalog listing, optionally narrowed by a search query.
    pub async fn all_jobs(&self, query: Option<&str>) -> Vec<Job> {
        let jobs = self.recommendations.fetch_sample_jobs().await;
        match query {
            Some(query) => filter_jobs(&jobs, query).into_iter().cloned().collect(),
            None => jobs,
        }
    }

    /// Persist the profile locally and, when configured, to the remote store.
    pub async fn save_profile(&self) -> JobMatchResult<()> {
        let result = self.save_profile_inner().await;
        match &result {
            Ok(()) => self
                .notifier
                .notify(Notification::success("Profile saved successfully!")),
            Err(e) => {
                app_log!(error, "Error saving profile: {}", e);
                self.notifier
                    .notify(Notification::error("Failed to save profile. Please try again."));
            }
        }
        result
    }

    async fn save_profile_inner(&self) -> JobMatchResult<()> {
        let profile = self.profiles.update(|_| {}).await?;
        if self.remote_profile {
            self.recommendations.save_profile_remote(&profile).await?;
        }
        Ok(())
    }

    /// Replace the profile with the fields extracted from a résumé.
    pub async fn import_resume(&self, file_path: &Path) -> JobMatchResult<Profile> {
        let mut parsed = self.recommendations.parse_resume(file_path).await?;
        parsed.resume_url = Some(file_path.display().to_string());
        self.profiles.replace(parsed).await
    }
}
