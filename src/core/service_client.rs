// src/core/service_client.rs
//! HTTP client for the job scoring service

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;

use crate::app_log;
use crate::core::config_manager::ServiceConfig;
use crate::core::FsOps;
use crate::types::{ApiErrorBody, PredictRequest, Profile, ResumeParseResponse};

const SAMPLE_JOBS_ENDPOINT: &str = "/sample-jobs";
const PREDICT_ENDPOINT: &str = "/predict";
const UPLOAD_RESUME_ENDPOINT: &str = "/upload-resume";
const SAVE_PROFILE_ENDPOINT: &str = "/save-profile";

const RESUME_FIELD: &str = "file";

#[derive(Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create a client; `timeout_seconds` of `None` leaves requests unbounded
    pub fn new(base_url: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout_seconds)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 1. Unranked job catalog, raw records
    pub async fn sample_jobs(&self) -> Result<Vec<Value>> {
        self.get(SAMPLE_JOBS_ENDPOINT).await
    }

    /// 2. Scored jobs for a title and skills, raw body
    pub async fn predict(&self, request: &PredictRequest) -> Result<Value> {
        let url = format!("{}{}", self.base_url, PREDICT_ENDPOINT);

        app_log!(info, "Calling prediction service: {}", url);
        app_log!(debug, "Prediction payload: {:?}", request);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .context("Failed to call prediction service")?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        if status.is_success() {
            response
                .json::<Value>()
                .await
                .context("Failed to parse prediction response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            app_log!(error, "Prediction service error {}: {}", status, error_text);
            anyhow::bail!("Failed to get job recommendations: {}", status)
        }
    }

    /// 3. Résumé upload - sends the file, receives extracted profile fields
    pub async fn upload_resume(&self, file_path: &Path) -> Result<ResumeParseResponse> {
        let url = format!("{}{}", self.base_url, UPLOAD_RESUME_ENDPOINT);
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();

        let file_content = FsOps::read_bytes(file_path).await?;

        let form = Form::new().part(
            RESUME_FIELD,
            Part::bytes(file_content)
                .file_name(file_name)
                .mime_str(FsOps::resume_content_type(file_path))
                .context("Failed to create multipart")?,
        );

        app_log!(info, "Calling resume parsing service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        let response_text = response
            .text()
            .await
            .context("Failed to read response text")?;

        if status.is_success() {
            serde_json::from_str(&response_text).with_context(|| {
                format!("Failed to parse resume response. Raw response: {}", response_text)
            })
        } else {
            let message = serde_json::from_str::<ApiErrorBody>(&response_text)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Failed to parse resume".to_string());
            app_log!(error, "Resume service error {}: {}", status, response_text);
            anyhow::bail!(message)
        }
    }

    /// 4. Remote profile store
    pub async fn save_profile(&self, profile: &Profile) -> Result<()> {
        let url = format!("{}{}", self.base_url, SAVE_PROFILE_ENDPOINT);

        app_log!(info, "Saving profile to remote store: {}", url);

        let response = self
            .client
            .post(&url)
            .json(profile)
            .send()
            .await
            .context("Failed to call profile store")?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Profile save failed with status {}: {}", status, error_text)
        }
    }

    /// Generic GET request
    pub async fn get<R>(&self, endpoint: &str) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);

        app_log!(info, "GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<R>()
                .await
                .context("Failed to parse JSON response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }
    }
}
