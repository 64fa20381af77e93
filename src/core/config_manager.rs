// src/core/config_manager.rs
//! Configuration: built-in defaults, optional config.yaml, environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::core::FsOps;

const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentConfig {
    pub name: String,
    pub data_path: PathBuf,
    pub database_path: PathBuf,
    pub log_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub base_url: String,
    /// `None` leaves requests unbounded.
    pub timeout_seconds: Option<u64>,
    /// Also POST the profile to `/save-profile` on save.
    pub remote_profile: bool,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

#[derive(Debug, Default, Deserialize)]
struct FileSection {
    data_path: Option<PathBuf>,
    database_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
    service_url: Option<String>,
    timeout_seconds: Option<u64>,
    remote_profile: Option<bool>,
}

impl ConfigManager {
    /// Load configuration for the current process
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();

        let base_dir = std::env::current_dir().context("Failed to get current directory")?;
        let config_path = std::env::var("JOBMATCH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let yaml = if config_path.exists() {
            Some(
                std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?,
            )
        } else {
            None
        };

        Self::from_sources(yaml.as_deref(), &environment, |key| std::env::var(key).ok(), &base_dir)
    }

    fn get_environment() -> String {
        std::env::var("JOBMATCH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Merge defaults, the YAML section for `environment`, then overrides from `lookup`
    pub fn from_sources<F>(
        yaml: Option<&str>,
        environment: &str,
        lookup: F,
        base_dir: &Path,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ConfigFile = match yaml {
            Some(content) => serde_yaml::from_str(content).context("Failed to parse config.yaml")?,
            None => ConfigFile::default(),
        };

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        let data_path = lookup("JOBMATCH_DATA_DIR")
            .map(PathBuf::from)
            .or(section.data_path)
            .unwrap_or_else(|| PathBuf::from("data"));
        let data_path = FsOps::normalize_path(base_dir, &data_path);

        let database_path = lookup("JOBMATCH_DATABASE")
            .map(PathBuf::from)
            .or(section.database_path)
            .map(|path| FsOps::normalize_path(base_dir, &path))
            .unwrap_or_else(|| data_path.join("jobmatch.db"));

        let log_path = lookup("JOBMATCH_LOG_FILE")
            .map(PathBuf::from)
            .or(section.log_path)
            .map(|path| FsOps::normalize_path(base_dir, &path))
            .unwrap_or_else(|| data_path.join("jobmatch.log"));

        let base_url = lookup("JOB_SERVICE_URL")
            .or(section.service_url)
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_seconds = match lookup("JOBMATCH_TIMEOUT_SECS") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .context("JOBMATCH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => section.timeout_seconds,
        };

        let remote_profile = lookup("JOBMATCH_REMOTE_PROFILE")
            .map(|raw| matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .or(section.remote_profile)
            .unwrap_or(false);

        Ok(Self {
            environment: EnvironmentConfig {
                name: environment.to_string(),
                data_path,
                database_path,
                log_path,
            },
            service: ServiceConfig {
                base_url,
                timeout_seconds,
                remote_profile,
            },
        })
    }

    /// Log the resolved configuration. Call once the subscriber is installed.
    pub fn log_summary(&self) {
        app_log!(info, "Environment: {}", self.environment.name);
        app_log!(info, "Job service: {}", self.service.base_url);
        app_log!(
            info,
            "Database: {}",
            self.environment.database_path.display()
        );
        app_log!(info, "Log file: {}", self.environment.log_path.display());
    }

    /// Ensure all required directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        FsOps::ensure_dir_exists(&self.environment.data_path).await?;

        if let Some(db_parent) = self.environment.database_path.parent() {
            FsOps::ensure_dir_exists(db_parent).await?;
        }
        if let Some(log_parent) = self.environment.log_path.parent() {
            FsOps::ensure_dir_exists(log_parent).await?;
        }

        Ok(())
    }
}
