// src/core/mod.rs
//! Infrastructure shared by the recommendation pipeline

pub mod config_manager;
pub mod database;
pub mod fs_ops;
pub mod service_client;
pub mod storage;

pub use config_manager::ConfigManager;
pub use database::Database;
pub use fs_ops::FsOps;
pub use service_client::ServiceClient;
pub use storage::{KeyValueStore, MemoryStore, PROFILE_KEY, RECOMMENDED_JOBS_KEY};
