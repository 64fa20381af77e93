// src/types/mod.rs
pub mod job;
pub mod profile;
pub mod response;

pub use job::Job;
pub use profile::{Education, EducationField, Experience, ExperienceField, Profile};
pub use response::{ApiErrorBody, PredictRequest, ResumeParseResponse};
