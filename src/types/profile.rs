// src/types/profile.rs
//! User profile: contact details, skills, experience, education, goals

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted with camelCase keys so stored profiles keep their historical layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    /// Insertion ordered, no duplicates.
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub career_goals: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    /// Free text, e.g. "2019 - 2022".
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    JobTitle,
    Company,
    Duration,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Degree,
    Institution,
    Year,
}

pub(crate) fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

impl Experience {
    pub fn new(job_title: &str, company: &str, duration: &str, description: Option<&str>) -> Self {
        Self {
            id: new_entry_id(),
            job_title: job_title.to_string(),
            company: company.to_string(),
            duration: duration.to_string(),
            description: description.map(str::to_string),
        }
    }
}

impl Education {
    pub fn new(degree: &str, institution: &str, year: &str) -> Self {
        Self {
            id: new_entry_id(),
            degree: degree.to_string(),
            institution: institution.to_string(),
            year: year.to_string(),
        }
    }
}

impl Profile {
    /// Recommendations are only fetched for complete profiles.
    ///
    /// Values are checked as stored; writers trim name and email on input.
    pub fn is_complete(&self) -> bool {
        !self.full_name.is_empty() && !self.email.is_empty() && !self.skills.is_empty()
    }

    pub fn set_full_name(&mut self, name: &str) {
        self.full_name = name.trim().to_string();
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.trim().to_string();
    }

    /// Append a trimmed skill. Blank and duplicate skills are ignored.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill.trim());
        self.skills.len() != before
    }

    pub fn add_experience(&mut self, experience: Experience) -> String {
        let id = experience.id.clone();
        self.experience.push(experience);
        id
    }

    pub fn update_experience(&mut self, id: &str, field: ExperienceField, value: &str) -> bool {
        let Some(entry) = self.experience.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        match field {
            ExperienceField::JobTitle => entry.job_title = value.to_string(),
            ExperienceField::Company => entry.company = value.to_string(),
            ExperienceField::Duration => entry.duration = value.to_string(),
            ExperienceField::Description => entry.description = Some(value.to_string()),
        }
        true
    }

    pub fn remove_experience(&mut self, id: &str) -> bool {
        let before = self.experience.len();
        self.experience.retain(|e| e.id != id);
        self.experience.len() != before
    }

    pub fn add_education(&mut self, education: Education) -> String {
        let id = education.id.clone();
        self.education.push(education);
        id
    }

    pub fn update_education(&mut self, id: &str, field: EducationField, value: &str) -> bool {
        let Some(entry) = self.education.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        match field {
            EducationField::Degree => entry.degree = value.to_string(),
            EducationField::Institution => entry.institution = value.to_string(),
            EducationField::Year => entry.year = value.to_string(),
        }
        true
    }

    pub fn remove_education(&mut self, id: &str) -> bool {
        let before = self.education.len();
        self.education.retain(|e| e.id != id);
        self.education.len() != before
    }

    /// Title used to query the scoring service: the first experience entry
    /// with a non-blank title.
    pub fn most_recent_job_title(&self) -> Option<&str> {
        self.experience
            .iter()
            .map(|e| e.job_title.trim())
            .find(|title| !title.is_empty())
    }

    /// Drop blank and repeated skills, keeping first occurrences in order.
    pub(crate) fn dedup_skills(&mut self) {
        let mut seen: Vec<String> = Vec::with_capacity(self.skills.len());
        for skill in self.skills.drain(..) {
            let skill = skill.trim().to_string();
            if !skill.is_empty() && !seen.contains(&skill) {
                seen.push(skill);
            }
        }
        self.skills = seen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_profile() -> Profile {
        Profile {
            full_name: "A".to_string(),
            email: "a@b.com".to_string(),
            skills: vec!["x".to_string()],
            ..Profile::default()
        }
    }

    #[test]
    fn test_completeness() {
        assert!(!Profile::default().is_complete());
        assert!(complete_profile().is_complete());

        let mut missing_email = complete_profile();
        missing_email.email = String::new();
        assert!(!missing_email.is_complete());

        let mut blank_name = complete_profile();
        blank_name.full_name = " ".to_string();
        assert!(blank_name.is_complete());
    }

    #[test]
    fn test_contact_setters_trim_input() {
        let mut profile = complete_profile();
        profile.set_full_name("   ");
        assert_eq!(profile.full_name, "");
        assert!(!profile.is_complete());

        profile.set_full_name(" Ada ");
        profile.set_email(" ada@example.com\n");
        assert_eq!(profile.full_name, "Ada");
        assert_eq!(profile.email, "ada@example.com");
        assert!(profile.is_complete());
    }

    #[test]
    fn test_last_skill_flips_completeness() {
        let mut profile = complete_profile();
        assert!(profile.remove_skill("x"));
        assert!(!profile.is_complete());

        assert!(profile.add_skill("  Rust "));
        assert!(profile.is_complete());
        assert_eq!(profile.skills, vec!["Rust"]);
    }

    #[test]
    fn test_add_skill_rejects_blank_and_duplicates() {
        let mut profile = Profile::default();
        assert!(profile.add_skill("React"));
        assert!(!profile.add_skill("React"));
        assert!(!profile.add_skill(" React "));
        assert!(!profile.add_skill("   "));
        assert!(profile.add_skill("Redux"));
        assert_eq!(profile.skills, vec!["React", "Redux"]);
    }

    #[test]
    fn test_experience_lifecycle() {
        let mut profile = Profile::default();
        let first = profile.add_experience(Experience::new("Engineer", "Acme", "2019-2022", None));
        let second = profile.add_experience(Experience::new("Lead", "Initech", "2022-", Some("Team lead")));
        assert_ne!(first, second);

        assert!(profile.update_experience(&first, ExperienceField::Company, "Acme Corp"));
        assert!(!profile.update_experience("missing", ExperienceField::Company, "X"));
        assert_eq!(profile.experience[0].company, "Acme Corp");

        assert!(profile.remove_experience(&first));
        assert!(!profile.remove_experience(&first));
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].id, second);
    }

    #[test]
    fn test_education_lifecycle() {
        let mut profile = Profile::default();
        let id = profile.add_education(Education::new("BSc", "MIT", "2018"));
        assert!(profile.update_education(&id, EducationField::Year, "2019"));
        assert_eq!(profile.education[0].year, "2019");
        assert!(profile.remove_education(&id));
        assert!(profile.education.is_empty());
    }

    #[test]
    fn test_most_recent_job_title_skips_blank_entries() {
        let mut profile = Profile::default();
        assert_eq!(profile.most_recent_job_title(), None);

        profile.add_experience(Experience::new("  ", "Acme", "", None));
        profile.add_experience(Experience::new("Data Analyst", "Initech", "", None));
        assert_eq!(profile.most_recent_job_title(), Some("Data Analyst"));
    }

    #[test]
    fn test_serialized_with_camel_case_keys() {
        let mut profile = complete_profile();
        profile.career_goals = "Lead a team".to_string();
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["fullName"], "A");
        assert_eq!(json["careerGoals"], "Lead a team");
        assert!(json.get("resumeUrl").is_none());
    }

    #[test]
    fn test_partial_stored_profile_fills_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"fullName":"Ada"}"#).unwrap();
        assert_eq!(profile.full_name, "Ada");
        assert!(profile.skills.is_empty());
        assert!(profile.experience.is_empty());
    }

    #[test]
    fn test_dedup_skills() {
        let mut profile = Profile {
            skills: vec!["Go".into(), " Go ".into(), "".into(), "Rust".into()],
            ..Profile::default()
        };
        profile.dedup_skills();
        assert_eq!(profile.skills, vec!["Go", "Rust"]);
    }
}
