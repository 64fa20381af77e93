// src/ranking.rs
//! Confidence ordering and text presentation of job lists

use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::types::{Job, Profile};

const CARD_SKILL_LIMIT: usize = 3;

pub const COMPLETE_PROFILE_TITLE: &str = "Complete Your Profile First";
pub const COMPLETE_PROFILE_MESSAGE: &str =
    "We need more information to provide job recommendations.";
pub const NO_RECOMMENDATIONS_MESSAGE: &str =
    "No recommended jobs found. Update your profile with more skills.";
pub const NO_SEARCH_RESULTS_MESSAGE: &str = "No jobs found matching your search.";
pub const NO_JOBS_MESSAGE: &str = "No jobs available right now.";

/// Order by descending confidence. Unscored jobs compare as 0 and ties keep
/// their arrival order. The jobs themselves are not modified.
pub fn rank_by_confidence(mut jobs: Vec<Job>) -> Vec<Job> {
    // `sort_by` is stable.
    jobs.sort_by(|a, b| {
        b.sort_score()
            .partial_cmp(&a.sort_score())
            .unwrap_or(Ordering::Equal)
    });
    jobs
}

/// Case-insensitive match on title, company or any skill. A blank query keeps everything.
pub fn filter_jobs<'a>(jobs: &'a [Job], query: &str) -> Vec<&'a Job> {
    let needle = query.trim().to_lowercase();
    jobs.iter()
        .filter(|job| {
            needle.is_empty()
                || job.title.to_lowercase().contains(&needle)
                || job.company.to_lowercase().contains(&needle)
                || job
                    .skills
                    .iter()
                    .any(|skill| skill.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Message for an empty job listing; only a search can miss.
pub fn empty_listing_message(search: Option<&str>) -> &'static str {
    match search {
        Some(_) => NO_SEARCH_RESULTS_MESSAGE,
        None => NO_JOBS_MESSAGE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchBand {
    Strong,
    Good,
    Fair,
    Weak,
}

impl MatchBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            MatchBand::Strong
        } else if score >= 0.6 {
            MatchBand::Good
        } else if score >= 0.4 {
            MatchBand::Fair
        } else {
            MatchBand::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchBand::Strong => "strong",
            MatchBand::Good => "good",
            MatchBand::Fair => "fair",
            MatchBand::Weak => "weak",
        }
    }
}

pub fn match_percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// What the recommended-jobs view shows.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendedView {
    /// Profile incomplete: no fetch is attempted.
    CompleteProfile,
    Empty,
    Jobs(Vec<Job>),
}

impl RecommendedView {
    /// Ranks `jobs`; callers check completeness first via [`RecommendedView::gate`].
    pub fn from_jobs(jobs: Vec<Job>) -> Self {
        if jobs.is_empty() {
            RecommendedView::Empty
        } else {
            RecommendedView::Jobs(rank_by_confidence(jobs))
        }
    }

    /// `Some(CompleteProfile)` when the profile blocks fetching.
    pub fn gate(profile: &Profile) -> Option<Self> {
        (!profile.is_complete()).then_some(RecommendedView::CompleteProfile)
    }

    pub fn render(&self) -> String {
        match self {
            RecommendedView::CompleteProfile => format!(
                "{}\n{}\nRun `jobmatch profile` to fill in your name, email and skills.\n",
                COMPLETE_PROFILE_TITLE, COMPLETE_PROFILE_MESSAGE
            ),
            RecommendedView::Empty => format!("{}\n", NO_RECOMMENDATIONS_MESSAGE),
            RecommendedView::Jobs(jobs) => render_job_list(jobs.iter(), true),
        }
    }
}

pub fn render_job_list<'a>(jobs: impl IntoIterator<Item = &'a Job>, recommended: bool) -> String {
    jobs.into_iter()
        .map(|job| render_job_card(job, recommended))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_job_card(job: &Job, recommended: bool) -> String {
    let mut card = String::new();

    let _ = write!(card, "[{}] {}", job.id, job.title);
    if !job.salary.is_empty() {
        let _ = write!(card, "  ({})", job.salary);
    }
    card.push('\n');

    if !job.company.is_empty() {
        let _ = writeln!(card, "    Company: {}", job.company);
    }
    if !job.location.is_empty() {
        let _ = writeln!(card, "    Location: {}", job.location);
    }
    if !job.experience.is_empty() {
        let _ = writeln!(card, "    Experience: {}", job.experience);
    }
    if !job.description.is_empty() {
        let _ = writeln!(card, "    {}", job.description);
    }
    if !job.skills.is_empty() {
        let shown = job
            .skills
            .iter()
            .take(CARD_SKILL_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(card, "    Skills: {}", shown);
        if job.skills.len() > CARD_SKILL_LIMIT {
            let _ = write!(card, " +{} more", job.skills.len() - CARD_SKILL_LIMIT);
        }
        card.push('\n');
    }

    if recommended {
        if let Some(score) = job.confidence {
            let _ = writeln!(
                card,
                "    Match: {}% ({})",
                match_percent(score),
                MatchBand::from_score(score).label()
            );
        }
    }

    card
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_message_depends_on_search() {
        assert_eq!(empty_listing_message(None), NO_JOBS_MESSAGE);
        assert_eq!(
            empty_listing_message(Some("react")),
            NO_SEARCH_RESULTS_MESSAGE
        );
    }

    fn job(id: &str, confidence: Option<f64>) -> Job {
        Job {
            id: id.to_string(),
            title: format!("Job {}", id),
            confidence,
            ..Job::default()
        }
    }

    fn scores(jobs: &[Job]) -> Vec<Option<f64>> {
        jobs.iter().map(|j| j.confidence).collect()
    }

    #[test]
    fn test_missing_confidence_sorts_last() {
        let ranked = rank_by_confidence(vec![job("0", Some(0.2)), job("1", None), job("2", Some(0.9))]);
        assert_eq!(scores(&ranked), vec![Some(0.9), Some(0.2), None]);
        // absence is not rewritten to zero
        assert_eq!(ranked[2].confidence, None);
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let ranked = rank_by_confidence(vec![
            job("a", Some(0.5)),
            job("b", None),
            job("c", Some(0.5)),
            job("d", Some(0.0)),
            job("e", Some(0.7)),
        ]);
        let ids: Vec<&str> = ranked.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["e", "a", "c", "b", "d"]);
    }

    #[test]
    fn test_filter_matches_title_company_and_skills() {
        let jobs = vec![
            Job {
                id: "0".into(),
                title: "React Developer".into(),
                ..Job::default()
            },
            Job {
                id: "1".into(),
                company: "Frontend Gurus".into(),
                ..Job::default()
            },
            Job {
                id: "2".into(),
                skills: vec!["Spring Boot".into()],
                ..Job::default()
            },
        ];

        let ids = |query: &str| -> Vec<String> {
            filter_jobs(&jobs, query).into_iter().map(|j| j.id.clone()).collect()
        };
        assert_eq!(ids("react"), vec!["0"]);
        assert_eq!(ids("GURUS"), vec!["1"]);
        assert_eq!(ids("spring"), vec!["2"]);
        assert_eq!(ids("  "), vec!["0", "1", "2"]);
        assert!(ids("cobol").is_empty());
    }

    #[test]
    fn test_match_band_thresholds() {
        assert_eq!(MatchBand::from_score(0.8), MatchBand::Strong);
        assert_eq!(MatchBand::from_score(0.79), MatchBand::Good);
        assert_eq!(MatchBand::from_score(0.6), MatchBand::Good);
        assert_eq!(MatchBand::from_score(0.4), MatchBand::Fair);
        assert_eq!(MatchBand::from_score(0.1), MatchBand::Weak);
        assert_eq!(match_percent(0.5987), 60);
    }

    #[test]
    fn test_view_gate_and_states() {
        let incomplete = Profile::default();
        assert_eq!(
            RecommendedView::gate(&incomplete),
            Some(RecommendedView::CompleteProfile)
        );
        assert!(RecommendedView::CompleteProfile
            .render()
            .contains(COMPLETE_PROFILE_TITLE));

        let complete = Profile {
            full_name: "A".into(),
            email: "a@b.com".into(),
            skills: vec!["x".into()],
            ..Profile::default()
        };
        assert_eq!(RecommendedView::gate(&complete), None);

        assert_eq!(RecommendedView::from_jobs(Vec::new()), RecommendedView::Empty);
        match RecommendedView::from_jobs(vec![job("0", Some(0.1)), job("1", Some(0.9))]) {
            RecommendedView::Jobs(jobs) => assert_eq!(jobs[0].id, "1"),
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_card_truncates_skills_and_shows_match() {
        let job = Job {
            id: "3".into(),
            title: "Frontend Developer".into(),
            company: "Web Creators Inc.".into(),
            salary: "5.8 LPA".into(),
            skills: vec!["React.js".into(), "JavaScript".into(), "UI".into(), "CSS".into(), "HTML".into()],
            confidence: Some(0.5932752021550755),
            ..Job::default()
        };

        let card = render_job_card(&job, true);
        assert!(card.starts_with("[3] Frontend Developer  (5.8 LPA)\n"));
        assert!(card.contains("Skills: React.js, JavaScript, UI +2 more"));
        assert!(card.contains("Match: 59% (fair)"));

        let plain = render_job_card(&job, false);
        assert!(!plain.contains("Match:"));
    }
}
