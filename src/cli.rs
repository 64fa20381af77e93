// src/cli.rs
//! Command-line front end: one subcommand per screen of the application

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::app_log;
use crate::context::AppContext;
use crate::ranking::{empty_listing_message, render_job_list};
use crate::types::{Education, EducationField, Experience, ExperienceField, Profile};

#[derive(Parser)]
#[command(name = "jobmatch")]
#[command(about = "Build a career profile and get job recommendations ranked by match confidence")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// View or edit your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Browse all available jobs
    Jobs {
        /// Filter by title, company or skill
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show cached recommendations ranked by match confidence
    Recommended,
    /// Ask the scoring service for fresh recommendations
    Refresh,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    Show,
    /// Set contact details or career goals
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        goals: Option<String>,
    },
    AddSkill {
        #[arg(required = true)]
        skills: Vec<String>,
    },
    RemoveSkill { skill: String },
    AddExperience {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: String,
        #[arg(long, default_value = "")]
        duration: String,
        #[arg(long)]
        description: Option<String>,
    },
    UpdateExperience {
        id: String,
        field: ExperienceFieldArg,
        value: String,
    },
    RemoveExperience { id: String },
    AddEducation {
        #[arg(long)]
        degree: String,
        #[arg(long)]
        institution: String,
        #[arg(long, default_value = "")]
        year: String,
    },
    UpdateEducation {
        id: String,
        field: EducationFieldArg,
        value: String,
    },
    RemoveEducation { id: String },
    /// Reset the profile to empty defaults
    Clear,
    /// Save the profile (and push it to the remote store when configured)
    Save,
    /// Fill the profile from a résumé file
    ImportResume { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExperienceFieldArg {
    Title,
    Company,
    Duration,
    Description,
}

impl From<ExperienceFieldArg> for ExperienceField {
    fn from(arg: ExperienceFieldArg) -> Self {
        match arg {
            ExperienceFieldArg::Title => ExperienceField::JobTitle,
            ExperienceFieldArg::Company => ExperienceField::Company,
            ExperienceFieldArg::Duration => ExperienceField::Duration,
            ExperienceFieldArg::Description => ExperienceField::Description,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EducationFieldArg {
    Degree,
    Institution,
    Year,
}

impl From<EducationFieldArg> for EducationField {
    fn from(arg: EducationFieldArg) -> Self {
        match arg {
            EducationFieldArg::Degree => EducationField::Degree,
            EducationFieldArg::Institution => EducationField::Institution,
            EducationFieldArg::Year => EducationField::Year,
        }
    }
}

pub async fn handle_command(cli: Cli, ctx: &AppContext) -> Result<()> {
    match cli.command {
        Command::Profile { command } => handle_profile_command(command, ctx).await,

        Command::Jobs { search } => {
            let jobs = ctx.all_jobs(search.as_deref()).await;
            if jobs.is_empty() {
                println!("{}", empty_listing_message(search.as_deref()));
            } else {
                println!("{}", render_job_list(&jobs, false));
            }
            Ok(())
        }

        Command::Recommended => {
            let view = ctx.recommended_view().await;
            print!("{}", view.render());
            if let Some(at) = ctx.recommendations.cached_at().await {
                println!("Last refreshed: {}", at.format("%Y-%m-%d %H:%M UTC"));
            }
            Ok(())
        }

        Command::Refresh => {
            let outcome = ctx.refresh_recommendations().await?;
            println!(
                "✓ Fetched {} recommendations for '{}'",
                outcome.jobs.len(),
                outcome.job_title
            );
            Ok(())
        }
    }
}

async fn handle_profile_command(command: ProfileCommand, ctx: &AppContext) -> Result<()> {
    let profiles = &ctx.profiles;

    match command {
        ProfileCommand::Show => {
            print!("{}", render_profile(&profiles.current()));
        }

        ProfileCommand::Set { name, email, goals } => {
            profiles
                .update(|p| {
                    if let Some(name) = name {
                        p.set_full_name(&name);
                    }
                    if let Some(email) = email {
                        p.set_email(&email);
                    }
                    if let Some(goals) = goals {
                        p.career_goals = goals;
                    }
                })
                .await?;
            println!("✓ Profile updated");
        }

        ProfileCommand::AddSkill { skills } => {
            let profile = profiles
                .update(|p| {
                    for skill in &skills {
                        if !p.add_skill(skill) {
                            app_log!(debug, "Skipped blank or duplicate skill: {}", skill);
                        }
                    }
                })
                .await?;
            println!("✓ Skills: {}", profile.skills.join(", "));
        }

        ProfileCommand::RemoveSkill { skill } => {
            let mut removed = false;
            profiles.update(|p| removed = p.remove_skill(&skill)).await?;
            report(removed, "skill", &skill);
        }

        ProfileCommand::AddExperience {
            title,
            company,
            duration,
            description,
        } => {
            let experience = Experience::new(&title, &company, &duration, description.as_deref());
            let id = experience.id.clone();
            profiles.update(|p| {
                p.add_experience(experience);
            })
            .await?;
            println!("✓ Added experience {}", id);
        }

        ProfileCommand::UpdateExperience { id, field, value } => {
            let mut updated = false;
            profiles
                .update(|p| updated = p.update_experience(&id, field.into(), &value))
                .await?;
            report(updated, "experience", &id);
        }

        ProfileCommand::RemoveExperience { id } => {
            let mut removed = false;
            profiles.update(|p| removed = p.remove_experience(&id)).await?;
            report(removed, "experience", &id);
        }

        ProfileCommand::AddEducation {
            degree,
            institution,
            year,
        } => {
            let education = Education::new(&degree, &institution, &year);
            let id = education.id.clone();
            profiles.update(|p| {
                p.add_education(education);
            })
            .await?;
            println!("✓ Added education {}", id);
        }

        ProfileCommand::UpdateEducation { id, field, value } => {
            let mut updated = false;
            profiles
                .update(|p| updated = p.update_education(&id, field.into(), &value))
                .await?;
            report(updated, "education", &id);
        }

        ProfileCommand::RemoveEducation { id } => {
            let mut removed = false;
            profiles.update(|p| removed = p.remove_education(&id)).await?;
            report(removed, "education", &id);
        }

        ProfileCommand::Clear => {
            profiles.clear().await?;
            println!("✓ Profile cleared");
        }

        ProfileCommand::Save => {
            ctx.save_profile().await?;
        }

        ProfileCommand::ImportResume { file } => {
            let profile = ctx.import_resume(&file).await?;
            println!("✓ Imported resume from {}", file.display());
            print!("{}", render_profile(&profile));
        }
    }

    Ok(())
}

fn report(found: bool, kind: &str, key: &str) {
    if found {
        println!("✓ Updated {} {}", kind, key);
    } else {
        println!("❌ No {} found for {}", kind, key);
    }
}

pub fn render_profile(profile: &Profile) -> String {
    let mut out = String::new();
    let or_dash = |value: &str| -> String {
        if value.trim().is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };

    let _ = writeln!(out, "Name:   {}", or_dash(&profile.full_name));
    let _ = writeln!(out, "Email:  {}", or_dash(&profile.email));
    let _ = writeln!(out, "Skills: {}", or_dash(&profile.skills.join(", ")));

    if !profile.experience.is_empty() {
        let _ = writeln!(out, "Experience:");
        for exp in &profile.experience {
            let _ = writeln!(
                out,
                "  [{}] {} at {} ({})",
                exp.id,
                or_dash(&exp.job_title),
                or_dash(&exp.company),
                or_dash(&exp.duration)
            );
            if let Some(description) = exp.description.as_deref().filter(|d| !d.is_empty()) {
                let _ = writeln!(out, "      {}", description);
            }
        }
    }

    if !profile.education.is_empty() {
        let _ = writeln!(out, "Education:");
        for edu in &profile.education {
            let _ = writeln!(
                out,
                "  [{}] {}, {} ({})",
                edu.id,
                or_dash(&edu.degree),
                or_dash(&edu.institution),
                or_dash(&edu.year)
            );
        }
    }

    if !profile.career_goals.is_empty() {
        let _ = writeln!(out, "Career goals: {}", profile.career_goals);
    }

    let status = if profile.is_complete() {
        "complete"
    } else {
        "incomplete (name, email and at least one skill are required)"
    };
    let _ = writeln!(out, "Profile: {}", status);
    out
}
