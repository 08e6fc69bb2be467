//! Typed job posting structures returned by the extraction workflows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scraped job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub employer_name: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub minimum_qualifications: Vec<String>,
    #[serde(default)]
    pub preferred_qualifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl JobInfo {
    /// Best-effort identity check used when updating a saved job's score.
    pub fn matches(&self, title: &str, employer_name: &str) -> bool {
        same_text(&self.title, title) && same_text(&self.employer_name, employer_name)
    }

    /// Text handed to the language model when this job is evaluated.
    pub fn summary_text(&self) -> String {
        let mut text = format!(
            "Title: {}\nEmployer: {}\nLocation: {}\nIndustry: {}\n",
            self.title, self.employer_name, self.location, self.industry
        );

        if !self.minimum_qualifications.is_empty() {
            text.push_str("Minimum qualifications:\n");
            for qualification in &self.minimum_qualifications {
                text.push_str(&format!("- {}\n", qualification));
            }
        }
        if !self.preferred_qualifications.is_empty() {
            text.push_str("Preferred qualifications:\n");
            for qualification in &self.preferred_qualifications {
                text.push_str(&format!("- {}\n", qualification));
            }
        }
        if let Some(description) = &self.description {
            text.push_str(&format!("Description:\n{}\n", description));
        }

        text
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Requirement buckets extracted from a job posting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirements {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
}

impl JobRequirements {
    /// Requirement buckets taken straight from a saved job's qualification lists.
    pub fn from_job(job: &JobInfo) -> Self {
        Self {
            required_skills: job.minimum_qualifications.clone(),
            preferred_skills: job.preferred_qualifications.clone(),
            ..Self::default()
        }
    }
}

/// The model's assessment of how well the stored skills fit a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatchEvaluation {
    /// 0 to 100
    pub match_score: f64,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

impl SkillMatchEvaluation {
    pub fn clamped(mut self) -> Self {
        self.match_score = clamp_score(self.match_score);
        self
    }
}

/// Clamp a match score into [0, 100]; NaN becomes 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}
