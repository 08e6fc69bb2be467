//! Prompt templates for the job extraction and matching workflows

use crate::processing::skill_matcher::Skill;

pub const SYSTEM_INSTRUCTION: &str = "You are a precise assistant that extracts structured data from job postings \
and compares them with a candidate's skills. Respond with a single JSON object and nothing else.";

/// Prompt templates, one per workflow.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub parse_job: String,
    pub analyze_requirements: String,
    pub evaluate_match: String,
    pub match_score: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            parse_job: PARSE_JOB_TEMPLATE.to_string(),
            analyze_requirements: ANALYZE_REQUIREMENTS_TEMPLATE.to_string(),
            evaluate_match: EVALUATE_MATCH_TEMPLATE.to_string(),
            match_score: MATCH_SCORE_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render_parse_job(&self, page_text: &str) -> String {
        self.parse_job.replace("{page}", page_text)
    }

    pub fn render_analyze_requirements(&self, job_text: &str) -> String {
        self.analyze_requirements.replace("{job}", job_text)
    }

    pub fn render_evaluate_match(&self, skills: &[Skill], job_text: &str) -> String {
        self.evaluate_match
            .replace("{skills}", &format_skills(skills))
            .replace("{job}", job_text)
    }

    pub fn render_match_score(&self, skills: &[Skill], requirements_json: &str) -> String {
        self.match_score
            .replace("{skills}", &format_skills(skills))
            .replace("{requirements}", requirements_json)
    }
}

/// One line per skill: `- Rust (programming, 80%)`.
pub fn format_skills(skills: &[Skill]) -> String {
    if skills.is_empty() {
        return "(no skills detected)".to_string();
    }
    skills
        .iter()
        .map(|skill| {
            format!(
                "- {} ({}, {}%)",
                skill.name,
                skill.category,
                (skill.confidence * 100.0).round()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const PARSE_JOB_TEMPLATE: &str = r#"Extract the job posting from the page text below.

<PAGE>
{page}
</PAGE>

Return JSON with exactly these keys:
{
  "employerName": string,
  "title": string,
  "location": string,
  "industry": string,
  "minimumQualifications": [string],
  "preferredQualifications": [string],
  "description": string
}

Use an empty string or empty list when a field is not present on the page."#;

const ANALYZE_REQUIREMENTS_TEMPLATE: &str = r#"Classify the requirements of this job.

<JOB>
{job}
</JOB>

Return JSON with exactly these keys:
{
  "requiredSkills": [string],
  "preferredSkills": [string],
  "softSkills": [string],
  "experienceLevel": string,
  "education": string
}

List technical skills by their short names (e.g. "Rust", "PostgreSQL")."#;

const EVALUATE_MATCH_TEMPLATE: &str = r#"Compare the candidate's skills with the job.

<SKILLS>
{skills}
</SKILLS>

<JOB>
{job}
</JOB>

Return JSON with exactly these keys:
{
  "matchScore": number between 0 and 100,
  "matchedSkills": [string],
  "missingSkills": [string],
  "summary": string
}"#;

const MATCH_SCORE_TEMPLATE: &str = r#"Score how well the candidate's skills cover the job requirements.

<SKILLS>
{skills}
</SKILLS>

<REQUIREMENTS>
{requirements}
</REQUIREMENTS>

Return JSON with exactly one key:
{
  "matchScore": number between 0 and 100
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn rust_skill() -> Skill {
        Skill {
            name: "Rust".to_string(),
            confidence: 0.8,
            category: "programming".to_string(),
        }
    }

    #[test]
    fn test_parse_job_rendering() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_parse_job("Backend Engineer at Acme");

        assert!(prompt.contains("<PAGE>\nBackend Engineer at Acme\n</PAGE>"));
        assert!(prompt.contains("\"minimumQualifications\""));
        assert!(!prompt.contains("{page}"));
    }

    #[test]
    fn test_evaluate_match_rendering() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_evaluate_match(&[rust_skill()], "Title: Backend Engineer");

        assert!(prompt.contains("- Rust (programming, 80%)"));
        assert!(prompt.contains("Title: Backend Engineer"));
        assert!(!prompt.contains("{skills}"));
        assert!(!prompt.contains("{job}"));
    }

    #[test]
    fn test_match_score_rendering() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_match_score(&[], "{\"requiredSkills\":[\"Go\"]}");

        assert!(prompt.contains("(no skills detected)"));
        assert!(prompt.contains("\"requiredSkills\":[\"Go\"]"));
    }
}
