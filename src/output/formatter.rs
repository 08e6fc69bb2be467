//! Output formatters for skills, saved jobs and match results

use crate::config::OutputFormat;
use crate::error::Result;
use crate::job::models::{JobInfo, JobRequirements, SkillMatchEvaluation};
use crate::job::scoring::MatchBreakdown;
use crate::processing::skill_matcher::Skill;
use colored::{Color, Colorize};

/// Renders the results the CLI prints.
pub trait OutputFormatter {
    fn format_skills(&self, skills: &[Skill]) -> Result<String>;
    fn format_jobs(&self, jobs: &[JobInfo]) -> Result<String>;
    fn format_evaluation(&self, job: &JobInfo, evaluation: &SkillMatchEvaluation) -> Result<String>;
    fn format_breakdown(&self, job: &JobInfo, breakdown: &MatchBreakdown) -> Result<String>;
    fn format_requirements(&self, job: &JobInfo, requirements: &JobRequirements) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting
pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score.round() as u32 {
            80..=100 => ("STRONG", Color::Green),
            60..=79 => ("GOOD", Color::Yellow),
            40..=59 => ("PARTIAL", Color::BrightYellow),
            _ => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_list(&self, output: &mut String, label: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        output.push_str(&format!("{}:\n", label));
        for item in items {
            output.push_str(&format!("  • {}\n", item));
        }
    }
}

/// Skills grouped by category, categories in order of first appearance.
pub fn group_by_category(skills: &[Skill]) -> Vec<(&str, Vec<&Skill>)> {
    let mut groups: Vec<(&str, Vec<&Skill>)> = Vec::new();
    for skill in skills {
        match groups.iter_mut().find(|(category, _)| *category == skill.category) {
            Some((_, members)) => members.push(skill),
            None => groups.push((skill.category.as_str(), vec![skill])),
        }
    }
    groups
}

pub fn confidence_percent(confidence: f64) -> u32 {
    (confidence * 100.0).round() as u32
}

impl OutputFormatter for ConsoleFormatter {
    fn format_skills(&self, skills: &[Skill]) -> Result<String> {
        let mut output = self.format_header("Your Skills");

        if skills.is_empty() {
            output.push_str("Upload a resume to see your skills.\n");
            return Ok(output);
        }

        for (category, members) in group_by_category(skills) {
            output.push_str(&format!("{}\n", self.colorize(category, Color::Green)));
            for skill in members {
                output.push_str(&format!(
                    "  • {} ({}%)\n",
                    skill.name,
                    confidence_percent(skill.confidence)
                ));
            }
        }
        Ok(output)
    }

    fn format_jobs(&self, jobs: &[JobInfo]) -> Result<String> {
        let mut output = self.format_header("Saved Jobs");

        if jobs.is_empty() {
            output.push_str("No saved jobs yet.\n");
            return Ok(output);
        }

        for (i, job) in jobs.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} | {} ({})\n",
                i + 1,
                self.colorize(&job.title, Color::Cyan),
                job.employer_name,
                job.location
            ));
            if !job.industry.is_empty() {
                output.push_str(&format!("   Industry: {}\n", job.industry));
            }
            if let Some(score) = job.match_score {
                output.push_str(&format!(
                    "   Match: {:.1}% {}\n",
                    score,
                    self.format_score_badge(score)
                ));
            }
            for qualification in &job.minimum_qualifications {
                output.push_str(&format!("   - {}\n", qualification));
            }
        }
        Ok(output)
    }

    fn format_evaluation(&self, job: &JobInfo, evaluation: &SkillMatchEvaluation) -> Result<String> {
        let mut output = self.format_header(&format!("{} | {}", job.title, job.employer_name));
        output.push_str(&format!(
            "Match Score: {:.1}% {}\n",
            evaluation.match_score,
            self.format_score_badge(evaluation.match_score)
        ));
        if !evaluation.summary.is_empty() {
            output.push_str(&format!("{}\n", self.colorize(&evaluation.summary, Color::Cyan)));
        }
        self.format_list(&mut output, "Matched", &evaluation.matched_skills);
        self.format_list(&mut output, "Missing", &evaluation.missing_skills);
        Ok(output)
    }

    fn format_breakdown(&self, job: &JobInfo, breakdown: &MatchBreakdown) -> Result<String> {
        let mut output = self.format_header(&format!("{} | {}", job.title, job.employer_name));
        output.push_str(&format!(
            "Match Score: {:.1}% {}\n",
            breakdown.score,
            self.format_score_badge(breakdown.score)
        ));
        self.format_list(&mut output, "Required (met)", &breakdown.matched_required);
        self.format_list(&mut output, "Required (missing)", &breakdown.missing_required);
        self.format_list(&mut output, "Preferred (met)", &breakdown.matched_preferred);
        self.format_list(&mut output, "Preferred (missing)", &breakdown.missing_preferred);
        Ok(output)
    }

    fn format_requirements(&self, job: &JobInfo, requirements: &JobRequirements) -> Result<String> {
        let mut output = self.format_header(&format!("Requirements: {}", job.title));
        self.format_list(&mut output, "Required", &requirements.required_skills);
        self.format_list(&mut output, "Preferred", &requirements.preferred_skills);
        self.format_list(&mut output, "Soft skills", &requirements.soft_skills);
        if let Some(level) = &requirements.experience_level {
            output.push_str(&format!("Experience: {}\n", level));
        }
        if let Some(education) = &requirements.education {
            output.push_str(&format!("Education: {}\n", education));
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_skills(&self, skills: &[Skill]) -> Result<String> {
        self.to_json(skills)
    }

    fn format_jobs(&self, jobs: &[JobInfo]) -> Result<String> {
        self.to_json(jobs)
    }

    fn format_evaluation(&self, _job: &JobInfo, evaluation: &SkillMatchEvaluation) -> Result<String> {
        self.to_json(evaluation)
    }

    fn format_breakdown(&self, _job: &JobInfo, breakdown: &MatchBreakdown) -> Result<String> {
        self.to_json(breakdown)
    }

    fn format_requirements(&self, _job: &JobInfo, requirements: &JobRequirements) -> Result<String> {
        self.to_json(requirements)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

/// Formatter for the requested output format.
pub fn formatter_for(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, confidence: f64, category: &str) -> Skill {
        Skill {
            name: name.to_string(),
            confidence,
            category: category.to_string(),
        }
    }

    fn job() -> JobInfo {
        JobInfo {
            employer_name: "Acme".to_string(),
            title: "Backend Engineer".to_string(),
            location: "Remote".to_string(),
            industry: "Software".to_string(),
            minimum_qualifications: vec!["Rust".to_string()],
            preferred_qualifications: vec![],
            description: None,
            url: None,
            match_score: Some(82.0),
            saved_at: None,
        }
    }

    #[test]
    fn test_group_by_category_keeps_first_appearance_order() {
        let skills = vec![
            skill("Go", 0.8, "programming"),
            skill("Docker", 0.6, "cloud"),
            skill("Rust", 0.4, "programming"),
        ];
        let groups = group_by_category(&skills);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "programming");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "cloud");
    }

    #[test]
    fn test_console_skills_show_rounded_percent() {
        let formatter = ConsoleFormatter::new(false);
        let output = formatter
            .format_skills(&[skill("Rust", 0.6000000000000001, "programming")])
            .unwrap();
        assert!(output.contains("Rust (60%)"));
        assert!(output.contains("programming"));
    }

    #[test]
    fn test_console_empty_states() {
        let formatter = ConsoleFormatter::new(false);
        assert!(formatter.format_skills(&[]).unwrap().contains("Upload a resume"));
        assert!(formatter.format_jobs(&[]).unwrap().contains("No saved jobs yet."));
    }

    #[test]
    fn test_console_jobs_with_score() {
        let formatter = ConsoleFormatter::new(false);
        let output = formatter.format_jobs(&[job()]).unwrap();
        assert!(output.contains("1. Backend Engineer | Acme (Remote)"));
        assert!(output.contains("Match: 82.0% [STRONG]"));
        assert!(output.contains("   - Rust"));
    }

    #[test]
    fn test_json_skills() {
        let formatter = JsonFormatter::new(false);
        let output = formatter
            .format_skills(&[skill("Rust", 0.8, "programming")])
            .unwrap();
        assert_eq!(output, r#"[{"name":"Rust","confidence":0.8,"category":"programming"}]"#);
        assert_eq!(formatter.supports_format(), OutputFormat::Json);
    }

    #[test]
    fn test_console_evaluation() {
        let formatter = ConsoleFormatter::new(false);
        let evaluation = SkillMatchEvaluation {
            match_score: 45.0,
            matched_skills: vec!["Rust".to_string()],
            missing_skills: vec!["Kafka".to_string()],
            summary: "Partial overlap".to_string(),
        };
        let output = formatter.format_evaluation(&job(), &evaluation).unwrap();
        assert!(output.contains("Match Score: 45.0% [PARTIAL]"));
        assert!(output.contains("Missing:\n  • Kafka"));
    }
}
