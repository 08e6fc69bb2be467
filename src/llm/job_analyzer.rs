//! Job extraction and skill-match workflows backed by a chat-completion service

use crate::error::Result;
use crate::job::models::{clamp_score, JobInfo, JobRequirements, SkillMatchEvaluation};
use crate::job::page::{html_to_text, truncate_chars};
use crate::llm::client::ChatCompletion;
use crate::llm::prompts::{PromptTemplates, SYSTEM_INSTRUCTION};
use crate::llm::response::{parse_json_response, LlmParse};
use crate::processing::skill_matcher::Skill;
use log::info;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Upper bound on page text sent to the model.
pub const MAX_PAGE_CHARS: usize = 24_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchScoreReply {
    match_score: f64,
}

pub struct JobAnalyzer<C> {
    client: C,
    templates: PromptTemplates,
    max_page_chars: usize,
}

impl<C: ChatCompletion> JobAnalyzer<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            templates: PromptTemplates::default(),
            max_page_chars: MAX_PAGE_CHARS,
        }
    }

    pub fn with_max_page_chars(mut self, max_page_chars: usize) -> Self {
        self.max_page_chars = max_page_chars;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Send one prompt; service failures are errors, unparsable replies are
    /// returned as [`LlmParse::ParseError`].
    async fn request<T: DeserializeOwned>(&self, prompt: &str) -> Result<LlmParse<T>> {
        let reply = self.client.complete(SYSTEM_INSTRUCTION, prompt).await?;
        Ok(parse_json_response(&reply))
    }

    /// Extract a [`JobInfo`] from a job page, keeping the raw reply on parse failure.
    pub async fn parse_job(&self, html: &str) -> Result<LlmParse<JobInfo>> {
        let text = html_to_text(html);
        let text = truncate_chars(&text, self.max_page_chars);
        info!("Parsing job posting ({} characters of page text)", text.chars().count());

        let prompt = self.templates.render_parse_job(text);
        self.request(&prompt).await
    }

    pub async fn parse_job_from_html(&self, html: &str) -> Result<JobInfo> {
        self.parse_job(html).await?.into_result()
    }

    /// Split a job's requirements into required, preferred and soft-skill buckets.
    pub async fn analyze_job_requirements(&self, job: &JobInfo) -> Result<JobRequirements> {
        info!("Analyzing requirements for '{}' at {}", job.title, job.employer_name);
        let prompt = self.templates.render_analyze_requirements(&job.summary_text());
        self.request(&prompt).await?.into_result()
    }

    pub async fn evaluate_skill_match(
        &self,
        skills: &[Skill],
        job: &JobInfo,
    ) -> Result<SkillMatchEvaluation> {
        info!("Evaluating {} skills against '{}'", skills.len(), job.title);
        let prompt = self.templates.render_evaluate_match(skills, &job.summary_text());
        let evaluation: SkillMatchEvaluation = self.request(&prompt).await?.into_result()?;
        Ok(evaluation.clamped())
    }

    /// Numeric match score in [0, 100] for the given requirement buckets.
    pub async fn calculate_match_score(
        &self,
        skills: &[Skill],
        requirements: &JobRequirements,
    ) -> Result<f64> {
        let requirements_json = serde_json::to_string_pretty(requirements)?;
        let prompt = self.templates.render_match_score(skills, &requirements_json);
        let reply: MatchScoreReply = self.request(&prompt).await?.into_result()?;
        Ok(clamp_score(reply.match_score))
    }
}
