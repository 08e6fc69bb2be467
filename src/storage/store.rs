//! JSON-file key-value store for skills, saved jobs and settings

use crate::error::{Result, SkillExtractorError};
use crate::job::models::JobInfo;
use crate::processing::skill_matcher::Skill;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    #[serde(default)]
    pub user_skills: Vec<Skill>,
    #[serde(default)]
    pub saved_jobs: Vec<JobInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_file_name: Option<String>,
}

/// File-backed store. Each operation reads the file, applies one change and
/// writes it back whole.
pub struct SkillStore {
    path: PathBuf,
}

impl SkillStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<StoredState> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!("No store at {}, starting empty", self.path.display());
            return Ok(StoredState::default());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(StoredState::default());
        }
        serde_json::from_str(&content).map_err(|e| {
            SkillExtractorError::Storage(format!(
                "Failed to read store '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    pub async fn save(&self, state: &StoredState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(state)?;

        // Replaced atomically via rename
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    async fn update<F: FnOnce(&mut StoredState)>(&self, change: F) -> Result<StoredState> {
        let mut state = self.load().await?;
        change(&mut state);
        self.save(&state).await?;
        Ok(state)
    }

    /// Replace the stored skills and résumé name together; no merging.
    pub async fn replace_skills(&self, resume_file_name: &str, skills: Vec<Skill>) -> Result<()> {
        info!("Storing {} skills from {}", skills.len(), resume_file_name);
        self.update(|state| {
            state.user_skills = skills;
            state.resume_file_name = Some(resume_file_name.to_string());
        })
        .await?;
        Ok(())
    }

    pub async fn skills(&self) -> Result<Vec<Skill>> {
        Ok(self.load().await?.user_skills)
    }

    pub async fn clear_resume(&self) -> Result<()> {
        self.update(|state| {
            state.user_skills.clear();
            state.resume_file_name = None;
        })
        .await?;
        Ok(())
    }

    pub async fn add_job(&self, job: JobInfo) -> Result<usize> {
        let state = self.update(|state| state.saved_jobs.push(job)).await?;
        Ok(state.saved_jobs.len())
    }

    pub async fn jobs(&self) -> Result<Vec<JobInfo>> {
        Ok(self.load().await?.saved_jobs)
    }

    /// Set the score of the first saved job matching title and employer.
    ///
    /// Returns whether a job was found.
    pub async fn update_job_score(&self, title: &str, employer_name: &str, score: f64) -> Result<bool> {
        let mut found = false;
        self.update(|state| {
            if let Some(job) = state
                .saved_jobs
                .iter_mut()
                .find(|job| job.matches(title, employer_name))
            {
                job.match_score = Some(score);
                found = true;
            }
        })
        .await?;

        if !found {
            debug!("No saved job matches '{}' at '{}'", title, employer_name);
        }
        Ok(found)
    }

    pub async fn clear_jobs(&self) -> Result<()> {
        self.update(|state| state.saved_jobs.clear()).await?;
        Ok(())
    }

    pub async fn api_key(&self) -> Result<Option<String>> {
        Ok(self.load().await?.api_key)
    }

    pub async fn set_api_key(&self, api_key: &str) -> Result<()> {
        self.update(|state| state.api_key = Some(api_key.trim().to_string()))
            .await?;
        Ok(())
    }

    pub async fn clear_api_key(&self) -> Result<()> {
        self.update(|state| state.api_key = None).await?;
        Ok(())
    }
}
