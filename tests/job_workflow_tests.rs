//! End-to-end workflows: scan a résumé, save a job page, score it

use skill_extractor::error::{Result, SkillExtractorError};
use skill_extractor::input::manager::InputManager;
use skill_extractor::job::models::JobRequirements;
use skill_extractor::job::page::load_job_page;
use skill_extractor::job::scoring::score_against_requirements;
use skill_extractor::llm::{ChatCompletion, JobAnalyzer, LlmParse};
use skill_extractor::output::formatter::{ConsoleFormatter, OutputFormatter};
use skill_extractor::processing::{SkillMatcher, Taxonomy};
use skill_extractor::storage::SkillStore;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use tempfile::tempdir;

const JOB_REPLY: &str = r#"```json
{
  "employerName": "Acme Corp",
  "title": "Backend Engineer",
  "location": "Remote, EU",
  "industry": "Software",
  "minimumQualifications": ["3+ years of Rust", "Experience with PostgreSQL", "Kafka in production"],
  "preferredQualifications": ["Kubernetes", "Terraform"]
}
```"#;

struct CannedCompletion {
    replies: Mutex<VecDeque<Result<String>>>,
}

impl CannedCompletion {
    fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
        }
    }
}

impl ChatCompletion for CannedCompletion {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

async fn scan_fixture(store: &SkillStore) {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let skills = SkillMatcher::new(&Taxonomy::builtin()).find_skills(&text);
    store.replace_skills("sample_resume.txt", skills).await.unwrap();
}

#[tokio::test]
async fn test_job_page_from_file() {
    let client = reqwest::Client::new();
    let page = load_job_page("tests/fixtures/job_posting.html", &client)
        .await
        .unwrap();

    assert!(page.url.is_none());
    assert_eq!(page.title().as_deref(), Some("Backend Engineer - Acme"));

    let text = page.text();
    assert!(text.contains("Backend Engineer"));
    assert!(text.contains("3+ years of Rust"));
    assert!(!text.contains("analytics"));
    assert!(!text.contains("font-family"));
}

#[tokio::test]
async fn test_missing_job_page_is_invalid_input() {
    let client = reqwest::Client::new();
    let err = load_job_page("tests/fixtures/no_such_page.html", &client)
        .await
        .unwrap_err();
    assert!(matches!(err, SkillExtractorError::InvalidInput(_)));
}

#[tokio::test]
async fn test_scan_then_save_and_score_offline() {
    let dir = tempdir().unwrap();
    let store = SkillStore::new(dir.path().join("store.json"));
    scan_fixture(&store).await;

    let state = store.load().await.unwrap();
    assert_eq!(state.resume_file_name.as_deref(), Some("sample_resume.txt"));
    assert!(!state.user_skills.is_empty());

    let html = std::fs::read_to_string("tests/fixtures/job_posting.html").unwrap();
    let analyzer = JobAnalyzer::new(CannedCompletion::new(vec![Ok(JOB_REPLY.to_string())]));
    let job = analyzer.parse_job_from_html(&html).await.unwrap();
    assert_eq!(job.employer_name, "Acme Corp");
    assert_eq!(store.add_job(job.clone()).await.unwrap(), 1);

    let breakdown =
        score_against_requirements(&state.user_skills, &JobRequirements::from_job(&job));
    assert_eq!(breakdown.missing_required, vec!["Kafka in production"]);
    assert_eq!(breakdown.matched_required.len(), 2);
    assert_eq!(breakdown.matched_preferred, vec!["Kubernetes"]);
    assert_eq!(breakdown.missing_preferred, vec!["Terraform"]);
    assert!(breakdown.score > 0.0 && breakdown.score < 100.0);

    assert!(store
        .update_job_score("backend engineer", "ACME CORP", breakdown.score)
        .await
        .unwrap());

    let jobs = store.jobs().await.unwrap();
    assert_eq!(jobs[0].match_score, Some(breakdown.score));

    let listing = ConsoleFormatter::new(false).format_jobs(&jobs).unwrap();
    assert!(listing.contains("Backend Engineer | Acme Corp (Remote, EU)"));
}

#[tokio::test]
async fn test_unparsable_job_reply_saves_nothing() {
    let dir = tempdir().unwrap();
    let store = SkillStore::new(dir.path().join("store.json"));

    let analyzer = JobAnalyzer::new(CannedCompletion::new(vec![Ok(
        "Sorry, I cannot help with that.".to_string(),
    )]));
    let parsed = analyzer.parse_job("<p>Backend Engineer</p>").await.unwrap();

    match parsed {
        LlmParse::Parsed(job) => {
            store.add_job(job).await.unwrap();
        }
        LlmParse::ParseError { raw } => assert!(raw.contains("cannot help")),
    }
    assert!(store.jobs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_online_score_failure_leaves_store_untouched() {
    let dir = tempdir().unwrap();
    let store = SkillStore::new(dir.path().join("store.json"));
    scan_fixture(&store).await;

    let analyzer = JobAnalyzer::new(CannedCompletion::new(vec![
        Ok(JOB_REPLY.to_string()),
        Err(SkillExtractorError::Api {
            status: 500,
            message: "upstream failure".to_string(),
        }),
    ]));
    let job = analyzer.parse_job_from_html("<p>job</p>").await.unwrap();
    store.add_job(job.clone()).await.unwrap();

    let skills = store.skills().await.unwrap();
    let err = analyzer.evaluate_skill_match(&skills, &job).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "The language model service could not be reached."
    );

    let jobs = store.jobs().await.unwrap();
    assert_eq!(jobs[0].match_score, None);
}

#[tokio::test]
async fn test_requirements_analysis_and_model_score() {
    let analyzer = JobAnalyzer::new(CannedCompletion::new(vec![
        Ok(r#"{"requiredSkills":["Rust","Kafka"],"preferredSkills":["Docker"],"softSkills":["Mentoring"]}"#.to_string()),
        Ok(r#"{"matchScore": 140}"#.to_string()),
    ]));

    let html = std::fs::read_to_string("tests/fixtures/job_posting.html").unwrap();
    let job = {
        let parse_analyzer =
            JobAnalyzer::new(CannedCompletion::new(vec![Ok(JOB_REPLY.to_string())]));
        parse_analyzer.parse_job_from_html(&html).await.unwrap()
    };

    let requirements = analyzer.analyze_job_requirements(&job).await.unwrap();
    assert_eq!(requirements.required_skills, vec!["Rust", "Kafka"]);

    let dir = tempdir().unwrap();
    let store = SkillStore::new(dir.path().join("store.json"));
    scan_fixture(&store).await;
    let skills = store.skills().await.unwrap();

    let breakdown = score_against_requirements(&skills, &requirements);
    assert_eq!(breakdown.missing_required, vec!["Kafka"]);
    assert_eq!(breakdown.matched_preferred, vec!["Docker"]);

    let score = analyzer
        .calculate_match_score(&skills, &requirements)
        .await
        .unwrap();
    assert_eq!(score, 100.0);
}
