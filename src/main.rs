//! Skill extractor: résumé skill detection and job-posting match scoring

mod cli;
mod config;
mod error;
mod input;
mod job;
mod llm;
mod output;
mod processing;
mod storage;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, ConfigAction, JobAction, KeyAction, ResumeAction};
use config::{Config, OutputFormat};
use error::{Result, SkillExtractorError};
use indicatif::{ProgressBar, ProgressStyle};
use input::file_detector::RESUME_EXTENSIONS;
use input::manager::InputManager;
use job::models::{JobInfo, JobRequirements};
use job::page::load_job_page;
use job::scoring::score_against_requirements;
use llm::client::{verify_api_key, OpenAiClient};
use llm::job_analyzer::JobAnalyzer;
use llm::response::LlmParse;
use log::{error, info, warn};
use output::formatter::formatter_for;
use processing::skill_matcher::SkillMatcher;
use processing::taxonomy::Taxonomy;
use std::path::Path;
use std::process;
use std::time::Duration;
use storage::store::SkillStore;

const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = Config::resolve_path(cli.config.as_deref());
    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        eprintln!("❌ {}", e.user_message());
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    let store = SkillStore::new(config.store_path());

    match command {
        Commands::Scan { resume, output } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| SkillExtractorError::InvalidInput(format!("Resume file: {}", e)))?;
            let format = resolve_output_format(output.as_deref(), &config)?;

            let mut input_manager =
                InputManager::new().with_max_file_size(config.input.max_file_size_bytes);
            let text = input_manager.extract_text(&resume).await?;
            info!("Extracted {} characters from {}", text.chars().count(), resume.display());

            let taxonomy = load_taxonomy(&config).await?;
            let matcher = SkillMatcher::new(&taxonomy);
            let skills = matcher.find_skills(&text);
            info!("Found {} of {} known skills", skills.len(), matcher.skill_count());

            let file_name = file_name_of(&resume);
            store.replace_skills(&file_name, skills.clone()).await?;

            let formatter = formatter_for(format, config.output.color_output);
            println!("{}", formatter.format_skills(&skills)?);
        }

        Commands::Skills { output } => {
            let format = resolve_output_format(output.as_deref(), &config)?;
            let state = store.load().await?;
            if format == OutputFormat::Console {
                if let Some(name) = &state.resume_file_name {
                    println!("📄 Resume: {}", name);
                }
            }
            let formatter = formatter_for(format, config.output.color_output);
            println!("{}", formatter.format_skills(&state.user_skills)?);
        }

        Commands::Resume { action } => match action {
            ResumeAction::Show => match store.load().await?.resume_file_name {
                Some(name) => println!("📄 {}", name),
                None => println!("No resume uploaded."),
            },
            ResumeAction::Clear => {
                store.clear_resume().await?;
                println!("✅ Resume and skills removed");
            }
        },

        Commands::Key { action } => match action {
            KeyAction::Set { key } => {
                let spinner = start_spinner("Verifying API key...");
                let verified = verify_api_key(&config.llm, &key).await;
                spinner.finish_and_clear();
                verified?;

                store.set_api_key(&key).await?;
                println!("✅ API key saved");
            }
            KeyAction::Show => match store.api_key().await? {
                Some(key) => println!("🔑 Stored key: {}", mask_key(&key)),
                None => println!("No API key stored."),
            },
            KeyAction::Clear => {
                store.clear_api_key().await?;
                println!("✅ API key removed");
            }
        },

        Commands::Job { action } => run_job_command(action, &config, &store).await?,

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config file: {}", config_path.display());
                println!("Store: {}", config.store_path().display());
                println!("LLM endpoint: {}", config.llm.base_url);
                println!("LLM model: {}", config.llm.model);
                println!("Temperature: {}", config.llm.temperature);
                match config.llm.timeout_secs {
                    Some(secs) => println!("Timeout: {}s", secs),
                    None => println!("Timeout: none"),
                }
                println!("Max resume size: {}MB", config.max_file_size_mb());
                match &config.taxonomy.path {
                    Some(path) => println!("Taxonomy: {}", path.display()),
                    None => println!("Taxonomy: built-in"),
                }
                println!("Output format: {:?}", config.output.format);
            }
            Some(ConfigAction::Reset) => {
                Config::reset_at(config_path)?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

async fn run_job_command(action: JobAction, config: &Config, store: &SkillStore) -> Result<()> {
    match action {
        JobAction::Add { source, score } => {
            let analyzer = JobAnalyzer::new(llm_client(config, store).await?);
            let http = reqwest::Client::new();
            let page = load_job_page(&source, &http).await?;

            let spinner = start_spinner("Extracting job details...");
            let parsed = analyzer.parse_job(&page.html).await;
            spinner.finish_and_clear();

            let mut job = match parsed? {
                LlmParse::Parsed(job) => job,
                LlmParse::ParseError { raw } => {
                    return Err(SkillExtractorError::LlmResponse { raw });
                }
            };
            job.url = page.url;
            job.saved_at = Some(chrono::Utc::now());

            if score {
                let skills = store.skills().await?;
                if skills.is_empty() {
                    warn!("No stored skills, saving job without a score");
                } else {
                    let spinner = start_spinner("Scoring job...");
                    let evaluation = analyzer.evaluate_skill_match(&skills, &job).await;
                    spinner.finish_and_clear();
                    job.match_score = Some(evaluation?.match_score);
                }
            }

            let count = store.add_job(job.clone()).await?;
            println!("✅ Saved '{}' at {} ({} saved jobs)", job.title, job.employer_name, count);
            if let Some(score) = job.match_score {
                println!("📊 Match score: {:.1}%", score);
            }
        }

        JobAction::List { output } => {
            let format = resolve_output_format(output.as_deref(), config)?;
            let formatter = formatter_for(format, config.output.color_output);
            println!("{}", formatter.format_jobs(&store.jobs().await?)?);
        }

        JobAction::Score {
            title,
            employer,
            offline,
            output,
        } => {
            let format = resolve_output_format(output.as_deref(), config)?;
            let formatter = formatter_for(format, config.output.color_output);
            let job = find_job(store, &title, &employer).await?;
            let skills = store.skills().await?;

            let score = if offline {
                let breakdown = score_against_requirements(&skills, &JobRequirements::from_job(&job));
                println!("{}", formatter.format_breakdown(&job, &breakdown)?);
                breakdown.score
            } else {
                let analyzer = JobAnalyzer::new(llm_client(config, store).await?);
                let spinner = start_spinner("Scoring job...");
                let evaluation = analyzer.evaluate_skill_match(&skills, &job).await;
                spinner.finish_and_clear();
                let evaluation = evaluation?;
                println!("{}", formatter.format_evaluation(&job, &evaluation)?);
                evaluation.match_score
            };

            store.update_job_score(&job.title, &job.employer_name, score).await?;
        }

        JobAction::Analyze {
            title,
            employer,
            output,
        } => {
            let format = resolve_output_format(output.as_deref(), config)?;
            let formatter = formatter_for(format, config.output.color_output);
            let job = find_job(store, &title, &employer).await?;
            let skills = store.skills().await?;
            let analyzer = JobAnalyzer::new(llm_client(config, store).await?);

            let spinner = start_spinner("Analyzing requirements...");
            let requirements = analyzer.analyze_job_requirements(&job).await;
            spinner.finish_and_clear();
            let requirements = requirements?;
            println!("{}", formatter.format_requirements(&job, &requirements)?);

            let breakdown = score_against_requirements(&skills, &requirements);
            println!("{}", formatter.format_breakdown(&job, &breakdown)?);

            let spinner = start_spinner("Calculating match score...");
            let score = analyzer.calculate_match_score(&skills, &requirements).await;
            spinner.finish_and_clear();
            let score = score?;
            if format == OutputFormat::Console {
                println!("🤖 Model match score: {:.1}%", score);
            }

            store.update_job_score(&job.title, &job.employer_name, score).await?;
        }

        JobAction::Clear => {
            store.clear_jobs().await?;
            println!("✅ Saved jobs removed");
        }
    }

    Ok(())
}

fn load_config(config_path: &Path) -> anyhow::Result<Config> {
    Config::load_from(config_path).with_context(|| {
        format!("Failed to load configuration from {}", config_path.display())
    })
}

async fn load_taxonomy(config: &Config) -> Result<Taxonomy> {
    match &config.taxonomy.path {
        Some(path) => Taxonomy::load(path).await,
        None => Ok(Taxonomy::builtin()),
    }
}

/// The environment variable wins over the stored key.
async fn resolve_api_key(store: &SkillStore) -> Result<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok(key.trim().to_string());
        }
    }
    store.api_key().await?.ok_or_else(|| {
        SkillExtractorError::ApiKey(format!(
            "No API key configured. Run `skill-extractor key set <key>` or set {}.",
            API_KEY_ENV
        ))
    })
}

async fn llm_client(config: &Config, store: &SkillStore) -> Result<OpenAiClient> {
    let api_key = resolve_api_key(store).await?;
    OpenAiClient::new(&config.llm, api_key)
}

async fn find_job(store: &SkillStore, title: &str, employer: &str) -> Result<JobInfo> {
    store
        .jobs()
        .await?
        .into_iter()
        .find(|job| job.matches(title, employer))
        .ok_or_else(|| {
            SkillExtractorError::InvalidInput(format!("No saved job '{}' at '{}'", title, employer))
        })
}

fn resolve_output_format(output: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match output {
        Some(format) => cli::parse_output_format(format).map_err(SkillExtractorError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 7 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_error_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "llm = [").unwrap();

        let err = load_config(&path).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("broken.toml"));
        assert!(message.contains("Failed to parse config"));
    }

    #[test]
    fn test_load_config_uses_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");

        load_config(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-abcdefgh1234"), "sk-...1234");
        assert_eq!(mask_key("sk-abc"), "******");
    }
}
