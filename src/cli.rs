//! CLI interface for the skill extractor

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skill-extractor")]
#[command(about = "Extract technical skills from a resume and match them against job postings")]
#[command(long_about = "Scan a resume for technical skills, keep them locally, and score saved job postings against them with a chat-completion model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a resume and store the detected skills
    Scan {
        /// Path to resume file (PDF, TXT, MD)
        resume: PathBuf,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show the stored skills
    Skills {
        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Resume management
    Resume {
        #[command(subcommand)]
        action: ResumeAction,
    },

    /// API key management
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Saved job postings
    Job {
        #[command(subcommand)]
        action: JobAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ResumeAction {
    /// Show the stored resume name
    Show,

    /// Remove the stored resume and its skills
    Clear,
}

#[derive(Subcommand)]
pub enum KeyAction {
    /// Verify and store an API key
    Set {
        /// API key (starts with "sk-")
        key: String,
    },

    /// Show whether a key is stored
    Show,

    /// Remove the stored key
    Clear,
}

#[derive(Subcommand)]
pub enum JobAction {
    /// Extract a job posting from an HTML file or URL and save it
    Add {
        /// Path to a saved job page, or an http(s) URL
        source: String,

        /// Score the job against the stored skills right away
        #[arg(short, long)]
        score: bool,
    },

    /// List saved jobs
    List {
        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Score a saved job against the stored skills
    Score {
        /// Job title
        title: String,

        /// Employer name
        employer: String,

        /// Use the local heuristic instead of the language model
        #[arg(long)]
        offline: bool,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Classify a saved job's requirements and score the stored skills against them
    Analyze {
        /// Job title
        title: String,

        /// Employer name
        employer: String,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Remove all saved jobs
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from(["skill-extractor", "scan", "cv.pdf", "-o", "json"]).unwrap();
        match cli.command {
            Commands::Scan { resume, output } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_parse_job_score_offline() {
        let cli = Cli::try_parse_from([
            "skill-extractor",
            "--verbose",
            "job",
            "score",
            "Backend Engineer",
            "Acme",
            "--offline",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Job {
                action: JobAction::Score { offline: true, .. }
            }
        ));
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
