//! Skill extractor library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod job;
pub mod llm;
pub mod output;
pub mod processing;
pub mod storage;

pub use config::Config;
pub use error::{Result, SkillExtractorError};
