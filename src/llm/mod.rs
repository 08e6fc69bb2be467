//! LLM integration module

pub mod client;
pub mod prompts;
pub mod response;
pub mod job_analyzer;

pub use client::{ChatCompletion, OpenAiClient};
pub use job_analyzer::JobAnalyzer;
pub use response::LlmParse;
