//! Job postings: typed models, page loading, and offline match scoring

pub mod models;
pub mod page;
pub mod scoring;

pub use models::{JobInfo, JobRequirements, SkillMatchEvaluation};
pub use page::JobPage;
