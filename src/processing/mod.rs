//! Skill detection
//! Taxonomy definition and keyword matching over extracted résumé text

pub mod taxonomy;
pub mod skill_matcher;

pub use skill_matcher::{match_skills, Skill, SkillMatcher};
pub use taxonomy::Taxonomy;
