//! Offline match scoring of stored skills against job requirement buckets

use crate::job::models::{clamp_score, JobRequirements};
use crate::processing::skill_matcher::{contains_skill, Skill};
use serde::{Deserialize, Serialize};

const REQUIRED_WEIGHT: f64 = 0.7;
const PREFERRED_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    /// 0 to 100, one decimal
    pub score: f64,
    pub matched_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub matched_preferred: Vec<String>,
    pub missing_preferred: Vec<String>,
}

struct BucketResult {
    score: f64,
    matched: Vec<String>,
    missing: Vec<String>,
}

/// Score `skills` against the required and preferred buckets.
///
/// A requirement is met by a skill with the same name, or whose name appears
/// as a whole word in the requirement text; it contributes the best such
/// skill's confidence. Required weighs 0.7, preferred 0.3, and an empty
/// bucket drops out of the weighting.
pub fn score_against_requirements(skills: &[Skill], requirements: &JobRequirements) -> MatchBreakdown {
    let required = score_bucket(skills, &requirements.required_skills);
    let preferred = score_bucket(skills, &requirements.preferred_skills);

    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    if !requirements.required_skills.is_empty() {
        weighted += REQUIRED_WEIGHT * required.score;
        total_weight += REQUIRED_WEIGHT;
    }
    if !requirements.preferred_skills.is_empty() {
        weighted += PREFERRED_WEIGHT * preferred.score;
        total_weight += PREFERRED_WEIGHT;
    }

    let score = if total_weight > 0.0 {
        ((weighted / total_weight) * 1000.0).round() / 10.0
    } else {
        0.0
    };

    MatchBreakdown {
        score: clamp_score(score),
        matched_required: required.matched,
        missing_required: required.missing,
        matched_preferred: preferred.matched,
        missing_preferred: preferred.missing,
    }
}

fn score_bucket(skills: &[Skill], requirements: &[String]) -> BucketResult {
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut total = 0.0;

    for requirement in requirements {
        let best = skills
            .iter()
            .filter(|skill| meets(skill, requirement))
            .map(|skill| skill.confidence)
            .fold(None, |best: Option<f64>, c| Some(best.map_or(c, |b| b.max(c))));

        match best {
            Some(confidence) => {
                total += confidence;
                matched.push(requirement.clone());
            }
            None => missing.push(requirement.clone()),
        }
    }

    let score = if requirements.is_empty() {
        0.0
    } else {
        total / requirements.len() as f64
    };

    BucketResult {
        score,
        matched,
        missing,
    }
}

fn meets(skill: &Skill, requirement: &str) -> bool {
    skill.name.trim().eq_ignore_ascii_case(requirement.trim()) || contains_skill(requirement, &skill.name)
}
