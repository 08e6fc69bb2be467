//! Whole-word keyword matching of résumé text against a skill taxonomy

use crate::error::{Result, SkillExtractorError};
use crate::processing::taxonomy::Taxonomy;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

// Scores are kept in tenths so equal levels compare equal as f64.
const OCCURRENCE_TENTHS: usize = 2;
const MAX_OCCURRENCE_TENTHS: usize = 6;
const POSITION_TENTHS: usize = 2;

/// A detected skill with its heuristic confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub confidence: f64,
    pub category: String,
}

struct SkillPattern {
    name: String,
    category: String,
    regex: Regex,
}

/// Matcher with one compiled pattern per `(category, skill)` pair.
pub struct SkillMatcher {
    patterns: Vec<SkillPattern>,
}

impl SkillMatcher {
    /// Compile patterns for every taxonomy entry.
    ///
    /// A skill whose pattern cannot be built is logged and left out; the
    /// remaining skills are still matched.
    pub fn new(taxonomy: &Taxonomy) -> Self {
        let mut patterns = Vec::with_capacity(taxonomy.skill_count());

        for (category, name) in taxonomy.entries() {
            match build_pattern(name) {
                Ok(regex) => patterns.push(SkillPattern {
                    name: name.to_string(),
                    category: category.to_string(),
                    regex,
                }),
                Err(e) => warn!("Error processing skill \"{}\": {}", name, e),
            }
        }

        debug!("Compiled {} skill patterns", patterns.len());
        Self { patterns }
    }

    /// Detect skills in `text`, sorted by confidence (desc) then category (asc).
    pub fn find_skills(&self, text: &str) -> Vec<Skill> {
        let text = text.to_lowercase();
        let text_len = text.chars().count();

        let mut skills: Vec<Skill> = self
            .patterns
            .iter()
            .filter_map(|pattern| {
                let mut matches = pattern.regex.find_iter(&text);
                let first = matches.next()?;
                let match_count = 1 + matches.count();

                let first_offset = text[..first.start()].chars().count();
                let confidence = score_confidence(match_count, first_offset, text_len);

                Some(Skill {
                    name: pattern.name.clone(),
                    confidence,
                    category: pattern.category.clone(),
                })
            })
            .collect();

        sort_skills(&mut skills);
        skills
    }

    pub fn skill_count(&self) -> usize {
        self.patterns.len()
    }
}

/// One-shot matching: compile the taxonomy and scan `text`.
pub fn match_skills(text: &str, taxonomy: &Taxonomy) -> Vec<Skill> {
    SkillMatcher::new(taxonomy).find_skills(text)
}

/// Occurrence score capped at 0.6, plus 0.2 when the first hit is in the
/// first half of the text. Result lies in [0, 1].
pub fn score_confidence(match_count: usize, first_offset: usize, text_len: usize) -> f64 {
    let occurrence = match_count
        .saturating_mul(OCCURRENCE_TENTHS)
        .min(MAX_OCCURRENCE_TENTHS);
    let position = if first_offset.saturating_mul(2) < text_len {
        POSITION_TENTHS
    } else {
        0
    };
    ((occurrence + position).min(10) as f64 / 10.0).clamp(0.0, 1.0)
}

/// Whether `text` mentions `name` as a whole word, case-insensitively.
pub fn contains_skill(text: &str, name: &str) -> bool {
    build_pattern(name)
        .map(|regex| regex.is_match(text))
        .unwrap_or(false)
}

pub fn sort_skills(skills: &mut [Skill]) {
    skills.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.category.cmp(&b.category))
    });
}

/// Literal, case-insensitive, whole-word pattern for a skill name.
///
/// Word boundaries are only asserted next to word characters, so names that
/// begin or end in a symbol ("C++", "C#") still match literally.
fn build_pattern(name: &str) -> Result<Regex> {
    let name = name.trim().to_lowercase();
    let (first, last) = match (name.chars().next(), name.chars().last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(SkillExtractorError::Taxonomy(
                "Skill name must not be empty".to_string(),
            ))
        }
    };

    let mut pattern = String::new();
    if is_word_char(first) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(&name));
    if is_word_char(last) {
        pattern.push_str(r"\b");
    }

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| SkillExtractorError::Taxonomy(format!("Invalid pattern for '{}': {}", name, e)))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
