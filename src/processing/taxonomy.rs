//! Static skill catalog: ordered categories, each with an ordered list of skill names

use crate::error::{Result, SkillExtractorError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Read-only category → skill-name mapping handed to the matcher.
///
/// Categories keep their definition order. On disk the taxonomy is a TOML
/// array of tables:
///
/// ```toml
/// [[category]]
/// name = "programming"
/// skills = ["Rust", "Go"]
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(rename = "category", default)]
    categories: Vec<SkillCategory>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category. Builder-style, used by tests and custom catalogs.
    pub fn with_category<S: Into<String>>(mut self, name: S, skills: &[&str]) -> Self {
        self.categories.push(SkillCategory {
            name: name.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let taxonomy: Taxonomy = toml::from_str(content)
            .map_err(|e| SkillExtractorError::Taxonomy(format!("Failed to parse taxonomy: {}", e)))?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(SkillExtractorError::Taxonomy(
                "Taxonomy defines no categories".to_string(),
            ));
        }
        for category in &self.categories {
            if category.name.trim().is_empty() {
                return Err(SkillExtractorError::Taxonomy(
                    "Category name must not be empty".to_string(),
                ));
            }
        }
        if self.is_empty() {
            return Err(SkillExtractorError::Taxonomy(
                "Taxonomy defines no skills".to_string(),
            ));
        }
        Ok(())
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    /// Every `(category, skill)` pair in definition order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories.iter().flat_map(|category| {
            category
                .skills
                .iter()
                .map(move |skill| (category.name.as_str(), skill.as_str()))
        })
    }

    pub fn skill_count(&self) -> usize {
        self.categories.iter().map(|c| c.skills.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.skill_count() == 0
    }

    /// The built-in technical skill catalog.
    pub fn builtin() -> Self {
        Self::new()
            .with_category(
                "programming",
                &[
                    "JavaScript", "TypeScript", "Python", "Java", "C++", "C#", "Ruby", "Go",
                    "Rust", "Swift", "Kotlin", "PHP", "Perl", "Scala", "Haskell", "Elixir",
                    "Clojure",
                ],
            )
            .with_category(
                "frameworks",
                &[
                    "React", "Angular", "Vue", "Node.js", "Express", "Django", "Flask",
                    "Spring", "Laravel", "Ruby on Rails", "ASP.NET", "Next.js", "Nuxt.js",
                    "Svelte",
                ],
            )
            .with_category(
                "databases",
                &[
                    "SQL", "MySQL", "PostgreSQL", "MongoDB", "Redis", "Cassandra", "DynamoDB",
                    "Oracle", "SQLite", "Neo4j", "Firebase", "CosmosDB",
                ],
            )
            .with_category(
                "cloud",
                &[
                    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Terraform", "Ansible",
                    "Jenkins", "GitHub Actions", "CI/CD", "Serverless", "Lambda",
                ],
            )
            .with_category(
                "web",
                &[
                    "HTML", "CSS", "SASS", "LESS", "Bootstrap", "Tailwind", "Webpack", "Babel",
                    "npm", "yarn", "REST", "GraphQL", "WebSocket",
                ],
            )
            .with_category(
                "methodologies",
                &[
                    "Agile", "Scrum", "Kanban", "TDD", "BDD", "OOP", "Functional Programming",
                    "Microservices", "MVC", "Design Patterns",
                ],
            )
            .with_category(
                "testing",
                &[
                    "Testing", "Unit Testing", "Integration Testing", "Jest", "Mocha",
                    "Cypress", "Selenium", "Test-Driven Development",
                ],
            )
            .with_category(
                "security",
                &[
                    "Security", "Authentication", "Authorization", "OAuth", "JWT", "SSL/TLS",
                    "Encryption", "Penetration Testing",
                ],
            )
            .with_category(
                "data",
                &[
                    "Machine Learning", "Data Science", "AI", "TensorFlow", "PyTorch",
                    "Pandas", "NumPy", "Data Analysis", "Big Data", "Hadoop", "Spark",
                ],
            )
            .with_category(
                "tools",
                &[
                    "Git", "GitHub", "GitLab", "Bitbucket", "Jira", "Confluence", "VS Code",
                    "IntelliJ", "Eclipse", "Postman", "Swagger",
                ],
            )
    }
}
