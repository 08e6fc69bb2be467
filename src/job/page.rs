//! Job page loading and visible-text extraction

use crate::error::{Result, SkillExtractorError};
use log::{debug, info};
use scraper::{Html, Node};
use std::path::Path;

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head", "svg"];

/// Raw HTML of a job posting and where it came from.
#[derive(Debug, Clone)]
pub struct JobPage {
    pub url: Option<String>,
    pub html: String,
}

impl JobPage {
    pub fn text(&self) -> String {
        html_to_text(&self.html)
    }

    pub fn title(&self) -> Option<String> {
        page_title(&self.html)
    }
}

/// Load a job page from an `http(s)://` URL or a local HTML file.
pub async fn load_job_page(source: &str, client: &reqwest::Client) -> Result<JobPage> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let html = fetch_html(client, source).await?;
        Ok(JobPage {
            url: Some(source.to_string()),
            html,
        })
    } else {
        let path = Path::new(source);
        if !path.exists() {
            return Err(SkillExtractorError::InvalidInput(format!(
                "Job page does not exist: {}",
                path.display()
            )));
        }
        info!("Reading job page from file: {}", path.display());
        let html = tokio::fs::read_to_string(path).await?;
        Ok(JobPage { url: None, html })
    }
}

async fn fetch_html(client: &reqwest::Client, url: &str) -> Result<String> {
    info!("Fetching job page: {}", url);
    let res = client
        .get(url)
        .header("Accept", "text/html,application/xhtml+xml")
        .send()
        .await?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(SkillExtractorError::JobPage(format!(
            "HTTP {} for {}: {}",
            status,
            url,
            body.chars().take(200).collect::<String>()
        )));
    }
    Ok(res.text().await?)
}

/// Visible text of an HTML document, whitespace-collapsed.
///
/// Text under script, style and similar non-rendered elements is dropped.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    let text = parts
        .iter()
        .flat_map(|part| part.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ");
    debug!("Extracted {} characters of page text", text.chars().count());
    text
}

/// Contents of the document's `<title>` element, if any.
pub fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .root_element()
        .descendants()
        .find(|node| {
            matches!(node.value(), Node::Element(element) if element.name() == "title")
        })
        .map(|node| {
            node.descendants()
                .filter_map(|child| child.value().as_text().map(|t| t.to_string()))
                .collect::<String>()
                .trim()
                .to_string()
        })
        .filter(|title| !title.is_empty())
}

/// Cut `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
