//! Chat-completion API client

use crate::config::LlmConfig;
use crate::error::{Result, SkillExtractorError};
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Anything that can answer a system + user prompt with text.
pub trait ChatCompletion {
    fn complete(
        &self,
        system: &str,
        user: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// OpenAI-compatible chat-completion client. No retries.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ids of the models visible to the API key.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let response = check_status(response).await?;
        let models: ModelList = response.json().await?;
        Ok(models.data.into_iter().map(|m| m.id).collect())
    }
}

impl ChatCompletion for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
        };

        debug!(
            "Sending chat completion: model={}, prompt_chars={}",
            self.model,
            user.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let response = check_status(response).await?;
        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SkillExtractorError::LlmResponse { raw: String::new() })
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("LLM API returned {}: {}", status, body);
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    Err(SkillExtractorError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Reject keys that are empty or lack the `sk-` prefix.
pub fn validate_api_key_format(api_key: &str) -> Result<()> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(SkillExtractorError::ApiKey(
            "Please enter an API key before saving.".to_string(),
        ));
    }
    if !api_key.starts_with("sk-") {
        return Err(SkillExtractorError::ApiKey(
            "API key must start with \"sk-\"".to_string(),
        ));
    }
    Ok(())
}

/// Check the key's format, then confirm the service accepts it by listing models.
pub async fn verify_api_key(config: &LlmConfig, api_key: &str) -> Result<()> {
    validate_api_key_format(api_key)?;

    let client = OpenAiClient::new(config, api_key.trim().to_string())?;
    match client.list_models().await {
        Ok(models) => {
            debug!("API key verified, {} models visible", models.len());
            Ok(())
        }
        Err(e) => {
            warn!("Error verifying key: {}", e);
            Err(SkillExtractorError::ApiKey(
                "That API key is invalid or revoked.".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        let err = validate_api_key_format("  ").unwrap_err();
        assert_eq!(err.to_string(), "Please enter an API key before saving.");
    }

    #[test]
    fn test_key_prefix_required() {
        let err = validate_api_key_format("pk-123").unwrap_err();
        assert_eq!(err.to_string(), "API key must start with \"sk-\"");
        assert!(validate_api_key_format("sk-abc123").is_ok());
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "system",
                content: "Return JSON",
            }],
            temperature: 0.0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
    }

    #[test]
    fn test_response_deserialization() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"{}"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some("{}"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = LlmConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            model: "test".to_string(),
            temperature: 0.0,
            timeout_secs: Some(5),
        };
        let client = OpenAiClient::new(&config, "sk-test".to_string()).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/v1");
        assert_eq!(client.model(), "test");
    }
}
