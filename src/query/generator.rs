// src/query/generator.rs
//! Generative-model collaborator: one prompt in, one text response out.

use crate::constants::{DEFAULT_MODEL, ERROR_BODY_PREVIEW_LENGTH};
use crate::error::AppError;
use crate::types::ModelApiKey;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// The ability to turn a prompt into text.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Name used in user-facing error messages, e.g. `Gemini API`.
    fn service_name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, AppError>;
}

/// Google Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: ModelApiKey,
    endpoint: Url,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: ModelApiKey, model: &str, timeout: Duration) -> Result<Self, AppError> {
        let model = if model.trim().is_empty() {
            DEFAULT_MODEL
        } else {
            model.trim()
        };
        let endpoint = Url::parse(GEMINI_API_BASE_URL)
            .and_then(|base| base.join(&format!("models/{}:generateContent", model)))
            .map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid model name '{}': {}", model, e))
            })?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            endpoint,
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    fn service_name(&self) -> &str {
        "Gemini API"
    }

    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        log::debug!(
            "POST {} ({} prompt chars)",
            self.endpoint,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(AppError::ModelService {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::MalformedContent(format!("Unexpected {} response: {}", self.model, e))
        })?;
        parsed.into_text(status.as_u16())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate's parts, concatenated.
    fn into_text(self, status: u16) -> Result<String, AppError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let message = match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => format!("no candidates returned (blocked: {})", reason),
                None => "no candidates returned".to_string(),
            };
            return Err(AppError::ModelService { status, message });
        };

        Ok(candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default())
    }
}

/// `error.message` from a Google error body, else a preview of the body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect())
}
