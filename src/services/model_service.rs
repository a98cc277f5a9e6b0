//! The generative-AI collaborator boundary. One prompt goes out, one
//! free-text response comes back; everything past this point treats that text
//! as untrusted input to the parser. A single attempt is made per request --
//! no caller-imposed retry.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate_topic_quiz(&self, prompt: &str) -> AppResult<String>;

    async fn generate_image_quiz(
        &self,
        prompt: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> AppResult<String>;
}

/// Calls the Gemini `generateContent` REST endpoint.
pub struct GeminiModelService {
    client: reqwest::Client,
    api_base: String,
    api_key: SecretString,
    model: String,
}

impl GeminiModelService {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: config.gemini_api_base.clone(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
        })
    }

    async fn generate_content(&self, parts: Vec<Value>) -> AppResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );

        let payload = json!({ "contents": [{ "parts": parts }] });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GenerationFailed(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let body: Value = response.json().await?;
        let text: String = body["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::MalformedGeneration(
                "No response received from AI. Please try again!".to_string(),
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl QuizGenerator for GeminiModelService {
    async fn generate_topic_quiz(&self, prompt: &str) -> AppResult<String> {
        self.generate_content(vec![json!({ "text": prompt })]).await
    }

    async fn generate_image_quiz(
        &self,
        prompt: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> AppResult<String> {
        self.generate_content(vec![
            json!({ "text": prompt }),
            json!({ "inline_data": { "mime_type": mime_type, "data": image_base64 } }),
        ])
        .await
    }
}

/// Maps a raw collaborator failure onto one of the user-facing categories by
/// matching substrings of the error message. Malformed-generation errors pass
/// through untouched; they already carry a retry hint.
pub fn user_facing_generation_error(err: AppError) -> AppError {
    let AppError::GenerationFailed(message) = err else {
        return err;
    };

    let lowered = message.to_lowercase();
    let friendly = if message.contains("API_KEY")
        || message.contains("API key")
        || lowered.contains("invalid")
    {
        "🔑 There's an issue with the AI connection. Please try again or contact support!"
            .to_string()
    } else if lowered.contains("timeout") {
        "⏱️ The request took too long. Please try again!".to_string()
    } else if lowered.contains("quota") || lowered.contains("limit") {
        "📊 API rate limit reached. Please wait a moment and try again!".to_string()
    } else {
        let truncated: String = message.chars().take(200).collect();
        format!("😅 Oops! Something went wrong: {}", truncated)
    };

    AppError::GenerationFailed(friendly)
}
