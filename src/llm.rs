use std::time::Duration;

use async_trait::async_trait;
use eyre::{Result, bail};
use log::debug;

use crate::SummaryResult;
use crate::error::PipelineError;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Rewrite a document into English, one call per document
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, PipelineError>;
}

/// Produce the terminal summary from the combined chunk text
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<SummaryResult, PipelineError>;
}

fn summary_prompt(text: &str) -> String {
    format!("Provide a summary of the following content in 300 words:\nContent:{text}")
}

fn translate_prompt(text: &str) -> String {
    format!("Translate the following text into English. Preserve meaning and context:\nText: {text}")
}

/// Chat-completion client for Groq's OpenAI-compatible API, used for both
/// translation and summarization with different prompt templates
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        debug!("Calling chat completion with model {}", self.model);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let resp = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("Groq API returned {status}: {body}");
        }

        let json: serde_json::Value = resp.json().await?;
        extract_completion_text(&json)
    }
}

#[async_trait]
impl Translator for GroqClient {
    async fn translate(&self, text: &str) -> Result<String, PipelineError> {
        self.complete(translate_prompt(text))
            .await
            .map_err(|e| PipelineError::Summarization(e.to_string()))
    }
}

#[async_trait]
impl Summarizer for GroqClient {
    async fn summarize(&self, text: &str) -> Result<SummaryResult, PipelineError> {
        let text = self
            .complete(summary_prompt(text))
            .await
            .map_err(|e| PipelineError::Summarization(e.to_string()))?;
        Ok(SummaryResult { text })
    }
}

fn extract_completion_text(json: &serde_json::Value) -> Result<String> {
    if let Some(text) = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
    {
        return Ok(text.to_string());
    }
    bail!("unexpected chat completion response format");
}
