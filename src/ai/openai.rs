use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed system instruction sent with every fallback request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Failure of one completion round trip. Callers convert these into a
/// user-visible error string; they never cross the agent boundary.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion provider returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("could not parse completion response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("completion response contained no choices")]
    EmptyChoices,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Client for the chat-completions fallback.
///
/// Every call is an independent request/response round trip: the prompt is
/// forwarded verbatim with the fixed system instruction, no conversation
/// history, no retries, no streaming.
pub struct CompletionClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl CompletionClient {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| "gpt-3.5-turbo".to_string()),
            temperature: temperature.unwrap_or(0.7),
            max_tokens: max_tokens.unwrap_or(500),
        }
    }

    /// Sends the prompt to the provider and returns the first choice's text
    /// unmodified.
    pub async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(CompletionError::Api { status, body: text });
        }

        let completion: CompletionResponse = serde_json::from_str(&text)?;

        match completion.choices.first() {
            Some(choice) => Ok(choice.message.content.clone()),
            None => Err(CompletionError::EmptyChoices),
        }
    }

    /// Whether an API key is present at all.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != "not-configured"
    }
}
