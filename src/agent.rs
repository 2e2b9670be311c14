use crate::ai::openai::CompletionClient;
use crate::ai::resolver::{self, Resolution};
use crate::config::Config;

/// Static reply shown when the completion provider fails. Failures are
/// logged and absorbed here; they never propagate past the agent.
pub const ERROR_REPLY: &str = "Error generating response.";

/// Reply for empty input that slipped past the caller's own validation.
pub const PROMPT_REQUIRED_REPLY: &str = "Prompt is required.";

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Canned,
    Completion,
    Default,
    Error,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Canned => "canned",
            Source::Completion => "completion",
            Source::Default => "default",
            Source::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub source: Source,
}

/// Answers one user message at a time: predefined rules first, then the
/// completion fallback when one is configured. Holds no mutable state, so
/// concurrent calls are independent.
pub struct GrowAgent {
    config: Config,
    completion: Option<CompletionClient>,
}

impl GrowAgent {
    pub fn new(config: Config) -> Self {
        // Build the fallback client only when an API key is available
        let completion = config.openai_api_key.as_ref().and_then(|key| {
            if key.is_empty() {
                None
            } else {
                Some(CompletionClient::new(
                    key.clone(),
                    Some(config.openai_base_url.clone()),
                    Some(config.model.clone()),
                    Some(config.temperature),
                    Some(config.max_tokens),
                ))
            }
        });

        if completion.is_some() {
            log::info!("📡 Completion fallback enabled ({})", config.model);
        } else {
            log::info!("📴 No completion backend configured, predefined answers only");
        }

        Self { config, completion }
    }

    /// Full resolution flow: canned answer, completion fallback, or the
    /// configured default reply.
    pub async fn answer(&self, user_text: &str) -> Reply {
        if user_text.trim().is_empty() {
            return Reply {
                text: PROMPT_REQUIRED_REPLY.to_string(),
                source: Source::Error,
            };
        }

        match resolver::resolve(user_text) {
            Resolution::Matched(text) => {
                log::debug!("🎯 Predefined answer matched");
                Reply {
                    text: text.to_string(),
                    source: Source::Canned,
                }
            }
            Resolution::Unmatched => match &self.completion {
                Some(client) => match client.complete(user_text).await {
                    Ok(text) => {
                        log::debug!("📡 Completion provider answered");
                        Reply {
                            text,
                            source: Source::Completion,
                        }
                    }
                    Err(e) => {
                        log::warn!("⚠️ Completion request failed: {}", e);
                        Reply {
                            text: ERROR_REPLY.to_string(),
                            source: Source::Error,
                        }
                    }
                },
                None => Reply {
                    text: self.config.default_reply.clone(),
                    source: Source::Default,
                },
            },
        }
    }

    /// Static-table-only path used by the relay `/api/ask` route. Never
    /// calls the completion provider.
    pub fn answer_canned(&self, question: &str) -> Reply {
        if question.trim().is_empty() {
            return Reply {
                text: self.config.default_reply.clone(),
                source: Source::Default,
            };
        }

        match resolver::resolve(question) {
            Resolution::Matched(text) => Reply {
                text: text.to_string(),
                source: Source::Canned,
            },
            Resolution::Unmatched => Reply {
                text: self.config.default_reply.clone(),
                source: Source::Default,
            },
        }
    }

    pub fn has_completion_backend(&self) -> bool {
        self.completion
            .as_ref()
            .map(|c| c.is_configured())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::resolver::STUDENT_VISA_DOCUMENTS;

    fn offline_config() -> Config {
        Config {
            assistant_name: "AI GROW".to_string(),
            openai_api_key: None,
            openai_base_url: "http://127.0.0.1:9".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            default_reply: "no idea yet".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            db_path: None,
            history_enabled: false,
        }
    }

    #[tokio::test]
    async fn matched_input_returns_canned_answer() {
        let agent = GrowAgent::new(offline_config());
        let reply = agent.answer("What documents do I need for a student visa?").await;
        assert_eq!(reply.source, Source::Canned);
        assert_eq!(reply.text, STUDENT_VISA_DOCUMENTS);
    }

    #[tokio::test]
    async fn unmatched_input_without_backend_returns_default_reply() {
        let agent = GrowAgent::new(offline_config());
        let reply = agent.answer("Tell me about cats").await;
        assert_eq!(reply.source, Source::Default);
        assert_eq!(reply.text, "no idea yet");
    }

    #[tokio::test]
    async fn empty_input_is_rejected_before_resolution() {
        let agent = GrowAgent::new(offline_config());
        let reply = agent.answer("   ").await;
        assert_eq!(reply.source, Source::Error);
        assert_eq!(reply.text, PROMPT_REQUIRED_REPLY);
    }

    #[tokio::test]
    async fn unreachable_backend_is_absorbed_into_error_reply() {
        // Port 9 (discard) refuses connections; the transport error must
        // surface as the static error string, not a panic or an Err.
        let config = Config {
            openai_api_key: Some("test-key".to_string()),
            ..offline_config()
        };
        let agent = GrowAgent::new(config);
        let reply = agent.answer("Tell me about cats").await;
        assert_eq!(reply.source, Source::Error);
        assert_eq!(reply.text, ERROR_REPLY);
    }

    #[test]
    fn canned_path_falls_back_to_default_for_unknown_question() {
        let agent = GrowAgent::new(offline_config());
        let reply = agent.answer_canned("Tell me about cats");
        assert_eq!(reply.source, Source::Default);
        assert_eq!(reply.text, "no idea yet");
    }

    #[test]
    fn canned_path_answers_exact_questions() {
        let agent = GrowAgent::new(offline_config());
        let reply = agent.answer_canned("What is AI?");
        assert_eq!(reply.source, Source::Canned);
        assert!(reply.text.contains("mimic human decision making"));
    }
}
