use std::env;
use std::path::PathBuf;

/// Reply used when no rule matches and no completion backend is configured.
/// Overridable through AIGROW_DEFAULT_REPLY.
pub const DEFAULT_REPLY: &str = "🤖 Sorry, I don’t have a predefined answer for that yet.";

#[derive(Debug, Clone)]
pub struct Config {
    pub assistant_name: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub default_reply: String,
    pub host: String,
    pub port: u16,
    pub db_path: Option<PathBuf>,
    pub history_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        dotenv::dotenv().ok();

        let openai_api_key = env::var("OPENAI_API_KEY").ok();

        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| crate::ai::openai::DEFAULT_BASE_URL.to_string());

        let model = env::var("AIGROW_MODEL")
            .unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let temperature = env::var("AIGROW_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(0.7);

        let max_tokens = env::var("AIGROW_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(500);

        let default_reply = env::var("AIGROW_DEFAULT_REPLY")
            .unwrap_or_else(|_| DEFAULT_REPLY.to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);

        let db_path = env::var("AIGROW_DB_PATH").ok().map(PathBuf::from);

        let history_enabled = env::var("AIGROW_HISTORY")
            .unwrap_or_else(|_| "true".to_string())
            .to_lowercase()
            != "false";

        Self {
            assistant_name: "AI GROW".to_string(),
            openai_api_key,
            openai_base_url,
            model,
            temperature,
            max_tokens,
            default_reply,
            host,
            port,
            db_path,
            history_enabled,
        }
    }
}
