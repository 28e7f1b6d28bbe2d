use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default OpenRouter chat-completions endpoint. Overridable so any
/// OpenAI-compatible provider can stand in.
const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// Model used when LLM_MODEL is not set.
const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: String,
    pub openrouter_api_url: String,
    pub model: String,
    pub port: u16,
    pub courses_file: PathBuf,
    /// Optional JSONL audit trail of generation prompt/response pairs.
    pub generation_log: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        // DEBUG=1 raises the default log level; RUST_LOG still wins.
        let debug = std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false);

        Ok(Config {
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            openrouter_api_url: std::env::var("OPENROUTER_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            courses_file: std::env::var("COURSES_FILE")
                .unwrap_or_else(|_| "courses.json".to_string())
                .into(),
            generation_log: std::env::var("GENERATION_LOG").ok().map(PathBuf::from),
            // Fed through main's `{pkg}={rust_log}` filter template, so the
            // debug value expands to `api=debug,tower_http=debug`.
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| {
                let default = if debug { "debug,tower_http=debug" } else { "info" };
                default.to_string()
            }),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
