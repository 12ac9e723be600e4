use clap::Parser;

use crate::api_connection::endpoints::{DEFAULT_API_BASE_URL, DEFAULT_CHAT_MODEL};

pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:3000,http://127.0.0.1:3000,http://localhost:5173,http://127.0.0.1:5173";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Smart Recipe Analyzer API", long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Credential for the chat completion API; without it only fallback recipes are served
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, env = "RECIPE_MODEL", default_value = DEFAULT_CHAT_MODEL)]
    pub model: String,

    #[arg(long, env = "RECIPE_MAX_TOKENS", default_value_t = 1500)]
    pub max_tokens: u32,

    #[arg(long, env = "RECIPE_TEMPERATURE", default_value_t = 0.7)]
    pub temperature: f32,

    /// Upper bound on one generation call, in seconds
    #[arg(long, env = "RECIPE_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Comma separated CORS origins
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',', default_value = DEFAULT_ALLOWED_ORIGINS)]
    pub allowed_origins: Vec<String>,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
