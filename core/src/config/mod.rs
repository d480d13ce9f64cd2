use anyhow::{Context, Result};

use crate::providers::anthropic::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

pub const DEFAULT_MAX_TURNS: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub enrichlayer_api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub max_turns: usize,
    pub auto_feedback: bool,
}

impl Config {
    /// Reads configuration from the process environment, loading a `.env`
    /// file first if one is present. Credentials are required; everything
    /// else has a default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY not set. Add it to your environment or .env file.")?;
        let enrichlayer_api_key = std::env::var("ENRICHLAYER_API_KEY")
            .context("ENRICHLAYER_API_KEY not set. Add it to your environment or .env file.")?;

        let model =
            std::env::var("PROSPECTOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_tokens = std::env::var("PROSPECTOR_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let max_turns = std::env::var("PROSPECTOR_MAX_TURNS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TURNS);

        let auto_feedback = std::env::var("AUTO_FEEDBACK")
            .map(|v| env_flag(&v))
            .unwrap_or(false);

        Ok(Self {
            anthropic_api_key,
            enrichlayer_api_key,
            model,
            max_tokens,
            max_turns,
            auto_feedback,
        })
    }
}

fn env_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert!(env_flag("true"));
        assert!(env_flag("TRUE"));
        assert!(env_flag("1"));
        assert!(env_flag("yes"));
        assert!(!env_flag("false"));
        assert!(!env_flag("0"));
        assert!(!env_flag(""));
    }
}
