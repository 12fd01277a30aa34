use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_AI_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_AI_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub ai: AiConfig,
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: DEFAULT_AI_URL.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = AiConfig::default();

        Self {
            port: non_empty("PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(8080),
            data_path: non_empty("GREEN_TRACK_DATA_PATH").map(PathBuf::from),
            seed: non_empty("GREEN_TRACK_SEED").and_then(|value| value.parse::<u64>().ok()),
            ai: AiConfig {
                api_key: non_empty("AI_API_KEY"),
                url: non_empty("AI_API_URL").unwrap_or(defaults.url),
                model: non_empty("AI_MODEL").unwrap_or(defaults.model),
                timeout: non_empty("AI_TIMEOUT_SECS")
                    .and_then(|value| value.parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.timeout),
            },
        }
    }
}
