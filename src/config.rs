use std::fmt::Debug;
use std::time::Duration;

use url::Url;

use crate::error::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[derive(Clone)]
pub struct Config {
    pub addr: String,
    pub generation: GenerationConfig,
}

#[derive(Clone)]
pub struct GenerationConfig {
    /// `None` means the fallback generator is used.
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: Url,
    pub timeout: Duration,
}

impl Config {
    /// Reads the process environment, after loading a `.env` file if one is
    /// present.
    pub fn from_env() -> Result<Config, Error> {
        // a missing .env is normal
        let _ = dotenvy::dotenv();

        Config::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_url = match value("GEMINI_API_URL") {
            Some(raw) => parse_api_url(&raw)?,
            None => parse_api_url(DEFAULT_API_URL)?,
        };

        let timeout_secs = match value("GENERATION_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(Error::InvalidConfig {
                    name: "GENERATION_TIMEOUT_SECS".into(),
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            addr: value("CONTENTFLOW_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            generation: GenerationConfig {
                api_key: value("GEMINI_API_KEY"),
                model: value("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_url,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

// the base needs a trailing slash or `join` drops its last segment
fn parse_api_url(raw: &str) -> Result<Url, Error> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    Url::parse(&with_slash).map_err(|_| Error::InvalidConfig {
        name: "GEMINI_API_URL".into(),
        value: raw.to_string(),
    })
}

impl Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("generation", &self.generation)
            .finish()
    }
}

impl Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("api_url", &self.api_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}
