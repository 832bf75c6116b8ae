//! Process-wide configuration, resolved once at startup.
//!
//! [`Config::from_env`] reads the environment; binaries then apply their
//! command-line overrides with the `with_*` builders before handing the
//! result to [`ChatCompletionClient::new`](crate::api::ChatCompletionClient::new)
//! and [`EffectResolver::new`](crate::effect::EffectResolver::new).

use std::time::Duration;

use crate::error::ConfigError;

/// Default endpoint base; any OpenAI-compatible `/chat/completions` host works.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model for effect generation.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Default upper bound on one completion round-trip.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the completion client and effect resolver.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential. Only required once an effect is resolved.
    pub api_key: Option<String>,
    /// Base URL; `/chat/completions` is appended. Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,
    /// Deadline for one completion call. Default: 30s.
    pub timeout: Duration,
    /// Prompts longer than this many characters are rejected. Default: no cap.
    pub max_prompt_chars: Option<usize>,
    /// Maximum tokens per completion. Default: `512`.
    pub max_tokens: u32,
    /// Sampling temperature. Default: `0.7`.
    pub temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_prompt_chars: None,
            max_tokens: 512,
            temperature: 0.7,
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// - `TYPESCALE_API_KEY` (falls back to `OPENROUTER_KEY`)
    /// - `TYPESCALE_BASE_URL`
    /// - `TYPESCALE_MODEL`
    /// - `TYPESCALE_TIMEOUT_SECS`
    /// - `TYPESCALE_MAX_PROMPT_CHARS`
    ///
    /// Unset variables keep their defaults; empty values count as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self {
            api_key: get("TYPESCALE_API_KEY").or_else(|| get("OPENROUTER_KEY")),
            ..Self::default()
        };
        if let Some(url) = get("TYPESCALE_BASE_URL") {
            config = config.with_base_url(url)?;
        }
        if let Some(model) = get("TYPESCALE_MODEL") {
            config.model = model;
        }
        if let Some(secs) = get("TYPESCALE_TIMEOUT_SECS") {
            let secs = parse_positive("TYPESCALE_TIMEOUT_SECS", &secs)?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(max) = get("TYPESCALE_MAX_PROMPT_CHARS") {
            let max = parse_positive("TYPESCALE_MAX_PROMPT_CHARS", &max)?;
            config.max_prompt_chars = Some(usize::try_from(max).unwrap_or(usize::MAX));
        }
        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the endpoint base. Must be an `http://` or `https://` URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "TYPESCALE_BASE_URL",
                reason: format!("'{url}' is not an http(s) URL"),
            });
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_prompt_chars(mut self, max: usize) -> Self {
        self.max_prompt_chars = Some(max);
        self
    }

    /// The credential, or [`ConfigError::MissingApiKey`].
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }

    /// Full chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            reason: "must be greater than zero".into(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: format!("'{raw}': {e}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_environment_empty() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_prompt_chars, None);
        assert!(matches!(
            config.require_api_key(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("TYPESCALE_API_KEY", "sk-test"),
            ("TYPESCALE_BASE_URL", "http://localhost:8080/v1/"),
            ("TYPESCALE_MODEL", "local/model"),
            ("TYPESCALE_TIMEOUT_SECS", "5"),
            ("TYPESCALE_MAX_PROMPT_CHARS", "200"),
        ]))
        .unwrap();
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(config.model, "local/model");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_prompt_chars, Some(200));
    }

    #[test]
    fn openrouter_key_is_fallback() {
        let config = Config::from_lookup(lookup(&[("OPENROUTER_KEY", "sk-or")])).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-or"));

        let config = Config::from_lookup(lookup(&[
            ("OPENROUTER_KEY", "sk-or"),
            ("TYPESCALE_API_KEY", "sk-ts"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-ts"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[
            ("TYPESCALE_API_KEY", "  "),
            ("TYPESCALE_MODEL", ""),
        ]))
        .unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn invalid_numbers_rejected() {
        let err = Config::from_lookup(lookup(&[("TYPESCALE_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("TYPESCALE_TIMEOUT_SECS"));

        let err = Config::from_lookup(lookup(&[("TYPESCALE_MAX_PROMPT_CHARS", "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn non_http_base_url_rejected() {
        let err = Config::default().with_base_url("ftp://example.com").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "TYPESCALE_BASE_URL",
                ..
            }
        ));
    }
}
