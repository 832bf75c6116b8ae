//! Turn a free-text effect prompt into a sanitized [`StyleMap`].
//!
//! ```text
//! prompt ──▶ validate ──▶ Completion ──▶ parse (direct, then extract) ──▶ sanitize ──▶ EffectResult
//! ```
//!
//! Only two steps can fail: validation (the caller's fault) and the
//! completion call (upstream's fault). Whatever text the model returns is
//! never trusted structurally; a reply with no usable object degrades to an
//! empty style map ("no effect").

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::api::{Completion, effect_system_prompt};
use crate::config::Config;
use crate::error::{CompletionError, EffectError};
use crate::style::StyleMap;
use crate::style::sanitize::sanitize;

/// Inbound request body. `prompt` is optional so a missing field surfaces as
/// a validation error rather than a deserialization failure.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EffectRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

impl EffectRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
        }
    }
}

/// Sanitized styles plus the prompt exactly as received.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EffectResult {
    pub styles: StyleMap,
    pub prompt: String,
}

/// Orchestrates one prompt-to-style round trip. Holds no per-request state,
/// so one instance serves any number of concurrent calls.
pub struct EffectResolver {
    completion: Arc<dyn Completion>,
    system_prompt: String,
    timeout: Duration,
    max_prompt_chars: Option<usize>,
}

impl EffectResolver {
    /// Build a resolver over `completion` using the timeout and optional
    /// prompt limit from `config`.
    pub fn new(completion: Arc<dyn Completion>, config: &Config) -> Self {
        Self {
            completion,
            system_prompt: effect_system_prompt(),
            timeout: config.timeout,
            max_prompt_chars: config.max_prompt_chars,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve one effect request.
    pub async fn resolve(&self, request: EffectRequest) -> Result<EffectResult, EffectError> {
        let prompt = self.validate(request)?;

        let raw = match tokio::time::timeout(
            self.timeout,
            self.completion.complete(&self.system_prompt, &prompt),
        )
        .await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Effect completion failed: {e}");
                return Err(e.into());
            }
            Err(_) => {
                warn!("Effect completion timed out after {:?}", self.timeout);
                return Err(CompletionError::Timeout(self.timeout).into());
            }
        };

        let object = parse_style_object(&raw);
        let styles = sanitize(&object);
        debug!(
            "Resolved effect: {} style(s) from {} byte reply",
            styles.len(),
            raw.len()
        );
        Ok(EffectResult { styles, prompt })
    }

    fn validate(&self, request: EffectRequest) -> Result<String, EffectError> {
        let prompt = request.prompt.unwrap_or_default();
        if prompt.trim().is_empty() {
            return Err(EffectError::Validation("prompt is required".into()));
        }
        if let Some(max) = self.max_prompt_chars {
            let chars = prompt.chars().count();
            if chars > max {
                return Err(EffectError::Validation(format!(
                    "prompt is too long ({chars} characters, maximum {max})"
                )));
            }
        }
        Ok(prompt)
    }
}

/// Best-effort parse of model output into a JSON object.
///
/// Tries the whole text first, then the first balanced `{...}` substring.
/// Anything else yields an empty map.
pub fn parse_style_object(raw: &str) -> Map<String, Value> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw.trim()) {
        return map;
    }
    let Some(candidate) = extract_balanced_object(raw) else {
        debug!("No JSON object found in completion text");
        return Map::new();
    };
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => map,
        _ => {
            debug!("Embedded object did not parse; treating as no effect");
            Map::new()
        }
    }
}

/// Find the first balanced `{...}` substring.
///
/// Braces inside JSON string literals (including escaped quotes) do not
/// count. Returns `None` if no opening brace ever closes.
pub fn extract_balanced_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut search_from = 0;
    while let Some(offset) = bytes.get(search_from..)?.iter().position(|&b| b == b'{') {
        let start = search_from + offset;
        if let Some(end) = matching_close(bytes, start) {
            return text.get(start..=end);
        }
        search_from = start + 1;
    }
    None
}

/// Index of the `}` closing the `{` at `start`, if any.
fn matching_close(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
