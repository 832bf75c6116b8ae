//! System instruction for effect generation.

use crate::style::ALLOWED_PROPERTIES;

/// Build the system instruction sent with every effect prompt.
///
/// Lists the allowed property names so the model's declared shape matches
/// the sanitizer. The sanitizer still checks every entry regardless.
pub fn effect_system_prompt() -> String {
    format!(
        "\
You are a CSS text-effect designer for a font preview tool. The user describes \
a visual effect for a line of preview text. Reply with a single JSON object and \
nothing else: no prose, no markdown fences.

Rules:
- Keys must be camelCase CSS properties chosen only from: {}.
- Every value must be a CSS value string, e.g. \"0 0 8px #0ff\" or \"700\".
- Do not use url(), expression(), @import, or any script.
- Prefer combinations of textShadow, color, gradients clipped to text, filter, \
and transform to achieve the effect.",
        ALLOWED_PROPERTIES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_every_allowed_property() {
        let prompt = effect_system_prompt();
        for key in ALLOWED_PROPERTIES {
            assert!(prompt.contains(key), "prompt missing {key}");
        }
        assert!(prompt.contains("JSON object"));
    }
}
