//! Attenuate an untrusted key/value mapping down to a safe [`StyleMap`].
//!
//! Matching is a plain lowercase substring scan, run twice: once on the
//! value as given and once with all whitespace removed, so `url (` and
//! `java script:` are caught the same as their compact forms. Comment
//! markers are rejected outright, which covers `expr/**/ession(`.

use serde_json::{Map, Value};
use tracing::debug;

use super::whitelist;
use super::StyleMap;

/// Substrings that disqualify a value, compared against the lowercased text.
pub const UNSAFE_PATTERNS: &[&str] = &[
    // External resource loads
    "url(",
    // Script evaluation
    "expression(",
    // Script URI schemes
    "javascript:",
    "vbscript:",
    // Legacy behavior binding
    "behavior:",
    // Style import
    "@import",
    // Legacy data binding
    "-moz-binding",
    "binding:",
    // Escapes can spell any of the above
    "\\",
    // Comments can split any of the above
    "/*",
    "*/",
    // Breaking out of the declaration or the style block
    ";",
    "{",
    "}",
    "<",
    ">",
];

/// Why an entry was dropped. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    UnknownProperty,
    NotAString,
    UnsafeValue(&'static str),
}

/// Return the first unsafe pattern contained in `value`, if any.
pub fn find_unsafe_pattern(value: &str) -> Option<&'static str> {
    let lower = value.to_lowercase();
    let compact: String = lower.chars().filter(|c| !c.is_whitespace()).collect();
    UNSAFE_PATTERNS
        .iter()
        .copied()
        .find(|p| lower.contains(p) || compact.contains(p))
}

/// Whether `value` is free of every unsafe pattern.
pub fn is_safe_value(value: &str) -> bool {
    find_unsafe_pattern(value).is_none()
}

fn check_entry(key: &str, value: &Value) -> Result<String, Rejection> {
    if !whitelist::is_allowed(key) {
        return Err(Rejection::UnknownProperty);
    }
    let Value::String(text) = value else {
        return Err(Rejection::NotAString);
    };
    if let Some(pattern) = find_unsafe_pattern(text) {
        return Err(Rejection::UnsafeValue(pattern));
    }
    Ok(text.clone())
}

/// Keep only whitelisted, string-valued, pattern-safe entries.
///
/// Never fails: each bad entry is dropped on its own and the rest survive.
pub fn sanitize(raw: &Map<String, Value>) -> StyleMap {
    let mut styles = StyleMap::new();
    for (key, value) in raw {
        match check_entry(key, value) {
            Ok(text) => {
                styles.insert(key.clone(), text);
            }
            Err(reason) => debug!("Dropping style entry {key:?}: {reason:?}"),
        }
    }
    debug!(
        "Sanitized style object: kept {} of {} entries",
        styles.len(),
        raw.len()
    );
    styles
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            other => panic!("expected object, got {other}"),
        }
    }

    fn assert_invariants(styles: &StyleMap) {
        for (key, value) in styles.iter() {
            assert!(whitelist::is_allowed(key), "{key} not whitelisted");
            let lower = value.to_lowercase();
            let compact: String = lower.chars().filter(|c| !c.is_whitespace()).collect();
            for p in UNSAFE_PATTERNS {
                assert!(!lower.contains(p), "{key}={value} contains {p}");
                assert!(!compact.contains(p), "{key}={value} hides {p} in whitespace");
            }
        }
    }

    #[test]
    fn empty_mapping_yields_empty_styles() {
        assert!(sanitize(&Map::new()).is_empty());
    }

    #[test]
    fn only_unknown_keys_yields_empty_styles() {
        let raw = map(json!({"position": "fixed", "onclick": "x()", "zIndex": "9999"}));
        assert!(sanitize(&raw).is_empty());
    }

    #[test]
    fn safe_entries_pass_unchanged() {
        let raw = map(json!({
            "color": "#ff0000",
            "textShadow": "0 0 1px red",
            "backgroundImage": "linear-gradient(90deg, #f00, #00f)",
        }));
        let styles = sanitize(&raw);
        assert_eq!(styles.len(), 3);
        assert_eq!(styles.get("color"), Some("#ff0000"));
        assert_eq!(styles.get("textShadow"), Some("0 0 1px red"));
        assert_eq!(
            styles.get("backgroundImage"),
            Some("linear-gradient(90deg, #f00, #00f)")
        );
    }

    #[test]
    fn non_string_values_dropped() {
        let raw = map(json!({
            "fontWeight": 700,
            "color": null,
            "filter": ["blur(2px)"],
            "transform": {"rotate": "3deg"},
            "letterSpacing": true,
            "wordSpacing": "0.2em",
        }));
        let styles = sanitize(&raw);
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.get("wordSpacing"), Some("0.2em"));
    }

    #[test]
    fn unsafe_values_dropped_case_insensitively() {
        let raw = map(json!({
            "background": "URL(https://evil.example/x.png)",
            "color": "expression(alert(1))",
            "backgroundImage": "JavaScript:alert(1)",
            "filter": "progid:DXImageTransform; behavior: url(x.htc)",
            "transform": "@IMPORT 'x.css'",
            "textShadow": "-moz-binding: url(x.xml#xss)",
            "letterSpacing": "1px",
        }));
        let styles = sanitize(&raw);
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.get("letterSpacing"), Some("1px"));
        assert_invariants(&styles);
    }

    #[test]
    fn whitespace_split_patterns_caught() {
        assert!(!is_safe_value("url (x.png)"));
        assert!(!is_safe_value("java\tscript:alert(1)"));
        assert!(!is_safe_value("expression\n(1)"));
    }

    #[test]
    fn comment_split_patterns_caught() {
        assert!(!is_safe_value("expr/**/ession(alert(1))"));
        assert!(!is_safe_value("u/**/rl(x)"));
        assert!(!is_safe_value("java/* x */script:alert(1)"));
        assert!(!is_safe_value("red */"));

        let raw = map(json!({
            "color": "expr/**/ession(alert(1))",
            "background": "u/**/rl(x)",
            "textShadow": "0 0 4px blue",
        }));
        let styles = sanitize(&raw);
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.get("textShadow"), Some("0 0 4px blue"));
        assert_invariants(&styles);
    }

    #[test]
    fn whitespace_split_values_never_survive() {
        let raw = map(json!({
            "background": "u r l (x.png)",
            "backgroundImage": "java script:alert(1)",
            "filter": "ex pression(1)",
            "color": "navy",
        }));
        let styles = sanitize(&raw);
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.get("color"), Some("navy"));
        assert_invariants(&styles);
    }

    #[test]
    fn escapes_and_breakouts_rejected() {
        assert!(!is_safe_value(r"\75 rl(x)"));
        assert!(!is_safe_value("red; position: fixed"));
        assert!(!is_safe_value("red</style><script>"));
        assert!(!is_safe_value("red } body { color: blue"));
    }

    #[test]
    fn ordinary_css_is_safe() {
        for value in [
            "0 0 10px #0ff, 0 0 20px #0ff",
            "rotate(-3deg) skewX(10deg)",
            "drop-shadow(2px 2px 0 rgba(0, 0, 0, 0.5))",
            "text",
            "transparent",
            "2px #333",
            "900",
            "calc(100% / 2)",
        ] {
            assert!(is_safe_value(value), "{value} should be safe");
        }
    }

    #[test]
    fn mixed_input_keeps_only_valid_entries() {
        let raw = map(json!({
            "color": "red",
            "background": "url(javascript:alert(1))",
            "margin": "10px",
            "fontWeight": "800",
            "fontStyle": 1,
        }));
        let styles = sanitize(&raw);
        let keys: Vec<&str> = styles.keys().collect();
        assert_eq!(keys, vec!["color", "fontWeight"]);
        assert_invariants(&styles);
    }
}
