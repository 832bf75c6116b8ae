//! The fixed set of style properties an effect may set.
//!
//! Keys use the camelCase form the browser client applies directly as an
//! inline style object. Extending the list is a code change, never data.

/// Every property name a sanitized [`StyleMap`](super::StyleMap) may contain.
pub const ALLOWED_PROPERTIES: &[&str] = &[
    // Shadow
    "textShadow",
    // Color and gradient fill
    "color",
    "background",
    "backgroundImage",
    "backgroundClip",
    "WebkitBackgroundClip",
    "WebkitTextFillColor",
    // Filter and transform
    "filter",
    "transform",
    // Spacing
    "letterSpacing",
    "wordSpacing",
    // Weight and casing
    "fontWeight",
    "fontStyle",
    "textTransform",
    // Stroke
    "WebkitTextStroke",
    "WebkitTextStrokeWidth",
    "WebkitTextStrokeColor",
];

/// Whether `key` is an allowed property. Exact, case-sensitive match.
pub fn is_allowed(key: &str) -> bool {
    ALLOWED_PROPERTIES.contains(&key)
}
