//! Style objects produced by AI effects.
//!
//! - [`whitelist`]: the fixed set of property names an effect may set.
//! - [`sanitize`]: filters an untrusted JSON object down to a [`StyleMap`].
//!
//! A [`StyleMap`] can only be filled through [`sanitize::sanitize`], so every
//! instance in the program already satisfies the whitelist and pattern checks.

pub mod sanitize;
pub mod whitelist;

use std::collections::BTreeMap;

use serde::Serialize;

pub use sanitize::{find_unsafe_pattern, is_safe_value};
pub use whitelist::{ALLOWED_PROPERTIES, is_allowed};

/// Validated mapping of style property name to CSS value.
///
/// Serializes as a flat JSON object with keys in sorted order.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<String, String>);

impl StyleMap {
    /// An empty style map ("no effect").
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, key: String, value: String) {
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the underlying sorted map.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}
