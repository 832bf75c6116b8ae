//! Convenience re-exports for common `typescale` types.
//!
//! ```ignore
//! use typescale::prelude::*;
//! ```

// ── Catalog ─────────────────────────────────────────────────────────
pub use crate::catalog::{FontCatalog, FontCategory, FontQuery, FontRecord};

// ── Effects ─────────────────────────────────────────────────────────
pub use crate::api::{ChatCompletionClient, Completion, CompletionFuture};
pub use crate::effect::{EffectRequest, EffectResolver, EffectResult};
pub use crate::style::StyleMap;

// ── Config and errors ───────────────────────────────────────────────
pub use crate::config::Config;
pub use crate::error::{CompletionError, ConfigError, EffectError};
