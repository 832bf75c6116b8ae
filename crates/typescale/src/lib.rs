//! Backend core for the TypeScale font preview app.
//!
//! `typescale` holds everything the web server and CLI need that is not HTTP
//! routing: the static font catalog and the AI text-effect pipeline that
//! turns a free-text prompt into a CSS style object safe to apply in the
//! browser.
//!
//! # Getting started
//!
//! ```ignore
//! use std::sync::Arc;
//! use typescale::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     let config = Config::from_env().map_err(|e| e.to_string())?;
//!     let client = ChatCompletionClient::new(&config).map_err(|e| e.to_string())?;
//!     let resolver = EffectResolver::new(Arc::new(client), &config);
//!
//!     let result = resolver
//!         .resolve(EffectRequest::new("neon sign, cyan glow"))
//!         .await
//!         .map_err(|e| e.to_string())?;
//!     println!("{}", serde_json::to_string_pretty(&result).unwrap());
//!     Ok(())
//! }
//! ```
//!
//! # The effect pipeline
//!
//! ```text
//! EffectRequest ──▶ EffectResolver ──▶ dyn Completion ──▶ completion service
//!                        │
//!                        ├─ parse_style_object (direct JSON, then first balanced {...})
//!                        └─ sanitize (whitelist + unsafe-pattern filter) ──▶ EffectResult
//! ```
//!
//! The model's output is never trusted structurally. Parsing degrades to an
//! empty object and the sanitizer drops entries one by one, so the only
//! errors a caller sees are a missing prompt and an upstream failure.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | [`FontCatalog`](catalog::FontCatalog) snapshot, [`FontRecord`](catalog::FontRecord), client-style [`FontQuery`](catalog::FontQuery) |
//! | [`style`] | [`StyleMap`](style::StyleMap), property whitelist, sanitizer |
//! | [`api`] | [`Completion`](api::Completion) trait, [`ChatCompletionClient`](api::ChatCompletionClient), system prompt |
//! | [`effect`] | [`EffectResolver`](effect::EffectResolver) and request/result types |
//! | [`config`] | [`Config`](config::Config) resolved once from the environment |
//! | [`error`] | `thiserror` error enums |

pub mod api;
pub mod catalog;
pub mod config;
pub mod effect;
pub mod error;
pub mod prelude;
pub mod style;

/// Install the `tracing` subscriber used by the binaries.
///
/// Logs to stderr at `info` unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
