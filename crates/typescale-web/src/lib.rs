//! HTTP API and static host for the TypeScale font preview app.
//!
//! `typescale-web` wraps the [`typescale`] core in an axum server with two
//! endpoints and an optional static-file fallback for the browser client.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use typescale::prelude::*;
//! use typescale_web::{WebConfig, spawn_web};
//!
//! let config = Config::from_env()?;
//! let client = ChatCompletionClient::new(&config)?;
//! let resolver = Arc::new(EffectResolver::new(Arc::new(client), &config));
//!
//! let addr = spawn_web(FontCatalog::seeded(), Some(resolver), WebConfig::default()).await?;
//! println!("TypeScale: http://{addr}");
//! ```
//!
//! # Endpoints
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | GET | `/api/fonts` | | `[{id, name, family, category}]` |
//! | POST | `/api/effects` | `{prompt}` | `{styles, prompt}`, or `{error}` with 400 / 502 / 503 |

mod api;
mod server;

pub use api::{ApiError, AppState, ErrorBody};
pub use server::{build_router, start_server};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use typescale::catalog::FontCatalog;
use typescale::effect::EffectResolver;

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:5000`.
    pub bind_addr: SocketAddr,
    /// Directory holding the built preview client.
    ///
    /// If `None`, only the API is served and the client runs separately.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            static_dir: None,
        }
    }
}

/// Spawn the web server on a Tokio task and return the bound address.
///
/// The server runs until the Tokio runtime shuts down.
///
/// # Arguments
///
/// * `catalog` — Font snapshot served by `GET /api/fonts`.
/// * `resolver` — Effect pipeline for `POST /api/effects`; `None` disables
///   effects (the endpoint answers 503).
/// * `config` — Server configuration.
pub async fn spawn_web(
    catalog: FontCatalog,
    resolver: Option<Arc<EffectResolver>>,
    config: WebConfig,
) -> std::io::Result<SocketAddr> {
    let state = AppState { catalog, resolver };
    let router = build_router(state, config.static_dir);
    start_server(router, config.bind_addr).await
}
