//! TypeScale web server.
//!
//! Serves the font catalog and the AI effect endpoint, plus the built
//! preview client when `--static-dir` is given.
//!
//! # Usage
//!
//! ```bash
//! TYPESCALE_API_KEY=sk-... cargo run -p typescale-web
//! TYPESCALE_API_KEY=sk-... cargo run -p typescale-web -- --port 8080 --static-dir client/dist
//! ```
//!
//! Without an API key the server still starts; `POST /api/effects` then
//! answers 503.
//!
//! ## Requesting an effect
//!
//! ```bash
//! curl -s localhost:5000/api/effects -H 'content-type: application/json' \
//!   -d '{"prompt": "glowing neon tubes"}'
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use typescale::prelude::*;
use typescale_web::{WebConfig, spawn_web};

/// TypeScale web server.
#[derive(Parser)]
#[command(about = "Font catalog and AI text-effect API for the TypeScale preview app")]
struct Args {
    /// Interface to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port for the HTTP server.
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Directory with the built preview client to serve as static files.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Model override (default from TYPESCALE_MODEL).
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    typescale::init_tracing();
    let args = Args::parse();

    // 1. Resolve configuration once for the whole process.
    let mut config = Config::from_env().map_err(|e| e.to_string())?;
    if let Some(model) = args.model {
        config = config.with_model(model);
    }

    // 2. Seed the catalog snapshot.
    let catalog = FontCatalog::seeded();
    info!("Seeded font catalog with {} fonts", catalog.len());

    // 3. Build the effect pipeline if a credential is available.
    let resolver = match ChatCompletionClient::new(&config) {
        Ok(client) => {
            info!("AI effects enabled (model={})", client.model());
            Some(Arc::new(EffectResolver::new(Arc::new(client), &config)))
        }
        Err(ConfigError::MissingApiKey) => {
            warn!("No API key configured; AI effects disabled");
            None
        }
        Err(e) => return Err(e.to_string()),
    };

    // 4. Serve.
    let web_config = WebConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        static_dir: args.static_dir,
    };
    let addr = spawn_web(catalog, resolver, web_config)
        .await
        .map_err(|e| format!("failed to bind: {e}"))?;
    info!("Listening on http://{addr}");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("failed to listen for shutdown signal: {e}"))?;
    info!("Shutting down");
    Ok(())
}
