//! Browse the font catalog and try AI text effects from the terminal.
//!
//! Reads the API key from `TYPESCALE_API_KEY` (or `OPENROUTER_KEY`).
//!
//! # Examples
//!
//! ```sh
//! # List every font
//! typescale fonts
//!
//! # Filter the way the preview toolbar does
//! typescale fonts --category mono --search plex
//!
//! # Resolve an effect prompt to a sanitized style object
//! typescale effect "retro neon sign with a pink glow"
//! typescale effect --model openai/gpt-4o "embossed gold lettering"
//! ```

use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use typescale::prelude::*;

/// Font catalog and AI text-effect resolver.
#[derive(Parser)]
#[command(name = "typescale")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List fonts in the catalog
    Fonts {
        /// Category filter: all, sans-serif, serif, mono, display
        #[arg(long, default_value = "all")]
        category: String,

        /// Case-insensitive font name search
        #[arg(long, default_value = "")]
        search: String,

        /// Print the records as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Resolve an effect prompt into a sanitized style object
    Effect {
        /// Free-text description of the effect
        prompt: String,

        /// Model override (default from TYPESCALE_MODEL)
        #[arg(long)]
        model: Option<String>,

        /// Endpoint base URL override (default from TYPESCALE_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Upstream timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

fn list_fonts(category: &str, search: &str, json: bool) -> Result<String, String> {
    let catalog = FontCatalog::seeded();
    let query = FontQuery::parse(category, search)?;
    let fonts: Vec<&FontRecord> = catalog.query(&query).collect();

    if json {
        return serde_json::to_string_pretty(&fonts)
            .map(|s| s + "\n")
            .map_err(|e| e.to_string());
    }

    let mut out = String::new();
    for font in &fonts {
        out.push_str(&format!("{:>3}  {:<22} {}\n", font.id, font.name, font.category));
    }
    out.push_str(&format!("{} of {} fonts\n", fonts.len(), catalog.len()));
    Ok(out)
}

async fn resolve_effect(
    prompt: String,
    model: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<String, String> {
    let mut config = Config::from_env().map_err(|e| e.to_string())?;
    if let Some(model) = model {
        config = config.with_model(model);
    }
    if let Some(url) = base_url {
        config = config.with_base_url(url).map_err(|e| e.to_string())?;
    }
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let client = ChatCompletionClient::new(&config).map_err(|e| e.to_string())?;
    let resolver = EffectResolver::new(Arc::new(client), &config);
    let result = resolver
        .resolve(EffectRequest::new(prompt))
        .await
        .map_err(|e| e.to_string())?;

    serde_json::to_string_pretty(&result)
        .map(|s| s + "\n")
        .map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    typescale::init_tracing();
    let cli = Cli::parse();

    let output = match cli.command {
        Command::Fonts {
            category,
            search,
            json,
        } => list_fonts(&category, &search, json),
        Command::Effect {
            prompt,
            model,
            base_url,
            timeout_secs,
        } => resolve_effect(prompt, model, base_url, timeout_secs).await,
    };

    match output {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
