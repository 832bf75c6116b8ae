//! Text-completion layer: the [`Completion`] seam and its HTTP implementation.
//!
//! - [`client`]: [`ChatCompletionClient`], an OpenAI-compatible chat
//!   completions client (works against OpenRouter, OpenAI, and compatible
//!   gateways).
//! - [`prompt`]: the system instruction describing the style object the
//!   model must return.
//!
//! The resolver only sees `dyn Completion`, so tests drive it with a
//! scripted fake instead of the network.

pub mod client;
pub mod prompt;

use std::future::Future;
use std::pin::Pin;

use crate::error::CompletionError;

pub use client::{ChatCompletionClient, ChatRequest, Message, MessageRole};
pub use prompt::effect_system_prompt;

/// Boxed future returned by [`Completion::complete`].
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send + 'a>>;

/// A service that turns a system instruction plus a user prompt into text.
///
/// Uses a boxed future so the trait stays dyn-compatible and can be shared
/// as `Arc<dyn Completion>` across request handlers.
pub trait Completion: Send + Sync {
    /// Return the raw text of the first completion.
    fn complete<'a>(&'a self, system: &'a str, prompt: &'a str) -> CompletionFuture<'a>;
}
