//! Generation client for postforge
//!
//! This crate contains:
//! - Prompt enrichment (platform and tone instructions around the topic)
//! - The text fallback chain (Groq -> Gemini -> OpenRouter) and image generation
//! - Worker dispatch that runs each generation on its own task and hands the
//!   result back over a channel

mod client;
mod image;
mod prompt;
mod worker;

pub use client::*;
pub use image::*;
pub use prompt::*;
pub use worker::*;
