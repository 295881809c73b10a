//! Shared domain types for postforge
//!
//! This crate defines the vocabulary shared by the store, the providers,
//! and the generation client:
//! - Provider identifiers and per-provider request settings
//! - Target platforms and tones
//! - Credentials and history records

mod settings;
mod types;

pub use settings::*;
pub use types::*;
