//! Shared utilities for postforge
//!
//! This crate provides:
//! - ID types (RequestId)
//! - Wall-clock time and timestamp formatting
//! - Default paths for the config file, data directory, and database

mod ids;
mod paths;
mod time;

pub use ids::*;
pub use paths::*;
pub use time::*;
