//! Provider trait interfaces for postforge
//!
//! This crate defines the seam between the generation client and the
//! third-party APIs. It contains no HTTP code itself; see
//! `postforge-providers-http` for the real implementations.

mod mock;
mod traits;

pub use mock::*;
pub use traits::*;
