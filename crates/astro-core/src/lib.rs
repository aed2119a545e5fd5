//! Astro Core Library
//!
//! Storage ports, the shared error type and the sample catalogue the site
//! starts with.

// Re-export pure types from astro-types
pub use astro_types::*;

pub mod error;
pub mod ports;
pub mod seed;

pub use error::{AstroError, Result};
pub use ports::{ContentStore, StoreStats};
