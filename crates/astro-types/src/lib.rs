//! Astro Types - Pure data types for the Astro Studios site
//!
//! Entity records, their insert payloads, and the form payloads accepted by
//! the public API together with the validation that turns a form into an
//! insert payload. Nothing in here touches an async runtime.

pub mod blog;
pub mod contact;
pub mod game;
pub mod newsletter;
pub mod review;
pub mod user;
pub mod validation;

pub use blog::*;
pub use contact::*;
pub use game::*;
pub use newsletter::*;
pub use review::*;
pub use user::*;
pub use validation::{FieldError, ValidationErrors};

/// Numeric identity assigned by the store, sequential per entity kind.
pub type EntityId = i32;
