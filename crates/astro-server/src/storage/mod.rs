//! Storage layer
//!
//! Content lives in process memory only; see `memory::MemStorage`.

pub mod memory;

pub use memory::MemStorage;
