//! Port traits (interfaces) for dependency injection

pub mod storage;

pub use storage::{
    BlogStore, ContactStore, ContentStore, GameStore, NewsletterStore, ReviewStore, StoreStats,
    UserStore,
};
