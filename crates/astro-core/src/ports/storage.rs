//! Storage traits for site content
//!
//! Lookups report a missing record as `Ok(None)`; an `Err` always means the
//! store itself failed. Creates assign the next id of their kind.

use crate::Result;
use astro_types::{
    BlogPost, ContactMessage, EntityId, Game, NewBlogPost, NewContactMessage, NewGame,
    NewNewsletterSubscription, NewReview, NewUser, NewsletterSubscription, Review, User,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// User store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, id: EntityId) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    /// Fails with `AstroError::Conflict` when the username is taken.
    async fn create_user(&self, user: NewUser) -> Result<User>;
}

/// Game store
#[async_trait]
pub trait GameStore: Send + Sync {
    /// All games in creation order.
    async fn get_all_games(&self) -> Result<Vec<Game>>;
    async fn get_game_by_id(&self, id: EntityId) -> Result<Option<Game>>;
    async fn get_game_by_slug(&self, slug: &str) -> Result<Option<Game>>;
    async fn create_game(&self, game: NewGame) -> Result<Game>;
}

/// Blog post store
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// All posts, newest `published_at` first.
    async fn get_all_blog_posts(&self) -> Result<Vec<BlogPost>>;
    async fn get_blog_post_by_id(&self, id: EntityId) -> Result<Option<BlogPost>>;
    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>>;
    async fn create_blog_post(&self, post: NewBlogPost) -> Result<BlogPost>;
}

/// Review store
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// All reviews in creation order.
    async fn get_all_reviews(&self) -> Result<Vec<Review>>;
    async fn get_review_by_id(&self, id: EntityId) -> Result<Option<Review>>;
    /// Reviews referencing `game_id`. Industry reviews never match.
    async fn get_reviews_by_game_id(&self, game_id: EntityId) -> Result<Vec<Review>>;
    async fn create_review(&self, review: NewReview) -> Result<Review>;
}

/// Contact message store. Write-only from the outside.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Stamps `created_at` with the current time.
    async fn create_contact_message(&self, message: NewContactMessage) -> Result<ContactMessage>;
}

/// Newsletter subscription store
#[async_trait]
pub trait NewsletterStore: Send + Sync {
    /// Idempotent: an email that is already subscribed returns the existing
    /// subscription unchanged.
    async fn create_newsletter_subscription(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> Result<NewsletterSubscription>;
}

/// Record counts per entity kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub users: usize,
    pub games: usize,
    pub blog_posts: usize,
    pub reviews: usize,
    pub contact_messages: usize,
    pub newsletter_subscriptions: usize,
}

/// Everything the site stores
#[async_trait]
pub trait ContentStore:
    UserStore + GameStore + BlogStore + ReviewStore + ContactStore + NewsletterStore
{
    async fn stats(&self) -> Result<StoreStats>;
}
