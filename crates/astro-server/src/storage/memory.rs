//! In-memory content store using DashMap
//!
//! Every entity kind lives in its own map keyed by id, next to an atomic id
//! counter. Slugs, usernames and subscriber emails are indexed (key -> id) on
//! create so lookups by key never scan. Nothing is persisted: a restart starts
//! from an empty store.

use astro_core::{
    AstroError, BlogPost, ContactMessage, EntityId, Game, NewBlogPost, NewContactMessage, NewGame,
    NewNewsletterSubscription, NewReview, NewUser, NewsletterSubscription, Result, Review, User,
};
use astro_core::ports::{
    BlogStore, ContactStore, ContentStore, GameStore, NewsletterStore, ReviewStore, StoreStats,
    UserStore,
};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use tracing::{debug, info};

/// Records of one kind plus the counter that hands out their ids
struct Table<T> {
    rows: DashMap<EntityId, T>,
    next_id: AtomicI32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    fn allocate_id(&self) -> EntityId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn insert(&self, id: EntityId, row: T) -> T {
        self.rows.insert(id, row.clone());
        row
    }

    /// Insert a row whose key may already be claimed in `index`. The id is
    /// allocated while the index entry is locked, so the lowest id created
    /// with a key is the one the index keeps.
    fn insert_claiming(
        &self,
        index: &DashMap<String, EntityId>,
        key: String,
        build: impl FnOnce(EntityId) -> T,
    ) -> T {
        match index.entry(key) {
            Entry::Occupied(_) => {
                let id = self.allocate_id();
                self.insert(id, build(id))
            }
            Entry::Vacant(slot) => {
                let id = self.allocate_id();
                let row = self.insert(id, build(id));
                slot.insert(id);
                row
            }
        }
    }

    fn get(&self, id: EntityId) -> Option<T> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    /// Rows matching `keep`, in id order
    fn select(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<(EntityId, T)> = self
            .rows
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        rows.sort_by_key(|(id, _)| *id);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    fn all(&self) -> Vec<T> {
        self.select(|_| true)
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Resolve a key through a secondary index. The index guard is released
/// before the row is read.
fn lookup<T: Clone>(index: &DashMap<String, EntityId>, key: &str, table: &Table<T>) -> Option<T> {
    let id = index.get(key).map(|entry| *entry.value())?;
    table.get(id)
}

pub struct MemStorage {
    users: Table<User>,
    usernames: DashMap<String, EntityId>,
    games: Table<Game>,
    game_slugs: DashMap<String, EntityId>,
    blog_posts: Table<BlogPost>,
    post_slugs: DashMap<String, EntityId>,
    reviews: Table<Review>,
    contact_messages: Table<ContactMessage>,
    subscriptions: Table<NewsletterSubscription>,
    subscriber_emails: DashMap<String, EntityId>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            users: Table::new(),
            usernames: DashMap::new(),
            games: Table::new(),
            game_slugs: DashMap::new(),
            blog_posts: Table::new(),
            post_slugs: DashMap::new(),
            reviews: Table::new(),
            contact_messages: Table::new(),
            subscriptions: Table::new(),
            subscriber_emails: DashMap::new(),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemStorage {
    async fn get_user(&self, id: EntityId) -> Result<Option<User>> {
        Ok(self.users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(lookup(&self.usernames, username, &self.users))
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        match self.usernames.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(AstroError::conflict("user", &user.username)),
            Entry::Vacant(slot) => {
                let id = self.users.allocate_id();
                let user = self.users.insert(id, user.into_user(id));
                slot.insert(id);
                debug!("Created user {} ({})", id, user.username);
                Ok(user)
            }
        }
    }
}

#[async_trait]
impl GameStore for MemStorage {
    async fn get_all_games(&self) -> Result<Vec<Game>> {
        Ok(self.games.all())
    }

    async fn get_game_by_id(&self, id: EntityId) -> Result<Option<Game>> {
        Ok(self.games.get(id))
    }

    async fn get_game_by_slug(&self, slug: &str) -> Result<Option<Game>> {
        Ok(lookup(&self.game_slugs, slug, &self.games))
    }

    async fn create_game(&self, game: NewGame) -> Result<Game> {
        // First game created with a slug owns it
        let game = self
            .games
            .insert_claiming(&self.game_slugs, game.slug.clone(), |id| game.into_game(id));
        debug!("Created game {} ({})", game.id, game.slug);
        Ok(game)
    }
}

#[async_trait]
impl BlogStore for MemStorage {
    async fn get_all_blog_posts(&self) -> Result<Vec<BlogPost>> {
        let mut posts = self.blog_posts.all();
        astro_core::sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn get_blog_post_by_id(&self, id: EntityId) -> Result<Option<BlogPost>> {
        Ok(self.blog_posts.get(id))
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        Ok(lookup(&self.post_slugs, slug, &self.blog_posts))
    }

    async fn create_blog_post(&self, post: NewBlogPost) -> Result<BlogPost> {
        let post = self
            .blog_posts
            .insert_claiming(&self.post_slugs, post.slug.clone(), |id| post.into_post(id));
        debug!("Created blog post {} ({})", post.id, post.slug);
        Ok(post)
    }
}

#[async_trait]
impl ReviewStore for MemStorage {
    async fn get_all_reviews(&self) -> Result<Vec<Review>> {
        Ok(self.reviews.all())
    }

    async fn get_review_by_id(&self, id: EntityId) -> Result<Option<Review>> {
        Ok(self.reviews.get(id))
    }

    async fn get_reviews_by_game_id(&self, game_id: EntityId) -> Result<Vec<Review>> {
        Ok(self.reviews.select(|review| review.game_id == Some(game_id)))
    }

    async fn create_review(&self, review: NewReview) -> Result<Review> {
        let id = self.reviews.allocate_id();
        let review = self.reviews.insert(id, review.into_review(id));
        debug!("Created review {} (game: {:?})", id, review.game_id);
        Ok(review)
    }
}

#[async_trait]
impl ContactStore for MemStorage {
    async fn create_contact_message(&self, message: NewContactMessage) -> Result<ContactMessage> {
        let id = self.contact_messages.allocate_id();
        let message = self
            .contact_messages
            .insert(id, message.into_message(id, Utc::now()));
        debug!("Stored contact message {} ({})", id, message.subject);
        Ok(message)
    }
}

#[async_trait]
impl NewsletterStore for MemStorage {
    async fn create_newsletter_subscription(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> Result<NewsletterSubscription> {
        // The index entry stays locked until the new row is in place, so two
        // subscribes with one email cannot both insert.
        match self.subscriber_emails.entry(subscription.email.clone()) {
            Entry::Occupied(slot) => {
                let id = *slot.get();
                drop(slot);
                info!("Email already subscribed as {}", id);
                self.subscriptions.get(id).ok_or_else(|| {
                    AstroError::Storage(format!("subscription {} missing from index", id))
                })
            }
            Entry::Vacant(slot) => {
                let id = self.subscriptions.allocate_id();
                let subscription = self
                    .subscriptions
                    .insert(id, subscription.into_subscription(id, Utc::now()));
                slot.insert(id);
                debug!("Created newsletter subscription {}", id);
                Ok(subscription)
            }
        }
    }
}

#[async_trait]
impl ContentStore for MemStorage {
    async fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            users: self.users.len(),
            games: self.games.len(),
            blog_posts: self.blog_posts.len(),
            reviews: self.reviews.len(),
            contact_messages: self.contact_messages.len(),
            newsletter_subscriptions: self.subscriptions.len(),
        })
    }
}

impl std::fmt::Debug for MemStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemStorage")
            .field("games", &self.games.len())
            .field("blog_posts", &self.blog_posts.len())
            .field("reviews", &self.reviews.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_core::seed;
    use astro_core::ContactSubject;
    use chrono::TimeZone;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn new_game(title: &str, slug: &str) -> NewGame {
        NewGame {
            title: title.to_string(),
            description: format!("{} description", title),
            thumbnail_url: "https://example.com/game.jpg".to_string(),
            genres: vec!["Puzzle".to_string()],
            slug: slug.to_string(),
        }
    }

    fn new_post(slug: &str, year: i32, month: u32, day: u32) -> NewBlogPost {
        NewBlogPost {
            title: slug.replace('-', " "),
            content: "<p>News</p>".to_string(),
            summary: "News".to_string(),
            thumbnail_url: "https://example.com/post.jpg".to_string(),
            category: "Announcement".to_string(),
            slug: slug.to_string(),
            published_at: Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap(),
        }
    }

    fn new_review(game_id: Option<EntityId>) -> NewReview {
        NewReview {
            reviewer_name: "Tester".to_string(),
            reviewer_title: "Player".to_string(),
            rating: 4,
            content: "Good".to_string(),
            game_id,
            is_industry: game_id.is_none(),
        }
    }

    fn subscription(email: &str) -> NewNewsletterSubscription {
        NewNewsletterSubscription {
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemStorage::new();
        assert!(store.get_all_games().await.unwrap().is_empty());
        assert!(store.get_all_blog_posts().await.unwrap().is_empty());
        assert!(store.get_all_reviews().await.unwrap().is_empty());
        assert_eq!(store.get_game_by_id(1).await.unwrap(), None);
        assert_eq!(store.stats().await.unwrap(), StoreStats::default());
    }

    #[tokio::test]
    async fn test_ids_are_sequential_per_kind() {
        let store = MemStorage::new();
        let a = store.create_game(new_game("A", "a")).await.unwrap();
        let b = store.create_game(new_game("B", "b")).await.unwrap();
        let review = store.create_review(new_review(Some(a.id))).await.unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(review.id, 1);
    }

    #[tokio::test]
    async fn test_game_lookup_by_slug() {
        let store = MemStorage::new();
        let created = store.create_game(new_game("Once 2", "once-2")).await.unwrap();
        store.create_game(new_game("Tap Tap", "tap-tap")).await.unwrap();

        assert_eq!(store.get_game_by_slug("once-2").await.unwrap(), Some(created.clone()));
        assert_eq!(store.get_game_by_id(created.id).await.unwrap(), Some(created));
        assert_eq!(store.get_game_by_slug("once-3").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_slug_resolves_to_first() {
        let store = MemStorage::new();
        let first = store.create_game(new_game("First", "dup")).await.unwrap();
        let second = store.create_game(new_game("Second", "dup")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.get_game_by_slug("dup").await.unwrap(), Some(first));
        assert_eq!(store.get_all_games().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_games_listed_in_insertion_order() {
        let store = MemStorage::new();
        for (i, slug) in ["c", "a", "b"].iter().enumerate() {
            store
                .create_game(new_game(&format!("Game {}", i), slug))
                .await
                .unwrap();
        }
        let slugs: Vec<_> = store
            .get_all_games()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.slug)
            .collect();
        assert_eq!(slugs, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_blog_posts_newest_first() {
        let store = MemStorage::new();
        store.create_blog_post(new_post("middle", 2023, 6, 28)).await.unwrap();
        store.create_blog_post(new_post("oldest", 2023, 5, 10)).await.unwrap();
        store.create_blog_post(new_post("newest", 2023, 7, 15)).await.unwrap();

        let posts = store.get_all_blog_posts().await.unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newest", "middle", "oldest"]);
        assert!(posts.windows(2).all(|w| w[0].published_at >= w[1].published_at));

        let post = store.get_blog_post_by_slug("oldest").await.unwrap().unwrap();
        assert_eq!(post.id, 2);
        assert_eq!(store.get_blog_post_by_id(2).await.unwrap(), Some(post));
        assert_eq!(store.get_blog_post_by_slug("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reviews_by_game_excludes_industry() {
        let store = MemStorage::new();
        let one = store.create_review(new_review(Some(1))).await.unwrap();
        store.create_review(new_review(Some(2))).await.unwrap();
        store.create_review(new_review(None)).await.unwrap();
        let another = store.create_review(new_review(Some(1))).await.unwrap();

        let reviews = store.get_reviews_by_game_id(1).await.unwrap();
        assert_eq!(reviews, vec![one.clone(), another]);
        assert!(store.get_reviews_by_game_id(99).await.unwrap().is_empty());
        assert_eq!(store.get_review_by_id(one.id).await.unwrap(), Some(one));
        assert_eq!(store.get_all_reviews().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_contact_message_stamped() {
        let store = MemStorage::new();
        let before = Utc::now();
        let message = store
            .create_contact_message(NewContactMessage {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                subject: ContactSubject::Business,
                message: "Hello".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(message.id, 1);
        assert!(message.created_at >= before);
        assert_eq!(store.stats().await.unwrap().contact_messages, 1);
    }

    #[tokio::test]
    async fn test_newsletter_dedup() {
        let store = MemStorage::new();
        let first = store
            .create_newsletter_subscription(subscription("fan@example.com"))
            .await
            .unwrap();
        let again = store
            .create_newsletter_subscription(subscription("fan@example.com"))
            .await
            .unwrap();
        let other = store
            .create_newsletter_subscription(subscription("other@example.com"))
            .await
            .unwrap();

        assert_eq!(first, again);
        assert_eq!(other.id, 2);
        assert_eq!(store.stats().await.unwrap().newsletter_subscriptions, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_subscribes_create_one_record() {
        let store = Arc::new(MemStorage::new());
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create_newsletter_subscription(subscription("race@example.com"))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 1);
        assert_eq!(store.stats().await.unwrap().newsletter_subscriptions, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_unique_ids() {
        let store = Arc::new(MemStorage::new());
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create_game(new_game("Parallel", &format!("game-{}", i)))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=50).collect::<Vec<_>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_slugs_resolve_to_lowest_id() {
        let store = Arc::new(MemStorage::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let game = store
                        .create_game(new_game(&format!("Dup {}", i), "dup"))
                        .await
                        .unwrap();
                    let post = store
                        .create_blog_post(new_post("dup", 2023, 1, 1))
                        .await
                        .unwrap();
                    // The slug resolves as soon as the create returns
                    assert!(store.get_game_by_slug("dup").await.unwrap().is_some());
                    assert!(store.get_blog_post_by_slug("dup").await.unwrap().is_some());
                    (game.id, post.id)
                })
            })
            .collect();

        let mut game_ids = Vec::new();
        let mut post_ids = Vec::new();
        for handle in handles {
            let (game_id, post_id) = handle.await.unwrap();
            game_ids.push(game_id);
            post_ids.push(post_id);
        }

        let game = store.get_game_by_slug("dup").await.unwrap().unwrap();
        assert_eq!(Some(&game.id), game_ids.iter().min());
        assert_eq!(game.id, 1);
        let post = store.get_blog_post_by_slug("dup").await.unwrap().unwrap();
        assert_eq!(post.id, 1);
        assert_eq!(store.get_all_games().await.unwrap().len(), 32);
        assert_eq!(store.get_all_blog_posts().await.unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_users() {
        let store = MemStorage::new();
        let user = store
            .create_user(NewUser {
                username: "astro".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(store.get_user(user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(store.get_user_by_username("astro").await.unwrap(), Some(user));
        assert_eq!(store.get_user_by_username("nobody").await.unwrap(), None);

        let err = store
            .create_user(NewUser {
                username: "astro".to_string(),
                password: "other".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AstroError::Conflict { kind: "user", .. }));
        assert_eq!(store.stats().await.unwrap().users, 1);
    }

    #[tokio::test]
    async fn test_seed_sample_catalogue() {
        let store = MemStorage::new();
        let stats = seed::seed(&store).await.unwrap();

        assert_eq!(stats.games, 5);
        assert_eq!(stats.blog_posts, 3);
        assert_eq!(stats.reviews, 6);

        let game = store.get_game_by_slug("once-2").await.unwrap().unwrap();
        assert_eq!(game.title, "Once 2");
        assert_eq!(game.id, 1);

        let reviews = store.get_reviews_by_game_id(game.id).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].reviewer_name, "Jamie Smith");

        let posts = store.get_all_blog_posts().await.unwrap();
        assert_eq!(posts[0].slug, "new-levels-once-2");
    }

    #[tokio::test]
    async fn test_seed_into_non_empty_store() {
        let store = MemStorage::new();
        let existing = store.create_game(new_game("Prototype", "prototype")).await.unwrap();
        seed::seed(&store).await.unwrap();

        let once = store.get_game_by_slug("once-2").await.unwrap().unwrap();
        assert_eq!(once.id, existing.id + 1);

        let reviews = store.get_reviews_by_game_id(once.id).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].reviewer_name, "Jamie Smith");
        assert!(store.get_reviews_by_game_id(existing.id).await.unwrap().is_empty());

        let button = store.get_game_by_slug("the-button-game").await.unwrap().unwrap();
        let reviews = store.get_reviews_by_game_id(button.id).await.unwrap();
        assert_eq!(reviews[0].reviewer_name, "Tara Johnson");
    }

    #[test]
    fn test_debug_shows_counts() {
        let store = MemStorage::new();
        tokio_test::block_on(store.create_game(new_game("A", "a"))).unwrap();
        let debug = format!("{:?}", store);
        assert!(debug.contains("games: 1"), "{}", debug);
    }
}
