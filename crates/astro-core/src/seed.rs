//! Sample catalogue loaded at startup
//!
//! The studio has no back office; the games, news posts and reviews shown on
//! the site are created here every time the process starts.

use crate::ports::{ContentStore, StoreStats};
use crate::{AstroError, Result};
use astro_types::{Game, NewBlogPost, NewGame, NewReview};
use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info, warn};

fn game(title: &str, description: &str, thumbnail_url: &str, genres: &[&str], slug: &str) -> NewGame {
    NewGame {
        title: title.to_string(),
        description: description.to_string(),
        thumbnail_url: thumbnail_url.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        slug: slug.to_string(),
    }
}

pub fn sample_games() -> Vec<NewGame> {
    vec![
        game(
            "Once 2",
            "A minimalist puzzle experience that challenges your perception of time and space.",
            "https://pixabay.com/get/g731bd148757c52aa43071ffe3f2e6b1da45e12468a478d0535601abebb6834215527964f456f1b01d97cd049d3c1c7ec6b8c591632dc4621411a7a826b569748_1280.jpg",
            &["Puzzle", "Adventure"],
            "once-2",
        ),
        game(
            "Una Noite com Eduado",
            "A narrative-driven adventure set during a mysterious night encounter.",
            "https://images.unsplash.com/photo-1610987039121-d70917dcc6f6?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=500&h=300",
            &["Narrative", "Mystery"],
            "una-noite-com-eduado",
        ),
        game(
            "Tap Tap",
            "A rhythmic tapping game that tests your timing and reflexes with catchy beats.",
            "https://images.unsplash.com/photo-1551103782-8ab07afd45c1?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=500&h=300",
            &["Rhythm", "Arcade"],
            "tap-tap",
        ),
        game(
            "Snappix",
            "A photography adventure game where you capture the perfect pixel art moments.",
            "https://images.unsplash.com/photo-1614294149010-950b698f72c0?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=500&h=300",
            &["Photography", "Pixel Art"],
            "snappix",
        ),
        game(
            "The Button Game",
            "A deceptively simple game about pressing a button, with unexpected consequences.",
            "https://images.unsplash.com/photo-1580327344181-c1163234e5a0?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=500&h=300",
            &["Experimental", "Puzzle"],
            "the-button-game",
        ),
    ]
}

fn published(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .ok_or_else(|| AstroError::Config(format!("invalid publish date {}-{}-{}", year, month, day)))
}

pub fn sample_blog_posts() -> Result<Vec<NewBlogPost>> {
    Ok(vec![
        NewBlogPost {
            title: "New Levels Coming to Once 2".to_string(),
            content: "<p>We're excited to announce that we're working on a new expansion for Once 2, featuring 10 challenging new levels.</p><p>These levels will introduce new mechanics that will challenge even the most experienced players. We've been listening to your feedback and are implementing many of the most requested features.</p><p>Stay tuned for more updates in the coming weeks!</p>".to_string(),
            summary: "We're excited to announce that we're working on a new expansion for Once 2, featuring 10 challenging new levels.".to_string(),
            thumbnail_url: "https://images.unsplash.com/photo-1552820728-8b83bb6b773f?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=500&h=300".to_string(),
            category: "Development".to_string(),
            slug: "new-levels-once-2".to_string(),
            published_at: published(2023, 7, 15)?,
        },
        NewBlogPost {
            title: "The Story Behind Una Noite com Eduado".to_string(),
            content: "<p>Learn about the creative process and inspiration that led to our narrative adventure game.</p><p>Una Noite com Eduado was inspired by Latin American magical realism and the works of authors like Gabriel García Márquez and Jorge Luis Borges. The game takes place during a single night, but explores themes of time, memory, and identity.</p><p>The protagonist's journey is a metaphor for self-discovery, with each encounter representing different aspects of the human experience.</p>".to_string(),
            summary: "Learn about the creative process and inspiration that led to our narrative adventure game.".to_string(),
            thumbnail_url: "https://images.unsplash.com/photo-1509198397868-475647b2a1e5?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=500&h=300".to_string(),
            category: "Behind the Scenes".to_string(),
            slug: "story-behind-una-noite".to_string(),
            published_at: published(2023, 6, 28)?,
        },
        NewBlogPost {
            title: "Snappix Coming to Mobile Devices".to_string(),
            content: "<p>We're thrilled to announce that Snappix will be available on iOS and Android next month.</p><p>The mobile version will include all the features of the desktop release, plus some exclusive content for mobile players. We've completely redesigned the interface to work seamlessly with touch controls.</p><p>The game will be priced at $4.99 with no in-app purchases or advertisements, providing a premium experience for all players.</p>".to_string(),
            summary: "We're thrilled to announce that Snappix will be available on iOS and Android next month.".to_string(),
            thumbnail_url: "https://images.unsplash.com/photo-1511512578047-dfb367046420?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=500&h=300".to_string(),
            category: "Announcement".to_string(),
            slug: "snappix-mobile-release".to_string(),
            published_at: published(2023, 5, 10)?,
        },
    ])
}

/// A sample review and the slug of the game it is about (`None` for
/// industry reviews)
struct SampleReview {
    game_slug: Option<&'static str>,
    review: NewReview,
}

fn review(
    name: &str,
    title: &str,
    rating: i32,
    content: &str,
    game_slug: Option<&'static str>,
) -> SampleReview {
    SampleReview {
        game_slug,
        review: NewReview {
            reviewer_name: name.to_string(),
            reviewer_title: title.to_string(),
            rating,
            content: content.to_string(),
            game_id: None,
            is_industry: game_slug.is_none(),
        },
    }
}

fn review_catalogue() -> Vec<SampleReview> {
    vec![
        review(
            "Jamie Smith",
            "Once 2 Player",
            5,
            "Once 2 completely blew my mind. The minimalist design paired with complex puzzles creates an amazing gaming experience.",
            Some("once-2"),
        ),
        review(
            "Alex Rodriguez",
            "Adventure Game Fan",
            4,
            "Una Noite com Eduado tells a haunting story in such a unique way. I couldn't stop playing until I reached the end.",
            Some("una-noite-com-eduado"),
        ),
        review(
            "Lisa Kwon",
            "Mobile Gamer",
            5,
            "Tap Tap is my go-to game when I need a quick break. Simple, addictive, and surprisingly challenging!",
            Some("tap-tap"),
        ),
        review(
            "Miguel Patel",
            "Digital Artist",
            4,
            "Snappix rekindled my love for pixel art. The gameplay mechanics are refreshing and the visuals are charming.",
            Some("snappix"),
        ),
        review(
            "Tara Johnson",
            "Puzzle Enthusiast",
            5,
            "The Button Game is genius in its simplicity. What seems straightforward quickly becomes a mind-bending experience.",
            Some("the-button-game"),
        ),
        review(
            "GameDev Magazine",
            "Industry Publication",
            5,
            "Astro Studios continues to impress with their innovative approach to game design and storytelling.",
            None,
        ),
    ]
}

/// Sample reviews pointed at `games` by slug. A player review whose game is
/// not among `games` is left out.
pub fn sample_reviews(games: &[Game]) -> Vec<NewReview> {
    review_catalogue()
        .into_iter()
        .filter_map(|SampleReview { game_slug, mut review }| {
            let Some(slug) = game_slug else {
                return Some(review);
            };
            match games.iter().find(|g| g.slug == slug) {
                Some(game) => {
                    review.game_id = Some(game.id);
                    Some(review)
                }
                None => {
                    warn!(
                        "No game with slug {}, skipping review by {}",
                        slug, review.reviewer_name
                    );
                    None
                }
            }
        })
        .collect()
}

/// Load the sample catalogue into `store` through its create operations.
pub async fn seed(store: &dyn ContentStore) -> Result<StoreStats> {
    let mut games = Vec::new();
    for game in sample_games() {
        let game = store.create_game(game).await?;
        debug!("Seeded game {} ({})", game.id, game.slug);
        games.push(game);
    }

    for post in sample_blog_posts()? {
        let post = store.create_blog_post(post).await?;
        debug!("Seeded blog post {} ({})", post.id, post.slug);
    }

    for review in sample_reviews(&games) {
        review.validate()?;
        let review = store.create_review(review).await?;
        debug!("Seeded review {} by {}", review.id, review.reviewer_name);
    }

    let stats = store.stats().await?;
    info!(
        "Seeded {} games, {} blog posts, {} reviews",
        stats.games, stats.blog_posts, stats.reviews
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_types::EntityId;
    use std::collections::HashSet;

    #[test]
    fn test_sample_games() {
        let games = sample_games();
        assert_eq!(games.len(), 5);
        assert_eq!(games[0].slug, "once-2");
        assert_eq!(games[0].title, "Once 2");

        let slugs: HashSet<_> = games.iter().map(|g| g.slug.as_str()).collect();
        assert_eq!(slugs.len(), games.len());
    }

    #[test]
    fn test_sample_blog_posts_dates() {
        let posts = sample_blog_posts().unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].published_at.to_rfc3339(), "2023-07-15T00:00:00+00:00");
        assert!(posts[1].published_at > posts[2].published_at);
    }

    /// The sample games as a store would return them, ids starting at `first_id`
    fn created_games(first_id: EntityId) -> Vec<Game> {
        sample_games()
            .into_iter()
            .zip(first_id..)
            .map(|(game, id)| game.into_game(id))
            .collect()
    }

    #[test]
    fn test_sample_reviews_are_valid() {
        let reviews = sample_reviews(&created_games(1));
        assert_eq!(reviews.len(), 6);
        for review in &reviews {
            review.validate().unwrap();
        }

        let industry: Vec<_> = reviews.iter().filter(|r| r.is_industry).collect();
        assert_eq!(industry.len(), 1);
        assert_eq!(industry[0].game_id, None);
    }

    #[test]
    fn test_sample_reviews_follow_game_ids() {
        let games = created_games(10);
        let reviews = sample_reviews(&games);

        let jamie = reviews.iter().find(|r| r.reviewer_name == "Jamie Smith").unwrap();
        assert_eq!(jamie.game_id, Some(10));
        let tara = reviews.iter().find(|r| r.reviewer_name == "Tara Johnson").unwrap();
        assert_eq!(tara.game_id, Some(14));
    }

    #[test]
    fn test_sample_reviews_skip_missing_games() {
        let games: Vec<_> = created_games(1)
            .into_iter()
            .filter(|g| g.slug != "tap-tap")
            .collect();
        let reviews = sample_reviews(&games);

        assert_eq!(reviews.len(), 5);
        assert!(reviews.iter().all(|r| r.reviewer_name != "Lisa Kwon"));

        let industry_only = sample_reviews(&[]);
        assert_eq!(industry_only.len(), 1);
        assert!(industry_only[0].is_industry);
    }
}
