//! Blog post types

use crate::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published blog post. `content` is an HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub thumbnail_url: String,
    pub category: String,
    pub slug: String,
    pub published_at: DateTime<Utc>,
}

/// Blog post insert payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub thumbnail_url: String,
    pub category: String,
    pub slug: String,
    pub published_at: DateTime<Utc>,
}

impl NewBlogPost {
    pub fn into_post(self, id: EntityId) -> BlogPost {
        BlogPost {
            id,
            title: self.title,
            content: self.content,
            summary: self.summary,
            thumbnail_url: self.thumbnail_url,
            category: self.category,
            slug: self.slug,
            published_at: self.published_at,
        }
    }
}

/// Sort posts newest first. Posts sharing a timestamp keep their relative order.
pub fn sort_newest_first(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(id: EntityId, day: u32) -> BlogPost {
        BlogPost {
            id,
            title: format!("Post {}", id),
            content: "<p>body</p>".to_string(),
            summary: "summary".to_string(),
            thumbnail_url: "https://example.com/t.jpg".to_string(),
            category: "Development".to_string(),
            slug: format!("post-{}", id),
            published_at: Utc.with_ymd_and_hms(2023, 6, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut posts = vec![post(1, 3), post(2, 20), post(3, 11)];
        sort_newest_first(&mut posts);
        let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_keeps_ties_in_order() {
        let mut posts = vec![post(1, 5), post(2, 5), post(3, 9)];
        sort_newest_first(&mut posts);
        let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(post(7, 1)).unwrap();
        assert_eq!(json["thumbnailUrl"], "https://example.com/t.jpg");
        assert_eq!(json["publishedAt"], "2023-06-01T00:00:00Z");
        assert!(json.get("published_at").is_none());
    }
}
