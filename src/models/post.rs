use chrono::{DateTime, Utc};
/// Post model and feed projection
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::User;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post row carrying the owner's display info, as returned by the feed
/// query or assembled for single-post responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeedPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub likes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_name: String,
    pub user_profile_picture: Option<String>,
}

impl FeedPost {
    /// Attach owner display info to a bare post row. The owner row can be
    /// missing when the user was deleted between lookups.
    pub fn with_author(post: Post, author: Option<&User>) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            content: post.content,
            image_url: post.image_url,
            likes_count: post.likes_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
            user_name: author
                .map(|u| u.name.clone())
                .unwrap_or_else(|| "Unknown User".to_string()),
            user_profile_picture: author.and_then(|u| u.profile_picture_url.clone()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: Option<String>,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            content: "hello".to_string(),
            image_url: None,
            likes_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn missing_author_becomes_unknown_user() {
        let feed_post = FeedPost::with_author(sample_post(), None);
        assert_eq!(feed_post.user_name, "Unknown User");
        assert_eq!(feed_post.user_profile_picture, None);
    }

    #[test]
    fn author_display_info_is_carried_over() {
        let author = User {
            id: Uuid::new_v4(),
            firebase_uid: "uid".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            bio: None,
            profile_picture_url: Some("https://cdn.example.com/ada.png".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let feed_post = FeedPost::with_author(sample_post(), Some(&author));
        assert_eq!(feed_post.user_name, "Ada");
        assert_eq!(
            feed_post.user_profile_picture.as_deref(),
            Some("https://cdn.example.com/ada.png")
        );
    }
}
