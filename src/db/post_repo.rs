/// Post repository - database operations for posts and the public feed
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{FeedPost, Post};

/// Create a new post owned by a user
pub async fn create_post(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
    image_url: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, user_id, content, image_url, likes_count, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 0, $5, $6)
        RETURNING id, user_id, content, image_url, likes_count, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(content)
    .bind(image_url)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Recent posts joined with the owner's display info, newest first
pub async fn find_all(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<FeedPost>, sqlx::Error> {
    sqlx::query_as::<_, FeedPost>(
        r#"
        SELECT p.id, p.user_id, p.content, p.image_url, p.likes_count,
               p.created_at, p.updated_at,
               u.name AS user_name, u.profile_picture_url AS user_profile_picture
        FROM posts p
        JOIN users u ON p.user_id = u.id
        ORDER BY p.created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Find a post by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, content, image_url, likes_count, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Atomically increment the likes count and refresh the updated timestamp.
/// Returns `None` when the post does not exist.
pub async fn like_post(pool: &PgPool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET likes_count = likes_count + 1, updated_at = NOW()
        WHERE id = $1
        RETURNING id, user_id, content, image_url, likes_count, created_at, updated_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Posts by a user, newest first
pub async fn find_by_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, content, image_url, likes_count, created_at, updated_at
        FROM posts
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
