/// Post handlers - feed, creation, and clap-style likes
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::{post_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{CreatePostRequest, FeedPost, User};

const MAX_CONTENT_CHARS: usize = 1000;
const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// Normalized pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Parse `page` and `limit` query values, coercing anything invalid or
    /// out of range back to the defaults: page >= 1, limit in [1,100].
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let page = query.get("page").and_then(|v| v.parse().ok());
        let limit = query.get("limit").and_then(|v| v.parse().ok());
        Self::normalize(page, limit)
    }

    fn normalize(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p,
            _ => 1,
        };
        let limit = match limit {
            Some(l) if (1..=MAX_PAGE_SIZE).contains(&l) => l,
            _ => DEFAULT_PAGE_SIZE,
        };

        Self {
            page,
            limit,
            offset: (page - 1) * limit,
        }
    }
}

/// Paginated feed response
#[derive(Debug, Serialize)]
pub struct PostsPage {
    pub posts: Vec<FeedPost>,
    pub pagination: Pagination,
}

/// Paginated per-user posts response
#[derive(Debug, Serialize)]
pub struct UserPostsPage {
    pub posts: Vec<FeedPost>,
    pub user: User,
    pub pagination: Pagination,
}

/// Single post response
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub post: FeedPost,
}

/// Response after creating or liking a post
#[derive(Debug, Serialize)]
pub struct PostEnvelope {
    pub message: String,
    pub post: FeedPost,
}

/// Trim and validate post content
fn validated_content(content: Option<&str>) -> Result<String> {
    let content = content.unwrap_or_default().trim();
    if content.is_empty() {
        return Err(AppError::Validation(
            "Post content is required".to_string(),
        ));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(AppError::Validation(format!(
            "Post content cannot exceed {} characters",
            MAX_CONTENT_CHARS
        )));
    }
    Ok(content.to_string())
}

/// GET /api/posts
pub async fn get_posts(
    pool: web::Data<PgPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse> {
    let pagination = Pagination::from_query(&query);

    let posts = post_repo::find_all(pool.get_ref(), pagination.limit, pagination.offset).await?;

    Ok(HttpResponse::Ok().json(PostsPage { posts, pagination }))
}

/// POST /api/posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let content = validated_content(payload.content.as_deref())?;

    let post = post_repo::create_post(
        pool.get_ref(),
        user_id.0,
        &content,
        payload.image_url.as_deref(),
    )
    .await?;

    let author = user_repo::find_by_id(pool.get_ref(), user_id.0).await?;

    Ok(HttpResponse::Created().json(PostEnvelope {
        message: "Post created successfully".to_string(),
        post: FeedPost::with_author(post, author.as_ref()),
    }))
}

/// GET /api/posts/{id}
pub async fn get_post(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let post = post_repo::find_by_id(pool.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let author = user_repo::find_by_id(pool.get_ref(), post.user_id).await?;

    Ok(HttpResponse::Ok().json(PostResponse {
        post: FeedPost::with_author(post, author.as_ref()),
    }))
}

/// PUT /api/posts/{id}/like
///
/// Clap semantics: every call increments, regardless of caller, with no
/// upper bound. The increment and read-back are one statement.
pub async fn like_post(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    _user_id: UserId,
) -> Result<HttpResponse> {
    let post = post_repo::like_post(pool.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let author = user_repo::find_by_id(pool.get_ref(), post.user_id).await?;

    Ok(HttpResponse::Ok().json(PostEnvelope {
        message: "Post liked successfully".to_string(),
        post: FeedPost::with_author(post, author.as_ref()),
    }))
}

/// GET /api/posts/user/{id}
pub async fn get_user_posts(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse> {
    let pagination = Pagination::from_query(&query);

    let user = user_repo::find_by_id(pool.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let posts = post_repo::find_by_user(
        pool.get_ref(),
        user.id,
        pagination.limit,
        pagination.offset,
    )
    .await?;

    let posts = posts
        .into_iter()
        .map(|post| FeedPost::with_author(post, Some(&user)))
        .collect();

    Ok(HttpResponse::Ok().json(UserPostsPage {
        posts,
        user,
        pagination,
    }))
}
