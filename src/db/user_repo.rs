/// User repository - database operations for user accounts
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewUser, User, UserPatch};

/// Create a new user in the database
pub async fn create_user(pool: &PgPool, new_user: &NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, firebase_uid, name, email, bio, profile_picture_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, firebase_uid, name, email, bio, profile_picture_url, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&new_user.firebase_uid)
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(&new_user.bio)
    .bind(&new_user.profile_picture_url)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Find a user by the identity provider subject
pub async fn find_by_firebase_uid(
    pool: &PgPool,
    firebase_uid: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, firebase_uid, name, email, bio, profile_picture_url, created_at, updated_at
        FROM users
        WHERE firebase_uid = $1
        "#,
    )
    .bind(firebase_uid)
    .fetch_optional(pool)
    .await
}

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, firebase_uid, name, email, bio, profile_picture_url, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Apply the provided profile fields plus a refreshed updated timestamp.
/// Returns `None` when the id does not resolve.
pub async fn update_user(
    pool: &PgPool,
    id: Uuid,
    patch: &UserPatch,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            bio = CASE WHEN $3 THEN $4 ELSE bio END,
            profile_picture_url = CASE WHEN $5 THEN $6 ELSE profile_picture_url END,
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, firebase_uid, name, email, bio, profile_picture_url, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(patch.name.clone())
    .bind(patch.bio.is_some())
    .bind(patch.bio.clone().flatten())
    .bind(patch.profile_picture_url.is_some())
    .bind(patch.profile_picture_url.clone().flatten())
    .fetch_optional(pool)
    .await
}
