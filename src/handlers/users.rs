/// User profile handlers
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{UpdateUserRequest, User, UserPatch};

/// Public user response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// Response after a profile update
#[derive(Debug, Serialize)]
pub struct UserUpdateResponse {
    pub message: String,
    pub user: User,
}

/// Validate the provided fields and turn them into a patch. A name must
/// stay non-empty after trimming; bio and picture clear on empty input.
fn build_patch(payload: &UpdateUserRequest) -> Result<UserPatch> {
    let mut patch = UserPatch::default();

    if let Some(name) = &payload.name {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("Name cannot be empty".to_string()));
        }
        patch.name = Some(trimmed.to_string());
    }

    if let Some(bio) = &payload.bio {
        let trimmed = bio.trim();
        patch.bio = Some((!trimmed.is_empty()).then(|| trimmed.to_string()));
    }

    if let Some(url) = &payload.profile_picture_url {
        let trimmed = url.trim();
        patch.profile_picture_url = Some((!trimmed.is_empty()).then(|| trimmed.to_string()));
    }

    if patch.is_empty() {
        return Err(AppError::Validation(
            "No valid fields to update".to_string(),
        ));
    }

    Ok(patch)
}

async fn apply_update(
    pool: &PgPool,
    id: Uuid,
    payload: &UpdateUserRequest,
    message: &str,
) -> Result<HttpResponse> {
    let patch = build_patch(payload)?;

    let user = user_repo::update_user(pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserUpdateResponse {
        message: message.to_string(),
        user,
    }))
}

/// GET /api/users/{id}
pub async fn get_user(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let user = user_repo::find_by_id(pool.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

/// PUT /api/users/{id}
pub async fn update_user(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    user_id: UserId,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    if user_id.0 != id {
        return Err(AppError::Authorization(
            "You can only update your own profile".to_string(),
        ));
    }

    apply_update(pool.get_ref(), id, &payload, "User updated successfully").await
}

/// GET /api/users/me
pub async fn get_current_user(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    let user = user_repo::find_by_id(pool.get_ref(), user_id.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

/// PUT /api/users/me
pub async fn update_current_user(
    pool: web::Data<PgPool>,
    user_id: UserId,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    apply_update(
        pool.get_ref(),
        user_id.0,
        &payload,
        "Profile updated successfully",
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        name: Option<&str>,
        bio: Option<&str>,
        picture: Option<&str>,
    ) -> UpdateUserRequest {
        UpdateUserRequest {
            name: name.map(str::to_string),
            bio: bio.map(str::to_string),
            profile_picture_url: picture.map(str::to_string),
        }
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(matches!(
            build_patch(&request(None, None, None)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            build_patch(&request(Some("   "), None, None)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn name_is_trimmed() {
        let patch = build_patch(&request(Some("  Ada  "), None, None)).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Ada"));
        assert!(patch.bio.is_none());
    }

    #[test]
    fn empty_bio_clears_the_field() {
        let patch = build_patch(&request(None, Some(""), None)).unwrap();
        assert_eq!(patch.bio, Some(None));
    }

    #[test]
    fn empty_picture_clears_the_field() {
        let patch = build_patch(&request(None, None, Some("  "))).unwrap();
        assert_eq!(patch.profile_picture_url, Some(None));
    }

    #[test]
    fn provided_fields_are_kept() {
        let patch = build_patch(&request(
            Some("Ada"),
            Some("systems person"),
            Some("https://cdn.example.com/a.png"),
        ))
        .unwrap();
        assert_eq!(patch.bio, Some(Some("systems person".to_string())));
        assert_eq!(
            patch.profile_picture_url,
            Some(Some("https://cdn.example.com/a.png".to_string()))
        );
    }
}
