/// Authentication handlers
///
/// Registration and login delegate identity proofing to the upstream
/// verifier; this service only maps verified subjects onto local accounts
/// and issues session tokens.
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{LoginRequest, NewUser, RegisterRequest, User, VerifyTokenRequest};
use crate::security::SessionKeys;
use crate::services::firebase::{IdentityClaims, TokenVerifier};

/// Response carrying a user and a freshly issued session token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
    pub access_token: String,
}

/// Current-user profile response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
}

fn required_token(id_token: Option<&str>) -> Result<&str> {
    match id_token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(AppError::Validation(
            "Firebase ID token is required".to_string(),
        )),
    }
}

async fn verified_claims(
    verifier: &dyn TokenVerifier,
    id_token: &str,
) -> Result<IdentityClaims> {
    verifier
        .verify_token(id_token)
        .await
        .ok_or_else(|| AppError::Authentication("Invalid Firebase token".to_string()))
}

/// POST /api/auth/register
pub async fn register(
    pool: web::Data<PgPool>,
    verifier: web::Data<dyn TokenVerifier>,
    keys: web::Data<SessionKeys>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let id_token = required_token(payload.id_token.as_deref())?;
    let claims = verified_claims(verifier.get_ref(), id_token).await?;

    if user_repo::find_by_firebase_uid(pool.get_ref(), &claims.uid)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let email = claims
        .email
        .clone()
        .ok_or_else(|| AppError::Validation("Identity token carries no email".to_string()))?;

    let new_user = NewUser {
        firebase_uid: claims.uid.clone(),
        name: payload
            .name
            .clone()
            .or_else(|| claims.name.clone())
            .unwrap_or_else(|| "Anonymous".to_string()),
        email,
        bio: payload.bio.clone(),
        profile_picture_url: payload
            .profile_picture_url
            .clone()
            .or_else(|| claims.picture.clone()),
    };

    let user = user_repo::create_user(pool.get_ref(), &new_user).await?;
    let access_token = keys.issue(user.id)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User registered successfully".to_string(),
        user,
        access_token,
    }))
}

/// POST /api/auth/login
pub async fn login(
    pool: web::Data<PgPool>,
    verifier: web::Data<dyn TokenVerifier>,
    keys: web::Data<SessionKeys>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let id_token = required_token(payload.id_token.as_deref())?;
    let claims = verified_claims(verifier.get_ref(), id_token).await?;

    let user = user_repo::find_by_firebase_uid(pool.get_ref(), &claims.uid)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("User not found. Please register first.".to_string())
        })?;

    let access_token = keys.issue(user.id)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_string(),
        user,
        access_token,
    }))
}

/// GET /api/auth/profile
pub async fn get_profile(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    let user = user_repo::find_by_id(pool.get_ref(), user_id.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ProfileResponse { user }))
}

/// POST /api/auth/verify
///
/// Reports whether the verified subject already has an account. No account
/// is created either way; unknown subjects get the raw claims back so the
/// client can drive registration.
pub async fn verify_token(
    pool: web::Data<PgPool>,
    verifier: web::Data<dyn TokenVerifier>,
    keys: web::Data<SessionKeys>,
    payload: web::Json<VerifyTokenRequest>,
) -> Result<HttpResponse> {
    let id_token = required_token(payload.id_token.as_deref())?;
    let claims = verified_claims(verifier.get_ref(), id_token).await?;

    match user_repo::find_by_firebase_uid(pool.get_ref(), &claims.uid).await? {
        Some(user) => {
            let access_token = keys.issue(user.id)?;
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "user": user,
                "access_token": access_token,
                "exists": true,
            })))
        }
        None => Ok(HttpResponse::Ok().json(serde_json::json!({
            "exists": false,
            "firebase_user": claims,
        }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_id_token_is_rejected() {
        assert!(matches!(
            required_token(None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            required_token(Some("")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            required_token(Some("   ")),
            Err(AppError::Validation(_))
        ));
        assert_eq!(required_token(Some("tok")).unwrap(), "tok");
    }
}
