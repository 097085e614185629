use chrono::{DateTime, Utc};
/// User model and profile update types
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub firebase_uid: String,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for a new user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub firebase_uid: String,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
}

/// Partial profile update. `None` leaves a field untouched; for the
/// nullable columns, `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub bio: Option<Option<String>>,
    pub profile_picture_url: Option<Option<String>>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.bio.is_none() && self.profile_picture_url.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub id_token: Option<String>,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyTokenRequest {
    pub id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_detected() {
        assert!(UserPatch::default().is_empty());

        let patch = UserPatch {
            bio: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
