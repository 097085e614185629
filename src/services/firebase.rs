/// Firebase identity verification
///
/// Presented ID tokens are verified server-side through the Firebase Auth
/// REST `accounts:lookup` endpoint; a valid token resolves to the account's
/// claims, anything else resolves to `None` without surfacing the reason.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const ACCOUNTS_LOOKUP_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:lookup";

/// Claims extracted from a verified identity token
#[derive(Debug, Clone, Serialize)]
pub struct IdentityClaims {
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Verifies identity tokens with the upstream provider.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Returns the claims asserted by a valid token, or `None` when
    /// verification fails for any reason.
    async fn verify_token(&self, id_token: &str) -> Option<IdentityClaims>;
}

#[derive(Clone)]
pub struct FirebaseAuth {
    api_key: String,
    http_client: Client,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    users: Option<Vec<LookupUser>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
}

impl FirebaseAuth {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http_client: Client::new(),
        }
    }
}

impl From<LookupUser> for IdentityClaims {
    fn from(user: LookupUser) -> Self {
        IdentityClaims {
            uid: user.local_id,
            email: user.email,
            name: user.display_name,
            picture: user.photo_url,
        }
    }
}

#[async_trait]
impl TokenVerifier for FirebaseAuth {
    async fn verify_token(&self, id_token: &str) -> Option<IdentityClaims> {
        let response = self
            .http_client
            .post(ACCOUNTS_LOOKUP_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({ "idToken": id_token }))
            .send()
            .await
            .map_err(|e| tracing::debug!("Identity lookup request failed: {}", e))
            .ok()?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Identity token rejected");
            return None;
        }

        let lookup = response
            .json::<LookupResponse>()
            .await
            .map_err(|e| tracing::debug!("Identity lookup parse failed: {}", e))
            .ok()?;

        lookup
            .users?
            .into_iter()
            .next()
            .map(IdentityClaims::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_user_maps_to_claims() {
        let user = LookupUser {
            local_id: "abc123".to_string(),
            email: Some("ada@example.com".to_string()),
            display_name: Some("Ada".to_string()),
            photo_url: None,
        };

        let claims = IdentityClaims::from(user);
        assert_eq!(claims.uid, "abc123");
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert_eq!(claims.name.as_deref(), Some("Ada"));
        assert!(claims.picture.is_none());
    }

    #[test]
    fn lookup_response_parses_provider_payload() {
        let body = r#"{
            "kind": "identitytoolkit#GetAccountInfoResponse",
            "users": [{
                "localId": "abc123",
                "email": "ada@example.com",
                "displayName": "Ada",
                "photoUrl": "https://cdn.example.com/ada.png",
                "emailVerified": true
            }]
        }"#;

        let lookup: LookupResponse = serde_json::from_str(body).unwrap();
        let user = lookup.users.unwrap().into_iter().next().unwrap();
        assert_eq!(user.local_id, "abc123");
        assert_eq!(user.photo_url.as_deref(), Some("https://cdn.example.com/ada.png"));
    }

    #[test]
    fn empty_user_list_yields_no_claims() {
        let lookup: LookupResponse = serde_json::from_str(r#"{"users": []}"#).unwrap();
        assert!(lookup.users.unwrap().into_iter().next().is_none());
    }
}
