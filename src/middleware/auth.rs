/// Bearer session-token authentication
///
/// `UserId` is a self-validating extractor: it parses the Authorization
/// header, verifies the session token against the configured keys, and
/// yields the asserted user id. Route groups here mix public and
/// authenticated endpoints, so authentication attaches per handler rather
/// than per scope.
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;
use crate::security::SessionKeys;

/// User ID extracted from the session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_user_id(req))
    }
}

fn extract_user_id(req: &HttpRequest) -> Result<UserId, AppError> {
    let keys = req
        .app_data::<web::Data<SessionKeys>>()
        .ok_or_else(|| AppError::Internal("Session keys not configured".to_string()))?;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing Authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Authentication("Invalid Authorization scheme, expected Bearer".to_string())
    })?;

    keys.verify(token).map(UserId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn keys() -> SessionKeys {
        SessionKeys::new("test-secret", None)
    }

    #[test]
    fn valid_bearer_token_resolves_the_user() {
        let session_keys = keys();
        let user_id = Uuid::new_v4();
        let token = session_keys.issue(user_id).unwrap();

        let req = TestRequest::default()
            .app_data(web::Data::new(session_keys))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        assert_eq!(extract_user_id(&req).unwrap(), UserId(user_id));
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let req = TestRequest::default()
            .app_data(web::Data::new(keys()))
            .to_http_request();

        assert!(matches!(
            extract_user_id(&req),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let req = TestRequest::default()
            .app_data(web::Data::new(keys()))
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();

        assert!(matches!(
            extract_user_id(&req),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn tampered_token_is_unauthorized() {
        let session_keys = keys();
        let mut token = session_keys.issue(Uuid::new_v4()).unwrap();
        token.push('x');

        let req = TestRequest::default()
            .app_data(web::Data::new(session_keys))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        assert!(matches!(
            extract_user_id(&req),
            Err(AppError::Authentication(_))
        ));
    }
}
