//! Caller identity, as supplied by the external identity collaborator.
//!
//! The service never validates, decodes, or refreshes tokens. The bearer
//! credential is a pass-through: it authorizes the outbound call to the
//! generative-model endpoint on the user's behalf. The user id arrives in a
//! separate header set by the identity-aware gateway in front of this API.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller: opaque user id plus the OAuth access token
/// used as bearer credential for generation calls.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub access_token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let access_token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AppError::Unauthorized)?;

        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(AppError::Unauthorized)?;

        Ok(Identity {
            user_id,
            access_token,
        })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
/// Returns `None` for a missing scheme or an empty token.
fn bearer_token(header_value: &str) -> Option<String> {
    let token = header_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_strips_scheme() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123".to_string()));
    }

    #[test]
    fn test_bearer_token_rejects_empty_token() {
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer    "), None);
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("abc123"), None);
    }
}
