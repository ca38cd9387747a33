//! Admin guard.
//!
//! Admin routes expect `Authorization: Bearer <token>`. Only the SHA-256 of
//! the token is configured, so the token itself never sits in the environment.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use sha2::{Digest, Sha256};

use crate::{error::ApiError, state::AdminAuth};

/// Hex SHA-256 of `token`
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Extractor for handlers that require the admin token.
///
/// ```
/// use tc_api::{auth::AdminUser, error::ApiError};
///
/// async fn admin_only(_admin: AdminUser) -> Result<(), ApiError> {
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminUser;

impl<S> FromRequestParts<S> for AdminUser
where
    AdminAuth: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AdminAuth::from_ref(state);
        let expected = auth
            .token_sha256
            .ok_or_else(|| ApiError::Auth("Admin access is not configured".to_string()))?;

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Auth("Not authenticated".to_string()))?;

        if hash_token(token) != expected {
            tracing::warn!("Rejected admin request with an invalid token");
            return Err(ApiError::Auth("Invalid admin token".to_string()));
        }

        Ok(Self)
    }
}
