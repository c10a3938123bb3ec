//! Authentication: password hashing, access tokens and the request extractor.

pub mod password;
pub mod token;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::error::AppError;
use crate::models::users::{self, UserRow};
use crate::state::AppState;

/// The authenticated caller, resolved from the `Authorization: Bearer` header.
///
/// Any failure along the way (missing header, malformed token, bad signature,
/// expired token, unknown user id) collapses into a single 401 so the
/// response does not leak which step failed.
pub struct AuthUser(pub UserRow);

fn credentials_error() -> AppError {
    AppError::Unauthorized("Invalid authentication credentials".to_string())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(credentials_error)?;
        let bearer = header_value.strip_prefix("Bearer ").ok_or_else(credentials_error)?;

        let claims = token::verify(bearer, &state.config.auth)?;
        let user = users::get_user_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(credentials_error)?;
        Ok(AuthUser(user))
    }
}
