use axum::{extract::FromRequestParts, http::request::Parts};

use crate::admission::SessionCapabilities;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Authenticated requester extracted from the `Authorization: Bearer <token>`
/// header, with the capability snapshot the token was issued with.
///
/// Add this as a handler parameter to require authentication.
pub struct Requester {
    pub user_id: i32,
    pub username: String,
    pub caps: SessionCapabilities,
}

impl FromRequestParts<AppState> for Requester {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::TokenInvalid)?;

        let claims = jwt::verify(&state.config.auth.jwt_secret, token)
            .map_err(|_| AppError::TokenInvalid)?;

        Ok(Requester {
            user_id: claims.uid,
            username: claims.sub,
            caps: claims.caps,
        })
    }
}
