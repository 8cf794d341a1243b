//! Request extractors.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::auth::TokenClaims;
use crate::error::ServiceError;

use super::response::ApiErrorResponse;
use super::state::AppState;

/// The caller identified by a valid `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub TokenClaims);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ServiceError::Unauthorized {
                message: "missing bearer token".to_string(),
            })?;

        Ok(CurrentUser(state.tokens().verify(token)?))
    }
}
