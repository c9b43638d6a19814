//! Axum extractors for REST API authentication

use crate::ApiError;

use td_auth::Principal;
use td_core::UserSummary;
use td_db::UserRepository;
use td_ws::AppState;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// The authenticated user behind a request, resolved to its database row.
///
/// When a JWT validator is configured, the Bearer token in the
/// `Authorization` header is the only accepted credential. Without one the
/// server trusts an `X-User-Id` header (development mode). Either way the
/// user row is materialized before the first write that references it.
pub struct CurrentUser(pub UserSummary);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            match &state.jwt_validator {
                Some(validator) => {
                    let token = bearer_token(parts)?;
                    let claims = validator.validate(token).map_err(|e| {
                        log::warn!("JWT validation failed: {}", e);
                        ApiError::unauthorized("Invalid or expired credential")
                    })?;
                    let principal = Principal::try_from(claims).map_err(|e| {
                        log::warn!("JWT claims rejected: {}", e);
                        ApiError::unauthorized("Invalid credential claims")
                    })?;

                    let user = provision(state, principal.id, &principal.username).await?;
                    Ok(CurrentUser(user))
                }
                None => {
                    let user_id = header_user_id(parts)?;
                    let username = parts
                        .headers
                        .get("X-Username")
                        .and_then(|h| h.to_str().ok())
                        .map(String::from)
                        .unwrap_or_else(|| format!("user-{:.8}", user_id.simple()));

                    let user = provision(state, user_id, &username).await?;
                    Ok(CurrentUser(user))
                }
            }
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("Expected Bearer credential"))
}

fn header_user_id(parts: &Parts) -> Result<Uuid, ApiError> {
    let header_value = parts
        .headers
        .get("X-User-Id")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing X-User-Id header"))?;

    Uuid::parse_str(header_value).map_err(|_| {
        log::warn!("Invalid UUID in X-User-Id header: {}", header_value);
        ApiError::unauthorized("X-User-Id is not a valid UUID")
    })
}

/// Load the user row, creating it on first sight of a principal.
async fn provision(state: &AppState, id: Uuid, username: &str) -> Result<UserSummary, ApiError> {
    if let Some(existing) = UserRepository::find_by_id(&state.pool, id).await? {
        return Ok(existing);
    }

    let user = UserSummary {
        id,
        username: username.to_string(),
        email: format!("{}@taskdeck.local", username),
    };
    UserRepository::ensure(&state.pool, &user).await?;
    log::debug!("Provisioned user {} ({})", user.username, user.id);

    Ok(user)
}
