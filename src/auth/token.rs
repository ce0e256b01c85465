use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use super::repo::Token;
use crate::{advertisements::repo::Advertisement, error::ApiError};

/// Bearer token taken from the `token` request header.
///
/// A missing header is a malformed request; a value that is not a UUID cannot
/// name any stored token, so it is reported the same way as an unknown one.
pub struct TokenHeader(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for TokenHeader
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("token")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::bad_request("token header is required"))?;

        let id = raw.parse::<Uuid>().map_err(|_| {
            warn!("token header is not a uuid");
            ApiError::item_not_found()
        })?;

        Ok(TokenHeader(id))
    }
}

/// Resolve a bearer token to its owning user id.
pub async fn resolve_owner(db: &PgPool, token_id: Uuid) -> Result<i32, ApiError> {
    let token = Token::find_by_id(db, token_id)
        .await?
        .ok_or_else(ApiError::item_not_found)?;
    Ok(token.user_id)
}

/// Allow the action only when the presented token belongs to the
/// advertisement's creator.
pub async fn ensure_owner(
    db: &PgPool,
    token_id: Uuid,
    adv: &Advertisement,
) -> Result<(), ApiError> {
    let owner_id = resolve_owner(db, token_id).await?;
    if owner_id != adv.user_id {
        warn!(
            adv_id = adv.id,
            token_owner = owner_id,
            "token owner is not the advertisement owner"
        );
        return Err(ApiError::unauthorized(
            "action permitted only to the advertisement's owner",
        ));
    }
    Ok(())
}
