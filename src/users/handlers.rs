use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::{
    auth::password::hash_password,
    error::ApiError,
    state::AppState,
    users::{
        dto::{CreateUser, UserResponse},
        repo::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/", post(create_user))
        .route("/users/:user_id/", get(get_user).delete(delete_user))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(ApiError::item_not_found)?;
    let advs = User::advertisement_ids(&state.db, user.id).await?;

    Ok(Json(UserResponse {
        user_id: user.id,
        user_email: user.email,
        created_at: user.created_at,
        advs,
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let hash = hash_password(payload.password).await?;
    let (user, token) = User::create_with_token(&state.db, &payload.email, &hash).await?;

    info!(user_id = user.id, "user registered");
    Ok(Json(json!({
        "user_created": format!("user_id {}", user.id),
        "token": token.id.to_string(),
        "WARNING": "save your token for authorization!",
    })))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let user = User::delete_by_id(&state.db, user_id)
        .await?
        .ok_or_else(ApiError::item_not_found)?;

    info!(user_id = user.id, "user deleted");
    Ok(Json(json!({
        "status OK": format!("user {} deleted", user.email),
    })))
}
