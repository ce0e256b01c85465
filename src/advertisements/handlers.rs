use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::{
    advertisements::{
        dto::{AdvertisementResponse, CreateAdvertisement, UpdateAdvertisement},
        repo::Advertisement,
    },
    auth::token::{ensure_owner, resolve_owner, TokenHeader},
    error::ApiError,
    state::AppState,
};

pub fn advertisement_routes() -> Router<AppState> {
    Router::new()
        .route("/advertisements/", post(create_advertisement))
        .route(
            "/advertisements/:adv_id/",
            get(get_advertisement)
                .patch(update_advertisement)
                .delete(delete_advertisement),
        )
}

#[instrument(skip(state))]
pub async fn get_advertisement(
    State(state): State<AppState>,
    Path(adv_id): Path<i32>,
) -> Result<Json<AdvertisementResponse>, ApiError> {
    let adv = Advertisement::find_by_id(&state.db, adv_id)
        .await?
        .ok_or_else(ApiError::item_not_found)?;

    Ok(Json(AdvertisementResponse {
        adv_id: adv.id,
        title: adv.title,
        description: adv.description,
        created_at: adv.created_at,
        created_by: format!("user_{}", adv.user_id),
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_advertisement(
    State(state): State<AppState>,
    TokenHeader(token_id): TokenHeader,
    payload: Result<Json<CreateAdvertisement>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let owner_id = resolve_owner(&state.db, token_id).await?;
    let adv =
        Advertisement::insert(&state.db, &payload.title, &payload.description, owner_id).await?;

    info!(adv_id = adv.id, user_id = adv.user_id, "advertisement created");
    Ok(Json(json!({
        "success": format!(
            "advertisement id{} created with title \"{}\" by user {}",
            adv.id, adv.title, adv.user_id
        ),
    })))
}

#[instrument(skip(state, payload))]
pub async fn update_advertisement(
    State(state): State<AppState>,
    Path(adv_id): Path<i32>,
    TokenHeader(token_id): TokenHeader,
    payload: Result<Json<UpdateAdvertisement>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let adv = Advertisement::find_by_id(&state.db, adv_id)
        .await?
        .ok_or_else(ApiError::item_not_found)?;
    ensure_owner(&state.db, token_id, &adv).await?;

    let adv = Advertisement::update(
        &state.db,
        adv.id,
        payload.title.as_deref(),
        payload.description.as_deref(),
    )
    .await?;

    let mut new_data = serde_json::Map::new();
    if let Some(title) = payload.title {
        new_data.insert("title".into(), Value::String(title));
    }
    if let Some(description) = payload.description {
        new_data.insert("description".into(), Value::String(description));
    }

    info!(adv_id = adv.id, "advertisement updated");
    Ok(Json(json!({
        "success": format!("advertisement id{} updated", adv.id),
        "new_data": new_data,
    })))
}

#[instrument(skip(state))]
pub async fn delete_advertisement(
    State(state): State<AppState>,
    Path(adv_id): Path<i32>,
    TokenHeader(token_id): TokenHeader,
) -> Result<Json<Value>, ApiError> {
    let adv = Advertisement::find_by_id(&state.db, adv_id)
        .await?
        .ok_or_else(ApiError::item_not_found)?;
    ensure_owner(&state.db, token_id, &adv).await?;

    Advertisement::delete(&state.db, adv.id).await?;

    info!(adv_id = adv.id, "advertisement deleted");
    Ok(Json(json!({
        "status OK": format!("advertisement id_{} \"{}\" deleted", adv.id, adv.title),
    })))
}
