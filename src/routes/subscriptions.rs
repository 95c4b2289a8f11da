use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use uuid::Uuid;

use super::{invalid_id, with_deadline};
use crate::{
    domain::{NewSubscription, Subscription, SubscriptionPayload},
    error::ApiError,
    startup::AppState,
};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_payload(
    payload: Result<Json<SubscriptionPayload>, JsonRejection>,
) -> Result<NewSubscription, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!("解析 JSON 失败: {}", e);
        ApiError::Validation("Invalid JSON input".to_string())
    })?;
    NewSubscription::try_from(payload).map_err(|msg| {
        tracing::warn!("字段校验失败: {}", msg);
        ApiError::Validation(msg)
    })
}

#[tracing::instrument(name = "获取全部订阅", skip(state))]
pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Subscription>>, ApiError> {
    let subscriptions = with_deadline(state.request_timeout, state.store.list()).await?;
    Ok(Json(subscriptions))
}

#[tracing::instrument(
    name = "添加一个新的订阅",
    skip(state, payload),
    fields(request_id = %Uuid::new_v4())
)]
pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubscriptionPayload>, JsonRejection>,
) -> Result<Json<Subscription>, ApiError> {
    let new = parse_payload(payload)?;
    let created = with_deadline(state.request_timeout, state.store.create(new)).await?;
    Ok(Json(created))
}

#[tracing::instrument(name = "获取单个订阅", skip(state, id))]
pub async fn get_subscription(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Subscription>, ApiError> {
    let Path(id) = id.map_err(invalid_id)?;
    let subscription = with_deadline(state.request_timeout, state.store.get(id)).await?;
    Ok(Json(subscription))
}

#[tracing::instrument(
    name = "更新订阅",
    skip(state, id, payload),
    fields(request_id = %Uuid::new_v4())
)]
pub async fn update_subscription(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<SubscriptionPayload>, JsonRejection>,
) -> Result<Json<Subscription>, ApiError> {
    let Path(id) = id.map_err(invalid_id)?;
    let new = parse_payload(payload)?;
    let updated = with_deadline(state.request_timeout, state.store.update(id, new)).await?;
    Ok(Json(updated))
}

#[tracing::instrument(name = "删除订阅", skip(state, id))]
pub async fn delete_subscription(
    State(state): State<Arc<AppState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id.map_err(invalid_id)?;
    with_deadline(state.request_timeout, state.store.delete(id)).await?;
    Ok(Json(MessageResponse {
        message: "Subscription deleted".to_string(),
    }))
}
