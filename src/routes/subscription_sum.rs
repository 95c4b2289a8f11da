use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};

use super::with_deadline;
use crate::{
    domain::{SumFilter, SumFilterPayload},
    error::ApiError,
    startup::AppState,
};

/// 求和结果, 同时回显实际生效的过滤条件
#[derive(Debug, serde::Serialize)]
pub struct SumResponse {
    pub total_price: i64,
    pub filters: SumFilter,
}

async fn compute_sum(state: &AppState, payload: SumFilterPayload) -> Result<SumResponse, ApiError> {
    let filter = SumFilter::try_from(payload).map_err(|msg| {
        tracing::warn!("过滤条件校验失败: {}", msg);
        ApiError::Validation(msg)
    })?;
    tracing::info!(
        user_id = ?filter.user_id,
        service_name = ?filter.service_name,
        start_date_from = ?filter.start_date_from,
        start_date_to = ?filter.start_date_to,
        "应用过滤条件"
    );

    let total_price = with_deadline(state.request_timeout, state.store.sum(&filter)).await?;
    Ok(SumResponse {
        total_price,
        filters: filter,
    })
}

#[tracing::instrument(name = "按条件计算总价", skip(state, payload))]
pub async fn sum_subscriptions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SumFilterPayload>, JsonRejection>,
) -> Result<Json<SumResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!("解析过滤条件失败: {}", e);
        ApiError::Validation("Invalid filter format".to_string())
    })?;
    compute_sum(&state, payload).await.map(Json)
}

#[tracing::instrument(name = "按查询参数计算总价", skip(state, query))]
pub async fn sum_subscriptions_by_query(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SumFilterPayload>, QueryRejection>,
) -> Result<Json<SumResponse>, ApiError> {
    let Query(payload) = query.map_err(|e| {
        tracing::warn!("解析查询参数失败: {}", e);
        ApiError::Validation("Invalid filter format".to_string())
    })?;
    compute_sum(&state, payload).await.map(Json)
}
