mod health_check;
mod subscription_sum;
mod subscriptions;


use std::{future::Future, time::Duration};

use axum::extract::rejection::PathRejection;

use crate::error::{ApiError, StoreError};

pub use health_check::health_check;
pub use subscription_sum::{SumResponse, sum_subscriptions, sum_subscriptions_by_query};
pub use subscriptions::{
    MessageResponse, create_subscription, delete_subscription, get_subscription,
    list_subscriptions, update_subscription,
};

/// 为单次存储调用加上请求级超时
pub(crate) async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(_) => Err(ApiError::Timeout),
    }
}

pub(crate) fn invalid_id(rejection: PathRejection) -> ApiError {
    tracing::warn!("路径参数解析失败: {}", rejection);
    ApiError::Validation("Invalid subscription id".to_string())
}
