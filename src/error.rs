use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use uuid::Uuid;

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("subscription {0} not found")]
    NotFound(Uuid),

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("database connection failed: {0}")]
    Connection(String),

    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(e: DbErr) -> Self {
        if let Some(sql_err) = e.sql_err() {
            return StoreError::Constraint(sql_err.to_string());
        }
        match e {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreError::Connection(e.to_string()),
            other => StoreError::Database(other),
        }
    }
}

/// 请求处理层错误, 响应体中不包含任何内部细节
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("storage call exceeded the request deadline")]
    Timeout,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Timeout => {
                tracing::error!("存储调用超时");
                (StatusCode::GATEWAY_TIMEOUT, "Request timed out".to_string())
            }
            ApiError::Store(StoreError::NotFound(id)) => {
                tracing::info!(%id, "订阅不存在");
                (StatusCode::NOT_FOUND, "Subscription not found".to_string())
            }
            ApiError::Store(StoreError::Constraint(detail)) => {
                tracing::warn!("违反数据库约束: {}", detail);
                (
                    StatusCode::BAD_REQUEST,
                    "Subscription violates a storage constraint".to_string(),
                )
            }
            ApiError::Store(e) => {
                tracing::error!("存储层错误: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// 启动阶段的错误, 全部视为致命错误
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("schema initialisation failed: {0}")]
    Migration(DbErr),

    #[error("failed to install tracing subscriber: {0}")]
    Telemetry(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
