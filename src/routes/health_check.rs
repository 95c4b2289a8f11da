use axum::http::StatusCode;

#[tracing::instrument(name = "健康检查")]
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
