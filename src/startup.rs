use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    configuration::Settings,
    error::StartupError,
    routes::{
        create_subscription, delete_subscription, get_subscription, health_check,
        list_subscriptions, sum_subscriptions, sum_subscriptions_by_query, update_subscription,
    },
    storage::{SqlSubscriptionStore, SubscriptionStore, connect_with_retry},
};

/// 所有请求共享的状态. 存储层以 trait 对象注入, 不存在全局句柄
pub struct AppState {
    pub store: Arc<dyn SubscriptionStore>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn SubscriptionStore>, request_timeout: Duration) -> Self {
        Self {
            store,
            request_timeout,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/subscriptions",
            get(list_subscriptions).post(create_subscription),
        )
        .route(
            "/subscriptions/sum",
            get(sum_subscriptions_by_query).post(sum_subscriptions),
        )
        .route(
            "/subscriptions/{id}",
            get(get_subscription)
                .put(update_subscription)
                .delete(delete_subscription),
        );

    Router::new()
        .route("/health_check", get(health_check))
        .nest("/api", api)
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

pub async fn run(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// 连接数据库 (带重试), 建表, 绑定端口. 任一步失败都是致命错误
    pub async fn build(configuration: Settings) -> Result<Self, StartupError> {
        let db = connect_with_retry(
            configuration.database.with_db(),
            configuration.database.retry_policy(),
        )
        .await?;
        Migrator::up(&db, None)
            .await
            .map_err(StartupError::Migration)?;

        let state = AppState::new(
            Arc::new(SqlSubscriptionStore::new(db)),
            configuration.application.request_timeout(),
        );

        let listener = TcpListener::bind(configuration.application.address()).await?;
        let port = listener.local_addr()?.port();
        tracing::info!(port, "服务开始监听");

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        run(self.listener, self.state).await
    }
}
