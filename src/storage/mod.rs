//! 订阅的持久化层
//!
//! `SubscriptionStore` 是请求处理层唯一依赖的存储接口; `SqlSubscriptionStore`
//! 是基于 sea-orm 的实现, 生产环境连接 Postgres, 测试中连接内存 SQLite.

mod sql;

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::{
    domain::{NewSubscription, Subscription, SumFilter},
    error::StoreError,
};

pub use sql::SqlSubscriptionStore;

#[async_trait]
pub trait SubscriptionStore: Send + Sync + 'static {
    /// 插入新记录, id 由存储层生成
    async fn create(&self, new: NewSubscription) -> Result<Subscription, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Subscription, StoreError>;

    /// 空表返回空列表, 不视为错误
    async fn list(&self) -> Result<Vec<Subscription>, StoreError>;

    /// 按 id 整体替换可变字段, 没有匹配行时返回 `StoreError::NotFound`
    async fn update(&self, id: Uuid, new: NewSubscription) -> Result<Subscription, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// 满足全部过滤条件的 `price` 之和, 没有匹配行时为 0
    async fn sum(&self, filter: &SumFilter) -> Result<i64, StoreError>;
}

/// 启动时建立连接的重试策略: 固定间隔, 不做指数退避
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_secs(2),
        }
    }
}

/// 打开连接并 ping, 失败时按 `policy` 重试; 用尽次数后返回 `StoreError::Connection`
#[tracing::instrument(name = "连接数据库", skip(options))]
pub async fn connect_with_retry(
    options: ConnectOptions,
    policy: RetryPolicy,
) -> Result<DatabaseConnection, StoreError> {
    let mut last_error: Option<DbErr> = None;

    for attempt in 1..=policy.max_attempts {
        match try_connect(&options).await {
            Ok(db) => {
                tracing::info!(attempt, "数据库连接成功");
                return Ok(db);
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    "数据库连接失败: {}",
                    e
                );
                last_error = Some(e);
                if attempt < policy.max_attempts {
                    tokio::time::sleep(policy.interval).await;
                }
            }
        }
    }

    let reason = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no attempts were made".to_string());
    Err(StoreError::Connection(format!(
        "gave up after {} attempts: {}",
        policy.max_attempts, reason
    )))
}

async fn try_connect(options: &ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options.clone()).await?;
    db.ping().await?;
    Ok(db)
}
