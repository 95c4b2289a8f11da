use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    sea_query::Expr,
};
use uuid::Uuid;

use super::SubscriptionStore;
use crate::{
    domain::{NewSubscription, Subscription, SumFilter},
    entities::subscriptions,
    error::StoreError,
};

#[derive(Clone)]
pub struct SqlSubscriptionStore {
    db: DatabaseConnection,
}

impl SqlSubscriptionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn active_model(id: Option<Uuid>, new: &NewSubscription) -> subscriptions::ActiveModel {
    subscriptions::ActiveModel {
        id: id.map_or(NotSet, Set),
        service_name: Set(new.service_name.as_ref().to_string()),
        price: Set(new.price.value()),
        user_id: Set(new.user_id),
        start_date: Set(new.start_date.to_string()),
        end_date: Set(new.end_date.as_ref().map(ToString::to_string)),
    }
}

#[async_trait]
impl SubscriptionStore for SqlSubscriptionStore {
    #[tracing::instrument(
        name = "执行插入语句",
        skip(self, new),
        fields(service_name = %new.service_name.as_ref(), user_id = %new.user_id)
    )]
    async fn create(&self, new: NewSubscription) -> Result<Subscription, StoreError> {
        let model = active_model(Some(Uuid::new_v4()), &new)
            .insert(&self.db)
            .await
            .map_err(|e| {
                tracing::error!("执行插入语句失败: {:?}", e);
                e
            })?;
        tracing::info!(id = %model.id, "订阅已创建");
        Ok(model.into())
    }

    #[tracing::instrument(name = "按 id 查询订阅", skip(self))]
    async fn get(&self, id: Uuid) -> Result<Subscription, StoreError> {
        subscriptions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into)
            .ok_or(StoreError::NotFound(id))
    }

    #[tracing::instrument(name = "查询全部订阅", skip(self))]
    async fn list(&self) -> Result<Vec<Subscription>, StoreError> {
        let models = subscriptions::Entity::find().all(&self.db).await?;
        tracing::info!(count = models.len(), "订阅列表已获取");
        Ok(models.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(name = "执行更新语句", skip(self, new))]
    async fn update(&self, id: Uuid, new: NewSubscription) -> Result<Subscription, StoreError> {
        let result = subscriptions::Entity::update_many()
            .set(active_model(None, &new))
            .filter(subscriptions::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(Subscription::from_parts(id, new))
    }

    #[tracing::instrument(name = "执行删除语句", skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = subscriptions::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    #[tracing::instrument(name = "执行求和查询", skip(self))]
    async fn sum(&self, filter: &SumFilter) -> Result<i64, StoreError> {
        let mut query = subscriptions::Entity::find()
            .select_only()
            .column_as(Expr::col(subscriptions::Column::Price).sum(), "total");

        if let Some(user_id) = filter.user_id {
            query = query.filter(subscriptions::Column::UserId.eq(user_id));
        }
        if let Some(service_name) = &filter.service_name {
            query = query.filter(subscriptions::Column::ServiceName.eq(service_name.as_str()));
        }
        if let Some(from) = &filter.start_date_from {
            query = query.filter(subscriptions::Column::StartDate.gte(from.as_ref()));
        }
        if let Some(to) = &filter.start_date_to {
            query = query.filter(subscriptions::Column::StartDate.lte(to.as_ref()));
        }

        // 没有匹配行时 SUM 返回 NULL
        let total: Option<Option<i64>> = query.into_tuple().one(&self.db).await?;
        let total = total.flatten().unwrap_or(0);
        tracing::info!(total, "总价计算完成");
        Ok(total)
    }
}
