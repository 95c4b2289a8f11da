use sea_orm::entity::prelude::*;

use crate::domain::Subscription;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Subscription {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            service_name: model.service_name,
            price: model.price,
            user_id: model.user_id,
            start_date: model.start_date,
            end_date: model.end_date,
        }
    }
}
