use uuid::Uuid;

use super::{Price, ServiceName, YearMonth};

/// 已持久化的订阅记录
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    pub end_date: Option<String>,
}

/// 客户端提交的原始 JSON, 创建与更新共用
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SubscriptionPayload {
    pub service_name: String,
    pub price: i64,
    pub user_id: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// 校验通过的订阅字段, 不含 id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub service_name: ServiceName,
    pub price: Price,
    pub user_id: Uuid,
    pub start_date: YearMonth,
    pub end_date: Option<YearMonth>,
}

impl TryFrom<SubscriptionPayload> for NewSubscription {
    type Error = String;

    fn try_from(payload: SubscriptionPayload) -> Result<Self, Self::Error> {
        let service_name = ServiceName::parse(payload.service_name)?;
        let price = Price::parse(payload.price)?;
        let user_id = Uuid::parse_str(payload.user_id.trim())
            .map_err(|_| "Invalid user_id format".to_string())?;
        let start_date = YearMonth::parse(payload.start_date.trim())?;
        let end_date = match payload.end_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(YearMonth::parse(raw)?),
        };
        if let Some(end) = &end_date {
            if *end < start_date {
                return Err("end_date must not be earlier than start_date".to_string());
            }
        }

        Ok(Self {
            service_name,
            price,
            user_id,
            start_date,
            end_date,
        })
    }
}

impl Subscription {
    pub fn from_parts(id: Uuid, new: NewSubscription) -> Self {
        Self {
            id,
            service_name: new.service_name.into(),
            price: new.price.value(),
            user_id: new.user_id,
            start_date: new.start_date.into(),
            end_date: new.end_date.map(Into::into),
        }
    }
}
