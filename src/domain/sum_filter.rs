use uuid::Uuid;

use super::YearMonth;

/// 求和接口收到的原始过滤条件, JSON 与 query string 共用
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct SumFilterPayload {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default, alias = "start_date")]
    pub start_date_from: Option<String>,
    #[serde(default, alias = "end_date")]
    pub start_date_to: Option<String>,
}

/// 求和过滤条件. `None` 表示不约束; 存在的条件之间是 AND 关系
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SumFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub start_date_from: Option<YearMonth>,
    pub start_date_to: Option<YearMonth>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<SumFilterPayload> for SumFilter {
    type Error = String;

    fn try_from(payload: SumFilterPayload) -> Result<Self, Self::Error> {
        let user_id = present(payload.user_id)
            .map(|raw| Uuid::parse_str(&raw).map_err(|_| "Invalid UUID format".to_string()))
            .transpose()?;
        let start_date_from = present(payload.start_date_from)
            .map(|raw| YearMonth::parse(&raw))
            .transpose()?;
        let start_date_to = present(payload.start_date_to)
            .map(|raw| YearMonth::parse(&raw))
            .transpose()?;

        Ok(Self {
            user_id,
            service_name: present(payload.service_name),
            start_date_from,
            start_date_to,
        })
    }
}
