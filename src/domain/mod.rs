mod price;
mod service_name;
mod subscription;
mod sum_filter;
mod year_month;

pub use price::Price;
pub use service_name::ServiceName;
pub use subscription::{NewSubscription, Subscription, SubscriptionPayload};
pub use sum_filter::{SumFilter, SumFilterPayload};
pub use year_month::YearMonth;
