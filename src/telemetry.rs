use tracing::{Subscriber, subscriber::set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt};

use crate::error::StartupError;

pub fn get_subscriber<Sink>(
    name: String,
    level: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    // 日志过滤层
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // 格式化层
    let formatting_layer = BunyanFormattingLayer::new(name, sink);
    // 创建订阅者
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// 只能调用一次, 第二次会返回 `StartupError::Telemetry`
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), StartupError> {
    // 将 sqlx / sea-orm 通过 log crate 输出的日志重定向到 tracing
    LogTracer::init().map_err(|e| StartupError::Telemetry(e.to_string()))?;
    set_global_default(subscriber).map_err(|e| StartupError::Telemetry(e.to_string()))?;
    Ok(())
}
