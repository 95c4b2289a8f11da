use std::time::Duration;

use sea_orm::ConnectOptions;
use secrecy::{ExposeSecret, SecretBox};

use crate::storage::RetryPolicy;

#[derive(serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
}

#[derive(serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: SecretBox<String>,
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
    pub connect_attempts: u32,
    pub connect_retry_secs: u64,
}

#[derive(serde::Deserialize)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    pub request_timeout_secs: u64,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 按 `base` -> `{APP_ENVIRONMENT}` -> `APP_*` 环境变量的顺序叠加配置
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("当前目录获取失败: {e}")))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    tracing::info!("使用环境: {:?}", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base")))
        .add_source(config::File::from(
            configuration_directory.join(environment.as_str()),
        ))
        // 例如 `APP_APPLICATION__PORT=5001` 会覆盖 `application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{}不是一个合法的环境变量, 使用`local` 或 `production`",
                other
            )),
        }
    }
}

impl DatabaseSettings {
    fn ssl_mode(&self) -> &'static str {
        if self.require_ssl { "require" } else { "prefer" }
    }

    pub fn connection_string(&self) -> SecretBox<String> {
        SecretBox::init_with(|| {
            format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                self.username,
                self.password.expose_secret(),
                self.host,
                self.port,
                self.database_name,
                self.ssl_mode()
            )
        })
    }

    pub fn connection_string_without_db(&self) -> SecretBox<String> {
        SecretBox::init_with(|| {
            format!(
                "postgres://{}:{}@{}:{}?sslmode={}",
                self.username,
                self.password.expose_secret(),
                self.host,
                self.port,
                self.ssl_mode()
            )
        })
    }

    pub fn with_db(&self) -> ConnectOptions {
        Self::connect_options(self.connection_string())
    }

    pub fn without_db(&self) -> ConnectOptions {
        Self::connect_options(self.connection_string_without_db())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.connect_attempts,
            interval: Duration::from_secs(self.connect_retry_secs),
        }
    }

    fn connect_options(url: SecretBox<String>) -> ConnectOptions {
        let mut options = ConnectOptions::new(url.expose_secret().as_str());
        options
            .connect_timeout(Duration::from_secs(5))
            .sqlx_logging(false);
        options
    }
}
