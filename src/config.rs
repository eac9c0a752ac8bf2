//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 会话持久化文件路径
    pub storage_path: String,
    /// 模拟登录延迟（毫秒）
    pub login_delay_ms: u64,
    /// 演示账号共享口令（使用 Secret 包装，防止日志泄露）
    pub shared_secret: Secret<String>,
    /// 启动时载入演示库存数据
    pub seed_demo_items: bool,
}

impl SessionConfig {
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty, compact
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("session.storage_path", ".inventory-session.json")?
            .set_default("session.login_delay_ms", 1000)?
            .set_default("session.shared_secret", "password")?
            .set_default("session.seed_demo_items", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?;

        // 从环境变量加载配置（前缀为 INVENTORY_）
        settings = settings.add_source(
            Environment::with_prefix("INVENTORY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" | "compact" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty, compact",
                    self.logging.format
                )))
            }
        }

        if self.session.storage_path.trim().is_empty() {
            return Err(ConfigError::Message(
                "session.storage_path must not be empty".to_string(),
            ));
        }

        if self.session.login_delay_ms > 10_000 {
            return Err(ConfigError::Message(
                "session.login_delay_ms must be at most 10000".to_string(),
            ));
        }

        if self.session.shared_secret.expose_secret().is_empty() {
            return Err(ConfigError::Message(
                "session.shared_secret must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
