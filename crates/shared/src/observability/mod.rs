//! 统一可观测性模块
//!
//! 提供日志的统一初始化。CLI 工具只需要结构化日志，不导出指标和分布式追踪。

pub mod tracing;

use ::tracing::debug;
use anyhow::Result;

use crate::config::LoggingSettings;

/// 可观测性配置
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// 服务名称，用于标识日志来源
    pub service_name: String,

    /// 日志级别（如 "info", "debug"）
    pub log_level: String,

    /// 是否启用 JSON 格式日志
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "journal-fixtures".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ObservabilityConfig {
    /// 从已加载的日志配置构建
    pub fn from_settings(service_name: &str, settings: &LoggingSettings) -> Self {
        Self {
            service_name: service_name.to_string(),
            log_level: settings.log_level.clone(),
            json_logs: settings.json_logs,
        }
    }
}

/// 统一初始化可观测性
///
/// 进程内只能调用一次，重复初始化会返回错误。
///
/// # Example
///
/// ```ignore
/// use journal_shared::observability::{init, ObservabilityConfig};
///
/// fn main() -> anyhow::Result<()> {
///     init(&ObservabilityConfig::default())?;
///     Ok(())
/// }
/// ```
pub fn init(config: &ObservabilityConfig) -> Result<()> {
    tracing::init(config)?;

    debug!(
        service = %config.service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Observability initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_from_settings() {
        let settings = LoggingSettings {
            log_level: "debug".to_string(),
            json_logs: true,
        };
        let config = ObservabilityConfig::from_settings("journal-fixtures", &settings);
        assert_eq!(config.service_name, "journal-fixtures");
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
    }
}
