//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{FixtureError, Result};

/// 默认生成数量
pub const DEFAULT_COUNT: usize = 1000;

/// 默认回溯窗口（秒）：10 × 25 小时
pub const DEFAULT_WINDOW_SECONDS: u64 = 10 * 25 * 60 * 60;

/// 默认实体名称，作为存储文件名的前缀
pub const DEFAULT_ENTITY: &str = "JournalEntry";

/// 生成器配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// 生成的文件数量
    pub count: usize,
    /// 输出目录，没有默认值，必须由配置或命令行提供
    pub destination: Option<PathBuf>,
    /// 时间戳回溯窗口（秒）
    pub window_seconds: u64,
    pub entity: String,
    /// 随机数种子，设置后生成结果可复现
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            destination: None,
            window_seconds: DEFAULT_WINDOW_SECONDS,
            entity: DEFAULT_ENTITY.to_string(),
            seed: None,
        }
    }
}

impl GeneratorSettings {
    /// 获取输出目录
    ///
    /// 未配置时返回参数错误。
    pub fn require_destination(&self) -> Result<&Path> {
        self.destination
            .as_deref()
            .ok_or_else(|| FixtureError::InvalidArgument {
                field: "destination".to_string(),
                message: "未指定输出目录（--destination 或 JOURNAL_GENERATOR__DESTINATION）"
                    .to_string(),
            })
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub log_level: String,
    /// 是否输出 JSON 格式日志
    pub json_logs: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub environment: String,
    pub generator: GeneratorSettings,
    pub observability: LoggingSettings,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 配置目录取自 CONFIG_DIR（默认 `config`），环境取自 JOURNAL_ENV（默认 `development`）。
    pub fn load() -> Result<Self> {
        let env = std::env::var("JOURNAL_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        Self::load_from(Path::new(&config_dir), &env)
    }

    /// 从指定目录加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. 结构体默认值
    /// 2. {config_dir}/default.toml
    /// 3. {config_dir}/{environment}.toml
    /// 4. 环境变量（JOURNAL_ 前缀，如 JOURNAL_GENERATOR__COUNT -> generator.count）
    pub fn load_from(config_dir: &Path, environment: &str) -> Result<Self> {
        let builder = Config::builder()
            .set_default("environment", environment)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", environment))).required(false),
            )
            .add_source(
                Environment::with_prefix("JOURNAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.generator.count, 1000);
        assert_eq!(config.generator.window_seconds, 900_000);
        assert_eq!(config.generator.entity, "JournalEntry");
        assert!(config.generator.destination.is_none());
        assert!(config.generator.seed.is_none());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_require_destination() {
        let settings = GeneratorSettings::default();
        let err = settings.require_destination().unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");

        let settings = GeneratorSettings {
            destination: Some(PathBuf::from("/tmp/Journal")),
            ..Default::default()
        };
        assert_eq!(
            settings.require_destination().unwrap(),
            Path::new("/tmp/Journal")
        );
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent"), "test").unwrap();

        assert_eq!(config.environment, "test");
        assert_eq!(config.generator.count, DEFAULT_COUNT);
        assert_eq!(config.generator.window_seconds, DEFAULT_WINDOW_SECONDS);
    }

    #[test]
    fn test_load_from_layered_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[generator]\ncount = 50\ndestination = \"/var/fixtures\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.toml"),
            "[generator]\ncount = 5\nwindow_seconds = 3600\n",
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path(), "staging").unwrap();

        // 环境文件覆盖默认文件，未覆盖的字段保留
        assert_eq!(config.generator.count, 5);
        assert_eq!(config.generator.window_seconds, 3600);
        assert_eq!(
            config.generator.destination,
            Some(PathBuf::from("/var/fixtures"))
        );
        assert_eq!(config.generator.entity, DEFAULT_ENTITY);
        assert_eq!(config.environment, "staging");
    }
}
