//! 统一错误处理模块
//!
//! 定义夹具生成工具共享的错误类型，使用 thiserror 提供良好的错误信息。

use std::path::PathBuf;

use thiserror::Error;

/// 夹具工具错误类型
#[derive(Debug, Error)]
pub enum FixtureError {
    // ==================== 文件系统错误 ====================
    #[error("文件系统错误: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("路径存在但不是目录: {path}")]
    NotADirectory { path: PathBuf },

    #[error("文件不在夹具目录内: {path} (目录: {root})")]
    OutsideDestination { path: PathBuf, root: PathBuf },

    // ==================== 存储格式错误 ====================
    #[error("无效的存储文件名: {name}")]
    InvalidFileName { name: String },

    #[error("解码失败: {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    // ==================== 配置错误 ====================
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    #[error("无效的参数: {field} - {message}")]
    InvalidArgument { field: String, message: String },
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, FixtureError>;

impl FixtureError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "FILESYSTEM_ERROR",
            Self::NotADirectory { .. } => "NOT_A_DIRECTORY",
            Self::OutsideDestination { .. } => "OUTSIDE_DESTINATION",
            Self::InvalidFileName { .. } => "INVALID_FILE_NAME",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
        }
    }

    /// 包装 I/O 错误并附带出错路径
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// 是否为文件系统错误
    ///
    /// 目录缺失、权限不足、磁盘已满等都归入此类。
    pub fn is_filesystem(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::NotADirectory { .. })
    }
}
