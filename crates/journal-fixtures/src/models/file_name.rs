//! 存储文件名
//!
//! 夹具文件名由实体名称和标识符组成：`{entity};{identifier}.txt`。

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use journal_shared::error::{FixtureError, Result};

/// 实体名称与标识符之间的分隔符
pub const SEPARATOR: char = ';';

/// 夹具文件扩展名
pub const EXTENSION: &str = ".txt";

/// 存储文件名
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageFileName {
    pub entity: String,
    pub identifier: String,
}

impl StorageFileName {
    pub fn new(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    /// 解析文件名
    ///
    /// 必须以 `.txt` 结尾，且恰好包含一个分隔符，两侧均不能为空。
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = || FixtureError::InvalidFileName {
            name: name.to_string(),
        };

        let stem = name.strip_suffix(EXTENSION).ok_or_else(invalid)?;
        let (entity, identifier) = stem.split_once(SEPARATOR).ok_or_else(invalid)?;

        if entity.is_empty()
            || identifier.is_empty()
            || identifier.contains(SEPARATOR)
            || stem.contains(['/', '\\'])
        {
            return Err(invalid());
        }

        Ok(Self::new(entity, identifier))
    }

    /// 从路径的文件名部分解析
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| FixtureError::InvalidFileName {
                name: path.display().to_string(),
            })?;
        Self::parse(name)
    }

    /// 在指定目录下的完整路径
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.to_string())
    }
}

impl fmt::Display for StorageFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.entity, SEPARATOR, self.identifier, EXTENSION)
    }
}

impl FromStr for StorageFileName {
    type Err = FixtureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
