//! 日志条目生成器
//!
//! 按配置的数量循环生成条目，渲染为 plist 并逐个写入目标目录。
//! 全程单线程顺序执行，任何写入错误都会中止剩余的迭代。

use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info};

use journal_shared::config::{
    DEFAULT_COUNT, DEFAULT_ENTITY, DEFAULT_WINDOW_SECONDS, GeneratorSettings,
};
use journal_shared::error::{FixtureError, Result};

use super::traits::EntrySink;
use crate::codec::render;
use crate::models::{JournalEntry, MAX_WINDOW_SECONDS, StorageFileName};
use crate::store::FixtureStore;

/// 生成器配置
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// 生成的文件数量
    pub count: usize,
    /// 输出目录，必须已存在且可写
    pub destination: PathBuf,
    /// 时间戳回溯窗口（秒）
    pub window_seconds: u64,
    /// 文件名中的实体名称
    pub entity: String,
}

impl GeneratorConfig {
    /// 使用默认数量和窗口创建配置
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            count: DEFAULT_COUNT,
            destination: destination.into(),
            window_seconds: DEFAULT_WINDOW_SECONDS,
            entity: DEFAULT_ENTITY.to_string(),
        }
    }

    /// 从合并后的配置构建，并校验参数
    pub fn from_settings(settings: &GeneratorSettings) -> Result<Self> {
        let config = Self {
            count: settings.count,
            destination: settings.require_destination()?.to_path_buf(),
            window_seconds: settings.window_seconds,
            entity: settings.entity.clone(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_seconds > MAX_WINDOW_SECONDS {
            return Err(FixtureError::InvalidArgument {
                field: "window_seconds".to_string(),
                message: format!("不能超过 {} 秒", MAX_WINDOW_SECONDS),
            });
        }

        // 实体名称会成为文件名的一部分
        if self.entity.is_empty() || self.entity.contains([';', '/', '\\']) {
            return Err(FixtureError::InvalidArgument {
                field: "entity".to_string(),
                message: format!("无效的实体名称: '{}'", self.entity),
            });
        }

        Ok(())
    }
}

/// 生成结果
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub destination: PathBuf,
    /// 按迭代顺序记录的写入路径
    pub files: Vec<PathBuf>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn count(&self) -> usize {
        self.files.len()
    }
}

/// 日志条目生成器
pub struct JournalGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl JournalGenerator {
    /// 创建生成器，随机源由操作系统播种
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// 使用固定种子创建生成器
    ///
    /// 相同种子产生相同的标识符序列，便于测试和复现。
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 根据可选种子创建生成器
    pub fn seeded(config: GeneratorConfig, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(config, seed),
            None => Self::new(config),
        }
    }

    /// 生成第 `index` 个条目（从 1 开始）
    pub fn next_entry(&mut self, index: usize) -> JournalEntry {
        JournalEntry::random(index, &mut self.rng, Utc::now(), self.config.window_seconds)
    }

    /// 生成并写入到配置的输出目录
    ///
    /// 目录不存在或不是目录时立即失败，不会写入任何文件。
    pub fn run(&mut self) -> Result<GenerationReport> {
        let mut store = FixtureStore::open(&self.config.destination, &self.config.entity)?;
        self.run_into(&mut store)
    }

    /// 生成并写入到指定目标
    ///
    /// 参数无效时在第一次写入前返回错误。
    pub fn run_into<S: EntrySink>(&mut self, sink: &mut S) -> Result<GenerationReport> {
        self.config.validate()?;

        let started = Instant::now();
        // 数量来自命令行，不按它预分配
        let mut files = Vec::new();

        info!(
            count = self.config.count,
            destination = %self.config.destination.display(),
            window_seconds = self.config.window_seconds,
            "开始生成日志条目"
        );

        for index in 1..=self.config.count {
            let entry = self.next_entry(index);
            let name = StorageFileName::new(&self.config.entity, &entry.identifier);
            let document = render(&entry);

            let path = sink.write(&name, &document).inspect_err(|e| {
                error!(index, written = files.len(), error = %e, "写入失败，中止生成");
            })?;

            debug!(index, path = %path.display(), timestamp = %entry.formatted_timestamp(), "已写入");
            files.push(path);
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        info!(count = files.len(), duration_ms, "日志条目生成完成");

        Ok(GenerationReport {
            destination: self.config.destination.clone(),
            files,
            duration_ms,
        })
    }
}
