//! 夹具目录存储
//!
//! 将一个目录视为夹具文件的存储：写入、列出、回读校验和清理。
//! 只处理文件名符合 `{entity};{identifier}.txt` 的文件，目录中的其他文件不受影响。

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use journal_shared::error::{FixtureError, Result};

use crate::codec::{DecodedEntry, read_entry};
use crate::generators::EntrySink;
use crate::models::{JournalEntry, StorageFileName};

/// 目录中的一个夹具文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFixture {
    pub path: PathBuf,
    pub name: StorageFileName,
}

/// 单个文件的校验失败原因
#[derive(Debug, Clone)]
pub struct VerificationFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// 目录校验结果
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    pub total: usize,
    pub valid: usize,
    pub failures: Vec<VerificationFailure>,
}

impl VerificationReport {
    pub fn is_all_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 夹具目录存储
#[derive(Debug, Clone)]
pub struct FixtureStore {
    root: PathBuf,
    entity: String,
}

impl FixtureStore {
    /// 打开已存在的目录
    ///
    /// 不会创建目录：目录缺失或无法访问时返回文件系统错误。
    pub fn open(root: impl Into<PathBuf>, entity: impl Into<String>) -> Result<Self> {
        let root = root.into();
        ensure_directory(&root)?;
        Ok(Self {
            root,
            entity: entity.into(),
        })
    }

    /// 写入夹具文件（创建或截断）
    ///
    /// 文件句柄在函数返回时关闭，缓冲区在返回前显式刷新，刷新错误同样会返回。
    pub fn insert(&self, name: &StorageFileName, contents: &str) -> Result<PathBuf> {
        let path = name.path_in(&self.root);

        let file = File::create(&path).map_err(|e| FixtureError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(contents.as_bytes())
            .map_err(|e| FixtureError::io(&path, e))?;
        writer.flush().map_err(|e| FixtureError::io(&path, e))?;

        Ok(path)
    }

    /// 列出目录中属于当前实体的夹具文件，按路径排序
    pub fn list(&self) -> Result<Vec<StoredFixture>> {
        let entries = fs::read_dir(&self.root).map_err(|e| FixtureError::io(&self.root, e))?;

        let mut fixtures = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FixtureError::io(&self.root, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            match StorageFileName::from_path(&path) {
                Ok(name) if name.entity == self.entity => fixtures.push(StoredFixture { path, name }),
                Ok(_) => {}
                Err(_) => debug!(path = %path.display(), "跳过非夹具文件"),
            }
        }

        fixtures.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(fixtures)
    }

    /// 夹具文件数量
    pub fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    /// 回读夹具文件
    pub fn get(&self, fixture: &StoredFixture) -> Result<DecodedEntry> {
        read_entry(&fixture.path)
    }

    /// 校验目录中的所有夹具文件
    ///
    /// 每个文件必须能解码，且内容标签中的标识符与文件名一致。
    /// 单个文件失败不会中止校验，失败原因收集在报告中。
    pub fn verify(&self) -> Result<VerificationReport> {
        let fixtures = self.list()?;
        let mut report = VerificationReport {
            total: fixtures.len(),
            ..Default::default()
        };

        for fixture in &fixtures {
            match self.check(fixture) {
                Ok(()) => report.valid += 1,
                Err(reason) => {
                    warn!(path = %fixture.path.display(), %reason, "夹具校验失败");
                    report.failures.push(VerificationFailure {
                        path: fixture.path.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            total = report.total,
            valid = report.valid,
            invalid = report.failures.len(),
            "夹具校验完成"
        );
        Ok(report)
    }

    /// 删除单个夹具文件
    ///
    /// 拒绝删除文件名不符合夹具格式或不直接位于存储目录下的路径。
    pub fn remove(&self, path: &Path) -> Result<()> {
        self.check_removable(path)?;

        fs::remove_file(path).map_err(|e| FixtureError::io(path, e))?;
        debug!(path = %path.display(), "已删除");
        Ok(())
    }

    /// 删除目录中当前实体的所有夹具文件，返回删除数量
    pub fn clear(&self) -> Result<usize> {
        let fixtures = self.list()?;
        for fixture in &fixtures {
            self.remove(&fixture.path)?;
        }

        info!(removed = fixtures.len(), root = %self.root.display(), "夹具已清理");
        Ok(fixtures.len())
    }

    /// 删除清单中列出的夹具文件，已不存在的文件跳过
    ///
    /// 先检查全部路径，任一路径越出存储目录时不删除任何文件。
    pub fn remove_listed(&self, paths: &[PathBuf]) -> Result<usize> {
        let mut existing = Vec::with_capacity(paths.len());
        for path in paths {
            if !path.exists() {
                warn!(path = %path.display(), "清单中的文件已不存在");
                continue;
            }
            self.check_removable(path)?;
            existing.push(path);
        }

        let mut removed = 0;
        for path in existing {
            fs::remove_file(path).map_err(|e| FixtureError::io(path, e))?;
            debug!(path = %path.display(), "已删除");
            removed += 1;
        }

        info!(removed, listed = paths.len(), "清单中的夹具已清理");
        Ok(removed)
    }

    fn check_removable(&self, path: &Path) -> Result<()> {
        let name = StorageFileName::from_path(path)?;
        if name.entity != self.entity {
            return Err(FixtureError::InvalidFileName {
                name: path.display().to_string(),
            });
        }

        // 比较规范化后的父目录，`..` 和符号链接都不能绕过
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let parent = fs::canonicalize(parent).map_err(|e| FixtureError::io(parent, e))?;
        let root = fs::canonicalize(&self.root).map_err(|e| FixtureError::io(&self.root, e))?;
        if parent != root {
            return Err(FixtureError::OutsideDestination {
                path: path.to_path_buf(),
                root,
            });
        }

        Ok(())
    }

    fn check(&self, fixture: &StoredFixture) -> std::result::Result<(), String> {
        let decoded = self.get(fixture).map_err(|e| e.to_string())?;

        match JournalEntry::parse_label(&decoded.content) {
            Some((_, identifier)) if identifier == fixture.name.identifier => Ok(()),
            Some((_, identifier)) => Err(format!(
                "标签中的标识符 {} 与文件名不一致",
                identifier
            )),
            None => Err(format!("无效的内容标签: '{}'", decoded.content)),
        }
    }
}

impl EntrySink for FixtureStore {
    fn write(&mut self, name: &StorageFileName, contents: &str) -> Result<PathBuf> {
        self.insert(name, contents)
    }
}

/// 确认路径存在且是目录
pub fn ensure_directory(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| FixtureError::io(path, e))?;
    if !metadata.is_dir() {
        return Err(FixtureError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
