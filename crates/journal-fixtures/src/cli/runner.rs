//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑。
//! 命令行参数优先于配置文件和环境变量。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use journal_shared::config::GeneratorSettings;
use journal_shared::error::FixtureError;

use super::commands::TargetArgs;
use crate::generators::{GenerationReport, GeneratorConfig, JournalGenerator};
use crate::store::{FixtureStore, VerificationReport};

/// generate 命令的覆盖参数
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub target: TargetArgs,
    pub count: Option<usize>,
    pub window_seconds: Option<u64>,
    pub seed: Option<u64>,
    pub manifest: Option<PathBuf>,
}

/// 生成清单
///
/// 记录一次生成写出的文件，供 clean 或其他工具使用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub destination: PathBuf,
    pub count: usize,
    pub files: Vec<PathBuf>,
}

impl From<&GenerationReport> for Manifest {
    fn from(report: &GenerationReport) -> Self {
        Self {
            destination: report.destination.clone(),
            count: report.count(),
            files: report.files.clone(),
        }
    }
}

/// 命令执行器
///
/// 持有从配置文件和环境变量加载的生成器配置，执行时再合并命令行参数。
pub struct CommandRunner {
    settings: GeneratorSettings,
}

impl CommandRunner {
    /// 创建命令执行器
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// 执行 generate 命令
    ///
    /// 任何文件系统错误都会中止生成，已写入的文件保留在目录中。
    pub fn run_generate(&self, options: GenerateOptions) -> Result<GenerationReport> {
        let settings = self.resolve(&options.target, |s| {
            if let Some(count) = options.count {
                s.count = count;
            }
            if let Some(window_seconds) = options.window_seconds {
                s.window_seconds = window_seconds;
            }
            if options.seed.is_some() {
                s.seed = options.seed;
            }
        });

        let config = GeneratorConfig::from_settings(&settings).context("生成器参数无效")?;
        let mut generator = JournalGenerator::seeded(config, settings.seed);

        let report = generator.run().context("生成夹具文件失败")?;

        if let Some(ref path) = options.manifest {
            write_manifest(path, &Manifest::from(&report)).context("写入清单失败")?;
            info!(path = %path.display(), "清单已写入");
        }

        println!("\n夹具生成完成:");
        println!("{}", "-".repeat(40));
        println!("输出目录: {}", report.destination.display());
        println!("文件数量: {}", report.count());
        println!("执行耗时: {} ms", report.duration_ms);
        println!("{}", "-".repeat(40));

        Ok(report)
    }

    /// 执行 verify 命令
    pub fn run_verify(&self, target: &TargetArgs) -> Result<VerificationReport> {
        let store = self.open_store(target)?;
        let report = store.verify().context("校验夹具文件失败")?;

        println!("\n夹具校验结果:");
        println!("{}", "-".repeat(40));
        println!("文件总数: {}", report.total);
        println!("有效文件: {}", report.valid);
        println!("无效文件: {}", report.failures.len());
        println!("{}", "-".repeat(40));

        if !report.is_all_valid() {
            for failure in &report.failures {
                error!("{}: {}", failure.path.display(), failure.reason);
            }
            bail!(
                "存在无效的夹具文件: {}/{} 无效",
                report.failures.len(),
                report.total
            );
        }

        Ok(report)
    }

    /// 执行 clean 命令，返回删除的文件数量
    pub fn run_clean(&self, target: &TargetArgs, manifest: Option<&Path>) -> Result<usize> {
        let removed = match manifest {
            Some(path) => {
                let manifest = read_manifest(path).context("读取清单失败")?;
                let mut target = target.clone();
                if target.destination.is_none() {
                    target.destination = Some(manifest.destination.clone());
                }
                let store = self.open_store(&target)?;
                store
                    .remove_listed(&manifest.files)
                    .context("按清单清理夹具失败")?
            }
            None => self.open_store(target)?.clear()?,
        };

        println!("已删除 {} 个夹具文件", removed);
        Ok(removed)
    }

    // ========================================================================
    // 辅助方法
    // ========================================================================

    /// 将命令行参数合并到已加载的配置上
    fn resolve<F>(&self, target: &TargetArgs, apply: F) -> GeneratorSettings
    where
        F: FnOnce(&mut GeneratorSettings),
    {
        let mut settings = self.settings.clone();
        if let Some(ref destination) = target.destination {
            settings.destination = Some(destination.clone());
        }
        if let Some(ref entity) = target.entity {
            settings.entity = entity.clone();
        }
        apply(&mut settings);
        settings
    }

    fn open_store(&self, target: &TargetArgs) -> Result<FixtureStore> {
        let settings = self.resolve(target, |_| {});
        let destination = settings.require_destination()?;

        FixtureStore::open(destination, settings.entity.clone())
            .with_context(|| format!("打开夹具目录失败: {}", destination.display()))
    }
}

// ============================================================================
// 辅助函数
// ============================================================================

fn write_manifest(path: &Path, manifest: &Manifest) -> journal_shared::error::Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json).map_err(|e| FixtureError::io(path, e))
}

fn read_manifest(path: &Path) -> journal_shared::error::Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn target(dir: &Path) -> TargetArgs {
        TargetArgs {
            destination: Some(dir.to_path_buf()),
            entity: None,
        }
    }

    #[test]
    fn test_resolve_overrides_settings() {
        let runner = CommandRunner::new(GeneratorSettings {
            destination: Some(PathBuf::from("/from/config")),
            count: 10,
            ..Default::default()
        });

        let settings = runner.resolve(
            &TargetArgs {
                destination: Some(PathBuf::from("/from/cli")),
                entity: Some("Note".to_string()),
            },
            |s| s.count = 2,
        );

        assert_eq!(settings.destination, Some(PathBuf::from("/from/cli")));
        assert_eq!(settings.entity, "Note");
        assert_eq!(settings.count, 2);
    }

    #[test]
    fn test_resolve_keeps_config_values() {
        let runner = CommandRunner::new(GeneratorSettings {
            destination: Some(PathBuf::from("/from/config")),
            window_seconds: 60,
            ..Default::default()
        });

        let settings = runner.resolve(&TargetArgs::default(), |_| {});

        assert_eq!(settings.destination, Some(PathBuf::from("/from/config")));
        assert_eq!(settings.window_seconds, 60);
    }

    #[test]
    fn test_generate_without_destination_fails() {
        let runner = CommandRunner::new(GeneratorSettings::default());
        assert!(runner.run_generate(GenerateOptions::default()).is_err());
    }

    #[test]
    fn test_generate_verify_clean() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("manifest.json");
        let fixtures = dir.path().join("Journal");
        fs::create_dir(&fixtures).unwrap();

        let runner = CommandRunner::new(GeneratorSettings::default());
        let report = runner
            .run_generate(GenerateOptions {
                target: target(&fixtures),
                count: Some(4),
                window_seconds: Some(3600),
                seed: Some(11),
                manifest: Some(manifest_path.clone()),
            })
            .unwrap();
        assert_eq!(report.count(), 4);

        let manifest = read_manifest(&manifest_path).unwrap();
        assert_eq!(manifest.count, 4);
        assert_eq!(manifest.files, report.files);

        let verified = runner.run_verify(&target(&fixtures)).unwrap();
        assert_eq!(verified.valid, 4);

        // 清单中记录了目录，clean 不需要再指定
        let removed = runner
            .run_clean(&TargetArgs::default(), Some(&manifest_path))
            .unwrap();
        assert_eq!(removed, 4);
        assert_eq!(fs::read_dir(&fixtures).unwrap().count(), 0);
    }

    #[test]
    fn test_verify_fails_on_invalid_fixture() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("JournalEntry;abc.txt"), "garbage").unwrap();

        let runner = CommandRunner::new(GeneratorSettings::default());
        assert!(runner.run_verify(&target(dir.path())).is_err());
    }

    #[test]
    fn test_clean_keeps_files_outside_destination() {
        let dir = tempfile::tempdir().unwrap();
        let fixtures = dir.path().join("Journal");
        let other = dir.path().join("Other");
        fs::create_dir(&fixtures).unwrap();
        fs::create_dir(&other).unwrap();

        let victim = other.join("JournalEntry;keep.txt");
        fs::write(&victim, "keep").unwrap();
        let manifest_path = dir.path().join("manifest.json");
        write_manifest(
            &manifest_path,
            &Manifest {
                destination: fixtures.clone(),
                count: 1,
                files: vec![victim.clone()],
            },
        )
        .unwrap();

        let runner = CommandRunner::new(GeneratorSettings::default());
        let result = runner.run_clean(&target(&fixtures), Some(&manifest_path));

        assert!(result.is_err());
        assert!(victim.exists());
    }

    #[test]
    fn test_read_manifest_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");

        let err = read_manifest(&path).unwrap_err();
        assert_eq!(err.code(), "FILESYSTEM_ERROR");

        fs::write(&path, "{ not json").unwrap();
        let err = read_manifest(&path).unwrap_err();
        assert_eq!(err.code(), "SERIALIZATION_ERROR");

        let runner = CommandRunner::new(GeneratorSettings::default());
        let err = runner
            .run_clean(&target(dir.path()), Some(&path))
            .unwrap_err();
        assert!(err.chain().any(|cause| cause.to_string().starts_with("序列化失败")));
    }
}
