//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。
//! 未指定的参数回退到配置文件和环境变量中的值。

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// 日志条目夹具工具
///
/// 生成、校验和清理模拟器数据目录中的日志条目夹具文件。
#[derive(Parser, Debug)]
#[command(name = "journal-fixtures")]
#[command(version, about = "日志条目夹具生成工具")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// 输出 JSON 格式日志
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 生成日志条目夹具文件
    ///
    /// 每个文件命名为 `{entity};{identifier}.txt`，内容为固定结构的 plist。
    Generate {
        #[command(flatten)]
        target: TargetArgs,

        /// 生成数量（默认 1000）
        #[arg(short, long)]
        count: Option<usize>,

        /// 时间戳回溯窗口，单位秒（默认 900000）
        #[arg(short, long)]
        window_seconds: Option<u64>,

        /// 随机数种子，指定后结果可复现
        #[arg(long)]
        seed: Option<u64>,

        /// 将生成的文件清单写入 JSON 文件
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// 校验目录中的夹具文件
    ///
    /// 解码每个文件并检查内容标签与文件名一致，存在无效文件时返回错误。
    Verify {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// 清理生成的夹具文件
    ///
    /// 指定清单时只删除清单中的文件，否则删除目录中该实体的所有夹具文件。
    Clean {
        #[command(flatten)]
        target: TargetArgs,

        /// generate 命令写出的清单文件
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

/// 各子命令共用的目标目录参数
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// 夹具目录，必须已存在
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// 文件名中的实体名称（默认 JournalEntry）
    #[arg(short, long)]
    pub entity: Option<String>,
}

// ============================================================================
// 单元测试
// ============================================================================
