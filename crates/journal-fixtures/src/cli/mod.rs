//! CLI 模块
//!
//! 提供命令行接口，支持以下功能：
//!
//! - `generate` - 批量生成日志条目夹具文件
//! - `verify` - 回读并校验目录中的夹具文件
//! - `clean` - 清理生成的夹具文件
//!
//! # 使用示例
//!
//! ```bash
//! # 生成 1000 个夹具文件
//! journal-fixtures generate -d ~/Simulator/Documents/Journal
//!
//! # 生成 3 个最近一小时内的条目，并记录清单
//! journal-fixtures generate -d ./Journal -c 3 -w 3600 -m manifest.json
//!
//! # 校验
//! journal-fixtures verify -d ./Journal
//!
//! # 按清单清理
//! journal-fixtures clean -m manifest.json
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, TargetArgs};
pub use runner::{CommandRunner, GenerateOptions, Manifest};
