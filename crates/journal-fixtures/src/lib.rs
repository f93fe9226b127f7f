//! Journal Fixtures
//!
//! 为模拟器数据目录生成日志条目夹具文件（属性列表 XML），用于手动或自动化测试。
//!
//! # 主要模块
//!
//! - `models`: 日志条目和存储文件名
//! - `codec`: plist 文档的渲染和解码
//! - `generators`: 批量生成器和写入目标 trait
//! - `store`: 基于目录的夹具存储
//! - `cli`: 命令行接口
//!
//! # 使用示例
//!
//! ```no_run
//! use journal_fixtures::generators::{GeneratorConfig, JournalGenerator};
//!
//! let config = GeneratorConfig {
//!     count: 10,
//!     window_seconds: 3600,
//!     ..GeneratorConfig::new("/tmp/Journal")
//! };
//! let report = JournalGenerator::new(config).run()?;
//! println!("已生成 {} 个文件", report.count());
//! # Ok::<(), journal_shared::error::FixtureError>(())
//! ```

pub mod cli;
pub mod codec;
pub mod generators;
pub mod models;
pub mod store;
