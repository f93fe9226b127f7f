//! 生成器模块
//!
//! 提供夹具文件的批量生成功能。

pub mod journal_generator;
pub mod traits;

pub use journal_generator::{GenerationReport, GeneratorConfig, JournalGenerator};
pub use traits::EntrySink;
