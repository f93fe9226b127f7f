//! 夹具数据模型
//!
//! 包含日志条目和存储文件名，用于生成和回读模拟器数据目录中的夹具文件。

pub mod file_name;
pub mod journal_entry;

pub use file_name::StorageFileName;
pub use journal_entry::{JournalEntry, MAX_WINDOW_SECONDS, random_identifier};
