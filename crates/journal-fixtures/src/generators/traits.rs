//! 写入目标 trait 定义
//!
//! 生成器只负责产生条目和文档，写到哪里由 EntrySink 决定。

use std::path::PathBuf;

use journal_shared::error::Result;

use crate::models::StorageFileName;

/// 夹具写入目标
pub trait EntrySink {
    /// 写入单个夹具文档，返回写入位置
    ///
    /// 写入失败时返回错误，生成器随即中止，之前写入的文件保持不变。
    fn write(&mut self, name: &StorageFileName, contents: &str) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 只记录写入内容的测试用实现
    #[derive(Default)]
    struct RecordingSink {
        written: Vec<(String, String)>,
    }

    impl EntrySink for RecordingSink {
        fn write(&mut self, name: &StorageFileName, contents: &str) -> Result<PathBuf> {
            self.written.push((name.to_string(), contents.to_string()));
            Ok(PathBuf::from(name.to_string()))
        }
    }

    #[test]
    fn test_trait_write() {
        let mut sink = RecordingSink::default();
        let name = StorageFileName::new("JournalEntry", "abc");

        let path = sink.write(&name, "<plist/>").unwrap();

        assert_eq!(path, PathBuf::from("JournalEntry;abc.txt"));
        assert_eq!(sink.written.len(), 1);
        assert_eq!(sink.written[0].1, "<plist/>");
    }
}
