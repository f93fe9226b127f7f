//! 编解码模块
//!
//! 将日志条目渲染为属性列表 XML，并从夹具文件回读。

pub mod plist;

pub use plist::{DecodedEntry, decode, read_entry, render};
