//! 属性列表（plist）编解码
//!
//! 文档结构固定：一个 dict，包含 `timestamp`（date）和 `content`（string）两个键。
//! 解码只接受这一种结构，其余形状一律视为编码类型错误。

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use journal_shared::error::{FixtureError, Result};

use crate::models::JournalEntry;

static DOCUMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"\A<\?xml version="1\.0" encoding="UTF-8"\?>\s*"#,
        r#"<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1\.0//EN" "http://www\.apple\.com/DTDs/PropertyList-1\.0\.dtd">\s*"#,
        r#"<plist version="1\.0">\s*<dict>\s*"#,
        r#"<key>timestamp</key>\s*<date>(?P<timestamp>[^<]*)</date>\s*"#,
        r#"<key>content</key>\s*<string>(?P<content>[^<]*)</string>\s*"#,
        r#"</dict>\s*</plist>\s*\z"#,
    ))
    .expect("plist 文档正则无效")
});

/// 从夹具文件解码出的字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry {
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

/// 渲染日志条目
pub fn render(entry: &JournalEntry) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
  <key>timestamp</key>
  <date>{timestamp}</date>
  <key>content</key>
  <string>{content}</string>
</dict>
</plist>
"#,
        timestamp = entry.formatted_timestamp(),
        content = escape(&entry.content),
    )
}

/// 解码 plist 文档
///
/// `source` 只用于错误信息。
pub fn decode(source: &Path, text: &str) -> Result<DecodedEntry> {
    let decode_error = |reason: String| FixtureError::Decode {
        path: source.to_path_buf(),
        reason,
    };

    let captures = DOCUMENT_PATTERN
        .captures(text)
        .ok_or_else(|| decode_error("文档结构与日志条目不匹配".to_string()))?;

    let raw_timestamp = &captures["timestamp"];
    let timestamp = DateTime::parse_from_rfc3339(raw_timestamp.trim())
        .map_err(|e| decode_error(format!("无效的日期 '{}': {}", raw_timestamp, e)))?
        .with_timezone(&Utc);

    let content = unescape(&captures["content"])
        .ok_or_else(|| decode_error("string 中包含未知的实体引用".to_string()))?;

    Ok(DecodedEntry { timestamp, content })
}

/// 读取并解码夹具文件
pub fn read_entry(path: &Path) -> Result<DecodedEntry> {
    let text = fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
    decode(path, &text)
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn unescape(text: &str) -> Option<String> {
    let mut unescaped = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        unescaped.push_str(&rest[..start]);
        let end = rest[start..].find(';')? + start;
        let replacement = match &rest[start + 1..end] {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => return None,
        };
        unescaped.push(replacement);
        rest = &rest[end + 1..];
    }
    unescaped.push_str(rest);

    Some(unescaped)
}
