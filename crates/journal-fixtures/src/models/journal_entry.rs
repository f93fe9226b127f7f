//! 模拟日志条目
//!
//! 每个条目对应一个夹具文件，随机生成标识符和过去的时间戳。

use chrono::{DateTime, SecondsFormat, SubsecRound, TimeDelta, Utc};
use rand::Rng;
use uuid::Builder;

/// 回溯窗口上限：100 年
pub const MAX_WINDOW_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

/// 模拟日志条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    /// 32 位十六进制标识符，只用于保证文件名唯一
    pub identifier: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

impl JournalEntry {
    /// 创建条目，内容标签由序号和标识符组成
    pub fn new(index: usize, identifier: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let identifier = identifier.into();
        Self {
            content: Self::label(index, &identifier),
            identifier,
            timestamp,
        }
    }

    /// 生成随机条目
    ///
    /// 时间戳为 `now` 减去 `[0, window_seconds)` 内均匀分布的整数秒，
    /// `now` 先截断到整秒，保证序列化后回读的值完全一致。窗口超过上限时按上限处理。
    pub fn random<R: Rng>(
        index: usize,
        rng: &mut R,
        now: DateTime<Utc>,
        window_seconds: u64,
    ) -> Self {
        let identifier = random_identifier(rng);

        let window_seconds = window_seconds.min(MAX_WINDOW_SECONDS);
        let offset = if window_seconds == 0 {
            0
        } else {
            rng.random_range(0..window_seconds)
        };
        let now = now.trunc_subsecs(0);
        let timestamp = now - TimeDelta::seconds(offset as i64);

        Self::new(index, identifier, timestamp)
    }

    /// 内容标签：`For {index} - {identifier}`
    pub fn label(index: usize, identifier: &str) -> String {
        format!("For {} - {}", index, identifier)
    }

    /// 从内容标签解析序号和标识符
    pub fn parse_label(content: &str) -> Option<(usize, &str)> {
        let rest = content.strip_prefix("For ")?;
        let (index, identifier) = rest.split_once(" - ")?;
        Some((index.parse().ok()?, identifier))
    }

    /// ISO 8601 格式的时间戳，UTC 以 `Z` 结尾
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// 生成 32 位小写十六进制标识符
///
/// 以 16 个随机字节构造 v4 UUID，取其无连字符形式，碰撞概率可以忽略。
pub fn random_identifier<R: Rng>(rng: &mut R) -> String {
    Builder::from_random_bytes(rng.random())
        .into_uuid()
        .simple()
        .to_string()
}
