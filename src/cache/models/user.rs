use serde::{Deserialize, Serialize};

use super::log::TimestampLog;

/// 用户资料快照，三个字段都可缺省
///
/// 每条新消息整体替换快照，不做字段合并。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// 名
    pub first_name: Option<String>,
    /// 姓
    pub last_name: Option<String>,
    /// 用户名
    pub username: Option<String>,
}

/// 字段存在且非空串才算有值
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl UserProfile {
    /// 推导展示名：名+姓 > 名 > 姓 > 用户名 > 空串
    pub fn display_name(&self) -> String {
        match (non_empty(&self.first_name), non_empty(&self.last_name)) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => non_empty(&self.username).unwrap_or("").to_string(),
        }
    }
}

/// 群成员记录：身份 + 资料快照 + 时间戳日志
///
/// 首条消息时懒创建，正常运行期间不删除。
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub profile: UserProfile,
    pub log: TimestampLog,
}

impl UserRecord {
    pub fn new(id: i64, profile: UserProfile) -> Self {
        Self {
            id,
            profile,
            log: TimestampLog::new(),
        }
    }

    /// 整体替换资料快照
    pub fn upsert_profile(&mut self, profile: UserProfile) {
        self.profile = profile;
    }

    /// 记录一条消息的时间戳
    pub fn append_timestamp(&mut self, timestamp: i64) {
        self.log.append(timestamp);
    }

    pub fn total_count(&self) -> usize {
        self.log.len()
    }

    pub fn count_in_range(&self, start: i64, end: i64) -> usize {
        self.log.count_in_range(start, end)
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.log.last_timestamp()
    }

    pub fn display_name(&self) -> String {
        self.profile.display_name()
    }
}
