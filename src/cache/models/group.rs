use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};

use super::user::{UserProfile, UserRecord};

/// 群组资料快照，整体替换语义与用户资料一致
///
/// 私聊场景下没有 title，只有对方的姓名字段。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupProfile {
    /// 群名
    pub title: Option<String>,
    /// 会话用户名
    pub username: Option<String>,
    /// 私聊对方的名
    pub first_name: Option<String>,
    /// 私聊对方的姓
    pub last_name: Option<String>,
}

impl GroupProfile {
    /// 推导展示名：群名 > 会话用户名 > 空串
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.username.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("")
    }
}

/// 排行结果中的一项
#[derive(Debug, Clone, Serialize)]
pub struct RankEntry {
    /// 用户资料快照
    pub user: UserProfile,
    /// 窗口内的消息数
    pub count: usize,
    /// 该用户最近一条消息的时间戳
    pub last_timestamp: Option<i64>,
}

/// 一次排行计算的结果
#[derive(Debug, Clone)]
pub struct GroupRank {
    /// 全群在窗口内的消息总数
    pub total: usize,
    /// 按活跃度排序的成员列表
    pub rank: Vec<RankEntry>,
}

/// 群组记录：身份 + 资料快照 + 成员表
///
/// 首条提及该群的消息懒创建；成员表的插入顺序无意义，排行自带排序。
#[derive(Debug, Clone)]
pub struct GroupRecord {
    pub id: i64,
    pub profile: GroupProfile,
    users: HashMap<i64, UserRecord>,
}

impl GroupRecord {
    pub fn new(id: i64, profile: GroupProfile) -> Self {
        Self {
            id,
            profile,
            users: HashMap::new(),
        }
    }

    /// 整体替换群组资料快照
    pub fn upsert_profile(&mut self, profile: GroupProfile) {
        self.profile = profile;
    }

    /// 懒创建用户，已存在则整体替换其资料
    pub fn upsert_user(&mut self, user_id: i64, profile: UserProfile) -> &mut UserRecord {
        match self.users.entry(user_id) {
            Entry::Occupied(entry) => {
                let user = entry.into_mut();
                user.upsert_profile(profile);
                user
            }
            Entry::Vacant(entry) => entry.insert(UserRecord::new(user_id, profile)),
        }
    }

    pub fn user(&self, user_id: i64) -> Option<&UserRecord> {
        self.users.get(&user_id)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// 全群累计消息数
    pub fn total_count(&self) -> usize {
        self.users.values().map(UserRecord::total_count).sum()
    }

    /// 统计 [start, end] 窗口内每个成员的消息数并排序
    ///
    /// 所有成员都会出现在结果里，包括窗口内计数为 0 的；排序按计数降序，
    /// 计数相同按最近活跃降序（从未发言的排最后），再相同则顺序不保证。
    pub fn rank(&self, start: i64, end: i64) -> GroupRank {
        let mut rank: Vec<RankEntry> = self
            .users
            .values()
            .map(|user| RankEntry {
                user: user.profile.clone(),
                count: user.count_in_range(start, end),
                last_timestamp: user.last_timestamp(),
            })
            .collect();

        rank.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.last_timestamp.cmp(&a.last_timestamp))
        });

        let total = rank.iter().map(|entry| entry.count).sum();
        GroupRank { total, rank }
    }

    /// 对所有成员的日志全量重排
    pub fn sort_ascending(&mut self) {
        for user in self.users.values_mut() {
            user.log.sort_ascending();
        }
    }

    /// 淘汰所有成员早于 threshold 的历史
    pub fn evict_before(&mut self, threshold: i64) {
        for user in self.users.values_mut() {
            user.log.evict_before(threshold);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(first_name: &str) -> UserProfile {
        UserProfile {
            first_name: Some(first_name.into()),
            ..Default::default()
        }
    }

    fn group_with_messages(messages: &[(i64, &str, &[i64])]) -> GroupRecord {
        let mut group = GroupRecord::new(-100, GroupProfile::default());
        for &(user_id, name, timestamps) in messages {
            let user = group.upsert_user(user_id, named(name));
            for &t in timestamps {
                user.append_timestamp(t);
            }
        }
        group
    }

    #[test]
    fn rank_orders_by_count_descending() {
        let group = group_with_messages(&[(1, "a", &[10, 20, 30]), (2, "b", &[15])]);
        let result = group.rank(0, 100);

        assert_eq!(result.total, 4);
        assert_eq!(result.rank[0].user.first_name.as_deref(), Some("a"));
        assert_eq!(result.rank[0].count, 3);
        assert_eq!(result.rank[0].last_timestamp, Some(30));
        assert_eq!(result.rank[1].count, 1);
    }

    #[test]
    fn rank_breaks_count_ties_by_recency() {
        let group = group_with_messages(&[(1, "old", &[10, 20]), (2, "fresh", &[12, 40])]);
        let result = group.rank(0, 100);

        assert_eq!(result.rank[0].user.first_name.as_deref(), Some("fresh"));
        assert_eq!(result.rank[1].user.first_name.as_deref(), Some("old"));
    }

    #[test]
    fn rank_includes_zero_count_users() {
        let group = group_with_messages(&[(1, "a", &[10, 20, 30]), (2, "b", &[15])]);
        let result = group.rank(16, 100);

        // 窗口外的成员也要列出，计数为 0
        assert_eq!(result.total, 2);
        assert_eq!(result.rank.len(), 2);
        assert_eq!(result.rank[1].user.first_name.as_deref(), Some("b"));
        assert_eq!(result.rank[1].count, 0);
        assert_eq!(result.rank[1].last_timestamp, Some(15));
    }

    #[test]
    fn users_without_messages_sort_last_on_ties() {
        let mut group = group_with_messages(&[(1, "a", &[200])]);
        group.upsert_user(2, named("silent"));
        let result = group.rank(300, 400);

        // 两人计数都是 0，从未发言的 last_timestamp 按最小值参与比较
        assert_eq!(result.rank[0].user.first_name.as_deref(), Some("a"));
        assert_eq!(result.rank[1].user.first_name.as_deref(), Some("silent"));
        assert_eq!(result.rank[1].last_timestamp, None);
    }

    #[test]
    fn upsert_user_creates_then_replaces_profile() {
        let mut group = GroupRecord::new(-100, GroupProfile::default());
        group.upsert_user(1, named("a"));
        assert_eq!(group.user_count(), 1);

        group.upsert_user(
            1,
            UserProfile {
                username: Some("u".into()),
                ..Default::default()
            },
        );
        assert_eq!(group.user_count(), 1);
        let user = group.user(1).unwrap();
        assert_eq!(user.profile.first_name, None);
        assert_eq!(user.profile.username.as_deref(), Some("u"));
    }

    #[test]
    fn total_count_sums_all_users() {
        let group = group_with_messages(&[(1, "a", &[10, 20]), (2, "b", &[30])]);
        assert_eq!(group.total_count(), 3);
    }

    #[test]
    fn group_display_name_prefers_title() {
        let profile = GroupProfile {
            title: Some("吹水群".into()),
            username: Some("chat".into()),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "吹水群");

        let profile = GroupProfile {
            title: Some("".into()),
            username: Some("chat".into()),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "chat");
        assert_eq!(GroupProfile::default().display_name(), "");
    }
}
