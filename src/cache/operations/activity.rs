use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;

use crate::cache::models::group::{GroupProfile, GroupRecord, RankEntry};
use crate::cache::models::message::IncomingMessage;

/// 排行查询的参数错误
///
/// 这是调用方编程错误，区别于 ingest 对脏数据的静默拒绝。
#[derive(Debug, Error)]
pub enum ActivityQueryError {
    #[error("start time must be a finite number, got {0}")]
    InvalidStart(f64),
    #[error("end time must be a finite number, got {0}")]
    InvalidEnd(f64),
}

/// 一个群组的排行查询结果
#[derive(Debug, Clone, Serialize)]
pub struct GroupActivity {
    /// 群组资料快照
    pub group: GroupProfile,
    /// 窗口内全群消息总数
    pub total: usize,
    /// 按活跃度排序的成员列表
    pub rank: Vec<RankEntry>,
}

/// 活动缓存：群组 -> 群组记录
///
/// 服务启动时显式构造，随应用状态传递。
///
/// 锁策略：外层 RwLock 只保护群组表本身，每个群组再持一把 RwLock（分群条带）。
/// 写操作（ingest / resort_all / evict_before）对涉及的群组取写锁，查询取读锁，
/// 不同群组互不阻塞；rank 在读锁下看到的是该群所有日志的一致快照。
/// 同一用户的并发写入顺序由调用方保证，缓存只靠 resort_all 自愈乱序。
#[derive(Debug, Default)]
pub struct ActivityCache {
    groups: RwLock<HashMap<i64, Arc<RwLock<GroupRecord>>>>,
}

impl ActivityCache {
    pub fn new() -> Self {
        Self {
            groups: RwLock::new(HashMap::new()),
        }
    }

    /// 写入一条消息
    ///
    /// chat / from / date 任一缺失返回 false，缓存不变；脏数据不当作错误。
    /// 成功路径上懒创建群组和用户、整体替换两份资料快照、追加时间戳。
    pub fn ingest(&self, msg: &IncomingMessage) -> bool {
        let (Some(chat), Some(from), Some(date)) = (&msg.chat, &msg.from, msg.date) else {
            return false;
        };

        let group = self.group_entry(chat.id, &chat.profile);
        let mut group = group.write();
        group.upsert_profile(chat.profile.clone());
        group
            .upsert_user(from.id, from.profile.clone())
            .append_timestamp(date);
        true
    }

    /// 查询群组在 [start, end] 窗口内的活跃排行
    ///
    /// start / end 必须是有限数值，否则返回参数错误；未知群组返回 Ok(None)，
    /// 没有数据是正常结果不是失败。时间按整秒截断。
    pub fn query(
        &self,
        group_id: i64,
        start: f64,
        end: f64,
    ) -> Result<Option<GroupActivity>, ActivityQueryError> {
        if !start.is_finite() {
            return Err(ActivityQueryError::InvalidStart(start));
        }
        if !end.is_finite() {
            return Err(ActivityQueryError::InvalidEnd(end));
        }

        let group = self.groups.read().get(&group_id).cloned();
        let Some(group) = group else {
            return Ok(None);
        };

        let group = group.read();
        let ranked = group.rank(start.trunc() as i64, end.trunc() as i64);
        Ok(Some(GroupActivity {
            group: group.profile.clone(),
            total: ranked.total,
            rank: ranked.rank,
        }))
    }

    /// 对全缓存的日志重排，恢复升序前提
    ///
    /// 维护操作，怀疑出现过乱序写入后调用。
    pub fn resort_all(&self) {
        for group in self.snapshot_groups() {
            group.write().sort_ascending();
        }
    }

    /// 淘汰全缓存中早于 threshold 的历史，约束内存占用
    ///
    /// 开销与被删条目数成正比，与缓存总量无关。
    pub fn evict_before(&self, threshold: i64) {
        for group in self.snapshot_groups() {
            group.write().evict_before(threshold);
        }
    }

    /// 当前缓存的消息总数
    pub fn total_count(&self) -> usize {
        self.snapshot_groups()
            .iter()
            .map(|group| group.read().total_count())
            .sum()
    }

    /// 当前缓存的群组数
    pub fn group_count(&self) -> usize {
        self.groups.read().len()
    }

    /// 取出或创建群组条目；只在新群首次出现时拿表写锁
    fn group_entry(&self, group_id: i64, profile: &GroupProfile) -> Arc<RwLock<GroupRecord>> {
        if let Some(found) = self.groups.read().get(&group_id) {
            return found.clone();
        }

        let mut groups = self.groups.write();
        groups
            .entry(group_id)
            .or_insert_with(|| Arc::new(RwLock::new(GroupRecord::new(group_id, profile.clone()))))
            .clone()
    }

    /// 群组句柄快照，遍历时不持表锁
    fn snapshot_groups(&self) -> Vec<Arc<RwLock<GroupRecord>>> {
        self.groups.read().values().cloned().collect()
    }
}
