use serde::{Deserialize, Serialize};

use crate::cache::{GroupActivity, GroupProfile, RankEntry};

/// 排行查询参数
///
/// start / end 按字符串接收再手工解析，格式错误走统一的参数校验响应。
#[derive(Debug, Deserialize)]
pub struct RankQuery {
    pub group_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// 排行查询响应
#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub group: GroupProfile,
    pub total: usize,
    pub rank: Vec<RankEntry>,
}

impl From<GroupActivity> for RankResponse {
    fn from(activity: GroupActivity) -> Self {
        Self {
            group: activity.group,
            total: activity.total,
            rank: activity.rank,
        }
    }
}

/// 缓存总量响应，维护接口也复用
#[derive(Debug, Serialize)]
pub struct TotalResponse {
    pub total: usize,
}

/// 淘汰请求：删除所有早于 threshold 的历史
#[derive(Debug, Deserialize)]
pub struct EvictRequest {
    pub threshold: i64,
}
