// 活动缓存模块
// 纯内存结构：群组 -> 用户 -> 消息时间戳日志，支持区间计数、排行与淘汰

pub mod models;
pub mod operations;

// 重新导出常用类型，方便其他模块使用
pub use models::group::{GroupProfile, GroupRank, GroupRecord, RankEntry};
pub use models::log::TimestampLog;
pub use models::message::{IncomingMessage, MessageChat, MessageSender};
pub use models::user::{UserProfile, UserRecord};
pub use operations::activity::{ActivityCache, ActivityQueryError, GroupActivity};
