use serde::Serialize;

/// 写入结果
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub accepted: bool,
    /// 当前缓存的消息总数
    pub total: usize,
}
