/// 单个 (群组, 用户) 的消息时间戳日志，unix 秒
///
/// 前提：区间计数和淘汰都假定条目升序排列。append 为了 O(1) 不做校验，
/// 消息到达顺序基本单调、偶有乱序，乱序写入后调用 sort_ascending 恢复前提。
#[derive(Debug, Clone, Default)]
pub struct TimestampLog {
    entries: Vec<i64>,
}

impl TimestampLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 追加一条时间戳，不校验顺序
    pub fn append(&mut self, timestamp: i64) {
        self.entries.push(timestamp);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 最近一条时间戳，空日志返回 None
    pub fn last_timestamp(&self) -> Option<i64> {
        self.entries.last().copied()
    }

    /// 统计落在 [start, end]（两端闭）内的条目数
    ///
    /// 空日志或窗口与 [first, last] 不相交时直接返回 0，其余情况用
    /// partition_point 定位两个边界（同一个单调谓词分割点原语，谓词不同），
    /// O(log n)。
    pub fn count_in_range(&self, start: i64, end: i64) -> usize {
        let ts = &self.entries;
        match (ts.first(), ts.last()) {
            (Some(&first), Some(&last)) if last >= start && end >= first => {
                let lo = ts.partition_point(|&t| t < start);
                let hi = ts.partition_point(|&t| t <= end);
                hi.saturating_sub(lo)
            }
            _ => 0,
        }
    }

    /// 删除严格小于 threshold 的最长前缀
    ///
    /// 依赖升序前提；乱序时可能多删或少删。定位 O(log n)，丢弃 O(k)。
    pub fn evict_before(&mut self, threshold: i64) {
        let cut = self.entries.partition_point(|&t| t < threshold);
        if cut > 0 {
            self.entries.drain(..cut);
        }
    }

    /// 全量重排，恢复升序前提；幂等
    pub fn sort_ascending(&mut self) {
        self.entries.sort_unstable();
    }
}
