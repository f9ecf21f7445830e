use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

/// 排行命令的冷却控制：同一会话在窗口期内只响应一次命令
#[derive(Debug)]
pub struct CommandCooldown {
    window: Duration,
    /// chat_id -> 上次放行命令的 unix 秒
    last_hit: Mutex<HashMap<i64, i64>>,
}

impl CommandCooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_hit: Mutex::new(HashMap::new()),
        }
    }

    /// 尝试占用一次命令额度；窗口内的重复命令返回 false
    pub fn try_acquire(&self, chat_id: i64, now: i64) -> bool {
        let mut last_hit = self.last_hit.lock();
        match last_hit.get(&chat_id) {
            Some(&last) if now - last < self.window.as_secs() as i64 => false,
            _ => {
                last_hit.insert(chat_id, now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_repeat_commands_within_window() {
        let cooldown = CommandCooldown::new(Duration::from_secs(60));
        assert!(cooldown.try_acquire(-1, 1_000));
        assert!(!cooldown.try_acquire(-1, 1_030));
        assert!(cooldown.try_acquire(-1, 1_060));
    }

    #[test]
    fn chats_are_throttled_independently() {
        let cooldown = CommandCooldown::new(Duration::from_secs(60));
        assert!(cooldown.try_acquire(-1, 1_000));
        assert!(cooldown.try_acquire(-2, 1_000));
        assert!(!cooldown.try_acquire(-1, 1_001));
    }

    #[test]
    fn zero_window_never_throttles() {
        let cooldown = CommandCooldown::new(Duration::from_secs(0));
        assert!(cooldown.try_acquire(-1, 1_000));
        assert!(cooldown.try_acquire(-1, 1_000));
    }
}
