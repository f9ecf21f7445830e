use crate::cache::GroupActivity;

/// 机器人支持的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 窗口内最活跃的前几名
    TopTen,
    /// 窗口内全部成员排行
    All,
    Help,
}

impl Command {
    /// 从消息文本解析命令，支持群里常见的 /cmd@botname 形式
    pub fn parse(text: &str) -> Option<Command> {
        let first = text.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        match name {
            "topten" => Some(Command::TopTen),
            "allrank" => Some(Command::All),
            "help" => Some(Command::Help),
            _ => None,
        }
    }
}

pub const HELP_TEXT: &str = "/topten - 最近消息量排行（前十名）\n/allrank - 全部成员消息量排行\n/help - 显示本帮助";

/// 把排行结果渲染成发回会话的文本
///
/// limit 为 None 时列出全部成员。
pub fn format_leaderboard(
    activity: &GroupActivity,
    window_days: u64,
    limit: Option<usize>,
) -> String {
    let title = activity.group.display_name();
    let mut lines = Vec::with_capacity(activity.rank.len() + 2);
    if title.is_empty() {
        lines.push(format!("过去{}天消息排行榜", window_days));
    } else {
        lines.push(format!("「{}」过去{}天消息排行榜", title, window_days));
    }

    let shown = match limit {
        Some(n) => &activity.rank[..activity.rank.len().min(n)],
        None => &activity.rank[..],
    };
    for (i, entry) in shown.iter().enumerate() {
        let name = entry.user.display_name();
        let name = if name.is_empty() { "(匿名)".into() } else { name };
        let percent = if activity.total > 0 {
            entry.count as f64 * 100.0 / activity.total as f64
        } else {
            0.0
        };
        lines.push(format!("{}. {} {:.2}% ({})", i + 1, name, percent, entry.count));
    }

    lines.push(format!("共 {} 条消息", activity.total));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{GroupProfile, RankEntry, UserProfile};

    fn entry(first_name: &str, count: usize, last_timestamp: Option<i64>) -> RankEntry {
        RankEntry {
            user: UserProfile {
                first_name: Some(first_name.into()),
                ..Default::default()
            },
            count,
            last_timestamp,
        }
    }

    #[test]
    fn parses_known_commands() {
        assert_eq!(Command::parse("/topten"), Some(Command::TopTen));
        assert_eq!(Command::parse("/allrank"), Some(Command::All));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("/topten@chatrank_bot extra"), Some(Command::TopTen));
    }

    #[test]
    fn ignores_plain_text_and_unknown_commands() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("/start"), None);
        assert_eq!(Command::parse("看看 /topten"), None);
    }

    #[test]
    fn formats_leaderboard_with_percentages() {
        let activity = GroupActivity {
            group: GroupProfile {
                title: Some("吹水群".into()),
                ..Default::default()
            },
            total: 4,
            rank: vec![entry("三", 3, Some(30)), entry("四", 1, Some(15))],
        };

        let text = format_leaderboard(&activity, 7, None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "「吹水群」过去7天消息排行榜");
        assert_eq!(lines[1], "1. 三 75.00% (3)");
        assert_eq!(lines[2], "2. 四 25.00% (1)");
        assert_eq!(lines[3], "共 4 条消息");
    }

    #[test]
    fn limit_caps_listed_entries_but_not_total() {
        let activity = GroupActivity {
            group: GroupProfile::default(),
            total: 3,
            rank: vec![entry("a", 2, Some(20)), entry("b", 1, Some(10))],
        };

        let text = format_leaderboard(&activity, 7, Some(1));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1. a 66.67% (2)");
        assert_eq!(lines[2], "共 3 条消息");
    }

    #[test]
    fn empty_window_avoids_division_by_zero() {
        let activity = GroupActivity {
            group: GroupProfile::default(),
            total: 0,
            rank: vec![entry("a", 0, None)],
        };

        let text = format_leaderboard(&activity, 7, None);
        assert!(text.contains("1. a 0.00% (0)"));
        assert!(text.ends_with("共 0 条消息"));
    }
}
