use serde::{Deserialize, Serialize};

use super::group::GroupProfile;
use super::user::UserProfile;

/// 消息所属会话：标识 + 群组资料快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageChat {
    pub id: i64,
    #[serde(flatten)]
    pub profile: GroupProfile,
}

/// 消息发送者：标识 + 用户资料快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSender {
    pub id: i64,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// 一条待写入缓存的原始消息
///
/// chat / from / date 任一缺失都算脏数据，写入时拒绝；消息正文与计数无关，
/// 不保留。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub chat: Option<MessageChat>,
    #[serde(default)]
    pub from: Option<MessageSender>,
    #[serde(default)]
    pub date: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_telegram_shaped_json() {
        let msg: IncomingMessage = serde_json::from_str(
            r#"{
                "chat": {"id": -100, "type": "group", "title": "吹水群"},
                "from": {"id": 7, "first_name": "三", "username": "zhangsan"},
                "date": 1462008157,
                "text": "hi"
            }"#,
        )
        .unwrap();

        assert_eq!(msg.chat.as_ref().unwrap().id, -100);
        assert_eq!(
            msg.chat.as_ref().unwrap().profile.title.as_deref(),
            Some("吹水群")
        );
        assert_eq!(msg.from.as_ref().unwrap().id, 7);
        assert_eq!(msg.date, Some(1462008157));
    }

    #[test]
    fn missing_parts_deserialize_to_none() {
        let msg: IncomingMessage = serde_json::from_str("{}").unwrap();
        assert!(msg.chat.is_none() && msg.from.is_none() && msg.date.is_none());

        let msg: IncomingMessage =
            serde_json::from_str(r#"{"chat": {"id": 1}, "date": 10}"#).unwrap();
        assert!(msg.from.is_none());
        assert_eq!(msg.date, Some(10));
    }
}
