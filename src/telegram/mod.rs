// Telegram Bot API 接入
// 入站 webhook update 的数据结构 + 出站 sendMessage 客户端

use serde::{Deserialize, Serialize};

use crate::cache::{IncomingMessage, MessageChat, MessageSender};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// 一次 webhook 推送
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    /// 只关心新消息，其余 update 类型忽略
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

/// Telegram 消息，只保留计数和命令分发需要的字段
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramMessage {
    #[serde(default)]
    pub chat: Option<MessageChat>,
    #[serde(default)]
    pub from: Option<MessageSender>,
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
}

impl TelegramMessage {
    /// 裁剪成缓存的原始消息记录
    pub fn to_incoming(&self) -> IncomingMessage {
        IncomingMessage {
            chat: self.chat.clone(),
            from: self.from.clone(),
            date: self.date,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

/// 出站 Bot API 客户端
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(TELEGRAM_API_BASE.to_string(), token)
    }

    /// 测试时指向本地伪造的 Bot API
    pub fn with_base_url(base_url: String, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// 向某个会话发送文本消息；失败只记日志，不向上传播
    pub async fn send_message(&self, chat_id: i64, text: &str) {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let result = self
            .http
            .post(&url)
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!("sendMessage to {} ok", chat_id);
            }
            Ok(resp) => {
                tracing::error!("sendMessage to {} failed: HTTP {}", chat_id, resp.status());
            }
            Err(e) => {
                tracing::error!("sendMessage to {} failed: {}", chat_id, e);
            }
        }
    }
}
