use axum::{Json, extract::State};
use chrono::Utc;

use super::model::{Command, HELP_TEXT, format_leaderboard};
use crate::{
    AppState,
    telegram::{TelegramMessage, Update},
    utils::{ApiResponse, success_to_api_response},
};

/// Telegram webhook 入口：命令走排行查询，普通消息进缓存
///
/// 对 Telegram 一律回 200，处理失败只记日志，避免对方反复重推同一条 update。
#[axum::debug_handler]
pub async fn webhook(
    State(state): State<AppState>,
    Json(update): Json<Update>,
) -> Json<ApiResponse<()>> {
    let Some(message) = update.message else {
        // 非消息类 update（编辑、成员变动等）直接忽略
        return success_to_api_response(());
    };

    match message.text.as_deref().and_then(Command::parse) {
        Some(command) => handle_command(&state, command, &message).await,
        None => {
            if !state.cache.ingest(&message.to_incoming()) {
                tracing::debug!("skip malformed message in update {}", update.update_id);
            }
        }
    }

    success_to_api_response(())
}

async fn handle_command(state: &AppState, command: Command, message: &TelegramMessage) {
    let Some(chat) = &message.chat else {
        return;
    };
    let chat_id = chat.id;
    let now = Utc::now().timestamp();

    if !state.cooldown.try_acquire(chat_id, now) {
        tracing::info!("command in chat {} dropped by cooldown", chat_id);
        return;
    }

    match command {
        Command::Help => {
            state.telegram.send_message(chat_id, HELP_TEXT).await;
        }
        Command::TopTen | Command::All => {
            let window_days = state.config.retention_days;
            let start = now - window_days as i64 * 86_400;
            let limit = (command == Command::TopTen).then_some(state.config.rank_size);

            match state.cache.query(chat_id, start as f64, now as f64) {
                Ok(Some(activity)) => {
                    let text = format_leaderboard(&activity, window_days, limit);
                    state.telegram.send_message(chat_id, &text).await;
                }
                Ok(None) => {
                    state
                        .telegram
                        .send_message(chat_id, "本群还没有任何消息记录")
                        .await;
                }
                Err(e) => {
                    // 窗口由服务端自己构造，正常不可能走到这里
                    tracing::error!("rank query for chat {} failed: {}", chat_id, e);
                }
            }
        }
    }
}
