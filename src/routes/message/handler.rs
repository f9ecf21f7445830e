use axum::{Json, extract::State};

use super::model::IngestResponse;
use crate::{
    AppState,
    cache::IncomingMessage,
    utils::{ApiResponse, error_codes, error_to_api_response, success_to_api_response},
};

/// 直接写入一条原始消息记录
#[axum::debug_handler]
pub async fn ingest(
    State(state): State<AppState>,
    Json(msg): Json<IncomingMessage>,
) -> Json<ApiResponse<IngestResponse>> {
    if state.cache.ingest(&msg) {
        success_to_api_response(IngestResponse {
            accepted: true,
            total: state.cache.total_count(),
        })
    } else {
        // 脏数据拒绝：记一条日志交给调用方处理
        tracing::debug!("rejected malformed message: {:?}", msg);
        error_to_api_response(error_codes::VALIDATION_ERROR, "消息缺少chat/from/date字段".into())
    }
}
