use axum::{
    Json,
    extract::{Query, State},
};

use super::model::{EvictRequest, RankQuery, RankResponse, TotalResponse};
use crate::{
    AppState,
    utils::{
        ApiResponse, empty_api_response, error_codes, error_to_api_response,
        success_to_api_response,
    },
};

/// 查询群组活动排行
#[axum::debug_handler]
pub async fn rank(
    State(state): State<AppState>,
    Query(query): Query<RankQuery>,
) -> Json<ApiResponse<RankResponse>> {
    // 检查必需的查询参数
    let Some(group_id) = query.group_id.as_deref().and_then(|v| v.parse::<i64>().ok()) else {
        return error_to_api_response(error_codes::VALIDATION_ERROR, "缺少或非法的group_id参数".into());
    };
    let Some(start) = query.start.as_deref().and_then(|v| v.parse::<f64>().ok()) else {
        return error_to_api_response(error_codes::VALIDATION_ERROR, "start必须是数字".into());
    };
    let Some(end) = query.end.as_deref().and_then(|v| v.parse::<f64>().ok()) else {
        return error_to_api_response(error_codes::VALIDATION_ERROR, "end必须是数字".into());
    };

    match state.cache.query(group_id, start, end) {
        Ok(Some(activity)) => success_to_api_response(activity.into()),
        // 未知群组：空结果不是错误
        Ok(None) => empty_api_response(),
        Err(e) => error_to_api_response(error_codes::VALIDATION_ERROR, e.to_string()),
    }
}

/// 当前缓存的消息总量
#[axum::debug_handler]
pub async fn total(State(state): State<AppState>) -> Json<ApiResponse<TotalResponse>> {
    success_to_api_response(TotalResponse {
        total: state.cache.total_count(),
    })
}

/// 维护：全量重排所有时间戳日志
#[axum::debug_handler]
pub async fn resort(State(state): State<AppState>) -> Json<ApiResponse<TotalResponse>> {
    state.cache.resort_all();
    tracing::info!("resorted all timestamp logs");
    success_to_api_response(TotalResponse {
        total: state.cache.total_count(),
    })
}

/// 维护：淘汰早于阈值的历史
#[axum::debug_handler]
pub async fn evict(
    State(state): State<AppState>,
    Json(req): Json<EvictRequest>,
) -> Json<ApiResponse<TotalResponse>> {
    state.cache.evict_before(req.threshold);
    let total = state.cache.total_count();
    tracing::info!("evicted history before {}, {} messages left", req.threshold, total);
    success_to_api_response(TotalResponse { total })
}
