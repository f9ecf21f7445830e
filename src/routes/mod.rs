// 路由模块

pub mod activity;
pub mod bot;
pub mod message;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

/// 组装完整路由表
///
/// webhook 单独成组并挂 secret token 鉴权，查询和维护接口公开。
pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        // 活动查询路由
        .route("/activity/rank", get(activity::rank))
        .route("/activity/total", get(activity::total))
        // 维护路由，由外部调度器调用
        .route("/activity/resort", post(activity::resort))
        .route("/activity/evict", post(activity::evict))
        // 消息路由
        .route("/messages/ingest", post(message::ingest));

    let webhook_routes = Router::new()
        .route("/bot/webhook", post(bot::webhook))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::webhook_auth,
        ));

    Router::new()
        .nest(
            &state.config.api_base_uri.clone(),
            Router::new().merge(public_routes).merge(webhook_routes),
        )
        .layer(axum::middleware::from_fn(crate::middleware::log_errors))
        .with_state(state)
}
