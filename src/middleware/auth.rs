use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;
use crate::utils::{error_codes, error_to_api_response};

/// Telegram 在每次 webhook 推送里带的鉴权头
const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// webhook 鉴权：校验 secret token 请求头
///
/// 未配置 secret 时放行，方便本地调试。
pub async fn webhook_auth(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.config.webhook_secret.as_deref() else {
        return next.run(req).await;
    };

    let provided = req
        .headers()
        .get(SECRET_TOKEN_HEADER)
        .and_then(|header| header.to_str().ok());

    match provided {
        Some(provided) if provided == expected => next.run(req).await,
        _ => {
            tracing::warn!("webhook request rejected: secret token mismatch");
            (
                StatusCode::UNAUTHORIZED,
                error_to_api_response::<()>(error_codes::AUTH_FAILED, "未授权访问".into()),
            )
                .into_response()
        }
    }
}
