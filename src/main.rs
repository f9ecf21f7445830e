use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use chatrank::{
    AppState, cache::ActivityCache, config::Config, middleware::CommandCooldown, routes,
    telegram::TelegramClient,
};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    // 缓存实例只在这里创建一次，随应用状态传递
    let cache = Arc::new(ActivityCache::new());
    let state = AppState {
        cache: cache.clone(),
        telegram: Arc::new(TelegramClient::new(config.bot_token.clone())),
        cooldown: Arc::new(CommandCooldown::new(config.command_cooldown())),
        config: config.clone(),
    };

    // 周期维护：淘汰超过保留期的历史并重排，兜底乱序写入
    let retention_secs = config.retention().as_secs() as i64;
    let mut interval = tokio::time::interval(config.maintenance_interval());
    tokio::spawn(async move {
        // 第一个 tick 立即触发，跳过
        interval.tick().await;
        loop {
            interval.tick().await;
            let horizon = Utc::now().timestamp() - retention_secs;
            cache.evict_before(horizon);
            cache.resort_all();
            tracing::info!(
                "maintenance done, horizon={}, cached messages={}",
                horizon,
                cache.total_count()
            );
        }
    });

    let router = routes::app(state.clone());

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(CorsLayer::permissive())
    };

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router,
    )
    .await
    .expect("Failed to start server");
}
