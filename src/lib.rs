use std::sync::Arc;

use cache::ActivityCache;
use config::Config;
use middleware::CommandCooldown;
use telegram::TelegramClient;

pub mod cache;
pub mod config;
pub mod middleware;
pub mod routes;
pub mod telegram;
pub mod utils;

/// 全局应用状态，由 main 显式构造后随路由传递
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ActivityCache>,
    pub config: Config,
    pub telegram: Arc<TelegramClient>,
    pub cooldown: Arc<CommandCooldown>,
}
