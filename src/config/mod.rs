use std::env;
use std::time::Duration;

/// 服务配置，启动时从环境变量加载（支持 .env）
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub bot_token: String,
    /// webhook 鉴权用的 secret token；不配置则不校验
    pub webhook_secret: Option<String>,
    pub command_cooldown_secs: u64,
    /// 历史保留天数，同时也是排行命令的统计窗口
    pub retention_days: u64,
    pub maintenance_interval_secs: u64,
    /// /topten 展示的名额
    pub rank_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api".into()),
            bot_token: env::var("BOT_TOKEN")?,
            webhook_secret: env::var("WEBHOOK_SECRET").ok().filter(|s| !s.is_empty()),
            command_cooldown_secs: env::var("COMMAND_COOLDOWN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            retention_days: env::var("RETENTION_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
            maintenance_interval_secs: env::var("MAINTENANCE_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            rank_size: env::var("RANK_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }

    pub fn command_cooldown(&self) -> Duration {
        Duration::from_secs(self.command_cooldown_secs)
    }

    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_days * 24 * 3600)
    }

    pub fn maintenance_interval(&self) -> Duration {
        Duration::from_secs(self.maintenance_interval_secs)
    }
}
