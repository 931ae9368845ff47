use config::{Config, ConfigError};
use serde::Deserialize;

use crate::service::DeleteGuard;

pub mod domain;
pub mod infrastructure;
pub mod service;

/// アプリケーション設定。`roomescape.toml`と`ROOMESCAPE_`環境変数から読み込む。
#[derive(Clone, Debug, Deserialize)]
pub struct RoomescapeConfig {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub logger: Logger,
    #[serde(default)]
    pub reservation_time: ReservationTimeConfig,
}

impl RoomescapeConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("roomescape.toml").required(false))
            .add_source(config::Environment::with_prefix("ROOMESCAPE").separator("_"))
            .build()?
            .try_deserialize::<RoomescapeConfig>()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub addr: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Logger {
    #[serde(default)]
    pub level: Level,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub enum Level {
    TRACE,
    DEBUG,
    #[default]
    INFO,
    WARN,
    ERROR,
}

impl From<&Level> for tracing::Level {
    fn from(value: &Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}

/// 予約時刻の削除に関する設定
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReservationTimeConfig {
    #[serde(default)]
    pub delete_guard: DeleteGuard,
}
