use std::error::Error;

use roomescape::RoomescapeConfig;
use tracing::{error, info, Level};

mod app;
mod dto;
mod error;
mod handler;

#[tokio::main]
async fn main() {
    match RoomescapeConfig::load() {
        Ok(config) => {
            tracing_subscriber::fmt()
                .with_max_level(Level::from(&config.logger.level))
                .init();
            if let Err(error) = serve(&config).await {
                error!("アプリケーションエラー: {}", error);
            }
        }
        Err(error) => {
            tracing_subscriber::fmt::init();
            error!("設定の読み込みに失敗: {}", error)
        }
    }
}

async fn serve(config: &RoomescapeConfig) -> Result<(), Box<dyn Error>> {
    let addr = config.server.addr.parse()?;
    let app = app::router(config);
    info!("予約APIを起動: {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
