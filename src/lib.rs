pub mod config;
pub mod emoji;
pub mod server;
pub mod util; // doctestのためpubにする

use config::EmojiConfig;
use emoji::EmojiService;

/// 設定に従って絵文字サービスを構築し、HTTPサーバーを起動する
pub async fn run(config: EmojiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = EmojiService::new(config.tier_sources());
    log::info!("Emoji service ready (tier 1 preloaded)");

    server::start_http_server(service, config.http_port).await
}
