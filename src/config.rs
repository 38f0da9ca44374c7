// =============================================================================
// 共通設定・定数モジュール
// =============================================================================
// アプリケーション全体で使用する共通の設定値・定数と、
// 絵文字ソースの配置を表す設定ファイル(JSON)の読み込みを定義
// =============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::emoji::{EmojiSource, FeedFormat, FeedSource, SourceLocation, TierSources};
use crate::emoji::ChannelDirectory;

/// アプリケーションID（データディレクトリ名に使用）
pub const APP_IDENTIFIER: &str = "com.vtuber-overlay-suite.chat-emoji";

/// HTTPリクエストのデフォルトタイムアウト（秒）
///
/// URLで指定された絵文字フィードや、ローカライズ時の画像ダウンロードで使用。
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// HTTPリクエストのデフォルトタイムアウト（Duration）
///
/// HTTPクライアント構築時に直接使用可能
pub fn http_timeout() -> Duration {
    Duration::from_secs(HTTP_TIMEOUT_SECS)
}

/// 変換処理がこの時間（ミリ秒）を超えたら警告ログを出す
pub const SLOW_CONVERSION_THRESHOLD_MS: u64 = 10;

/// 最適化を実行するのに必要な、使用記録のあるコードの種類数
pub const PROMOTION_MIN_UNIQUE_CODES: usize = 100;

/// 最適化で検討する使用回数上位の件数
pub const PROMOTION_CANDIDATES: usize = 100;

/// この回数を超えて使用されたコードが人気Tierへ昇格する
pub const PROMOTION_USAGE_THRESHOLD: u64 = 10;

/// HTTP APIのデフォルトポート
pub const DEFAULT_HTTP_PORT: u16 = 19810;

/// 設定ファイル読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 絵文字ソースとサーバーの設定
///
/// パスは相対パスでも絶対パスでもよい。URL（http/https）を指定すると
/// reqwestで取得する。未指定の項目は該当ソースなしとして扱う。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmojiConfig {
    /// Tier 2: 基本Unicode絵文字リスト（all-emoji.json）
    pub unicode_base: Option<String>,
    /// Tier 3: 肌色モディファイア付き絵文字リスト（full-emoji-modifiers.json）
    pub unicode_modifiers: Option<String>,
    /// Tier 4: プラットフォーム絵文字（コード -> HTML のJSON）
    pub platform_json: Option<String>,
    /// Tier 4: プラットフォーム絵文字CSV（JSONがない場合のフォールバック）
    pub platform_csv: Option<String>,
    /// Tier 4: チャンネル専用絵文字の画像フォルダ
    pub channel_emoji_dir: Option<PathBuf>,
    /// チャンネル絵文字のHTMLで使う画像のベースURL
    pub channel_emoji_base_url: String,
    /// HTTP APIの待ち受けポート
    pub http_port: u16,
}

impl Default for EmojiConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        let in_data_dir = |name: &str| {
            data_dir
                .as_ref()
                .map(|dir| dir.join(name).to_string_lossy().into_owned())
        };

        Self {
            unicode_base: in_data_dir("all-emoji.json"),
            unicode_modifiers: in_data_dir("full-emoji-modifiers.json"),
            platform_json: Some("youtube_emojis.json".to_string()),
            platform_csv: in_data_dir("youtubeemoji.csv"),
            channel_emoji_dir: Some(PathBuf::from("./channel-emojis")),
            channel_emoji_base_url: "./channel-emojis/".to_string(),
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

impl EmojiConfig {
    /// 設定ファイルを読み込む
    ///
    /// ファイルが存在しない場合はデフォルト設定を返す
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// 設定からTier 2〜4のソース構成を組み立てる
    pub fn tier_sources(&self) -> TierSources {
        let mut sources = TierSources::default();

        if let Some(base) = &self.unicode_base {
            sources.basic.push(EmojiSource::Feed(FeedSource::new(
                SourceLocation::parse(base),
                FeedFormat::UnicodeBase,
            )));
        }

        if let Some(modifiers) = &self.unicode_modifiers {
            sources.full.push(EmojiSource::Feed(FeedSource::new(
                SourceLocation::parse(modifiers),
                FeedFormat::UnicodeModifiers,
            )));
        }

        // JSON（ローカルパス版）を優先し、なければCSVにフォールバック
        let mut platform_feeds = Vec::new();
        if let Some(json) = &self.platform_json {
            platform_feeds.push(FeedSource::new(
                SourceLocation::parse(json),
                FeedFormat::PlatformJson,
            ));
        }
        if let Some(csv) = &self.platform_csv {
            platform_feeds.push(FeedSource::new(
                SourceLocation::parse(csv),
                FeedFormat::PlatformCsv,
            ));
        }
        if !platform_feeds.is_empty() {
            sources.platform.push(EmojiSource::FirstOf(platform_feeds));
        }

        if let Some(dir) = &self.channel_emoji_dir {
            sources.platform.push(EmojiSource::ChannelDirectory(ChannelDirectory::new(
                dir.clone(),
                self.channel_emoji_base_url.clone(),
            )));
        }

        sources
    }
}

/// 絵文字データのデフォルト配置先
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_IDENTIFIER))
}

/// 設定ファイルのデフォルトパス
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_IDENTIFIER).join("config.json"))
}
