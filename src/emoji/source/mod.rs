// =============================================================================
// 外部絵文字ソース
// =============================================================================
// Tier 2〜4の絵文字データを外部ファイル・URL・画像フォルダから読み込む
//
// 対応フォーマット:
// - Unicode絵文字リスト（JSON配列、Tier 2/3）
// - プラットフォーム絵文字（コード -> HTMLのJSON、またはCSV、Tier 4）
// - チャンネル専用絵文字の画像フォルダ（Tier 4）
// =============================================================================

mod platform;
mod unicode;

pub use platform::{parse_platform_csv, parse_platform_json, ChannelDirectory};
pub use unicode::parse_unicode_list;

use reqwest::Client;
use std::path::PathBuf;
use thiserror::Error;

use super::types::{CodeEntry, Tier};
use crate::config;

/// ソース読み込みエラー
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source not found: {0}")]
    NotFound(String),

    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error: {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse source: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

/// ソースの場所（ローカルファイルまたはURL）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
}

impl SourceLocation {
    /// `http://` / `https://` で始まればURL、それ以外はファイルパス
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            SourceLocation::Url(value.to_string())
        } else {
            SourceLocation::File(PathBuf::from(value))
        }
    }

    /// ソースの内容を文字列として読み込む
    pub async fn read_to_string(&self) -> Result<String, SourceError> {
        match self {
            SourceLocation::File(path) => {
                if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                    return Err(SourceError::NotFound(path.display().to_string()));
                }
                Ok(tokio::fs::read_to_string(path).await?)
            }
            SourceLocation::Url(url) => {
                let client = Client::builder().timeout(config::http_timeout()).build()?;
                let response = client.get(url).send().await.map_err(|e| {
                    if e.is_timeout() {
                        log::warn!(
                            "Emoji feed request timed out after {}s: {}",
                            config::HTTP_TIMEOUT_SECS,
                            url
                        );
                    }
                    SourceError::Http(e)
                })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Status {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                Ok(response.text().await?)
            }
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Url(url) => write!(f, "{}", url),
        }
    }
}

/// フィードのデータ形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    /// Unicode絵文字リスト（肌色モディファイア付きは除外）
    UnicodeBase,
    /// モディファイア付きUnicode絵文字リスト
    UnicodeModifiers,
    /// `{ code: html }` 形式のJSON
    PlatformJson,
    /// `"label","url"` 形式のCSV（先頭行はヘッダー）
    PlatformCsv,
}

/// 場所と形式の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub location: SourceLocation,
    pub format: FeedFormat,
}

impl FeedSource {
    pub fn new(location: SourceLocation, format: FeedFormat) -> Self {
        Self { location, format }
    }

    pub async fn load(&self) -> Result<Vec<CodeEntry>, SourceError> {
        let content = self.location.read_to_string().await?;
        match self.format {
            FeedFormat::UnicodeBase => parse_unicode_list(&content, false),
            FeedFormat::UnicodeModifiers => parse_unicode_list(&content, true),
            FeedFormat::PlatformJson => parse_platform_json(&content),
            FeedFormat::PlatformCsv => Ok(parse_platform_csv(&content)),
        }
    }
}

/// Tierに登録する絵文字ソース
#[derive(Debug, Clone)]
pub enum EmojiSource {
    /// 単一のフィード
    Feed(FeedSource),
    /// 先頭から順に試し、最初に読み込めたものだけを使う
    FirstOf(Vec<FeedSource>),
    /// チャンネル専用絵文字の画像フォルダ
    ChannelDirectory(ChannelDirectory),
    /// メモリ上のエントリ
    Inline(Vec<CodeEntry>),
}

impl EmojiSource {
    /// ソースを読み込む
    pub async fn load(&self) -> Result<Vec<CodeEntry>, SourceError> {
        match self {
            EmojiSource::Feed(feed) => feed.load().await,
            EmojiSource::FirstOf(feeds) => {
                let mut last_error = SourceError::NotFound("no feeds configured".to_string());
                for feed in feeds {
                    match feed.load().await {
                        Ok(entries) => return Ok(entries),
                        Err(e) => {
                            log::debug!("Feed {} unavailable, trying next: {}", feed.location, e);
                            last_error = e;
                        }
                    }
                }
                Err(last_error)
            }
            EmojiSource::ChannelDirectory(dir) => dir.load().await,
            EmojiSource::Inline(entries) => Ok(entries.clone()),
        }
    }

    /// ログ用の説明
    pub fn describe(&self) -> String {
        match self {
            EmojiSource::Feed(feed) => feed.location.to_string(),
            EmojiSource::FirstOf(feeds) => feeds
                .iter()
                .map(|f| f.location.to_string())
                .collect::<Vec<_>>()
                .join(" | "),
            EmojiSource::ChannelDirectory(dir) => dir.path().display().to_string(),
            EmojiSource::Inline(entries) => format!("inline ({} entries)", entries.len()),
        }
    }
}

/// Tier 2〜4のソース構成
#[derive(Debug, Clone, Default)]
pub struct TierSources {
    pub basic: Vec<EmojiSource>,
    pub full: Vec<EmojiSource>,
    pub platform: Vec<EmojiSource>,
}

impl TierSources {
    /// 指定Tierのソース（Tier 1は常に空）
    pub fn for_tier(&self, tier: Tier) -> &[EmojiSource] {
        match tier {
            Tier::Popular => &[],
            Tier::Basic => &self.basic,
            Tier::Full => &self.full,
            Tier::Platform => &self.platform,
        }
    }
}
