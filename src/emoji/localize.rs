//! プラットフォーム絵文字の画像をローカルに保存するユーティリティ
//!
//! `youtube_emojis.json` の `<img src="...">` が指す画像をダウンロードし、
//! HTMLをローカルパスに書き換えてJSONを保存し直す。
//! オーバーレイをオフラインでも表示できるようにするためのもの。

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

use crate::config;
use crate::util::code_to_file_stem;

/// `src="..."` 属性
static SRC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"src="([^"]+)""#).expect("Failed to compile src attribute regex"));

/// ローカライズエラー
#[derive(Debug, Error)]
pub enum LocalizeError {
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid emoji JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<LocalizeError> for String {
    fn from(err: LocalizeError) -> String {
        err.to_string()
    }
}

/// HTMLから画像URLを取り出す
pub fn extract_src(html: &str) -> Option<&str> {
    SRC_REGEX
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 画像URLから保存用のファイル名を決める
///
/// URLのパス末尾（クエリ除去）を使い、取れなければコードから生成する
pub fn file_name_for(url: &str, code: &str) -> String {
    let without_query = url.split('?').next().unwrap_or(url);
    let base = without_query.rsplit('/').next().unwrap_or("");
    if base.is_empty() {
        format!("{}.png", code_to_file_stem(code))
    } else {
        base.to_string()
    }
}

/// マークアップに書き込む保存先パス
///
/// 相対パスには `./` を付け、絶対パスはそのまま使う
pub fn local_src_for(output_dir: &str, file_name: &str) -> String {
    let dir = output_dir.trim_end_matches('/');
    if Path::new(dir).is_absolute() || dir.starts_with("./") || dir.starts_with("../") {
        format!("{}/{}", dir, file_name)
    } else {
        format!("./{}/{}", dir, file_name)
    }
}

/// プラットフォーム絵文字JSONの画像をダウンロードし、ローカルパスに書き換える
///
/// 既に保存済みのファイルはダウンロードしない。キーの順序はそのまま保つ。
/// 書き換えた件数を返す。
pub async fn localize_platform_emojis(
    json_path: &Path,
    output_dir: &str,
) -> Result<usize, LocalizeError> {
    let content = tokio::fs::read_to_string(json_path).await?;
    let mut emojis: Map<String, Value> = serde_json::from_str(&content)?;

    tokio::fs::create_dir_all(output_dir).await?;

    let client = Client::builder().timeout(config::http_timeout()).build()?;
    let mut updated = 0;

    for (code, value) in emojis.iter_mut() {
        let Value::String(html) = value else {
            continue;
        };
        let Some(url) = extract_src(html).map(str::to_string) else {
            continue;
        };
        // 既にローカルパスのものは対象外
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            continue;
        }

        let file_name = file_name_for(&url, code);
        let local_path = Path::new(output_dir).join(&file_name);
        download_file(&client, &url, &local_path).await?;

        let local_src = local_src_for(output_dir, &file_name);
        let rewritten = html.replace(&url, &local_src);
        if rewritten != *html {
            *html = rewritten;
            updated += 1;
        }
    }

    let json = serde_json::to_string_pretty(&emojis)?;
    tokio::fs::write(json_path, json).await?;

    log::info!("Localized {} platform emojis into {}", updated, output_dir);
    Ok(updated)
}

async fn download_file(client: &Client, url: &str, target: &Path) -> Result<(), LocalizeError> {
    if tokio::fs::try_exists(target).await.unwrap_or(false) {
        return Ok(());
    }

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LocalizeError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let bytes = response.bytes().await?;
    tokio::fs::write(target, &bytes).await?;
    log::debug!("Downloaded {} -> {:?}", url, target);
    Ok(())
}
