//! プラットフォーム絵文字（Tier 4）のパーサー
//!
//! YouTube絵文字とチャンネル専用絵文字は画像なので、グリフの代わりに
//! `<img>` タグをそのまま埋め込む。

use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::SourceError;
use crate::emoji::types::CodeEntry;

/// チャンネル専用絵文字のファイル名 -> コード
const CHANNEL_EMOJI_FILES: &[(&str, &str)] = &[
    ("angry.png", ":angry:"),
    ("shout.png", ":shout:"),
    ("hello.png", ":hello:"),
    ("evil.png", ":evil:"),
    ("love.png", ":love:"),
    ("hungover.png", ":hungover:"),
    ("vomit.png", ":vomit:"),
    // 先頭がキリル文字の "с" のファイルが実在する
    ("сute.png", ":cute:"),
    ("cute.png", ":cute:"),
    ("monster.png", ":monster:"),
    ("HurryUp.png", ":HurryUp:"),
    ("Kaif.png", ":Kaif:"),
    ("Zlost.png", ":Zlost:"),
    ("dislike.png", ":dislike:"),
    ("comeon.png", ":comeon:"),
    ("hugs.png", ":hugs:"),
];

/// `{ "コード": "HTML" }` 形式のJSONをパース
///
/// ファイル内の記述順を保つ。値が文字列でないエントリは読み飛ばす
pub fn parse_platform_json(content: &str) -> Result<Vec<CodeEntry>, SourceError> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Object(map) = value else {
        return Err(SourceError::Parse("platform emoji JSON must be an object".to_string()));
    };

    Ok(map
        .into_iter()
        .filter_map(|(code, html)| match html {
            Value::String(html) => Some(CodeEntry::new(code, html)),
            _ => {
                log::debug!("Skipping platform emoji {} with non-string markup", code);
                None
            }
        })
        .collect())
}

/// `"label","url"` 形式のCSVをパース
///
/// 先頭行はヘッダーとして読み飛ばす。区切り `","` を含まない行は無視する。
pub fn parse_platform_csv(content: &str) -> Vec<CodeEntry> {
    content
        .lines()
        .skip(1)
        .filter(|line| line.contains("\",\""))
        .filter_map(|line| {
            let mut parts = line.trim().split("\",\"");
            let label = parts.next()?.trim_matches('"');
            let url = parts.next()?.trim_matches('"');
            Some(CodeEntry::new(
                label,
                format!(r#"<img src="{}" alt="{}" class="youtube-emoji">"#, url, label),
            ))
        })
        .collect()
}

/// チャンネル専用絵文字のHTMLを生成
pub fn channel_emoji_markup(base_url: &str, file_name: &str, code: &str) -> String {
    format!(
        r#"<img src="{}{}" alt="{}" class="channel-emoji" title="{}">"#,
        base_url, file_name, code, code
    )
}

/// チャンネル専用絵文字の画像フォルダ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDirectory {
    path: PathBuf,
    base_url: String,
}

impl ChannelDirectory {
    pub fn new(path: PathBuf, base_url: String) -> Self {
        Self { path, base_url }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// フォルダ内に実在する画像だけを絵文字として読み込む
    pub async fn load(&self) -> Result<Vec<CodeEntry>, SourceError> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(SourceError::NotFound(self.path.display().to_string()));
        }

        let mut existing = HashSet::new();
        let mut dir = tokio::fs::read_dir(&self.path).await?;
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".png") {
                existing.insert(name);
            }
        }

        let entries = CHANNEL_EMOJI_FILES
            .iter()
            .filter(|(file, _)| existing.contains(*file))
            .map(|(file, code)| {
                CodeEntry::new(*code, channel_emoji_markup(&self.base_url, file, code))
            })
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platform_json() {
        let content = r#"{
            ":yt:": "<img src=\"./youtube-emojis/yt.png\" alt=\":yt:\">",
            ":bad:": 42
        }"#;
        let entries = parse_platform_json(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, ":yt:");
        assert!(entries[0].glyph.contains("youtube-emojis/yt.png"));
    }

    #[test]
    fn test_parse_platform_json_keeps_file_order() {
        let entries = parse_platform_json(r#"{":zz:": "1", ":mm:": "2", ":aa:": "3"}"#).unwrap();
        let codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec![":zz:", ":mm:", ":aa:"]);
    }

    #[test]
    fn test_parse_platform_json_requires_object() {
        assert!(matches!(
            parse_platform_json("[1, 2]"),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_platform_csv() {
        let content = "\"label\",\"url\"\n\
                       \":hand-pink-waving:\",\"https://yt3.ggpht.com/a.png\"\n\
                       broken line\n\
                       \":face-blue-smiling:\",\"https://yt3.ggpht.com/b.png\"\n";
        let entries = parse_platform_csv(content);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, ":hand-pink-waving:");
        let expected = concat!(
            r#"<img src="https://yt3.ggpht.com/a.png" "#,
            r#"alt=":hand-pink-waving:" class="youtube-emoji">"#
        );
        assert_eq!(entries[0].glyph, expected);
    }

    #[test]
    fn test_parse_platform_csv_skips_header_only() {
        assert!(parse_platform_csv("\"label\",\"url\"\n").is_empty());
        assert!(parse_platform_csv("").is_empty());
    }

    #[tokio::test]
    async fn test_channel_directory_loads_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("angry.png"), b"png").unwrap();
        std::fs::write(dir.path().join("hugs.png"), b"png").unwrap();
        std::fs::write(dir.path().join("unknown.png"), b"png").unwrap();

        let channel = ChannelDirectory::new(dir.path().to_path_buf(), "./channel/".to_string());
        let entries = channel.load().await.unwrap();

        let codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec![":angry:", ":hugs:"]);
        assert_eq!(
            entries[0].glyph,
            r#"<img src="./channel/angry.png" alt=":angry:" class="channel-emoji" title=":angry:">"#
        );
    }

    #[tokio::test]
    async fn test_channel_directory_missing() {
        let channel = ChannelDirectory::new(PathBuf::from("/nonexistent/channel"), String::new());
        assert!(matches!(channel.load().await, Err(SourceError::NotFound(_))));
    }
}
