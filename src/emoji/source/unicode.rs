//! Unicode絵文字リストのパーサー
//!
//! 入力はJSON配列で、各要素は以下のどちらか:
//! - `["カテゴリ名"]`: カテゴリ見出し（無視する）
//! - `["番号", "U+XXXX", "グリフ", "説明"]`: 絵文字
//!
//! それ以外の形の要素は読み飛ばす。

use serde_json::Value;

use super::SourceError;
use crate::emoji::types::CodeEntry;
use crate::util::description_to_code;

/// 肌色モディファイア（U+1F3FB〜U+1F3FF）を示すコードポイントの接頭辞
const SKIN_TONE_MARKER: &str = "U+1F3F";

/// Unicode絵文字リストをパース
///
/// `include_modifiers` がfalseの場合、肌色モディファイア付きの絵文字を除外する
pub fn parse_unicode_list(
    content: &str,
    include_modifiers: bool,
) -> Result<Vec<CodeEntry>, SourceError> {
    let items: Vec<Value> = serde_json::from_str(content)?;
    let mut entries = Vec::new();
    let mut category = String::new();

    for item in &items {
        let Some(fields) = item.as_array() else {
            log::debug!("Skipping non-array emoji record");
            continue;
        };

        match fields.as_slice() {
            [Value::String(name)] => {
                category = name.clone();
            }
            [
                Value::String(number),
                Value::String(unicode_id),
                Value::String(glyph),
                Value::String(description),
            ] if is_record_number(number) => {
                if !include_modifiers && unicode_id.contains(SKIN_TONE_MARKER) {
                    continue;
                }
                entries.push(CodeEntry::new(description_to_code(description), glyph.clone()));
            }
            _ => {
                log::debug!("Skipping malformed emoji record in category '{}'", category);
            }
        }
    }

    Ok(entries)
}

/// レコード番号は1文字以上のASCII数字のみ
fn is_record_number(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
