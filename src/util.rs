/// 絵文字の説明文からショートコードを生成
///
/// 小文字化し、スペースとハイフンをアンダースコアに置き換えてコロンで囲む
///
/// # Examples
/// ```
/// use chat_emoji_lib::util::description_to_code;
///
/// assert_eq!(description_to_code("Grinning Face"), ":grinning_face:");
/// assert_eq!(description_to_code("T-Rex"), ":t_rex:");
/// ```
pub fn description_to_code(description: &str) -> String {
    let normalized: String = description
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();
    format!(":{}:", normalized)
}

/// ショートコードからファイル名に使える文字列を生成
///
/// 前後のコロンを除去し、パス区切り文字をアンダースコアに置き換える
pub fn code_to_file_stem(code: &str) -> String {
    code.trim_matches(':').replace(['/', '\\'], "_")
}
