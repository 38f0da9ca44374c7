use serde::{Deserialize, Serialize};

/// 変換APIのリクエスト
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub text: String,
    /// "fast" / "balanced" / "complete" / "full"（省略時はbalanced）
    #[serde(default)]
    pub profile: Option<String>,
}

/// 変換APIのレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub text: String,
}

/// 検索APIのクエリ
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

/// ランキングAPIのクエリ
#[derive(Debug, Clone, Deserialize)]
pub struct TopQuery {
    pub limit: Option<usize>,
}

/// 最適化APIのレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub moved: usize,
}
