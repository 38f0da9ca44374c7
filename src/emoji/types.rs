use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 辞書の階層
///
/// 番号が小さいほど優先度が高く、読み込みコストが低い
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    /// Tier 1: 人気の絵文字（起動時に静的テーブルから構築）
    Popular,
    /// Tier 2: 基本Unicode絵文字（肌色モディファイアなし）
    Basic,
    /// Tier 3: モディファイア付きUnicode絵文字
    Full,
    /// Tier 4: プラットフォーム絵文字（YouTube・チャンネル専用）
    Platform,
}

impl Tier {
    /// 全Tier（優先度順）
    pub const ALL: [Tier; 4] = [Tier::Popular, Tier::Basic, Tier::Full, Tier::Platform];

    /// Tier番号（1〜4）
    pub fn level(self) -> u8 {
        match self {
            Tier::Popular => 1,
            Tier::Basic => 2,
            Tier::Full => 3,
            Tier::Platform => 4,
        }
    }

    /// 配列インデックス（0〜3）
    pub(crate) fn index(self) -> usize {
        self.level() as usize - 1
    }

    /// このTierより優先度の高いTier
    pub fn higher(self) -> impl Iterator<Item = Tier> {
        Tier::ALL.into_iter().filter(move |t| *t < self)
    }

    /// Tier 1からこのTierまで（このTierを含む）
    pub fn up_to(self) -> impl Iterator<Item = Tier> {
        Tier::ALL.into_iter().filter(move |t| *t <= self)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.level())
    }
}

/// 変換時の性能プロファイル
///
/// どのTierまで検索するかを決める
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceProfile {
    /// Tier 1のみ
    Fast,
    /// Tier 2まで
    #[default]
    Balanced,
    /// Tier 3まで
    Complete,
    /// Tier 4まで
    Full,
}

impl PerformanceProfile {
    /// このプロファイルで検索する最大Tier
    pub fn max_tier(self) -> Tier {
        match self {
            PerformanceProfile::Fast => Tier::Popular,
            PerformanceProfile::Balanced => Tier::Basic,
            PerformanceProfile::Complete => Tier::Full,
            PerformanceProfile::Full => Tier::Platform,
        }
    }

    /// 文字列からプロファイルを取得
    ///
    /// 不明な文字列はBalancedとして扱う
    pub fn from_name(name: &str) -> Self {
        match name {
            "fast" => PerformanceProfile::Fast,
            "balanced" => PerformanceProfile::Balanced,
            "complete" => PerformanceProfile::Complete,
            "full" => PerformanceProfile::Full,
            other => {
                log::debug!("Unknown performance profile '{}', using balanced", other);
                PerformanceProfile::Balanced
            }
        }
    }
}

/// Tierの読み込み状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TierState {
    /// 未読み込み
    Unloaded,
    /// 読み込み中（中断された場合もこの状態が残る）
    Loading,
    /// 読み込み済み
    Loaded,
    /// ソースが利用できない（このプロセスでは再試行しない）
    Unavailable,
}

impl TierState {
    /// これ以上読み込みを試みない状態かどうか
    pub fn is_settled(self) -> bool {
        matches!(self, TierState::Loaded | TierState::Unavailable)
    }
}

/// コードとグリフの組
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeEntry {
    pub code: String,
    pub glyph: String,
}

impl CodeEntry {
    pub fn new(code: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            glyph: glyph.into(),
        }
    }
}

/// 統計情報でのTierの件数
///
/// 読み込まれていないTierは `"not loaded"` としてシリアライズされる
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierCount {
    Count(usize),
    NotLoaded,
}

impl Serialize for TierCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TierCount::Count(n) => serializer.serialize_u64(*n as u64),
            TierCount::NotLoaded => serializer.serialize_str("not loaded"),
        }
    }
}

/// 絵文字データベースの統計情報
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiStats {
    pub popular_count: usize,
    pub basic_count: TierCount,
    pub full_count: TierCount,
    pub platform_count: TierCount,
    /// 全コードの使用回数の合計
    pub total_usage: u64,
    /// 使用記録のあるコードの種類数
    pub unique_used: usize,
    /// Tier番号 -> 読み込み済みかどうか
    pub levels_loaded: BTreeMap<u8, bool>,
}

/// 順序付きのマッチ結果（コード -> 値）
///
/// JSONでは挿入順を保ったオブジェクトとしてシリアライズされる
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderedMatches<V>(pub Vec<(String, V)>);

impl<V> OrderedMatches<V> {
    pub fn from_pairs(pairs: Vec<(String, V)>) -> Self {
        Self(pairs)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&V> {
        self.0.iter().find(|(c, _)| c == code).map(|(_, v)| v)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(c, _)| c.as_str())
    }
}

impl<V: Serialize> Serialize for OrderedMatches<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, value) in &self.0 {
            map.serialize_entry(code, value)?;
        }
        map.end()
    }
}

/// 検索結果（コード -> グリフ）
pub type SearchResults = OrderedMatches<String>;

/// 使用回数ランキング（コード -> 回数）
pub type UsageRanking = OrderedMatches<u64>;
