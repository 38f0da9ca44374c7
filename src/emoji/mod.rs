// =============================================================================
// 絵文字変換モジュール
// =============================================================================
// チャットテキスト内のショートコード（:fire:, :-), <3 など）を絵文字に変換
//
// 機能:
// - 4階層の辞書（人気 / 基本Unicode / モディファイア付き / プラットフォーム）
// - Tier 2〜4は初回利用時に外部ソースから一度だけ読み込む
// - 使用統計に基づく人気Tierへの昇格
// - コードの部分一致検索
// =============================================================================

mod database;
mod dictionary;
pub mod localize;
mod popular;
mod service;
mod source;
mod types;
mod usage;

pub use database::EmojiDatabase;
pub use dictionary::{CodeMap, DictionaryStore};
pub use popular::POPULAR_EMOJIS;
pub use service::EmojiService;
pub use source::{
    parse_platform_csv, parse_platform_json, parse_unicode_list, ChannelDirectory, EmojiSource,
    FeedFormat, FeedSource, SourceError, SourceLocation, TierSources,
};
pub use types::{
    CodeEntry, EmojiStats, OrderedMatches, PerformanceProfile, SearchResults, Tier, TierCount,
    TierState, UsageRanking,
};
pub use usage::UsageTracker;
