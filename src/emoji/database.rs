// =============================================================================
// 絵文字データベース
// =============================================================================
// Tier別の辞書・使用統計・外部ソースをまとめ、変換と検索を提供する
//
// 処理の流れ:
// テキスト -> Tier 1..N を順に走査（未読み込みのTierはここで読み込む）
//         -> 一致したコードを全置換し、使用回数を記録 -> 変換後テキスト
// =============================================================================

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::dictionary::DictionaryStore;
use super::source::TierSources;
use super::types::{
    EmojiStats, PerformanceProfile, SearchResults, Tier, TierCount, TierState, UsageRanking,
};
use super::usage::UsageTracker;
use crate::config::{
    PROMOTION_CANDIDATES, PROMOTION_MIN_UNIQUE_CODES, PROMOTION_USAGE_THRESHOLD,
    SLOW_CONVERSION_THRESHOLD_MS,
};

/// 絵文字データベース
///
/// 変更を伴う操作はすべて `&mut self` を取る。
/// 複数タスクから使う場合は `EmojiService` を経由する。
#[derive(Debug)]
pub struct EmojiDatabase {
    store: DictionaryStore,
    usage: UsageTracker,
    sources: TierSources,
    slow_threshold: Duration,
    slow_conversions: u64,
}

impl EmojiDatabase {
    /// Tier 1のみを持つデータベースを作成
    pub fn new(sources: TierSources) -> Self {
        Self {
            store: DictionaryStore::new(),
            usage: UsageTracker::new(),
            sources,
            slow_threshold: Duration::from_millis(SLOW_CONVERSION_THRESHOLD_MS),
            slow_conversions: 0,
        }
    }

    #[cfg(test)]
    fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }

    /// 外部ソースなし（Tier 2〜4は読み込み時に利用不可となる）
    pub fn without_sources() -> Self {
        Self::new(TierSources::default())
    }

    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    pub fn tier_state(&self, tier: Tier) -> TierState {
        self.store.state(tier)
    }

    /// 閾値を超えた変換の回数
    pub fn slow_conversions(&self) -> u64 {
        self.slow_conversions
    }

    /// Tierが読み込まれていることを保証する
    ///
    /// 読み込み済み・利用不可の場合は何もしない。
    /// 読み込み前に、それより優先度の高いTierを先に確定させる
    /// （上位Tierとの重複チェックを完全にするため）。
    pub async fn ensure_loaded(&mut self, tier: Tier) {
        for t in tier.up_to() {
            self.load_tier(t).await;
        }
    }

    async fn load_tier(&mut self, tier: Tier) {
        let state = self.store.state(tier);
        if state.is_settled() {
            return;
        }
        if state == TierState::Loading {
            // 排他アクセス下でLoadingが残っているのは前回の読み込みが中断された場合のみ
            log::debug!("Restarting interrupted load of {}", tier);
        }

        self.store.set_state(tier, TierState::Loading);

        let sources = self.sources.for_tier(tier).to_vec();
        if sources.is_empty() {
            log::warn!("No emoji source configured for {}, leaving it empty", tier);
            self.store.set_state(tier, TierState::Unavailable);
            return;
        }

        let mut any_loaded = false;
        let mut inserted = 0usize;

        for source in &sources {
            match source.load().await {
                Ok(entries) => {
                    any_loaded = true;
                    for entry in entries {
                        if self.store.insert_into(tier, entry.code, entry.glyph) {
                            inserted += 1;
                        }
                    }
                }
                Err(e) => {
                    log::warn!(
                        "Emoji source for {} unavailable ({}): {}",
                        tier,
                        source.describe(),
                        e
                    );
                }
            }
        }

        if any_loaded {
            self.store.set_state(tier, TierState::Loaded);
            log::info!(
                "Loaded {} emojis into {} ({} entries inserted)",
                self.store.tier(tier).len(),
                tier,
                inserted
            );
        } else {
            self.store.set_state(tier, TierState::Unavailable);
            log::warn!("All emoji sources for {} unavailable, leaving it empty", tier);
        }
    }

    /// テキスト内のコードを絵文字に変換
    ///
    /// コードはリテラルな部分文字列として一致する（単語境界は見ない）。
    /// 1回の呼び出しで同じコードが何度出現しても、使用回数は1だけ増える。
    pub async fn convert(&mut self, text: &str, max_tier: Tier) -> String {
        if text.is_empty() {
            return String::new();
        }

        let started = Instant::now();
        let mut result = text.to_string();
        let mut replacements = 0usize;

        for tier in max_tier.up_to() {
            self.ensure_loaded(tier).await;

            for entry in self.store.tier(tier).iter() {
                if result.contains(entry.code.as_str()) {
                    result = result.replace(entry.code.as_str(), &entry.glyph);
                    replacements += 1;
                    self.usage.record(&entry.code);
                }
            }
        }

        let elapsed = started.elapsed();
        if elapsed > self.slow_threshold {
            self.slow_conversions += 1;
            log::warn!(
                "Slow emoji conversion: {:.3}ms, replacements: {}, max {}",
                elapsed.as_secs_f64() * 1000.0,
                replacements,
                max_tier
            );
        }

        result
    }

    /// 性能プロファイルを指定して変換
    pub async fn convert_with_profile(
        &mut self,
        text: &str,
        profile: PerformanceProfile,
    ) -> String {
        self.convert(text, profile.max_tier()).await
    }

    /// コードを部分一致（大文字小文字を区別しない）で検索
    ///
    /// Tier 1 -> Tier 2 の順に検索し、Tier 2はTier 1で件数が足りない場合のみ読み込む。
    /// Tier 3/4 は読み込み済みの場合のみ検索する。
    pub async fn search(&mut self, query: &str, limit: usize) -> SearchResults {
        let query = query.to_lowercase();
        let mut results: Vec<(String, String)> = Vec::new();

        if limit == 0 {
            return SearchResults::from_pairs(results);
        }

        for tier in Tier::ALL {
            if results.len() >= limit {
                break;
            }
            match tier {
                Tier::Popular => {}
                Tier::Basic => self.ensure_loaded(tier).await,
                Tier::Full | Tier::Platform => {
                    if self.store.state(tier) != TierState::Loaded {
                        continue;
                    }
                }
            }

            for entry in self.store.tier(tier).iter() {
                if results.len() >= limit {
                    break;
                }
                if entry.code.to_lowercase().contains(&query) {
                    results.push((entry.code.clone(), entry.glyph.clone()));
                }
            }
        }

        SearchResults::from_pairs(results)
    }

    /// 使用統計に基づいて、よく使われるコードを人気Tierへ昇格
    ///
    /// 使用記録のあるコードが100種類未満なら何もしない。
    /// 昇格したコード数を返す。
    pub fn optimize(&mut self) -> usize {
        if self.usage.unique() < PROMOTION_MIN_UNIQUE_CODES {
            log::debug!(
                "Not enough usage data to optimize ({} < {})",
                self.usage.unique(),
                PROMOTION_MIN_UNIQUE_CODES
            );
            return 0;
        }

        let candidates = self.usage.top(PROMOTION_CANDIDATES);
        let mut moved = 0;
        for (code, count) in &candidates.0 {
            if *count > PROMOTION_USAGE_THRESHOLD && self.store.promote(code) {
                moved += 1;
            }
        }

        log::info!("Optimization: promoted {} emojis to tier 1", moved);
        moved
    }

    /// 使用回数の多いコード
    pub fn top_used(&self, limit: usize) -> UsageRanking {
        self.usage.top(limit)
    }

    /// 統計情報
    pub fn stats(&self) -> EmojiStats {
        let count = |tier: Tier| match self.store.state(tier) {
            TierState::Loaded => TierCount::Count(self.store.tier(tier).len()),
            _ => TierCount::NotLoaded,
        };

        let levels_loaded: BTreeMap<u8, bool> = Tier::ALL
            .into_iter()
            .map(|tier| (tier.level(), self.store.state(tier) == TierState::Loaded))
            .collect();

        EmojiStats {
            popular_count: self.store.tier(Tier::Popular).len(),
            basic_count: count(Tier::Basic),
            full_count: count(Tier::Full),
            platform_count: count(Tier::Platform),
            total_usage: self.usage.total(),
            unique_used: self.usage.unique(),
            levels_loaded,
        }
    }
}

impl Default for EmojiDatabase {
    fn default() -> Self {
        Self::without_sources()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emoji::popular::POPULAR_EMOJIS;
    use crate::emoji::source::{EmojiSource, FeedFormat, FeedSource, SourceLocation};
    use crate::emoji::types::CodeEntry;
    use std::path::PathBuf;

    fn inline(entries: &[(&str, &str)]) -> EmojiSource {
        EmojiSource::Inline(
            entries
                .iter()
                .map(|(code, glyph)| CodeEntry::new(*code, *glyph))
                .collect(),
        )
    }

    fn missing_file() -> EmojiSource {
        EmojiSource::Feed(FeedSource::new(
            SourceLocation::File(PathBuf::from("/nonexistent/all-emoji.json")),
            FeedFormat::UnicodeBase,
        ))
    }

    #[tokio::test]
    async fn test_convert_example_sentence() {
        let mut db = EmojiDatabase::without_sources();
        let result = db
            .convert_with_profile("I love :fire: :heart: so much :fire:", PerformanceProfile::Fast)
            .await;

        assert_eq!(result, "I love 🔥 ❤️ so much 🔥");
        // 1回の呼び出しにつき1回
        assert_eq!(db.usage().count(":fire:"), 1);
        assert_eq!(db.usage().count(":heart:"), 1);
    }

    #[tokio::test]
    async fn test_every_popular_code_converts_to_its_glyph() {
        let mut db = EmojiDatabase::without_sources();
        for (code, glyph) in POPULAR_EMOJIS {
            let result = db.convert(code, Tier::Popular).await;
            assert_eq!(&result, glyph, "code {} converted incorrectly", code);
            assert!(!result.contains(code));
        }
    }

    #[tokio::test]
    async fn test_convert_is_idempotent_for_popular_tier() {
        let mut db = EmojiDatabase::without_sources();
        let once = db.convert("gg :clap: :100: <3 :D", Tier::Popular).await;
        let twice = db.convert(&once, Tier::Popular).await;
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_convert_empty_text() {
        let mut db = EmojiDatabase::without_sources();
        for tier in Tier::ALL {
            assert_eq!(db.convert("", tier).await, "");
        }
        // 空文字列ではTierの読み込みも使用記録も行わない
        assert_eq!(db.tier_state(Tier::Basic), TierState::Unloaded);
        assert_eq!(db.usage().total(), 0);
    }

    #[tokio::test]
    async fn test_usage_counted_once_per_call() {
        let mut db = EmojiDatabase::without_sources();
        db.convert(":fire: :fire: :fire:", Tier::Popular).await;
        db.convert(":fire:", Tier::Popular).await;
        db.convert("no codes here", Tier::Popular).await;
        assert_eq!(db.usage().count(":fire:"), 2);
    }

    #[tokio::test]
    async fn test_literal_matching_inside_longer_code() {
        // 単語境界を見ないため、短いコードが長い未知のコードの内部に一致する
        let mut db = EmojiDatabase::without_sources();
        let result = db.convert(":octopus:", Tier::Popular).await;
        assert_eq!(result, "😮ctopus:");
    }

    #[tokio::test]
    async fn test_convert_uses_lower_tiers_with_profile() {
        let sources = TierSources {
            basic: vec![inline(&[(":squid:", "🦑")])],
            full: vec![inline(&[(":waving_hand_tone1:", "👋🏻")])],
            platform: vec![inline(&[(":yt_wave:", "<img>")])],
        };
        let mut db = EmojiDatabase::new(sources);

        let text = "hi :waving_hand_tone1: :yt_wave:";
        assert_eq!(db.convert(text, Tier::Basic).await, text);
        assert_eq!(db.tier_state(Tier::Full), TierState::Unloaded);

        let all = db.convert_with_profile(text, PerformanceProfile::Full).await;
        assert_eq!(all, "hi 👋🏻 <img>");
        assert_eq!(db.tier_state(Tier::Platform), TierState::Loaded);
    }

    #[tokio::test]
    async fn test_missing_source_leaves_tier_unavailable() {
        let sources = TierSources {
            basic: vec![missing_file()],
            ..TierSources::default()
        };
        let mut db = EmojiDatabase::new(sources);

        let result = db.convert(":fire: :squid:", Tier::Basic).await;
        assert_eq!(result, "🔥 :squid:");
        assert_eq!(db.tier_state(Tier::Basic), TierState::Unavailable);

        // 再試行しない
        db.ensure_loaded(Tier::Basic).await;
        assert_eq!(db.tier_state(Tier::Basic), TierState::Unavailable);
        assert_eq!(db.stats().basic_count, TierCount::NotLoaded);
    }

    #[tokio::test]
    async fn test_partial_sources_still_load_tier() {
        let sources = TierSources {
            platform: vec![missing_file(), inline(&[(":yt:", "<img>")])],
            ..TierSources::default()
        };
        let mut db = EmojiDatabase::new(sources);
        db.ensure_loaded(Tier::Platform).await;

        assert_eq!(db.tier_state(Tier::Platform), TierState::Loaded);
        assert_eq!(db.stats().platform_count, TierCount::Count(1));
    }

    #[tokio::test]
    async fn test_loading_skips_codes_in_higher_tiers() {
        let sources = TierSources {
            basic: vec![inline(&[(":fire:", "X"), (":squid:", "🦑")])],
            full: vec![inline(&[(":squid:", "Y"), (":crab:", "🦀")])],
            platform: vec![],
        };
        let mut db = EmojiDatabase::new(sources);

        // Tier 3の読み込みでTier 2も先に読み込まれる
        db.ensure_loaded(Tier::Full).await;
        assert_eq!(db.tier_state(Tier::Basic), TierState::Loaded);

        let store = db.store();
        assert_eq!(store.tier(Tier::Popular).get(":fire:"), Some("🔥"));
        assert!(!store.tier(Tier::Basic).contains(":fire:"));
        assert_eq!(store.tier(Tier::Basic).get(":squid:"), Some("🦑"));
        assert!(!store.tier(Tier::Full).contains(":squid:"));
        assert_eq!(store.tier(Tier::Full).get(":crab:"), Some("🦀"));
    }

    #[tokio::test]
    async fn test_interrupted_load_is_restarted() {
        let sources = TierSources {
            basic: vec![inline(&[(":squid:", "🦑")])],
            ..TierSources::default()
        };
        let mut db = EmojiDatabase::new(sources);
        db.store.set_state(Tier::Basic, TierState::Loading);

        db.ensure_loaded(Tier::Basic).await;
        assert_eq!(db.tier_state(Tier::Basic), TierState::Loaded);
    }

    #[tokio::test]
    async fn test_slow_conversion_is_counted() {
        let mut db = EmojiDatabase::without_sources().with_slow_threshold(Duration::ZERO);
        let result = db.convert("gg :fire:", Tier::Popular).await;

        // 警告を出しても変換結果は変わらない
        assert_eq!(result, "gg 🔥");
        assert_eq!(db.slow_conversions(), 1);

        // 空文字列は計測しない
        db.convert("", Tier::Popular).await;
        assert_eq!(db.slow_conversions(), 1);
    }

    #[tokio::test]
    async fn test_platform_feed_order_decides_overlaps() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("youtube_emojis.json");
        std::fs::write(&json_path, r#"{":hand-wave-long:": "<A>", ":hand-wave": "<B>"}"#).unwrap();

        let sources = TierSources {
            platform: vec![EmojiSource::Feed(FeedSource::new(
                SourceLocation::File(json_path),
                FeedFormat::PlatformJson,
            ))],
            ..TierSources::default()
        };
        let mut db = EmojiDatabase::new(sources);

        // 先に記述された長いコードが先に置換される
        assert_eq!(db.convert(":hand-wave-long:", Tier::Platform).await, "<A>");
        assert_eq!(db.convert(":hand-wave:", Tier::Platform).await, "<B>:");
    }

    #[tokio::test]
    async fn test_search_heart() {
        let mut db = EmojiDatabase::without_sources();
        let results = db.search("heart", 5).await;

        assert!(results.len() <= 5);
        assert_eq!(results.get(":red_heart:").map(String::as_str), Some("❤️"));
        // Tier 1で件数が埋まったのでTier 2は読み込まない
        assert_eq!(db.tier_state(Tier::Basic), TierState::Unloaded);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let mut db = EmojiDatabase::without_sources();
        let results = db.search("HURRY", 10).await;
        assert!(results.is_empty());

        let results = db.search("W", 50).await;
        assert!(results.get(":W:").is_some());
        assert!(results.get(":waving_hand:").is_some());
    }

    #[tokio::test]
    async fn test_search_loads_basic_tier_when_needed() {
        let sources = TierSources {
            basic: vec![inline(&[(":squid:", "🦑"), (":fire_engine:", "🚒")])],
            full: vec![inline(&[(":fire_tone1:", "?")])],
            platform: vec![],
        };
        let mut db = EmojiDatabase::new(sources);
        let results = db.search("fire", 10).await;

        let codes: Vec<&str> = results.codes().collect();
        assert_eq!(codes, vec![":fire:", ":fire_engine:"]);
        assert_eq!(db.tier_state(Tier::Basic), TierState::Loaded);
        // Tier 3は検索のために読み込まない
        assert_eq!(db.tier_state(Tier::Full), TierState::Unloaded);
    }

    #[tokio::test]
    async fn test_search_zero_limit() {
        let mut db = EmojiDatabase::without_sources();
        assert!(db.search("heart", 0).await.is_empty());
    }

    #[tokio::test]
    async fn test_optimize_noop_with_little_data() {
        let sources = TierSources {
            basic: vec![inline(&[(":squid:", "🦑")])],
            ..TierSources::default()
        };
        let mut db = EmojiDatabase::new(sources);
        for _ in 0..20 {
            db.convert(":squid:", Tier::Basic).await;
        }

        assert_eq!(db.optimize(), 0);
        assert_eq!(db.store().find_tier(":squid:"), Some(Tier::Basic));
    }

    #[tokio::test]
    async fn test_optimize_promotes_frequent_codes() {
        // 100種類以上のコードを用意する
        let codes: Vec<String> = (0..120).map(|i| format!(":code_{:03}:", i)).collect();
        let entries: Vec<CodeEntry> = codes
            .iter()
            .map(|code| CodeEntry::new(code.clone(), "★"))
            .collect();
        let sources = TierSources {
            basic: vec![EmojiSource::Inline(entries)],
            ..TierSources::default()
        };
        let mut db = EmojiDatabase::new(sources);

        for code in &codes {
            db.convert(code, Tier::Basic).await;
        }
        // :code_000: と :code_001: を閾値超えまで使う
        for _ in 0..11 {
            db.convert(":code_000: :code_001:", Tier::Basic).await;
        }

        assert_eq!(db.usage().count(":code_000:"), 12);
        assert_eq!(db.optimize(), 2);

        let store = db.store();
        assert_eq!(store.find_tier(":code_000:"), Some(Tier::Popular));
        assert_eq!(store.find_tier(":code_001:"), Some(Tier::Popular));
        assert_eq!(store.find_tier(":code_002:"), Some(Tier::Basic));
        assert_eq!(store.tier(Tier::Basic).len(), 118);

        // 統計が変わらなければ2回目は何もしない
        assert_eq!(db.optimize(), 0);

        // 昇格後はfastプロファイルでも変換される
        assert_eq!(db.convert(":code_000:", Tier::Popular).await, "★");
    }

    #[tokio::test]
    async fn test_stats_reflect_tier_states() {
        let sources = TierSources {
            basic: vec![inline(&[(":squid:", "🦑")])],
            ..TierSources::default()
        };
        let mut db = EmojiDatabase::new(sources);

        let stats = db.stats();
        assert_eq!(stats.popular_count, POPULAR_EMOJIS.len());
        assert_eq!(stats.basic_count, TierCount::NotLoaded);
        assert_eq!(stats.levels_loaded.get(&1), Some(&true));
        assert_eq!(stats.levels_loaded.get(&2), Some(&false));

        db.convert(":squid: :fire:", Tier::Basic).await;
        let stats = db.stats();
        assert_eq!(stats.basic_count, TierCount::Count(1));
        assert_eq!(stats.total_usage, 2);
        assert_eq!(stats.unique_used, 2);
        assert_eq!(stats.levels_loaded.get(&2), Some(&true));

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["fullCount"], "not loaded");
        assert_eq!(json["basicCount"], 1);
    }
}
