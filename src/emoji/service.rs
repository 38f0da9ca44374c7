use std::sync::Arc;
use tokio::sync::RwLock;

use super::database::EmojiDatabase;
use super::source::TierSources;
use super::types::{EmojiStats, PerformanceProfile, SearchResults, UsageRanking};

/// 複数タスクから共有する絵文字データベースのハンドル
///
/// 変換・検索・最適化は使用統計や辞書を更新するため書き込みロックを取る。
/// Tierの読み込みも書き込みロック下で行うので、書き込み側は常に1つだけ。
#[derive(Debug, Clone)]
pub struct EmojiService {
    db: Arc<RwLock<EmojiDatabase>>,
}

impl EmojiService {
    pub fn new(sources: TierSources) -> Self {
        Self::from_database(EmojiDatabase::new(sources))
    }

    pub fn from_database(db: EmojiDatabase) -> Self {
        Self {
            db: Arc::new(RwLock::new(db)),
        }
    }

    /// テキストを変換
    pub async fn convert(&self, text: &str, profile: PerformanceProfile) -> String {
        // 空文字列はロックを取らずに返す
        if text.is_empty() {
            return String::new();
        }
        let mut db = self.db.write().await;
        db.convert_with_profile(text, profile).await
    }

    /// 統計情報を取得
    pub async fn stats(&self) -> EmojiStats {
        self.db.read().await.stats()
    }

    /// コードを検索
    pub async fn search(&self, query: &str, limit: usize) -> SearchResults {
        let mut db = self.db.write().await;
        db.search(query, limit).await
    }

    /// 使用統計に基づく昇格を実行
    pub async fn optimize(&self) -> usize {
        self.db.write().await.optimize()
    }

    /// 使用回数ランキングを取得
    pub async fn top_used(&self, limit: usize) -> UsageRanking {
        self.db.read().await.top_used(limit)
    }
}

impl Default for EmojiService {
    fn default() -> Self {
        Self::from_database(EmojiDatabase::without_sources())
    }
}
