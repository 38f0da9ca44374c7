use std::collections::HashMap;

use super::types::UsageRanking;

/// コードごとの使用回数カウンター
///
/// エントリは初回使用時に作成され、削除されることはない。
/// ランキングの同数順位は最初に記録された順で決まる。
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    /// (コード, 回数) を初回記録順に保持
    counts: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用回数を1増やす
    pub fn record(&mut self, code: &str) {
        match self.index.get(code) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(code.to_string(), self.counts.len());
                self.counts.push((code.to_string(), 1));
            }
        }
    }

    /// コードの使用回数（記録がなければ0）
    pub fn count(&self, code: &str) -> u64 {
        self.index.get(code).map(|&i| self.counts[i].1).unwrap_or(0)
    }

    /// 全コードの使用回数の合計
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// 使用記録のあるコードの種類数
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// 使用回数の多い順に最大 `limit` 件
    pub fn top(&self, limit: usize) -> UsageRanking {
        let mut ranked: Vec<(String, u64)> = self.counts.clone();
        // 安定ソートなので同数は初回記録順のまま
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        UsageRanking::from_pairs(ranked)
    }
}
