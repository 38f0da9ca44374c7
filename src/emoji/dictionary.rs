//! Tier別の絵文字辞書
//!
//! 各Tierは挿入順を保つ `CodeMap` で保持する。
//! 同じコードが複数のTierに同時に存在しないことをこのモジュールで保証する。

use std::collections::HashMap;

use super::popular::POPULAR_EMOJIS;
use super::types::{CodeEntry, Tier, TierState};

/// 挿入順を保つコード -> グリフのマップ
///
/// - 走査順は挿入順
/// - 既存コードへの再挿入はグリフのみ置き換え、位置は変えない
/// - 削除しても残りの相対順は変わらない
#[derive(Debug, Clone, Default)]
pub struct CodeMap {
    entries: Vec<CodeEntry>,
    index: HashMap<String, usize>,
}

impl CodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.index
            .get(code)
            .map(|&i| self.entries[i].glyph.as_str())
    }

    /// コードを追加（既存の場合はグリフを置き換える）
    pub fn insert(&mut self, code: String, glyph: String) {
        if let Some(&i) = self.index.get(&code) {
            self.entries[i].glyph = glyph;
            return;
        }
        self.index.insert(code.clone(), self.entries.len());
        self.entries.push(CodeEntry { code, glyph });
    }

    /// コードを削除してグリフを返す
    pub fn remove(&mut self, code: &str) -> Option<String> {
        let i = self.index.remove(code)?;
        let entry = self.entries.remove(i);
        // 削除位置より後ろのインデックスを詰める
        for pos in self.index.values_mut() {
            if *pos > i {
                *pos -= 1;
            }
        }
        Some(entry.glyph)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CodeEntry> {
        self.entries.iter()
    }
}

impl FromIterator<(String, String)> for CodeMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = CodeMap::new();
        for (code, glyph) in iter {
            map.insert(code, glyph);
        }
        map
    }
}

/// 読み込み状態付きのTier
#[derive(Debug, Clone)]
struct TierSlot {
    map: CodeMap,
    state: TierState,
}

impl TierSlot {
    fn unloaded() -> Self {
        Self {
            map: CodeMap::new(),
            state: TierState::Unloaded,
        }
    }
}

/// 4階層の絵文字辞書
#[derive(Debug, Clone)]
pub struct DictionaryStore {
    tiers: [TierSlot; 4],
}

impl DictionaryStore {
    /// Tier 1を静的テーブルから構築した辞書を作成
    pub fn new() -> Self {
        let popular: CodeMap = POPULAR_EMOJIS
            .iter()
            .map(|(code, glyph)| (code.to_string(), glyph.to_string()))
            .collect();

        Self {
            tiers: [
                TierSlot {
                    map: popular,
                    state: TierState::Loaded,
                },
                TierSlot::unloaded(),
                TierSlot::unloaded(),
                TierSlot::unloaded(),
            ],
        }
    }

    pub fn state(&self, tier: Tier) -> TierState {
        self.tiers[tier.index()].state
    }

    pub(crate) fn set_state(&mut self, tier: Tier, state: TierState) {
        self.tiers[tier.index()].state = state;
    }

    /// Tierのマッピング（読み取り専用）
    pub fn tier(&self, tier: Tier) -> &CodeMap {
        &self.tiers[tier.index()].map
    }

    /// コードが含まれるTier（優先度の高い順に検索）
    pub fn find_tier(&self, code: &str) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|&tier| self.tiers[tier.index()].map.contains(code))
    }

    /// 指定Tierにエントリを追加
    ///
    /// より優先度の高いTierに同じコードがある場合は追加しない。
    /// 追加した場合はtrueを返す。
    pub fn insert_into(&mut self, tier: Tier, code: String, glyph: String) -> bool {
        if tier.higher().any(|higher| self.tiers[higher.index()].map.contains(&code)) {
            log::debug!("Skipping {} for {}: already in a higher tier", code, tier);
            return false;
        }
        self.tiers[tier.index()].map.insert(code, glyph);
        true
    }

    /// コードを下位Tierから人気Tierへ移動
    ///
    /// Tier 1に既にある、またはどこにも存在しない場合はfalse
    pub fn promote(&mut self, code: &str) -> bool {
        let Some(source) = self.find_tier(code) else {
            return false;
        };
        if source == Tier::Popular {
            return false;
        }
        let Some(glyph) = self.tiers[source.index()].map.remove(code) else {
            return false;
        };
        self.tiers[Tier::Popular.index()]
            .map
            .insert(code.to_string(), glyph);
        log::debug!("Promoted {} from {} to tier 1", code, source);
        true
    }
}

impl Default for DictionaryStore {
    fn default() -> Self {
        Self::new()
    }
}
