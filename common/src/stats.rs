//! カテゴリ別の集計
//!
//! 全ページのテキストをまとめて分類し、件数と割合を出す。

use crate::category::{Category, PRIORITY};
use crate::classifier::classify;
use crate::types::OcrResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// カテゴリ1件分の統計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category: Category,
    pub count: usize,
    /// 全テキストに対する割合（%、小数第1位で丸め）
    pub percentage: f64,
    pub is_priority: bool,
}

/// 統計を計算する
///
/// 重要カテゴリを固定順で先に並べ、残りはカテゴリの宣言順。
/// 件数0のカテゴリは含めない。
pub fn compute_statistics(result: &OcrResult) -> Vec<CategoryStat> {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    let mut total = 0usize;

    for text in result.fragments() {
        *counts.entry(classify(text)).or_insert(0) += 1;
        total += 1;
    }

    if total == 0 {
        return Vec::new();
    }

    let remaining = Category::ALL.iter().filter(|c| !c.is_priority());

    PRIORITY
        .iter()
        .chain(remaining)
        .filter_map(|category| {
            counts.get(category).map(|&count| CategoryStat {
                category: *category,
                count,
                percentage: round_percentage(count, total),
                is_priority: category.is_priority(),
            })
        })
        .collect()
}

fn round_percentage(count: usize, total: usize) -> f64 {
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}
