//! OCR結果の型定義
//!
//! バックエンドの `/uploads` レスポンス:
//! `{ "ocr_results": [["テキスト", ...], ...] }`
//! ページ順・テキスト順はそのまま表示順になる。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 1ページ分の抽出テキスト（画像1枚に対応）
pub type Page = Vec<String>;

/// OCR結果（ページの並び）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrResult {
    pub ocr_results: Vec<Page>,
}

impl OcrResult {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { ocr_results: pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.ocr_results
    }

    pub fn page_count(&self) -> usize {
        self.ocr_results.len()
    }

    /// 全ページのテキスト総数
    pub fn total_fragments(&self) -> usize {
        self.ocr_results.iter().map(|page| page.len()).sum()
    }

    /// 全ページを平坦化したテキスト列
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.ocr_results.iter().flatten().map(String::as_str)
    }

    /// テキストが1つもない（`[]` と `[[]]` の両方）
    pub fn is_empty(&self) -> bool {
        self.total_fragments() == 0
    }
}

/// レスポンス本文をパースする
///
/// `ocr_results` が欠けている・形が違う場合はエラー（部分的な結果は返さない）
pub fn parse_response(body: &str) -> Result<OcrResult> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    if value.get("ocr_results").is_none() {
        return Err(Error::Parse("ocr_resultsフィールドがありません".into()));
    }

    serde_json::from_value(value)
        .map_err(|e| Error::Parse(format!("ocr_resultsの形式が不正です: {}", e)))
}
