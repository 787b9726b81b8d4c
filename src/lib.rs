//! 納品書OCRクライアント
//!
//! 画像をOCRサーバーへアップロードし、抽出テキストをカテゴリ別レポートにする。
//! 分類・レポート生成は `invoice_ocr_common` を使う。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod progress;
pub mod scanner;
pub mod upload;
