//! Invoice OCR Common Library
//!
//! CLIとWeb(WASM)で共有される型・分類器・レポート生成

pub mod types;
pub mod category;
pub mod classifier;
pub mod stats;
pub mod report;
pub mod status;
pub mod error;

pub use types::{OcrResult, Page, parse_response};
pub use category::{Category, CategoryInfo, PRIORITY};
pub use classifier::{classify, group_by_category};
pub use stats::{CategoryStat, compute_statistics};
pub use report::{render, escape_html, Report, PageSection, KeyItemGroup, FragmentCell};
pub use status::UploadStatus;
pub use error::{Error, Result};
