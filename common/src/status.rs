//! アップロード状態表示
//!
//! 未実行 → 処理中 → 完了 / エラー

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    #[default]
    Idle,
    Processing,
    Done,
    Error,
}

impl UploadStatus {
    /// 状態表示テキスト
    pub fn label(&self) -> &'static str {
        match self {
            UploadStatus::Idle => "",
            UploadStatus::Processing => "処理中...",
            UploadStatus::Done => "完了!",
            UploadStatus::Error => "エラーが発生しました",
        }
    }

    /// リクエスト実行中か
    pub fn is_busy(&self) -> bool {
        matches!(self, UploadStatus::Processing)
    }
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(UploadStatus::default(), UploadStatus::Idle);
        assert_eq!(UploadStatus::Idle.label(), "");
        assert_eq!(UploadStatus::Processing.to_string(), "処理中...");
        assert_eq!(UploadStatus::Done.to_string(), "完了!");
        assert_eq!(UploadStatus::Error.to_string(), "エラーが発生しました");
    }

    #[test]
    fn test_is_busy() {
        assert!(UploadStatus::Processing.is_busy());
        assert!(!UploadStatus::Done.is_busy());
    }
}
