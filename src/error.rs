use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceOcrError {
    #[error("ファイルを選択してください")]
    NoFilesSelected,

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("ファイル選択エラー: {0}")]
    Prompt(String),

    #[error("サーバーエラー (HTTP {0})")]
    ServerError(u16),

    #[error("通信エラー: {0}")]
    Transport(String),

    #[error("レスポンスの解析に失敗: {0}")]
    ResponseParse(#[from] invoice_ocr_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),
}

/// エラーの分類
///
/// - UserInput: 送信前に検出（リクエストは送らない）
/// - Server: 2xx以外のステータス
/// - Transport: 通信失敗・レスポンス不正・ローカルI/O
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UserInput,
    Server,
    Transport,
}

impl InvoiceOcrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InvoiceOcrError::NoFilesSelected
            | InvoiceOcrError::FileNotFound(_)
            | InvoiceOcrError::FolderNotFound(_)
            | InvoiceOcrError::Prompt(_)
            | InvoiceOcrError::Config(_) => ErrorKind::UserInput,
            InvoiceOcrError::ServerError(_) => ErrorKind::Server,
            _ => ErrorKind::Transport,
        }
    }
}

pub type Result<T> = std::result::Result<T, InvoiceOcrError>;
