//! 納品書画像のアップロード
//!
//! 選択ファイルを `files` フィールドに並べた multipart で `POST /uploads` し、
//! `{ "ocr_results": [[...], ...] }` を受け取る。再送はしない。

use crate::config::Config;
use crate::error::{InvoiceOcrError, Result};
use invoice_ocr_common::{parse_response, OcrResult, UploadStatus};
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// multipart のフィールド名（ファイルごとに繰り返す）
pub const FILES_FIELD: &str = "files";

/// 状態表示の出力先
pub trait StatusSink {
    fn set_status(&mut self, status: UploadStatus);
}

pub struct UploadClient {
    http: reqwest::Client,
    url: String,
}

impl UploadClient {
    pub fn new(config: &Config) -> Result<Self> {
        let url = config.upload_url()?;

        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http = builder
            .build()
            .map_err(|e| InvoiceOcrError::Transport(format!("HTTPクライアント初期化失敗: {}", e)))?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// ファイルを送信してOCR結果を受け取る
    ///
    /// ファイルが0件ならリクエストを送らずに `NoFilesSelected`。
    pub async fn upload(&self, files: &[PathBuf]) -> Result<OcrResult> {
        if files.is_empty() {
            return Err(InvoiceOcrError::NoFilesSelected);
        }

        let form = build_form(files).await?;
        info!(url = %self.url, files = files.len(), "アップロード開始");

        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| InvoiceOcrError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "サーバーがエラーを返しました");
            return Err(InvoiceOcrError::ServerError(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| InvoiceOcrError::Transport(e.to_string()))?;
        debug!(bytes = body.len(), "レスポンス受信");

        Ok(parse_response(&body)?)
    }
}

/// multipart フォームを組み立てる
pub async fn build_form(files: &[PathBuf]) -> Result<Form> {
    let mut form = Form::new();

    for path in files {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        debug!(file = %file_name, bytes = data.len(), "フォームに追加");

        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime_type(path))
            .map_err(|e| InvoiceOcrError::Transport(e.to_string()))?;
        form = form.part(FILES_FIELD, part);
    }

    Ok(form)
}

/// 拡張子からMIMEタイプを推定
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// 状態表示付きのアップロード
///
/// `submit` は `&mut self` を取るので、同じコントローラで同時に2件は送れない。
pub struct UploadController<S: StatusSink> {
    client: UploadClient,
    sink: S,
    status: UploadStatus,
}

impl<S: StatusSink> UploadController<S> {
    pub fn new(client: UploadClient, sink: S) -> Self {
        Self {
            client,
            sink,
            status: UploadStatus::Idle,
        }
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub async fn submit(&mut self, files: &[PathBuf]) -> Result<OcrResult> {
        // 未選択は状態を変えずに中断
        if files.is_empty() {
            return Err(InvoiceOcrError::NoFilesSelected);
        }

        self.set_status(UploadStatus::Processing);

        match self.client.upload(files).await {
            Ok(result) => {
                self.set_status(UploadStatus::Done);
                Ok(result)
            }
            Err(e) => {
                self.set_status(UploadStatus::Error);
                Err(e)
            }
        }
    }

    fn set_status(&mut self, status: UploadStatus) {
        self.status = status;
        self.sink.set_status(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_type(Path::new("a.png")), "image/png");
        assert_eq!(mime_type(Path::new("invoice.pdf")), "application/pdf");
        assert_eq!(mime_type(Path::new("scan.tiff")), "image/tiff");
        assert_eq!(mime_type(Path::new("data.bin")), "application/octet-stream");
        assert_eq!(mime_type(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_client_url() {
        let client = UploadClient::new(&Config::default()).unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:5000/uploads");
    }

    #[tokio::test]
    async fn test_build_form_missing_file() {
        let result = build_form(&[PathBuf::from("/nonexistent/scan.jpg")]).await;
        assert!(matches!(result, Err(InvoiceOcrError::Io(_))));
    }
}
