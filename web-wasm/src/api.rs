//! `/uploads` への送信

use invoice_ocr_common::{OcrResult, UploadStatus};
use std::fmt;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

pub const UPLOAD_PATH: &str = "/uploads";
pub const FILES_FIELD: &str = "files";

#[derive(Debug, Clone, PartialEq)]
pub enum UploadError {
    NoFilesSelected,
    Server(u16),
    Network(String),
    Parse(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::NoFilesSelected => write!(f, "ファイルを選択してください"),
            UploadError::Server(code) => write!(f, "サーバーエラー (HTTP {})", code),
            UploadError::Network(msg) => write!(f, "通信エラー: {}", msg),
            UploadError::Parse(msg) => write!(f, "レスポンス解析エラー: {}", msg),
        }
    }
}

impl UploadError {
    /// ダイアログで知らせる文言。通信系は状態表示だけにする。
    pub fn alert_message(&self) -> Option<&'static str> {
        match self {
            UploadError::NoFilesSelected => Some("ファイルを選択してください"),
            UploadError::Server(_) => Some("サーバーエラー"),
            UploadError::Network(_) | UploadError::Parse(_) => None,
        }
    }

    /// 失敗後の状態
    pub fn status(&self) -> UploadStatus {
        match self {
            UploadError::NoFilesSelected => UploadStatus::Idle,
            _ => UploadStatus::Error,
        }
    }
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

fn network(value: JsValue) -> UploadError {
    UploadError::Network(js_message(&value))
}

/// ファイルを `files` フィールドに並べて送信し、OCR結果を受け取る
pub async fn upload(files: &[File]) -> Result<OcrResult, UploadError> {
    if files.is_empty() {
        return Err(UploadError::NoFilesSelected);
    }

    let form = FormData::new().map_err(network)?;
    for file in files {
        form.append_with_blob_and_filename(FILES_FIELD, file, &file.name())
            .map_err(network)?;
    }

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(form.as_ref());

    let request = Request::new_with_str_and_init(UPLOAD_PATH, &opts).map_err(network)?;
    let window = web_sys::window().ok_or_else(|| UploadError::Network("windowがありません".into()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?;
    let resp: Response = resp_value.dyn_into().map_err(network)?;

    if !resp.ok() {
        return Err(UploadError::Server(resp.status()));
    }

    let json = JsFuture::from(resp.json().map_err(network)?)
        .await
        .map_err(|e| UploadError::Parse(js_message(&e)))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| UploadError::Parse(e.to_string()))
}
