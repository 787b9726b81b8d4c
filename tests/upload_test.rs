//! アップロードの統合テスト
//!
//! ローカルにHTTP応答を1回だけ返すサーバーを立てて検証する

use invoice_ocr::config::Config;
use invoice_ocr::error::{ErrorKind, InvoiceOcrError};
use invoice_ocr::upload::{StatusSink, UploadClient, UploadController};
use invoice_ocr_common::UploadStatus;
use std::path::PathBuf;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// 状態遷移を記録する
#[derive(Default)]
struct RecordingStatus {
    history: Vec<UploadStatus>,
}

impl StatusSink for RecordingStatus {
    fn set_status(&mut self, status: UploadStatus) {
        self.history.push(status);
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.expect("read failed");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(header_end) = find(&buf, b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok());

        match content_length {
            Some(len) => {
                if buf.len() >= header_end + 4 + len {
                    break;
                }
            }
            None => {
                if buf.ends_with(b"0\r\n\r\n") {
                    break;
                }
            }
        }
    }

    buf
}

/// 1リクエストだけ応答するサーバー。受信したリクエストを返す。
async fn spawn_server(status_line: &'static str, body: &'static str) -> (String, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept failed");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.expect("write failed");
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{}", addr), handle)
}

fn config_for(server_url: &str) -> Config {
    Config {
        server_url: server_url.to_string(),
        ..Default::default()
    }
}

fn sample_files(dir: &std::path::Path) -> Vec<PathBuf> {
    let first = dir.join("invoice1.jpg");
    let second = dir.join("invoice2.pdf");
    std::fs::write(&first, b"\xFF\xD8\xFFdummy-jpeg").unwrap();
    std::fs::write(&second, b"%PDF-1.4 dummy").unwrap();
    vec![first, second]
}

/// 正常系: multipart で送信し、OCR結果を受け取る
#[tokio::test]
async fn test_upload_success() {
    let (url, server) = spawn_server(
        "200 OK",
        r#"{"ocr_results": [["田中様", "¥12,500"], ["195/65R15", "4本"]]}"#,
    )
    .await;
    let dir = tempdir().unwrap();
    let files = sample_files(dir.path());

    let client = UploadClient::new(&config_for(&url)).unwrap();
    let mut controller = UploadController::new(client, RecordingStatus::default());
    let result = controller.submit(&files).await.expect("アップロード失敗");

    assert_eq!(result.page_count(), 2);
    assert_eq!(result.pages()[1][0], "195/65R15");
    assert_eq!(controller.status(), UploadStatus::Done);
    assert_eq!(
        controller.sink().history,
        vec![UploadStatus::Processing, UploadStatus::Done]
    );

    let request = server.await.unwrap();
    let text = String::from_utf8_lossy(&request);
    assert!(text.starts_with("POST /uploads HTTP/1.1"));
    assert!(text.to_lowercase().contains("content-type: multipart/form-data"));
    assert_eq!(text.matches("name=\"files\"").count(), 2);
    assert!(text.contains("filename=\"invoice1.jpg\""));
    assert!(text.contains("filename=\"invoice2.pdf\""));
    assert!(text.contains("application/pdf"));
}

/// ファイル未選択: リクエストを送らず、状態も変えない
#[tokio::test]
async fn test_upload_no_files() {
    // 接続先は使われない
    let client = UploadClient::new(&config_for("http://127.0.0.1:9")).unwrap();
    let mut controller = UploadController::new(client, RecordingStatus::default());

    let err = controller.submit(&[]).await.unwrap_err();
    assert!(matches!(err, InvoiceOcrError::NoFilesSelected));
    assert_eq!(err.kind(), ErrorKind::UserInput);
    assert_eq!(err.to_string(), "ファイルを選択してください");
    assert_eq!(controller.status(), UploadStatus::Idle);
    assert!(controller.sink().history.is_empty());
}

/// 2xx以外はサーバーエラー
#[tokio::test]
async fn test_upload_server_error() {
    let (url, server) = spawn_server("500 Internal Server Error", r#"{"error": "boom"}"#).await;
    let dir = tempdir().unwrap();
    let files = sample_files(dir.path());

    let client = UploadClient::new(&config_for(&url)).unwrap();
    let mut controller = UploadController::new(client, RecordingStatus::default());
    let err = controller.submit(&files).await.unwrap_err();

    assert!(matches!(err, InvoiceOcrError::ServerError(500)));
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(controller.status(), UploadStatus::Error);
    assert_eq!(
        controller.sink().history,
        vec![UploadStatus::Processing, UploadStatus::Error]
    );
    server.await.unwrap();
}

/// JSONでないレスポンス
#[tokio::test]
async fn test_upload_malformed_json() {
    let (url, server) = spawn_server("200 OK", "<html>ok</html>").await;
    let dir = tempdir().unwrap();
    let files = sample_files(dir.path());

    let client = UploadClient::new(&config_for(&url)).unwrap();
    let err = client.upload(&files).await.unwrap_err();

    assert!(matches!(err, InvoiceOcrError::ResponseParse(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
    server.await.unwrap();
}

/// ocr_results を持たないレスポンスは描画に進まない
#[tokio::test]
async fn test_upload_unexpected_shape() {
    let (url, server) = spawn_server("200 OK", r#"{"message": "/uploads通過！"}"#).await;
    let dir = tempdir().unwrap();
    let files = sample_files(dir.path());

    let client = UploadClient::new(&config_for(&url)).unwrap();
    let mut controller = UploadController::new(client, RecordingStatus::default());
    let err = controller.submit(&files).await.unwrap_err();

    assert!(matches!(err, InvoiceOcrError::ResponseParse(_)));
    assert_eq!(controller.status(), UploadStatus::Error);
    server.await.unwrap();
}

/// 接続できない場合は通信エラー
#[tokio::test]
async fn test_upload_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempdir().unwrap();
    let files = sample_files(dir.path());

    let client = UploadClient::new(&config_for(&format!("http://{}", addr))).unwrap();
    let mut controller = UploadController::new(client, RecordingStatus::default());
    let err = controller.submit(&files).await.unwrap_err();

    assert!(matches!(err, InvoiceOcrError::Transport(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(controller.status(), UploadStatus::Error);
}
