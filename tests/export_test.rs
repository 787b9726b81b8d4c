//! HTML/JSON/Excel出力の統合テスト

use invoice_ocr::export::{export_report, ExportFormat};
use invoice_ocr_common::{render, OcrResult, Report};
use tempfile::tempdir;

fn sample_report() -> Report {
    render(&OcrResult::new(vec![
        vec![
            "株式会社山田商会".to_string(),
            "2024年1月15日".to_string(),
            "¥36,000".to_string(),
            "<b>備考</b>".to_string(),
        ],
        vec![
            "195/65R15".to_string(),
            "4本".to_string(),
            "タイヤ取付".to_string(),
        ],
    ]))
}

#[test]
fn test_html_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let written = export_report(&sample_report(), &ExportFormat::Html, dir.path(), "納品書")
        .expect("HTML出力に失敗");

    assert_eq!(written, vec![dir.path().join("納品書.html")]);
    let html = std::fs::read_to_string(&written[0]).unwrap();
    assert!(html.contains("🚛 納品書OCR抽出結果"));
    assert!(html.contains("📄 ページ 2"));
    assert!(html.contains("&lt;b&gt;備考&lt;/b&gt;"));
    assert!(!html.contains("<b>備考</b>"));
}

#[test]
fn test_json_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let written = export_report(&sample_report(), &ExportFormat::Json, dir.path(), "report")
        .expect("JSON出力に失敗");

    let content = std::fs::read_to_string(&written[0]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["page_count"], 2);
    assert_eq!(value["fragment_count"], 7);
    assert_eq!(value["pages"][1]["fragments"][0]["category"], "tire_size");
    assert_eq!(value["statistics"][0]["category"], "customer");
}

#[test]
fn test_excel_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let written = export_report(&sample_report(), &ExportFormat::Excel, dir.path(), "report")
        .expect("Excel出力に失敗");

    let path = &written[0];
    assert_eq!(path.extension().unwrap(), "xlsx");
    let metadata = std::fs::metadata(path).expect("ファイルメタデータ取得失敗");
    assert!(metadata.len() > 0, "Excelファイルが空");
}

#[test]
fn test_all_export_to_file_path() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out").join("result.html");
    let written = export_report(&sample_report(), &ExportFormat::All, &output, "ignored")
        .expect("出力に失敗");

    assert_eq!(written.len(), 2);
    assert!(dir.path().join("out").join("result.html").exists());
    assert!(dir.path().join("out").join("result.xlsx").exists());
}

#[test]
fn test_empty_report_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = render(&OcrResult::new(vec![vec![]]));
    let written = export_report(&report, &ExportFormat::All, dir.path(), "empty")
        .expect("空レポートの出力に失敗");

    let html = std::fs::read_to_string(&written[0]).unwrap();
    assert!(html.contains("テキストが検出されませんでした"));
    assert!(written[1].exists());
}
