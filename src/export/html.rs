//! HTML出力（単体で開けるドキュメント）

use crate::error::Result;
use invoice_ocr_common::{escape_html, Category, Report};
use std::path::Path;

const BASE_CSS: &str = r#"body { font-family: "Hiragino Sans", "Meiryo", sans-serif; margin: 24px; color: #333; }
.generated-at { color: #888; font-size: 12px; }
.results-stats .stat-badge { display: inline-block; background: #f0f0f0; border-radius: 12px; padding: 2px 10px; margin-right: 6px; }
.page-section { border: 1px solid #ddd; border-radius: 8px; padding: 12px; margin: 16px 0; }
.page-header { display: flex; justify-content: space-between; align-items: baseline; }
.key-items-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 8px; }
.key-item-card { border: 1px solid #eee; border-left: 4px solid #999; border-radius: 6px; padding: 8px; }
.key-item-header { display: flex; gap: 6px; font-weight: bold; }
.key-count { margin-left: auto; color: #666; }
.key-value { display: inline-block; background: #fafafa; border-radius: 4px; padding: 1px 6px; margin: 2px; }
.text-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 6px; }
.text-item { display: flex; gap: 6px; align-items: center; border-left: 4px solid #999; background: #fcfcfc; padding: 4px 6px; }
.text-number { color: #999; font-size: 11px; }
.text-content { flex: 1; word-break: break-all; }
.invoice-statistics { border-top: 2px solid #333; margin-top: 24px; padding-top: 12px; }
.stat-item { display: flex; gap: 8px; padding: 2px 0; }
.priority-stat { font-weight: bold; }
.priority-badge { background: #e53935; color: #fff; border-radius: 4px; padding: 0 6px; font-size: 11px; }
"#;

/// カテゴリ色のCSS
fn category_css() -> String {
    Category::ALL
        .iter()
        .map(|c| {
            format!(
                ".text-item.{key}, .key-item-card.{key} {{ border-left-color: {color}; }}\n",
                key = c.key(),
                color = c.info().color
            )
        })
        .collect()
}

/// レポートをHTMLドキュメントに包む
pub fn build_document(report: &Report, title: &str, generated_at: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n<meta charset=\"UTF-8\">\n<title>{title}</title>\n<style>\n{base}{categories}</style>\n</head>\n<body>\n<h1>{title}</h1>\n<p class=\"generated-at\">生成日時: {generated_at}</p>\n<div id=\"result\">\n{body}</div>\n</body>\n</html>\n",
        title = title,
        base = BASE_CSS,
        categories = category_css(),
        generated_at = escape_html(generated_at),
        body = report.to_html(),
    )
}

pub fn generate_html(report: &Report, output_path: &Path, title: &str) -> Result<()> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let document = build_document(report, title, &generated_at);
    std::fs::write(output_path, document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoice_ocr_common::{render, OcrResult};

    #[test]
    fn test_build_document() {
        let report = render(&OcrResult::new(vec![vec!["田中様".into(), "4本".into()]]));
        let doc = build_document(&report, "納品書 <テスト>", "2026-01-01 09:00:00");

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>納品書 &lt;テスト&gt;</title>"));
        assert!(doc.contains("生成日時: 2026-01-01 09:00:00"));
        assert!(doc.contains(".text-item.amount, .key-item-card.amount { border-left-color: #4CAF50; }"));
        assert!(doc.contains("📄 ページ 1"));
    }

    #[test]
    fn test_build_document_empty() {
        let report = render(&OcrResult::default());
        let doc = build_document(&report, "空", "2026-01-01 09:00:00");
        assert!(doc.contains("テキストが検出されませんでした"));
    }
}
