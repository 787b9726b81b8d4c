pub mod html;
pub mod excel;

use crate::error::Result;
use invoice_ocr_common::Report;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Html,
    Json,
    Excel,
    /// HTML + Excel
    All,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "all" | "both" => Ok(ExportFormat::All),
            _ => Err(format!("Unknown format: {}. Use html, json, excel, or all", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::All => write!(f, "all"),
        }
    }
}

/// 出力先パスを決める
///
/// フォルダまたは拡張子なしのパスなら `{output}/{title}.{extension}`、
/// それ以外はファイル名の拡張子だけ差し替える。
pub fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.with_extension(extension)
    }
}

/// レポートを出力し、書き出したファイルのパスを返す
pub fn export_report(
    report: &Report,
    format: &ExportFormat,
    output: &Path,
    title: &str,
) -> Result<Vec<PathBuf>> {
    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    } else if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut written = Vec::new();

    if matches!(format, ExportFormat::Html | ExportFormat::All) {
        let path = output_path_for_format(output, title, "html");
        println!("- HTMLを生成中...");
        html::generate_html(report, &path, title)?;
        println!("✔ HTML出力: {}", path.display());
        written.push(path);
    }

    if matches!(format, ExportFormat::Excel | ExportFormat::All) {
        let path = output_path_for_format(output, title, "xlsx");
        println!("- Excelを生成中...");
        excel::generate_excel(report, &path, title)?;
        println!("✔ Excel出力: {}", path.display());
        written.push(path);
    }

    if matches!(format, ExportFormat::Json) {
        let path = output_path_for_format(output, title, "json");
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;
        println!("✔ JSON出力: {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("HTML".parse::<ExportFormat>(), Ok(ExportFormat::Html));
        assert_eq!("xlsx".parse::<ExportFormat>(), Ok(ExportFormat::Excel));
        assert_eq!("both".parse::<ExportFormat>(), Ok(ExportFormat::All));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_output_path_for_format() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            output_path_for_format(dir.path(), "結果", "html"),
            dir.path().join("結果.html")
        );
        assert_eq!(
            output_path_for_format(Path::new("out/report.html"), "結果", "xlsx"),
            PathBuf::from("out/report.xlsx")
        );
    }
}
