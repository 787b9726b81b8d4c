use crate::error::{InvoiceOcrError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// アップロード対象の拡張子（小文字で比較）
const UPLOAD_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf", "tif", "tiff"];

pub fn is_uploadable(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| UPLOAD_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// フォルダ直下のアップロード対象ファイルをファイル名順で返す
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(InvoiceOcrError::FolderNotFound(folder.display().to_string()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.is_file() && is_uploadable(path))
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// 引数のパスを展開する
///
/// ファイルはそのまま（存在チェックのみ）、フォルダは直下の対象ファイルに展開。
pub fn resolve_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(scan_folder(path)?);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(InvoiceOcrError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(files)
}

/// 対話的にファイルを選ぶ
pub fn pick_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let candidates = scan_folder(folder)?;
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let names: Vec<String> = candidates
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        })
        .collect();

    let selected = dialoguer::MultiSelect::new()
        .with_prompt("アップロードするファイルを選択（スペースで選択、Enterで確定）")
        .items(&names)
        .interact()
        .map_err(|e| InvoiceOcrError::Prompt(e.to_string()))?;

    Ok(selected.into_iter().map(|i| candidates[i].clone()).collect())
}
