use anyhow::Context;
use clap::Parser;
use invoice_ocr::{cli, config, error, export, progress, scanner, upload};
use invoice_ocr_common::{classify, compute_statistics, parse_response, render, OcrResult};
use cli::{Cli, Commands};
use config::Config;
use error::{ErrorKind, InvoiceOcrError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load().context("設定ファイルの読み込みに失敗しました")?;
    if let Some(server) = &cli.server {
        config.server_url = server.clone();
    }

    match cli.command {
        Commands::Upload { files, pick, output, format, title, save_response } => {
            println!("🚛 invoice-ocr - 納品書OCR\n");

            // 1. ファイル選択
            let mut selected = scanner::resolve_inputs(&files)?;
            if let Some(folder) = pick {
                selected.extend(scanner::pick_files(&folder)?);
            }

            let client = upload::UploadClient::new(&config)?;
            let mut controller = upload::UploadController::new(client, progress::SpinnerStatus::new());

            // 2. アップロード
            if !selected.is_empty() {
                println!("[1/2] {}件のファイルを送信: {}", selected.len(), config.upload_url()?);
            }
            let result = match controller.submit(&selected).await {
                Ok(result) => result,
                Err(e) => {
                    notify_failure(&e);
                    return Ok(ExitCode::FAILURE);
                }
            };

            if let Some(path) = save_response {
                std::fs::write(&path, serde_json::to_string_pretty(&result)?)
                    .with_context(|| format!("レスポンスの保存に失敗: {}", path.display()))?;
                println!("✔ レスポンスを保存: {}", path.display());
            }

            // 3. レポート出力
            println!("\n[2/2] レポートを出力中...");
            let title = title.unwrap_or_else(|| config.default_title.clone());
            write_report(&result, &format, output, &title)?;

            println!("\n✅ 完了");
        }

        Commands::Render { input, output, format, title } => {
            println!("📄 invoice-ocr - レポート生成\n");

            let result = load_response(&input)?;
            let title = title.unwrap_or_else(|| config.default_title.clone());
            write_report(&result, &format, output, &title)?;

            println!("\n✅ 完了");
        }

        Commands::Classify { texts, json } => {
            if json {
                let entries: Vec<serde_json::Value> = texts
                    .iter()
                    .map(|text| serde_json::json!({ "text": text, "category": classify(text) }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for text in &texts {
                    let category = classify(text);
                    println!("{} {:<13} {}", category.info().icon, category.key(), text);
                }
            }
        }

        Commands::Stats { input } => {
            let result = load_response(&input)?;
            let stats = compute_statistics(&result);

            println!(
                "📊 納品書データ分析（{}ページ / {}個のテキスト）",
                result.page_count(),
                result.total_fragments()
            );
            if stats.is_empty() {
                println!("  📄 テキストが検出されませんでした");
            }
            for stat in &stats {
                let info = stat.category.info();
                println!(
                    "  {} {}  {}個 ({:.1}%){}",
                    info.icon,
                    info.description,
                    stat.count,
                    stat.percentage,
                    if stat.is_priority { "  [重要]" } else { "" }
                );
            }
        }

        Commands::Config { set_server, set_timeout, show } => {
            if let Some(url) = set_server {
                config.set_server_url(url)?;
                println!("✔ サーバーURLを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ タイムアウトを設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  サーバーURL: {}", config.server_url);
                println!("  アップロード先: {}", config.upload_url()?);
                println!(
                    "  タイムアウト: {}",
                    config
                        .timeout_seconds
                        .map(|s| format!("{}秒", s))
                        .unwrap_or_else(|| "なし".into())
                );
                println!("  デフォルトタイトル: {}", config.default_title);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// エラー種別ごとの通知
///
/// 入力エラー・サーバーエラーは警告として目立たせ、
/// 通信エラーは状態表示（スピナー）に出た内容に詳細を添える。
fn notify_failure(err: &InvoiceOcrError) {
    match err.kind() {
        ErrorKind::UserInput | ErrorKind::Server => {
            eprintln!("\n⚠ {}", err);
        }
        ErrorKind::Transport => {
            tracing::error!(error = %err, "アップロード失敗");
            eprintln!("  {}", err);
        }
    }
}

fn load_response(input: &Path) -> anyhow::Result<OcrResult> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("入力ファイルを読み込めません: {}", input.display()))?;
    let result = parse_response(&content)
        .with_context(|| format!("OCRレスポンスの形式が不正です: {}", input.display()))?;
    Ok(result)
}

fn write_report(
    result: &OcrResult,
    format: &export::ExportFormat,
    output: Option<PathBuf>,
    title: &str,
) -> error::Result<()> {
    let report = render(result);
    if report.is_empty() {
        println!("📄 テキストが検出されませんでした");
    } else {
        println!("- {}ページ / {}個のテキストを分類", report.page_count, report.fragment_count);
    }

    let output = output.unwrap_or_else(|| PathBuf::from("."));
    export::export_report(&report, format, &output, title)?;
    Ok(())
}
