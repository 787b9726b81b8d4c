use clap::{Parser, Subcommand};
use crate::export::ExportFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "invoice-ocr")]
#[command(about = "納品書OCR・カテゴリ別レポート生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// OCRサーバーのURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 納品書画像をアップロードしてレポートを生成
    Upload {
        /// 画像/PDFファイル、またはフォルダ
        files: Vec<PathBuf>,

        /// フォルダから対話的にファイルを選択
        #[arg(long)]
        pick: Option<PathBuf>,

        /// 出力ファイル/ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (html/json/excel/all)
        #[arg(short, long, default_value = "html")]
        format: ExportFormat,

        /// レポートタイトル
        #[arg(short, long)]
        title: Option<String>,

        /// OCRレスポンスをJSONで保存（renderで再利用可能）
        #[arg(long)]
        save_response: Option<PathBuf>,
    },

    /// 保存済みOCRレスポンスからレポートを生成
    Render {
        /// OCRレスポンスJSON（{"ocr_results": [[...]]}）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (html/json/excel/all)
        #[arg(short, long, default_value = "html")]
        format: ExportFormat,

        /// レポートタイトル
        #[arg(short, long)]
        title: Option<String>,
    },

    /// テキストのカテゴリを判定
    Classify {
        /// 判定するテキスト
        #[arg(required = true)]
        texts: Vec<String>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// カテゴリ別の集計を表示
    Stats {
        /// OCRレスポンスJSON
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// OCRサーバーのURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// タイムアウト秒数を設定（0で無制限）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
