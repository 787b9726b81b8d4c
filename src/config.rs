use crate::error::{InvoiceOcrError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// アップロード先のパス
pub const UPLOAD_PATH: &str = "/uploads";

/// サーバーURLを上書きする環境変数
pub const SERVER_ENV: &str = "INVOICE_OCR_SERVER";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    /// リクエストのタイムアウト（未設定なら無制限）
    pub timeout_seconds: Option<u64>,
    pub default_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            timeout_seconds: None,
            default_title: "納品書OCR結果".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        // 環境変数を優先
        if let Ok(url) = std::env::var(SERVER_ENV) {
            if !url.trim().is_empty() {
                config.server_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InvoiceOcrError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("invoice-ocr").join("config.json"))
    }

    /// アップロード先URL（`{server_url}/uploads`）
    pub fn upload_url(&self) -> Result<String> {
        let base = self.server_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(InvoiceOcrError::Config(format!(
                "サーバーURLは http:// または https:// で始めてください: {}",
                self.server_url
            )));
        }
        Ok(format!("{}{}", base, UPLOAD_PATH))
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        self.server_url = url;
        self.upload_url()?;
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        // 0 はタイムアウトなし
        self.timeout_seconds = if seconds == 0 { None } else { Some(seconds) };
        self.save()
    }
}
