//! 端末の状態表示（スピナー）

use crate::upload::StatusSink;
use indicatif::{ProgressBar, ProgressStyle};
use invoice_ocr_common::UploadStatus;
use std::time::Duration;

#[derive(Default)]
pub struct SpinnerStatus {
    bar: Option<ProgressBar>,
}

impl SpinnerStatus {
    pub fn new() -> Self {
        Self::default()
    }

    fn spinner() -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }
}

impl StatusSink for SpinnerStatus {
    fn set_status(&mut self, status: UploadStatus) {
        match status {
            UploadStatus::Idle => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
            }
            UploadStatus::Processing => {
                let bar = self.bar.get_or_insert_with(Self::spinner);
                bar.set_message(status.label());
            }
            UploadStatus::Done => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_with_message(format!("✔ {}", status.label()));
                } else {
                    println!("✔ {}", status.label());
                }
            }
            UploadStatus::Error => {
                if let Some(bar) = self.bar.take() {
                    bar.abandon_with_message(format!("✘ {}", status.label()));
                } else {
                    eprintln!("✘ {}", status.label());
                }
            }
        }
    }
}
