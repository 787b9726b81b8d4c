//! ファイル選択とOCR実行ボタン

use crate::api::{self, UploadError};
use invoice_ocr_common::{render, UploadStatus};
use leptos::ev::MouseEvent;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement};

#[component]
pub fn UploadForm(
    status: ReadSignal<UploadStatus>,
    set_status: WriteSignal<UploadStatus>,
    set_report_html: WriteSignal<String>,
) -> impl IntoView {
    let input_ref: NodeRef<html::Input> = NodeRef::new();
    let is_busy = move || status.get().is_busy();

    let on_click = move |_: MouseEvent| {
        // 処理中の再クリックは無視
        if status.get_untracked().is_busy() {
            return;
        }

        let files = input_ref
            .get()
            .map(|input| selected_files(&input))
            .unwrap_or_default();

        if files.is_empty() {
            gloo::dialogs::alert(&UploadError::NoFilesSelected.to_string());
            return;
        }

        web_sys::console::log_1(&format!("送信: {}ファイル", files.len()).into());
        set_status.set(UploadStatus::Processing);

        spawn_local(async move {
            match api::upload(&files).await {
                Ok(result) => {
                    set_report_html.set(render(&result).to_html());
                    set_status.set(UploadStatus::Done);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("エラー: {}", e).into());
                    if let Some(message) = e.alert_message() {
                        gloo::dialogs::alert(message);
                    }
                    set_status.set(e.status());
                }
            }
        });
    };

    view! {
        <div class="upload-form">
            <input
                type="file"
                id="InputImage"
                accept="image/*,application/pdf"
                multiple=true
                node_ref=input_ref
            />
            <button
                id="ocr"
                class="btn btn-primary"
                disabled=is_busy
                on:click=on_click
            >
                {move || if is_busy() { "処理中..." } else { "OCR実行" }}
            </button>
        </div>
    }
}

/// 選択中のファイル（選択順）
fn selected_files(input: &HtmlInputElement) -> Vec<File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}
