//! 処理状態の表示

use invoice_ocr_common::UploadStatus;
use leptos::prelude::*;

#[component]
pub fn StatusLine(status: ReadSignal<UploadStatus>) -> impl IntoView {
    view! {
        <p id="clicked" class="status">
            {move || status.get().label()}
        </p>
    }
}
