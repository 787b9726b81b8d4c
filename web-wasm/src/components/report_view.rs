//! レポート表示
//!
//! HTMLは `Report::to_html` がエスケープ済みで生成する。

use leptos::prelude::*;

#[component]
pub fn ReportView(report_html: ReadSignal<String>) -> impl IntoView {
    view! {
        <div id="result" inner_html=move || report_html.get() />
    }
}
