//! メインアプリケーションコンポーネント

use crate::components::{
    header::Header,
    report_view::ReportView,
    status_line::StatusLine,
    upload_form::UploadForm,
};
use invoice_ocr_common::UploadStatus;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let (status, set_status) = signal(UploadStatus::Idle);
    let (report_html, set_report_html) = signal(String::new());

    view! {
        <div class="container">
            <Header />

            <UploadForm
                status=status
                set_status=set_status
                set_report_html=set_report_html
            />

            <StatusLine status=status />

            <ReportView report_html=report_html />
        </div>
    }
}
