pub mod header;
pub mod report_view;
pub mod status_line;
pub mod upload_form;
