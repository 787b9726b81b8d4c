//! 納品書OCR Webクライアント (Leptos + WASM)
//!
//! 選んだファイルを `/uploads` に送り、分類済みのレポートを表示する。

pub mod api;
pub mod app;
mod components;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
