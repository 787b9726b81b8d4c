//! Excel出力
//!
//! シート構成:
//! - 抽出テキスト: ページ・番号・テキスト・カテゴリ（カテゴリ色で塗り分け）
//! - 重要項目: ページごとの重要カテゴリの値
//! - カテゴリ集計: 件数と割合

use crate::error::{InvoiceOcrError, Result};
use invoice_ocr_common::{Category, Report};
use rust_xlsxwriter::{Color, DocProperties, Format, FormatAlign, FormatBorder, Workbook, XlsxError};
use std::path::Path;

fn excel_error(context: &'static str) -> impl Fn(XlsxError) -> InvoiceOcrError {
    move |e| InvoiceOcrError::ExcelGeneration(format!("{}: {}", context, e))
}

/// "#RRGGBB" を数値に（不正なら灰色）
fn category_color(category: Category) -> Color {
    let hex = category.info().color.trim_start_matches('#');
    Color::RGB(u32::from_str_radix(hex, 16).unwrap_or(0x757575))
}

pub fn generate_excel(report: &Report, output_path: &Path, title: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    workbook.set_properties(&DocProperties::new().set_title(title));

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_background_color(Color::RGB(0xD3D3D3))
        .set_border(FormatBorder::Thin);

    let text_format = Format::new()
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    // 抽出テキスト
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("抽出テキスト").map_err(excel_error("シート名設定エラー"))?;

        let headers = ["ページ", "No.", "テキスト", "カテゴリ", "アイコン", "重要"];
        for (col, header) in headers.iter().enumerate() {
            sheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(excel_error("ヘッダー書き込みエラー"))?;
        }
        sheet.set_column_width(2, 40).map_err(excel_error("列幅設定エラー"))?;
        sheet.set_column_width(3, 16).map_err(excel_error("列幅設定エラー"))?;
        sheet.set_freeze_panes(1, 0).map_err(excel_error("ウィンドウ枠固定エラー"))?;

        let mut row: u32 = 1;
        for page in &report.pages {
            for cell in &page.fragments {
                let info = cell.category.info();
                let category_format = Format::new()
                    .set_font_color(Color::White)
                    .set_background_color(category_color(cell.category))
                    .set_border(FormatBorder::Hair);

                sheet.write_number(row, 0, page.number as f64).map_err(excel_error("値書き込みエラー"))?;
                sheet.write_number(row, 1, cell.index as f64).map_err(excel_error("値書き込みエラー"))?;
                sheet
                    .write_string_with_format(row, 2, &cell.text, &text_format)
                    .map_err(excel_error("値書き込みエラー"))?;
                sheet
                    .write_string_with_format(row, 3, info.description, &category_format)
                    .map_err(excel_error("値書き込みエラー"))?;
                sheet.write_string(row, 4, info.icon).map_err(excel_error("値書き込みエラー"))?;
                if cell.category.is_priority() {
                    sheet.write_string(row, 5, "重要").map_err(excel_error("値書き込みエラー"))?;
                }
                row += 1;
            }
        }
    }

    // 重要項目
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("重要項目").map_err(excel_error("シート名設定エラー"))?;

        let headers = ["ページ", "項目", "件数", "値"];
        for (col, header) in headers.iter().enumerate() {
            sheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(excel_error("ヘッダー書き込みエラー"))?;
        }
        sheet.set_column_width(1, 18).map_err(excel_error("列幅設定エラー"))?;
        sheet.set_column_width(3, 60).map_err(excel_error("列幅設定エラー"))?;

        let mut row: u32 = 1;
        for page in &report.pages {
            for group in &page.key_items {
                sheet.write_number(row, 0, page.number as f64).map_err(excel_error("値書き込みエラー"))?;
                sheet
                    .write_string(row, 1, group.category.label())
                    .map_err(excel_error("値書き込みエラー"))?;
                sheet
                    .write_number(row, 2, group.values.len() as f64)
                    .map_err(excel_error("値書き込みエラー"))?;
                sheet
                    .write_string_with_format(row, 3, group.values.join(" / "), &text_format)
                    .map_err(excel_error("値書き込みエラー"))?;
                row += 1;
            }
        }
    }

    // カテゴリ集計
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("カテゴリ集計").map_err(excel_error("シート名設定エラー"))?;

        let headers = ["カテゴリ", "件数", "割合(%)", "重要"];
        for (col, header) in headers.iter().enumerate() {
            sheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(excel_error("ヘッダー書き込みエラー"))?;
        }
        sheet.set_column_width(0, 18).map_err(excel_error("列幅設定エラー"))?;

        let percent_format = Format::new().set_num_format("0.0");
        for (i, stat) in report.statistics.iter().enumerate() {
            let row = i as u32 + 1;
            sheet
                .write_string(row, 0, stat.category.label())
                .map_err(excel_error("値書き込みエラー"))?;
            sheet.write_number(row, 1, stat.count as f64).map_err(excel_error("値書き込みエラー"))?;
            sheet
                .write_number_with_format(row, 2, stat.percentage, &percent_format)
                .map_err(excel_error("値書き込みエラー"))?;
            if stat.is_priority {
                sheet.write_string(row, 3, "重要").map_err(excel_error("値書き込みエラー"))?;
            }
        }
    }

    workbook.save(output_path).map_err(excel_error("Excel保存エラー"))?;
    Ok(())
}
