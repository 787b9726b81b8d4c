//! 納品書OCRレポート
//!
//! `render` はOCR結果から表示用の文書構造（[`Report`]）を作る。
//! HTMLへの変換は [`Report::to_html`]。テキストは全てエスケープして出力する。

use crate::category::{Category, PRIORITY};
use crate::classifier::{classify, group_by_category};
use crate::stats::{compute_statistics, CategoryStat};
use crate::types::OcrResult;
use serde::Serialize;
use std::fmt;

/// テキスト未検出時の表示
pub const NO_TEXT_MESSAGE: &str = "📄 テキストが検出されませんでした";

/// レポート全体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub page_count: usize,
    pub fragment_count: usize,
    pub pages: Vec<PageSection>,
    pub statistics: Vec<CategoryStat>,
}

/// 1ページ分のセクション
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSection {
    /// ページ番号（1始まり）
    pub number: usize,
    pub fragment_count: usize,
    /// 重要項目（重要カテゴリのみ、固定順）
    pub key_items: Vec<KeyItemGroup>,
    /// 全テキスト
    pub fragments: Vec<FragmentCell>,
}

/// 重要項目パネルの1カテゴリ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyItemGroup {
    pub category: Category,
    pub values: Vec<String>,
}

/// テキストグリッドの1セル
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentCell {
    /// ページ内番号（1始まり）
    pub index: usize,
    pub text: String,
    pub category: Category,
}

/// OCR結果からレポートを生成する
pub fn render(result: &OcrResult) -> Report {
    let pages = result
        .pages()
        .iter()
        .enumerate()
        .map(|(page_index, page)| {
            let groups = group_by_category(page);
            let key_items = PRIORITY
                .iter()
                .filter_map(|category| {
                    groups.get(category).map(|values| KeyItemGroup {
                        category: *category,
                        values: values.iter().map(|v| v.to_string()).collect(),
                    })
                })
                .collect();

            let fragments = page
                .iter()
                .enumerate()
                .map(|(i, text)| FragmentCell {
                    index: i + 1,
                    text: text.clone(),
                    category: classify(text),
                })
                .collect();

            PageSection {
                number: page_index + 1,
                fragment_count: page.len(),
                key_items,
                fragments,
            }
        })
        .collect();

    Report {
        page_count: result.page_count(),
        fragment_count: result.total_fragments(),
        pages,
        statistics: compute_statistics(result),
    }
}

impl Report {
    /// 表示するテキストがない
    pub fn is_empty(&self) -> bool {
        self.fragment_count == 0
    }

    /// HTML断片に変換する
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(
                f,
                "<p class=\"no-text\" style=\"color: #666; text-align: center; padding: 20px;\">{}</p>",
                NO_TEXT_MESSAGE
            );
        }

        write_header(f, self)?;
        for page in &self.pages {
            write_page(f, page)?;
        }
        write_statistics(f, &self.statistics)
    }
}

fn write_header(html: &mut fmt::Formatter<'_>, report: &Report) -> fmt::Result {
    writeln!(html, "<div class=\"invoice-results-header\">")?;
    writeln!(html, "  <h3>🚛 納品書OCR抽出結果</h3>")?;
    writeln!(html, "  <div class=\"results-stats\">")?;
    writeln!(html, "    <span class=\"stat-badge\">📄 {}ページ</span>", report.page_count)?;
    writeln!(html, "    <span class=\"stat-badge\">📝 {}個のテキスト</span>", report.fragment_count)?;
    writeln!(html, "  </div>")?;
    writeln!(html, "</div>")
}

fn write_page(html: &mut fmt::Formatter<'_>, page: &PageSection) -> fmt::Result {
    writeln!(html, "<div class=\"page-section\">")?;
    writeln!(html, "  <div class=\"page-header\">")?;
    writeln!(html, "    <h4>📄 ページ {}</h4>", page.number)?;
    writeln!(html, "    <span class=\"text-count\">{}個のテキスト</span>", page.fragment_count)?;
    writeln!(html, "  </div>")?;

    writeln!(html, "  <div class=\"key-items\">")?;
    writeln!(html, "    <div class=\"key-items-grid\">")?;
    for group in &page.key_items {
        let info = group.category.info();
        writeln!(
            html,
            "      <div class=\"key-item-card {}\" style=\"border-left-color: {}\">",
            group.category.key(),
            info.color
        )?;
        writeln!(html, "        <div class=\"key-item-header\">")?;
        writeln!(html, "          <span class=\"key-icon\">{}</span>", info.icon)?;
        writeln!(html, "          <span class=\"key-label\">{}</span>", group.category.label())?;
        writeln!(html, "          <span class=\"key-count\">{}</span>", group.values.len())?;
        writeln!(html, "        </div>")?;
        write!(html, "        <div class=\"key-item-values\">")?;
        for value in &group.values {
            write!(html, "<span class=\"key-value\">{}</span>", escape_html(value))?;
        }
        writeln!(html, "</div>")?;
        writeln!(html, "      </div>")?;
    }
    writeln!(html, "    </div>")?;
    writeln!(html, "  </div>")?;

    writeln!(html, "  <div class=\"all-texts\">")?;
    writeln!(html, "    <h5>📋 全抽出テキスト（カテゴリ別色分け）</h5>")?;
    writeln!(html, "    <div class=\"text-grid\">")?;
    for cell in &page.fragments {
        let info = cell.category.info();
        let text = escape_html(&cell.text);
        writeln!(
            html,
            "      <div class=\"text-item {}\" style=\"border-left-color: {}\" title=\"{}\" data-index=\"{}\" data-text=\"{}\">",
            cell.category.key(),
            info.color,
            info.description,
            cell.index,
            text
        )?;
        writeln!(html, "        <span class=\"text-number\">{}</span>", cell.index)?;
        writeln!(html, "        <span class=\"text-content\">{}</span>", text)?;
        writeln!(html, "        <span class=\"text-category-icon\">{}</span>", info.icon)?;
        writeln!(html, "      </div>")?;
    }
    writeln!(html, "    </div>")?;
    writeln!(html, "  </div>")?;
    writeln!(html, "</div>")
}

fn write_statistics(html: &mut fmt::Formatter<'_>, stats: &[CategoryStat]) -> fmt::Result {
    writeln!(html, "<div class=\"invoice-statistics\">")?;
    writeln!(html, "  <h4>📊 納品書データ分析</h4>")?;
    writeln!(html, "  <div class=\"category-breakdown\">")?;
    for stat in stats {
        let info = stat.category.info();
        let class = if stat.is_priority { "stat-item priority-stat" } else { "stat-item" };
        writeln!(html, "    <div class=\"{} {}\">", class, stat.category.key())?;
        writeln!(html, "      <span class=\"stat-icon\">{}</span>", info.icon)?;
        writeln!(html, "      <span class=\"stat-label\">{}</span>", info.description)?;
        writeln!(html, "      <span class=\"stat-count\">{}個</span>", stat.count)?;
        writeln!(html, "      <span class=\"stat-percentage\">({:.1}%)</span>", stat.percentage)?;
        if stat.is_priority {
            writeln!(html, "      <span class=\"priority-badge\">重要</span>")?;
        }
        writeln!(html, "    </div>")?;
    }
    writeln!(html, "  </div>")?;
    writeln!(html, "</div>")
}

/// HTMLエスケープ（要素内・属性値の両方で安全）
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
