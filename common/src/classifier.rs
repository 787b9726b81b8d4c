//! 納品書テキストのカテゴリ判定
//!
//! 1つのテキストだけを見て判定する（前後のテキストやページ位置は使わない）。
//! ルールは上から順に評価し、最初に一致したカテゴリを返す。
//! どれにも一致しなければ `Other`。

use crate::category::Category;
use regex::Regex;
use std::collections::BTreeMap;

/// 判定ルール（カテゴリと判定関数の組）
struct Rule {
    category: Category,
    matches: fn(&str) -> bool,
}

/// 評価順のルール表
const RULES: &[Rule] = &[
    Rule { category: Category::Amount, matches: is_amount },
    Rule { category: Category::TireSize, matches: is_tire_size },
    Rule { category: Category::Date, matches: is_date },
    Rule { category: Category::Time, matches: is_time },
    Rule { category: Category::Quantity, matches: is_quantity },
    Rule { category: Category::Customer, matches: is_customer },
    Rule { category: Category::WorkContent, matches: is_work_content },
    Rule { category: Category::ShopInfo, matches: is_shop_info },
    Rule { category: Category::ProductCode, matches: is_product_code },
    Rule { category: Category::Phone, matches: is_phone },
    Rule { category: Category::Address, matches: is_address },
    Rule { category: Category::Number, matches: is_number },
    Rule { category: Category::Short, matches: is_short },
];

const CUSTOMER_MARKERS: &[&str] = &["様", "株式会社", "有限会社", "㈱"];
const WORK_KEYWORDS: &[&str] = &["取付", "交換", "修理", "点検", "整備", "バランス", "組替"];
const SHOP_KEYWORDS: &[&str] = &["自動車", "タイヤ", "サービス", "工場"];
const ADDRESS_SUFFIXES: &[&str] = &["県", "市", "区", "町"];

/// 金額とみなす最小値
const MIN_AMOUNT: f64 = 100.0;

/// 短いテキストの最大文字数
const SHORT_MAX_CHARS: usize = 3;

lazy_static::lazy_static! {
    // ¥12,500 / 3000円 / 12,500
    static ref CURRENCY_RE: Regex = Regex::new(r"^¥?[0-9,]+円?$").unwrap();
    static ref GROUPED_RE: Regex = Regex::new(r"^[0-9]{1,3}(,[0-9]{3})*$").unwrap();
    // 195/65R15, 195-65-15
    static ref TIRE_RE: Regex = Regex::new(r"[0-9]{3}/[0-9]{2}R[0-9]{2}").unwrap();
    static ref TIRE_ALT_RE: Regex = Regex::new(r"[0-9]{3}[-/][0-9]{2}[-/][0-9]{2}").unwrap();
    // 2024/1/15, 2024年1月15日, 1/15/24
    static ref DATE_RE: Regex = Regex::new(r"[0-9]{4}[/\-年][0-9]{1,2}[/\-月]?[0-9]{1,2}日?").unwrap();
    static ref SHORT_DATE_RE: Regex = Regex::new(r"[0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4}").unwrap();
    // 9:30, 9：30
    static ref TIME_RE: Regex = Regex::new(r"[0-9]{1,2}[：:][0-9]{2}").unwrap();
    // 4本, 2 台
    static ref QUANTITY_RE: Regex = Regex::new(r"^[0-9]+[本個台枚数量]$").unwrap();
    static ref QUANTITY_SPACED_RE: Regex = Regex::new(r"^[0-9]+\s*[本個台]$").unwrap();
    static ref PRODUCT_CODE_RE: Regex = Regex::new(r"^[A-Z0-9\-]{5,}$").unwrap();
    // 03-1234-5678, 03(1234)5678
    static ref PHONE_RE: Regex = Regex::new(r"^[0-9]{2,4}[-()][0-9]{2,4}[-()][0-9]{4}$").unwrap();
    static ref PHONE_ALT_RE: Regex = Regex::new(r"^0[0-9]{1,4}-[0-9]{2,4}-[0-9]{4}$").unwrap();
    static ref NUMBER_RE: Regex = Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap();
}

/// テキストのカテゴリを判定する
pub fn classify(text: &str) -> Category {
    RULES
        .iter()
        .find(|rule| (rule.matches)(text))
        .map(|rule| rule.category)
        .unwrap_or(Category::Other)
}

/// ページ内のテキストをカテゴリ別に分ける（カテゴリ内は元の順序）
pub fn group_by_category<'a, I>(page: I) -> BTreeMap<Category, Vec<&'a str>>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut groups: BTreeMap<Category, Vec<&'a str>> = BTreeMap::new();
    for text in page {
        groups.entry(classify(text)).or_default().push(text.as_str());
    }
    groups
}

fn is_amount(text: &str) -> bool {
    if !CURRENCY_RE.is_match(text) && !GROUPED_RE.is_match(text) {
        return false;
    }

    let digits: String = text
        .chars()
        .filter(|c| !matches!(c, '¥' | ',' | '円'))
        .collect();

    // 桁数が多くても f64 なら溢れない
    digits
        .parse::<f64>()
        .map(|value| value >= MIN_AMOUNT)
        .unwrap_or(false)
}

fn is_tire_size(text: &str) -> bool {
    TIRE_RE.is_match(text) || TIRE_ALT_RE.is_match(text)
}

fn is_date(text: &str) -> bool {
    DATE_RE.is_match(text) || SHORT_DATE_RE.is_match(text)
}

fn is_time(text: &str) -> bool {
    TIME_RE.is_match(text)
}

fn is_quantity(text: &str) -> bool {
    QUANTITY_RE.is_match(text) || QUANTITY_SPACED_RE.is_match(text)
}

fn is_customer(text: &str) -> bool {
    contains_any(text, CUSTOMER_MARKERS)
}

fn is_work_content(text: &str) -> bool {
    contains_any(text, WORK_KEYWORDS)
}

fn is_shop_info(text: &str) -> bool {
    contains_any(text, SHOP_KEYWORDS)
}

fn is_product_code(text: &str) -> bool {
    PRODUCT_CODE_RE.is_match(text)
}

fn is_phone(text: &str) -> bool {
    PHONE_RE.is_match(text) || PHONE_ALT_RE.is_match(text)
}

fn is_address(text: &str) -> bool {
    contains_any(text, ADDRESS_SUFFIXES)
}

fn is_number(text: &str) -> bool {
    NUMBER_RE.is_match(text)
}

/// 文字数はUnicodeスカラー値で数える（UTF-16の長さではない）
fn is_short(text: &str) -> bool {
    text.chars().count() <= SHORT_MAX_CHARS
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}
