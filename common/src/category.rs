//! 納品書テキストのカテゴリ定義
//!
//! 宣言順は分類ルールの評価順と一致する。

use serde::{Deserialize, Serialize};

/// カテゴリ（閉じた集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Amount,
    TireSize,
    Date,
    Time,
    Quantity,
    Customer,
    WorkContent,
    ShopInfo,
    ProductCode,
    Phone,
    Address,
    Number,
    Short,
    Other,
}

/// カテゴリの表示情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub icon: &'static str,
    pub description: &'static str,
    /// CSSカラー（#RRGGBB）
    pub color: &'static str,
}

/// 重要項目（キー項目パネル・統計の優先表示順）
pub const PRIORITY: [Category; 6] = [
    Category::Customer,
    Category::Amount,
    Category::Date,
    Category::TireSize,
    Category::Quantity,
    Category::WorkContent,
];

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Amount,
        Category::TireSize,
        Category::Date,
        Category::Time,
        Category::Quantity,
        Category::Customer,
        Category::WorkContent,
        Category::ShopInfo,
        Category::ProductCode,
        Category::Phone,
        Category::Address,
        Category::Number,
        Category::Short,
        Category::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Amount => "amount",
            Category::TireSize => "tire_size",
            Category::Date => "date",
            Category::Time => "time",
            Category::Quantity => "quantity",
            Category::Customer => "customer",
            Category::WorkContent => "work_content",
            Category::ShopInfo => "shop_info",
            Category::ProductCode => "product_code",
            Category::Phone => "phone",
            Category::Address => "address",
            Category::Number => "number",
            Category::Short => "short",
            Category::Other => "other",
        }
    }

    pub fn info(&self) -> &'static CategoryInfo {
        match self {
            Category::Amount => &AMOUNT,
            Category::TireSize => &TIRE_SIZE,
            Category::Date => &DATE,
            Category::Time => &TIME,
            Category::Quantity => &QUANTITY,
            Category::Customer => &CUSTOMER,
            Category::WorkContent => &WORK_CONTENT,
            Category::ShopInfo => &SHOP_INFO,
            Category::ProductCode => &PRODUCT_CODE,
            Category::Phone => &PHONE,
            Category::Address => &ADDRESS,
            Category::Number => &NUMBER,
            Category::Short => &SHORT,
            Category::Other => &OTHER,
        }
    }

    /// 見出しラベル（例: "👤 顧客名"）
    pub fn label(&self) -> String {
        let info = self.info();
        format!("{} {}", info.icon, info.description)
    }

    pub fn is_priority(&self) -> bool {
        PRIORITY.contains(self)
    }
}

const AMOUNT: CategoryInfo = CategoryInfo { icon: "💰", description: "金額", color: "#4CAF50" };
const TIRE_SIZE: CategoryInfo = CategoryInfo { icon: "🚗", description: "タイヤサイズ", color: "#FF5722" };
const DATE: CategoryInfo = CategoryInfo { icon: "📅", description: "日付", color: "#9C27B0" };
const TIME: CategoryInfo = CategoryInfo { icon: "⏰", description: "時刻", color: "#607D8B" };
const QUANTITY: CategoryInfo = CategoryInfo { icon: "📦", description: "数量", color: "#2196F3" };
const CUSTOMER: CategoryInfo = CategoryInfo { icon: "👤", description: "顧客名", color: "#FF9800" };
const WORK_CONTENT: CategoryInfo = CategoryInfo { icon: "🔧", description: "作業内容", color: "#795548" };
const SHOP_INFO: CategoryInfo = CategoryInfo { icon: "🏪", description: "店舗情報", color: "#3F51B5" };
const PRODUCT_CODE: CategoryInfo = CategoryInfo { icon: "📋", description: "品番・型番", color: "#009688" };
const PHONE: CategoryInfo = CategoryInfo { icon: "📞", description: "電話番号", color: "#E91E63" };
const ADDRESS: CategoryInfo = CategoryInfo { icon: "📧", description: "住所", color: "#8BC34A" };
const NUMBER: CategoryInfo = CategoryInfo { icon: "🔢", description: "数値", color: "#CDDC39" };
const SHORT: CategoryInfo = CategoryInfo { icon: "📝", description: "短いテキスト", color: "#9E9E9E" };
const OTHER: CategoryInfo = CategoryInfo { icon: "📄", description: "その他", color: "#757575" };

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.key() == key)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.key().parse::<Category>(), Ok(category));
        }
        assert!("invoice".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_key() {
        let json = serde_json::to_string(&Category::WorkContent).unwrap();
        assert_eq!(json, "\"work_content\"");
        let parsed: Category = serde_json::from_str("\"tire_size\"").unwrap();
        assert_eq!(parsed, Category::TireSize);
    }

    #[test]
    fn test_label() {
        assert_eq!(Category::Customer.label(), "👤 顧客名");
        assert_eq!(Category::TireSize.label(), "🚗 タイヤサイズ");
    }

    #[test]
    fn test_priority() {
        assert!(Category::Amount.is_priority());
        assert!(Category::WorkContent.is_priority());
        assert!(!Category::Phone.is_priority());
        assert!(!Category::Other.is_priority());
    }

    #[test]
    fn test_colors_are_hex() {
        for category in Category::ALL {
            let color = category.info().color;
            assert_eq!(color.len(), 7, "{}", category);
            assert!(u32::from_str_radix(&color[1..], 16).is_ok());
        }
    }
}
