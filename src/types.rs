//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日時
    DateTime(NaiveDateTime),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    ///
    /// 空文字列のセルも空として扱います。
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// 値が偽とみなされるかを判定
    ///
    /// 空セル・空文字列に加えて、数値の0と`FALSE`も偽とします。
    /// ヘッダーラベルの有無や項目番号の有無の判定に使用します。
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Number(n) => *n == 0.0,
            CellValue::Bool(b) => !b,
            other => other.is_empty(),
        }
    }

    /// 前後の空白を除去した文字列表現を取得
    pub fn trimmed(&self) -> String {
        match self {
            CellValue::String(s) => s.trim().to_string(),
            other => other.to_string().trim().to_string(),
        }
    }
}

/// 文字列表現
///
/// 整数値の数値は `3` のように小数部なしで出力し、
/// 論理値は `True` / `False`、日時は `YYYY-MM-DD HH:MM:SS` で出力します。
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::String(s) => f.write_str(s),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Error(e) => f.write_str(e),
            CellValue::Empty => Ok(()),
        }
    }
}

/// シートの概要情報（進捗表示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    /// シート名
    pub name: String,
    /// 最終行（1始まり、データがない場合は0）
    pub max_row: u32,
    /// 最終列（1始まり、データがない場合は0）
    pub max_column: u32,
}

/// 出力レコードの固定ステータス値
pub const DEFAULT_STATUS: &str = "active";

/// フレームワークの末端項目（JSON出力の1要素）
///
/// フィールドの並び順がそのままJSONのキー順になります。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkItem {
    pub item_number: String,
    pub item_description: String,
    pub super_section: String,
    pub parent_section: String,
    pub tactic: String,
    pub technique: String,
    pub procedure: String,
    pub compliance_rationale: String,
    pub test_method: String,
    pub compliance_mappings: Vec<String>,
    pub finding: String,
    pub recommendation: String,
    pub status: String,
    pub tags: Vec<String>,
    pub references: Vec<String>,
}

impl Default for FrameworkItem {
    fn default() -> Self {
        Self {
            item_number: String::new(),
            item_description: String::new(),
            super_section: String::new(),
            parent_section: String::new(),
            tactic: String::new(),
            technique: String::new(),
            procedure: String::new(),
            compliance_rationale: String::new(),
            test_method: String::new(),
            compliance_mappings: Vec::new(),
            finding: String::new(),
            recommendation: String::new(),
            status: DEFAULT_STATUS.to_string(),
            tags: Vec::new(),
            references: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_number_display() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(1.25).to_string(), "1.25");
        assert_eq!(CellValue::Number(-2.0).to_string(), "-2");
        assert_eq!(CellValue::Number(2024.0).to_string(), "2024");
        assert_eq!(CellValue::Number(0.5).to_string(), "0.5");
    }

    #[test]
    fn test_bool_and_error_display() {
        assert_eq!(CellValue::Bool(true).to_string(), "True");
        assert_eq!(CellValue::Bool(false).to_string(), "False");
        assert_eq!(CellValue::Error("#DIV/0!".to_string()).to_string(), "#DIV/0!");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_datetime_display() {
        let dt = NaiveDate::from_ymd_opt(2025, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 0))
            .unwrap();
        assert_eq!(CellValue::DateTime(dt).to_string(), "2025-03-09 14:05:00");
    }

    #[test]
    fn test_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::String(String::new()).is_empty());
        assert!(!CellValue::String("  ".to_string()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_is_falsy() {
        assert!(CellValue::Empty.is_falsy());
        assert!(CellValue::String(String::new()).is_falsy());
        assert!(CellValue::Number(0.0).is_falsy());
        assert!(CellValue::Bool(false).is_falsy());
        assert!(!CellValue::Number(0.1).is_falsy());
        assert!(!CellValue::Bool(true).is_falsy());
        assert!(!CellValue::String(" ".to_string()).is_falsy());
        assert!(!CellValue::String("0".to_string()).is_falsy());
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(CellValue::String("  1.1.1 \n".to_string()).trimmed(), "1.1.1");
        assert_eq!(CellValue::Number(7.0).trimmed(), "7");
    }

    #[test]
    fn test_default_item_has_fixed_fields() {
        let item = FrameworkItem::default();
        assert_eq!(item.status, "active");
        assert!(item.tags.is_empty());
        assert!(item.references.is_empty());
        assert!(item.compliance_mappings.is_empty());
    }
}
