//! Row Classifier & Field Mapper
//!
//! ヘッダー行以降のデータ行から末端項目のみを抽出し、固定スキーマの
//! `FrameworkItem`に変換するモジュール。
//!
//! 列の対応関係は`COLUMN_MAP`に静的に宣言し、ヘッダー検出後に一度だけ
//! 列番号へ解決します。ヘッダーに存在しないラベルは空文字列として扱います。

use tracing::debug;

use crate::grid::Grid;
use crate::header::HeaderRow;
use crate::types::FrameworkItem;

/// 出力レコードの文字列フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    ItemNumber,
    ItemDescription,
    SuperSection,
    ParentSection,
    Tactic,
    Technique,
    Procedure,
    ComplianceRationale,
    TestMethod,
    MappedStandards,
    Finding,
    Recommendation,
}

/// ヘッダーラベルと出力フィールドの対応表
pub(crate) const COLUMN_MAP: &[(&str, Field)] = &[
    ("Item Number", Field::ItemNumber),
    ("Item Description", Field::ItemDescription),
    ("Super Section", Field::SuperSection),
    ("Parent Section", Field::ParentSection),
    ("Tactic (Goal)", Field::Tactic),
    ("Technique (How it's done)", Field::Technique),
    ("Procedure (Example)", Field::Procedure),
    ("Why (Compliance Rationale)", Field::ComplianceRationale),
    ("How (Test Method)", Field::TestMethod),
    ("Mapped Standards", Field::MappedStandards),
    ("Finding", Field::Finding),
    ("Recommendation", Field::Recommendation),
];

/// 1行分の生データ（ヘッダーラベル順に整列した、trim済みの文字列）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawRow {
    values: Vec<String>,
}

impl RawRow {
    /// グリッドの1行を読み込む
    ///
    /// ヘッダーラベルの数だけ列を読み、空セルは空文字列とします。
    pub fn read(grid: &Grid, row: u32, label_count: usize) -> Self {
        let values = (1..=label_count as u32)
            .map(|column| {
                let cell = grid.cell(row, column);
                if cell.is_empty() {
                    String::new()
                } else {
                    cell.trimmed()
                }
            })
            .collect();

        Self { values }
    }

    /// 1始まりの列番号で値を取得
    fn get(&self, column: u32) -> &str {
        column
            .checked_sub(1)
            .and_then(|idx| self.values.get(idx as usize))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// `COLUMN_MAP`をヘッダー行に対して解決した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnBindings {
    /// (フィールド, 列番号)。ラベルが見つからない場合はNone
    bindings: Vec<(Field, Option<u32>)>,
}

impl ColumnBindings {
    /// ヘッダー行から列番号を解決
    ///
    /// `item_number`フィールドは`item_number_label`の列に対応付けます。
    pub fn resolve(header: &HeaderRow, item_number_label: &str) -> Self {
        let bindings = COLUMN_MAP
            .iter()
            .map(|&(label, field)| {
                let label = match field {
                    Field::ItemNumber => item_number_label,
                    _ => label,
                };
                let column = header.column_of(label);
                if column.is_none() {
                    debug!(label, "header label not present, field defaults to empty");
                }
                (field, column)
            })
            .collect();

        Self { bindings }
    }

    /// 生データからフィールド値を取得
    fn value<'a>(&self, raw: &'a RawRow, field: Field) -> &'a str {
        self.bindings
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, column)| *column)
            .map(|column| raw.get(column))
            .unwrap_or("")
    }

    /// 生データを出力レコードに変換
    pub fn map(&self, raw: &RawRow) -> FrameworkItem {
        let text = |field| self.value(raw, field).to_string();

        FrameworkItem {
            item_number: text(Field::ItemNumber),
            item_description: text(Field::ItemDescription),
            super_section: text(Field::SuperSection),
            parent_section: text(Field::ParentSection),
            tactic: text(Field::Tactic),
            technique: text(Field::Technique),
            procedure: text(Field::Procedure),
            compliance_rationale: text(Field::ComplianceRationale),
            test_method: text(Field::TestMethod),
            compliance_mappings: split_compliance_mappings(self.value(raw, Field::MappedStandards)),
            finding: text(Field::Finding),
            recommendation: text(Field::Recommendation),
            ..FrameworkItem::default()
        }
    }
}

/// 項目番号が末端項目を表すかを判定
///
/// `.`の数が`min_separators`以上であれば末端項目とします（例: `1.2.3`）。
pub fn is_leaf_item_number(item_number: &str, min_separators: usize) -> bool {
    !item_number.is_empty() && item_number.matches('.').count() >= min_separators
}

/// カンマ区切りの準拠規格を分割
///
/// 各要素をtrimし、空になった要素は除外します。
pub fn split_compliance_mappings(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// ヘッダー行以降のデータ行を分類し、末端項目を抽出
///
/// 1列目が空（または0、`FALSE`）の行、および`.`の数が`min_separators`未満の行
/// （セクション見出し）はスキップします。どちらもエラーにはしません。
pub(crate) fn classify_rows(
    grid: &Grid,
    header: &HeaderRow,
    item_number_label: &str,
    min_separators: usize,
) -> Vec<FrameworkItem> {
    let bindings = ColumnBindings::resolve(header, item_number_label);
    let mut items = Vec::new();

    for row in header.row.saturating_add(1)..=grid.max_row() {
        let first = grid.cell(row, 1);
        if first.is_falsy() {
            continue;
        }

        let item_number = first.trimmed();
        if !is_leaf_item_number(&item_number, min_separators) {
            debug!(row, item_number = %item_number, "skipping section heading");
            continue;
        }

        let raw = RawRow::read(grid, row, header.labels.len());
        items.push(bindings.map(&raw));
    }

    items
}
