//! Header Locator Module
//!
//! シート先頭の数行からヘッダー行を探索し、列ラベルを抽出するモジュール。

use crate::grid::Grid;

/// ヘッダー行の探索設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderPolicy {
    /// 1列目に含まれるべきマーカー文字列
    pub marker: String,
    /// 探索する行数（1行目から）
    pub scan_rows: u32,
    /// マーカーが見つからない場合に使用する行（1始まり）
    pub fallback_row: u32,
}

/// 検出されたヘッダー行と列ラベル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    /// ヘッダー行のインデックス（1始まり）
    pub row: u32,
    /// 列ラベル（1列目から最終列まで）
    pub labels: Vec<String>,
}

impl HeaderRow {
    /// グリッドからヘッダー行を検出
    ///
    /// 1行目から`scan_rows`行目までを順に調べ、1列目の文字列表現に
    /// マーカーを含む最初の行をヘッダー行とします。見つからない場合は
    /// `fallback_row`を使用します（エラーにはしません）。
    pub(crate) fn locate(grid: &Grid, policy: &HeaderPolicy) -> Self {
        let row = (1..=policy.scan_rows)
            .find(|&row| {
                let first = grid.cell(row, 1);
                !first.is_falsy() && first.to_string().contains(policy.marker.as_str())
            })
            .unwrap_or(policy.fallback_row);

        let labels = (1..=grid.max_column())
            .map(|column| {
                let cell = grid.cell(row, column);
                if cell.is_falsy() {
                    format!("Column_{}", column)
                } else {
                    cell.trimmed()
                }
            })
            .collect();

        Self { row, labels }
    }

    /// ラベルに一致する列（1始まり）を取得
    ///
    /// 同じラベルが複数ある場合は最も右の列を返します。
    pub fn column_of(&self, label: &str) -> Option<u32> {
        self.labels
            .iter()
            .rposition(|l| l == label)
            .map(|idx| idx as u32 + 1)
    }
}
