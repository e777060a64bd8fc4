//! Grid Module
//!
//! ワークシートのセル値を1始まりの絶対座標で参照できるグリッド構造を提供する。
//! 値を持つセルのみを保持するため、離れた位置に孤立したセルがあっても
//! メモリ使用量はセル数に比例します。

use std::collections::BTreeMap;

use calamine::DataRef;

use crate::types::CellValue;

/// 範囲外アクセス時に返す空セル
static EMPTY: CellValue = CellValue::Empty;

/// シートのセル値を保持するグリッド
///
/// 行・列とも1始まりで、`(1, 1)` がA1セルに対応します。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    /// 値を持つセル（キーは1始まりの(行, 列)）
    cells: BTreeMap<(u32, u32), CellValue>,

    /// 最終行（1始まり）
    max_row: u32,

    /// 最終列（1始まり）
    max_column: u32,
}

impl Grid {
    /// 行データから直接グリッドを構築
    ///
    /// 1つ目の行が1行目、各行の1つ目の要素がA列になります。
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let cells = rows.into_iter().enumerate().flat_map(|(r, row)| {
            row.into_iter()
                .enumerate()
                .map(move |(c, value)| ((r as u32, c as u32), value))
        });
        Self::from_cells(cells)
    }

    /// 0始まりの絶対座標とセル値の組からグリッドを構築
    ///
    /// 空セルは保持せず、最終行・最終列は値を持つセルのみから求めます。
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = ((u32, u32), CellValue)>,
    {
        let mut grid = Self::default();
        for ((row, column), value) in cells {
            grid.insert(row.saturating_add(1), column.saturating_add(1), value);
        }
        grid
    }

    /// 1始まりの座標にセル値を設定
    fn insert(&mut self, row: u32, column: u32, value: CellValue) {
        if value.is_empty() {
            return;
        }
        self.max_row = self.max_row.max(row);
        self.max_column = self.max_column.max(column);
        self.cells.insert((row, column), value);
    }

    /// 最終行（1始まり）
    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    /// 最終列（1始まり）
    pub fn max_column(&self) -> u32 {
        self.max_column
    }

    /// 1始まりの座標でセル値を取得
    ///
    /// 値のないセルや範囲外（0を含む）の座標には空セルを返します。
    pub fn cell(&self, row: u32, column: u32) -> &CellValue {
        self.cells.get(&(row, column)).unwrap_or(&EMPTY)
    }
}

/// calamineのセル値をCellValueに変換
pub(crate) fn convert_data_ref(data: &DataRef<'_>) -> CellValue {
    match data {
        DataRef::Int(i) => CellValue::Number(*i as f64),
        DataRef::Float(f) => CellValue::Number(*f),
        DataRef::String(s) => CellValue::String(s.clone()),
        DataRef::SharedString(s) => CellValue::String((*s).to_string()),
        DataRef::Bool(b) => CellValue::Bool(*b),
        DataRef::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::DateTime(ndt),
            None => CellValue::Number(dt.as_f64()),
        },
        DataRef::DateTimeIso(s) | DataRef::DurationIso(s) => CellValue::String(s.clone()),
        DataRef::Error(e) => CellValue::Error(e.to_string()),
        _ => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::String(s.to_string())
    }

    #[test]
    fn test_from_rows_extents() {
        let grid = Grid::from_rows(vec![vec![text("a")], vec![text("b"), text("c")]]);

        assert_eq!(grid.max_row(), 2);
        assert_eq!(grid.max_column(), 2);
        assert_eq!(grid.cell(1, 2), &CellValue::Empty);
        assert_eq!(grid.cell(2, 2), &text("c"));
    }

    #[test]
    fn test_cell_is_one_based() {
        let grid = Grid::from_rows(vec![vec![text("A1"), text("B1")], vec![text("A2")]]);

        assert_eq!(grid.cell(1, 1), &text("A1"));
        assert_eq!(grid.cell(1, 2), &text("B1"));
        assert_eq!(grid.cell(2, 1), &text("A2"));
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let grid = Grid::from_rows(vec![vec![text("x")]]);

        assert_eq!(grid.cell(0, 1), &CellValue::Empty);
        assert_eq!(grid.cell(1, 0), &CellValue::Empty);
        assert_eq!(grid.cell(5, 5), &CellValue::Empty);
    }

    #[test]
    fn test_from_cells_keeps_absolute_coordinates() {
        // C3とD4のみ
        let grid = Grid::from_cells(vec![
            ((2, 2), text("Item Number")),
            ((3, 3), CellValue::Number(2.5)),
        ]);

        assert_eq!(grid.max_row(), 4);
        assert_eq!(grid.max_column(), 4);
        assert_eq!(grid.cell(1, 1), &CellValue::Empty);
        assert_eq!(grid.cell(3, 3), &text("Item Number"));
        assert_eq!(grid.cell(4, 4), &CellValue::Number(2.5));
    }

    #[test]
    fn test_far_offset_cell_is_sparse() {
        // XFD1048576（シートの最終セル）
        let grid = Grid::from_cells(vec![
            ((0, 0), text("A1")),
            ((1_048_575, 16_383), text("stray")),
        ]);

        assert_eq!(grid.max_row(), 1_048_576);
        assert_eq!(grid.max_column(), 16_384);
        assert_eq!(grid.cells.len(), 2);
        assert_eq!(grid.cell(1_048_576, 16_384), &text("stray"));
        assert_eq!(grid.cell(500_000, 1), &CellValue::Empty);
    }

    #[test]
    fn test_empty_cells_do_not_extend_grid() {
        let grid = Grid::from_cells(vec![
            ((0, 0), text("x")),
            ((9, 9), CellValue::Empty),
            ((4, 4), text("")),
        ]);

        assert_eq!(grid.max_row(), 1);
        assert_eq!(grid.max_column(), 1);
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::from_cells(Vec::new());

        assert_eq!(grid.max_row(), 0);
        assert_eq!(grid.max_column(), 0);
        assert_eq!(grid, Grid::from_rows(Vec::new()));
    }

    #[test]
    fn test_convert_data_ref_variants() {
        assert_eq!(convert_data_ref(&DataRef::Int(4)), CellValue::Number(4.0));
        assert_eq!(convert_data_ref(&DataRef::Bool(true)), CellValue::Bool(true));
        assert_eq!(
            convert_data_ref(&DataRef::SharedString("shared")),
            text("shared")
        );
        assert_eq!(convert_data_ref(&DataRef::Empty), CellValue::Empty);
        assert_eq!(
            convert_data_ref(&DataRef::Error(calamine::CellErrorType::Div0)),
            CellValue::Error("#DIV/0!".to_string())
        );
    }
}
