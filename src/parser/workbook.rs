//! Workbook Loader
//!
//! calamineを使用してワークブックを開き、対象シートを1つ選択してグリッドを構築する。

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Reader, Sheets, Xlsx, XlsxError};
use tracing::{debug, info};

use crate::api::SheetSelector;
use crate::error::ConvertError;
use crate::grid::{convert_data_ref, Grid};
use crate::parser::WorkbookMetadata;
use crate::security::SecurityConfig;
use crate::types::SheetInfo;

/// ワークブックパーサー
///
/// calamineのラッパーとして、シート選択とグリッド読み込みを提供します。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック（XLSX形式のみサポート）
    workbook: Xlsx<Cursor<Vec<u8>>>,
    /// workbook.xmlから取得したメタデータ
    metadata: WorkbookMetadata,
}

impl WorkbookParser {
    /// パスからワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(ConvertError::NotFound)` - ファイルが存在しない場合
    /// * `Err(ConvertError::Load)` - その他の読み込み・解析エラー
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConvertError::NotFound(path.to_path_buf()));
        }

        // ハンドルはこのスコープ内で解放される
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConvertError::NotFound(path.to_path_buf()),
            _ => ConvertError::Load(format!("Failed to open {}: {}", path.display(), e)),
        })?;

        Self::open(file)
    }

    /// リーダーからワークブックを開く
    ///
    /// 入力全体をメモリに読み込み、サイズ制限を確認した後に
    /// メタデータとcalamineのワークブックを構築します。
    pub fn open<R: Read>(mut reader: R) -> Result<Self, ConvertError> {
        let security = SecurityConfig::default();

        let mut buffer = Vec::new();
        let bytes_read = reader
            .by_ref()
            .take(security.max_input_file_size + 1)
            .read_to_end(&mut buffer)
            .map_err(|e| ConvertError::Load(format!("Failed to read input: {}", e)))?;

        if bytes_read as u64 > security.max_input_file_size {
            return Err(ConvertError::Load(format!(
                "Input file size exceeds maximum: {} bytes",
                security.max_input_file_size
            )));
        }

        Self::open_buffer(buffer)
    }

    /// メモリ上のバイト列からワークブックを開く
    fn open_buffer(buffer: Vec<u8>) -> Result<Self, ConvertError> {
        let metadata = WorkbookMetadata::parse(Cursor::new(buffer.as_slice()))?;

        let workbook = match open_workbook_auto_from_rs(Cursor::new(buffer))? {
            Sheets::Xlsx(workbook) => workbook,
            _ => {
                return Err(ConvertError::Load(
                    "Only XLSX format is supported".to_string(),
                ))
            }
        };

        Ok(Self { workbook, metadata })
    }

    /// すべてのシート名を取得（ワークブック記載順）
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// アクティブシート名を取得
    ///
    /// `activeTab`が範囲外の場合は先頭シートを返します。
    pub fn active_sheet_name(&self) -> Option<String> {
        let names = self.sheet_names();
        names
            .get(self.metadata.active_tab)
            .or_else(|| names.first())
            .cloned()
    }

    /// シート選択方式に基づいてシートを1つ選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(ConvertError::Load)` - シートが存在しない、または指定が範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, ConvertError> {
        let names = self.sheet_names();
        if names.is_empty() {
            return Err(ConvertError::Load("Workbook contains no sheets".to_string()));
        }

        let missing = |what: String| ConvertError::Load(format!("Sheet {} not found", what));

        match selector {
            SheetSelector::PreferredOrActive(preferred) => {
                if names.iter().any(|n| n == preferred) {
                    Ok(preferred.clone())
                } else {
                    debug!(preferred = %preferred, "preferred sheet missing, using active sheet");
                    self.active_sheet_name()
                        .ok_or_else(|| missing("(active)".to_string()))
                }
            }
            SheetSelector::Active => self
                .active_sheet_name()
                .ok_or_else(|| missing("(active)".to_string())),
            SheetSelector::Name(name) => {
                if names.contains(name) {
                    Ok(name.clone())
                } else {
                    Err(missing(format!("'{}'", name)))
                }
            }
            SheetSelector::Index(index) => names.get(*index).cloned().ok_or_else(|| {
                ConvertError::Load(format!(
                    "Sheet index {} is out of range (total: {})",
                    index,
                    names.len()
                ))
            }),
        }
    }

    /// シートを読み込んでグリッドを構築
    ///
    /// セルをストリームで読み、値を持つセルのみをグリッドに格納します。
    /// ワークシートでないシート（グラフシートなど）は空のグリッドになります。
    pub fn load_grid(&mut self, sheet_name: &str) -> Result<(SheetInfo, Grid), ConvertError> {
        let mut cells = Vec::new();
        match self.workbook.worksheet_cells_reader(sheet_name) {
            Ok(mut reader) => {
                while let Some(cell) = reader.next_cell()? {
                    let value = convert_data_ref(cell.get_value());
                    if !value.is_empty() {
                        cells.push((cell.get_position(), value));
                    }
                }
            }
            Err(XlsxError::NotAWorksheet(kind)) => {
                debug!(sheet = %sheet_name, kind = %kind, "sheet is not a worksheet");
            }
            Err(e) => return Err(e.into()),
        }
        let grid = Grid::from_cells(cells);

        let info = SheetInfo {
            name: sheet_name.to_string(),
            max_row: grid.max_row(),
            max_column: grid.max_column(),
        };

        info!(
            sheet = %info.name,
            rows = info.max_row,
            columns = info.max_column,
            "loaded worksheet"
        );

        Ok((info, grid))
    }
}

/// パスからワークブックを開き、選択したシートのグリッドを返す
pub(crate) fn load_sheet<P: AsRef<Path>>(
    path: P,
    selector: &SheetSelector,
) -> Result<(SheetInfo, Grid), ConvertError> {
    let mut parser = WorkbookParser::open_path(path)?;
    let sheet_name = parser.select_sheet(selector)?;
    parser.load_grid(&sheet_name)
}

/// リーダーからワークブックを開き、選択したシートのグリッドを返す
pub(crate) fn load_sheet_from_reader<R: Read>(
    reader: R,
    selector: &SheetSelector,
) -> Result<(SheetInfo, Grid), ConvertError> {
    let mut parser = WorkbookParser::open(reader)?;
    let sheet_name = parser.select_sheet(selector)?;
    parser.load_grid(&sheet_name)
}

// 実際のXLSXファイルが必要なテストは統合テスト（tests/）で実装します。
