//! Builder Module
//!
//! Fluent Builder APIを提供し、`Extractor`インスタンスを段階的に構築する。
//! `Extractor`は読み込み・ヘッダー検出・行分類・JSON出力の各段階を順に実行します。

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::api::{
    SheetSelector, DEFAULT_FALLBACK_HEADER_ROW, DEFAULT_HEADER_MARKER, DEFAULT_HEADER_SCAN_ROWS,
    DEFAULT_MIN_ITEM_SEPARATORS,
};
use crate::classify::classify_rows;
use crate::error::ConvertError;
use crate::grid::Grid;
use crate::header::{HeaderPolicy, HeaderRow};
use crate::output::write_json_file;
use crate::parser::{load_sheet, load_sheet_from_reader};
use crate::types::{FrameworkItem, SheetInfo};

/// 抽出処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ExtractionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// ヘッダー行の探索設定
    pub header: HeaderPolicy,

    /// 末端項目と判定する区切り文字の最小数
    pub min_item_separators: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::default(),
            header: HeaderPolicy {
                marker: DEFAULT_HEADER_MARKER.to_string(),
                scan_rows: DEFAULT_HEADER_SCAN_ROWS,
                fallback_row: DEFAULT_FALLBACK_HEADER_ROW,
            },
            min_item_separators: DEFAULT_MIN_ITEM_SEPARATORS,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use fortressjson::{ExtractorBuilder, SheetSelector};
///
/// # fn main() -> Result<(), fortressjson::ConvertError> {
/// let extractor = ExtractorBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Controls".to_string()))
///     .with_header_scan_rows(6)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ExtractorBuilder {
    /// 内部設定（構築中）
    config: ExtractionConfig,
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: "Fortress Framework"、なければアクティブシート
    /// - ヘッダーマーカー: "Item Number"
    /// - ヘッダー探索行数: 4
    /// - フォールバックのヘッダー行: 2
    /// - 末端項目の区切り文字数: 2
    pub fn new() -> Self {
        Self::default()
    }

    /// 抽出対象のシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// ヘッダー行を識別するマーカー文字列を指定する
    ///
    /// `item_number`はこのマーカーと一致するラベルの列から読み取ります。
    pub fn with_header_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.header.marker = marker.into();
        self
    }

    /// ヘッダー行を探索する行数を指定する
    pub fn with_header_scan_rows(mut self, rows: u32) -> Self {
        self.config.header.scan_rows = rows;
        self
    }

    /// マーカーが見つからない場合のヘッダー行（1始まり）を指定する
    pub fn with_fallback_header_row(mut self, row: u32) -> Self {
        self.config.header.fallback_row = row;
        self
    }

    /// 末端項目と判定する区切り文字（`.`）の最小数を指定する
    pub fn with_min_item_separators(mut self, count: usize) -> Self {
        self.config.min_item_separators = count;
        self
    }

    /// 設定を検証し、`Extractor`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Extractor)`: 設定が有効な場合
    /// * `Err(ConvertError::Config)`: 設定が無効な場合
    ///
    /// # 発生し得るエラー
    ///
    /// * マーカー文字列が空
    /// * 探索行数、フォールバック行、区切り文字数のいずれかが0
    pub fn build(self) -> Result<Extractor, ConvertError> {
        let header = &self.config.header;

        if header.marker.trim().is_empty() {
            return Err(ConvertError::Config(
                "Header marker must not be empty".to_string(),
            ));
        }

        if header.scan_rows == 0 {
            return Err(ConvertError::Config(
                "Header scan rows must be at least 1".to_string(),
            ));
        }

        if header.fallback_row == 0 {
            return Err(ConvertError::Config(
                "Fallback header row is 1-based and must be at least 1".to_string(),
            ));
        }

        if self.config.min_item_separators == 0 {
            return Err(ConvertError::Config(
                "Minimum item separators must be at least 1".to_string(),
            ));
        }

        Ok(Extractor {
            config: self.config,
        })
    }
}

/// 1シート分の抽出結果
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// 検出したヘッダー行
    pub header: HeaderRow,
    /// 抽出した末端項目（シートの行順）
    pub items: Vec<FrameworkItem>,
}

/// 変換処理の結果報告
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    /// 読み込んだシートの情報
    pub sheet: SheetInfo,
    /// 検出したヘッダー行
    pub header: HeaderRow,
    /// 書き出した項目
    pub items: Vec<FrameworkItem>,
    /// 出力ファイルのパス
    pub output: PathBuf,
}

/// 抽出処理のファサード
///
/// # 処理フロー
///
/// 1. ワークブックを開き、対象シートのグリッドを構築
/// 2. ヘッダー行と列ラベルを検出
/// 3. データ行を分類し、末端項目を出力レコードに変換
/// 4. JSON配列として書き出し
///
/// いずれかの段階で失敗した場合、処理を中断してエラーを返します。
///
/// # 使用例
///
/// ```rust,no_run
/// use fortressjson::ExtractorBuilder;
///
/// # fn main() -> Result<(), fortressjson::ConvertError> {
/// let extractor = ExtractorBuilder::new().build()?;
/// let report = extractor.convert("Fortress_Framework_v9.xlsx", "fortressframework.json")?;
/// println!("{} items", report.items.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    /// 抽出設定
    config: ExtractionConfig,
}

impl Extractor {
    /// グリッドからヘッダーを検出し、末端項目を抽出する（段階2・3）
    pub fn extract_grid(&self, grid: &Grid) -> Extraction {
        let header = HeaderRow::locate(grid, &self.config.header);
        info!(
            header_row = header.row,
            columns = header.labels.len(),
            "located header row"
        );

        let items = classify_rows(
            grid,
            &header,
            self.config.header.marker.trim(),
            self.config.min_item_separators,
        );
        info!(items = items.len(), "extracted leaf items");

        Extraction { header, items }
    }

    /// ファイルから末端項目を抽出する
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<FrameworkItem>, ConvertError> {
        let (_, grid) = load_sheet(path, &self.config.sheet_selector)?;
        Ok(self.extract_grid(&grid).items)
    }

    /// リーダーから末端項目を抽出する
    ///
    /// メモリ上のワークブックには`Cursor`を使用してください。
    pub fn extract_reader<R: Read>(&self, reader: R) -> Result<Vec<FrameworkItem>, ConvertError> {
        let (_, grid) = load_sheet_from_reader(reader, &self.config.sheet_selector)?;
        Ok(self.extract_grid(&grid).items)
    }

    /// ワークブックを読み込み、抽出結果をJSONファイルに書き出す
    ///
    /// # 戻り値
    ///
    /// * `Ok(ConversionReport)` - 変換に成功した場合
    /// * `Err(ConvertError::NotFound)` - 入力ファイルが存在しない場合
    /// * `Err(ConvertError::Load)` - 入力ファイルを解析できない場合
    /// * `Err(ConvertError::Write)` - 出力ファイルを書き込めない場合
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConversionReport, ConvertError> {
        let output = output.as_ref();

        let (sheet, grid) = load_sheet(input, &self.config.sheet_selector)?;
        let Extraction { header, items } = self.extract_grid(&grid);
        write_json_file(&items, output)?;

        Ok(ConversionReport {
            sheet,
            header,
            items,
            output: output.to_path_buf(),
        })
    }
}
