//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーメッセージのフォーマットと変換を実現する。

use std::path::PathBuf;

use thiserror::Error;

/// fortressjsonクレート全体で使用するエラー型
///
/// ワークブックの読み込みからJSONの書き出しまで、変換パイプラインの
/// どの段階で失敗しても、このエラー型で呼び出し元に報告されます。
/// 行単位の異常（列の欠落、階層番号の不正など）はエラーではなく、
/// スキップまたは空文字列として扱われます。
///
/// # エラーの種類
///
/// - `NotFound`: 入力ファイルが存在しない
/// - `Load`: 入力ファイルは存在するが、ワークブックとして解析できない
/// - `Write`: 出力ファイルの書き込みに失敗した
/// - `Config`: ビルダー設定の検証に失敗した
///
/// # 使用例
///
/// ```rust,no_run
/// use fortressjson::{ConvertError, ExtractorBuilder};
///
/// # fn main() -> Result<(), ConvertError> {
/// let extractor = ExtractorBuilder::new().build()?;
/// match extractor.extract_file("missing.xlsx") {
///     Err(ConvertError::NotFound(path)) => println!("{} not found", path.display()),
///     Err(e) => return Err(e),
///     Ok(items) => println!("{} items", items.len()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 入力ファイルが存在しない
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// ワークブックの読み込み・解析に失敗した
    ///
    /// 破損したファイル、XLSX以外の形式、シートが存在しない、
    /// 入力サイズ制限の超過などが原因となります。
    #[error("Failed to load workbook: {0}")]
    Load(String),

    /// 出力ファイルの書き込みに失敗した
    ///
    /// 権限不足、ディスク容量不足、無効なパスなどが原因となります。
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// 書き込み先のパス
        path: PathBuf,
        /// 元のI/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtractorBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<calamine::Error> for ConvertError {
    fn from(err: calamine::Error) -> Self {
        ConvertError::Load(err.to_string())
    }
}

impl From<calamine::XlsxError> for ConvertError {
    fn from(err: calamine::XlsxError) -> Self {
        ConvertError::Load(err.to_string())
    }
}

impl From<zip::result::ZipError> for ConvertError {
    fn from(err: zip::result::ZipError) -> Self {
        ConvertError::Load(format!("ZIP archive error: {}", err))
    }
}

impl From<quick_xml::Error> for ConvertError {
    fn from(err: quick_xml::Error) -> Self {
        ConvertError::Load(format!("XML parse error: {}", err))
    }
}
