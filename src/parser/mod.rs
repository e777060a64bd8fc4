//! Parser Module
//!
//! calamineを使用したワークブック読み込みと、XLSX内部XMLからのメタデータ抽出。

mod metadata;
mod workbook;

pub(crate) use metadata::WorkbookMetadata;
pub(crate) use workbook::{load_sheet, load_sheet_from_reader};
