//! fortressjson - Pure-Rust extractor for the FORTRESS framework workbook
//!
//! This crate reads a single worksheet of an XLSX workbook, locates the header
//! row by its `"Item Number"` marker, keeps only leaf-level items (identifiers
//! with at least two `.` separators such as `1.2.3`), maps the named columns into
//! a fixed record shape and writes the result as a JSON array.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fortressjson::ExtractorBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new().build()?;
//!
//!     // Read the workbook, extract leaf items and write them atomically
//!     let report = extractor.convert("Fortress_Framework_v9.xlsx", "fortressframework.json")?;
//!     println!("{} items from sheet '{}'", report.items.len(), report.sheet.name);
//!
//!     Ok(())
//! }
//! ```
//!
//! For in-memory workbooks, use `Cursor`:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use fortressjson::{to_json_string, ExtractorBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = ExtractorBuilder::new().build()?;
//! let excel_data: Vec<u8> = vec![]; // Your Excel file bytes
//! let items = extractor.extract_reader(Cursor::new(excel_data))?;
//! println!("{}", to_json_string(&items)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use fortressjson::{ExtractorBuilder, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new()
//!         .with_sheet_selector(SheetSelector::Index(0))
//!         .with_header_marker("Control ID")
//!         .with_header_scan_rows(8)
//!         .build()?;
//!
//!     let items = extractor.extract_file("controls.xlsx")?;
//!     println!("{} items", items.len());
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod classify;
mod error;
mod grid;
mod header;
mod output;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{
    SheetSelector, DEFAULT_FALLBACK_HEADER_ROW, DEFAULT_HEADER_MARKER, DEFAULT_HEADER_SCAN_ROWS,
    DEFAULT_MIN_ITEM_SEPARATORS, DEFAULT_SHEET_NAME,
};
pub use builder::{ConversionReport, Extraction, Extractor, ExtractorBuilder};
pub use classify::{is_leaf_item_number, split_compliance_mappings};
pub use error::ConvertError;
pub use grid::Grid;
pub use header::HeaderRow;
pub use output::{to_json_string, JsonFormatter};
pub use types::{CellValue, FrameworkItem, SheetInfo, DEFAULT_STATUS};
