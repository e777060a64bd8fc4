//! Output Module
//!
//! 抽出した項目をJSON配列として出力するモジュール。

mod json;

pub use json::{to_json_string, JsonFormatter};
pub(crate) use json::write_json_file;
