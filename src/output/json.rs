//! JSON Output Implementation
//!
//! 2スペースインデントで整形し、非ASCII文字はエスケープせずにそのまま出力します。

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::ConvertError;
use crate::types::FrameworkItem;

/// JSON形式のフォーマッター
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// 項目列をJSON配列として書き出す
    ///
    /// 末尾に改行は付けません。
    pub fn render<W: Write>(&self, items: &[FrameworkItem], writer: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, items)?;
        writer.flush()
    }
}

/// 項目列をJSON文字列に変換
///
/// ファイルに書き出す内容と同じ文字列を返します。
pub fn to_json_string(items: &[FrameworkItem]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(items)
}

/// 項目列をファイルに書き出す
///
/// 出力先と同じディレクトリに一時ファイルを作成して書き込み、完了後に
/// リネームで置き換えます。失敗した場合、一時ファイルは削除され、
/// 既存の出力ファイルはそのまま残ります。
pub(crate) fn write_json_file(items: &[FrameworkItem], path: &Path) -> Result<(), ConvertError> {
    let write_error = |source: io::Error| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        JsonFormatter
            .render(items, &mut writer)
            .map_err(write_error)?;
    }
    temp.persist(path).map_err(|e| write_error(e.error))?;

    info!(path = %path.display(), items = items.len(), "wrote JSON output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> FrameworkItem {
        FrameworkItem {
            item_number: "1.1.1".to_string(),
            item_description: "Vérifier l'accès — 管理".to_string(),
            compliance_mappings: vec!["NIST".to_string(), "ISO".to_string()],
            ..FrameworkItem::default()
        }
    }

    #[test]
    fn test_empty_sequence_renders_empty_array() {
        assert_eq!(to_json_string(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_non_ascii_is_preserved() {
        let json = to_json_string(&[sample_item()]).unwrap();
        assert!(json.contains("Vérifier l'accès — 管理"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_two_space_indent_and_field_order() {
        let json = to_json_string(&[sample_item()]).unwrap();
        assert!(json.starts_with("[\n  {\n    \"item_number\": \"1.1.1\","));

        let order = [
            "item_number",
            "item_description",
            "super_section",
            "parent_section",
            "tactic",
            "technique",
            "procedure",
            "compliance_rationale",
            "test_method",
            "compliance_mappings",
            "finding",
            "recommendation",
            "status",
            "tags",
            "references",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|key| json.find(&format!("\"{}\"", key)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fortressframework.json");
        let items = vec![sample_item(), FrameworkItem::default()];

        write_json_file(&items, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<FrameworkItem> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, items);
    }

    #[test]
    fn test_string_matches_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let items = vec![sample_item()];

        write_json_file(&items, &path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            to_json_string(&items).unwrap()
        );
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale content that is longer than the new output").unwrap();

        write_json_file(&[], &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("out.json");

        match write_json_file(&[], &path) {
            Err(ConvertError::Write { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected Write error, got {:?}", other),
        }
    }
}
