//! Security Tests
//!
//! 不正なアーカイブが解析前に`Load`エラーとして拒否されることを検証します。

use std::io::{Cursor, Write};

use fortressjson::{ConvertError, ExtractorBuilder};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip_data = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_data));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }

        zip.finish().unwrap();
    }
    zip_data
}

fn extract(data: Vec<u8>) -> Result<usize, ConvertError> {
    ExtractorBuilder::new()
        .build()?
        .extract_reader(Cursor::new(data))
        .map(|items| items.len())
}

/// ZIP bomb攻撃のテスト: 大量のファイルを含むZIPアーカイブ
#[test]
fn test_too_many_entries() {
    let names: Vec<String> = (0..10_001).map(|i| format!("xl/file{}.xml", i)).collect();
    let entries: Vec<(&str, &[u8])> = names.iter().map(|n| (n.as_str(), &b"x"[..])).collect();

    match extract(build_zip(&entries)) {
        Err(ConvertError::Load(msg)) => assert!(msg.contains("too many files")),
        other => panic!("Expected Load error, got {:?}", other),
    }
}

/// パストラバーサル攻撃のテスト
#[test]
fn test_path_traversal_entry() {
    let data = build_zip(&[("../evil.xml", b"<x/>"), ("xl/workbook.xml", b"<workbook/>")]);

    match extract(data) {
        Err(ConvertError::Load(msg)) => assert!(msg.contains("Invalid ZIP entry")),
        other => panic!("Expected Load error, got {:?}", other),
    }
}

/// ZIPだがワークブックではないアーカイブ
#[test]
fn test_zip_without_workbook() {
    let data = build_zip(&[("readme.txt", b"hello")]);

    assert!(matches!(extract(data), Err(ConvertError::Load(_))));
}

/// ZIPでないバイト列
#[test]
fn test_not_a_zip() {
    let data = b"PK but not really a zip archive".to_vec();

    assert!(matches!(extract(data), Err(ConvertError::Load(_))));
}
