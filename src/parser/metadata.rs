//! XML Metadata Parser Module
//!
//! XLSX内部のXMLファイルから、calamineで取得できない情報を抽出するモジュール。
//! 現在はアクティブシート（`<workbookView activeTab="N"/>`）の判定に使用します。

use std::io::{Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::ConvertError;
use crate::security::{validate_entry_name, SecurityConfig};

/// ワークブックのメタデータ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct WorkbookMetadata {
    /// アクティブシートのインデックス（0始まり、workbook.xml記載順）
    pub active_tab: usize,
}

impl WorkbookMetadata {
    /// XLSXファイル（ZIPアーカイブ）からメタデータを解析
    ///
    /// アーカイブの各エントリをセキュリティ設定に照らして検証した後、
    /// `xl/workbook.xml` を読み込みます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookMetadata)` - 解析に成功した場合（workbook.xmlがない場合はデフォルト値）
    /// * `Err(ConvertError::Load)` - アーカイブが不正、または制限に違反した場合
    pub fn parse<R: Read + Seek>(xlsx_reader: R) -> Result<Self, ConvertError> {
        let security = SecurityConfig::default();
        let mut archive = ZipArchive::new(xlsx_reader)?;

        if archive.len() > security.max_file_count {
            return Err(ConvertError::Load(format!(
                "ZIP archive contains too many files: {} (max: {})",
                archive.len(),
                security.max_file_count
            )));
        }

        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;
            validate_entry_name(entry.name())
                .map_err(|e| ConvertError::Load(format!("Invalid ZIP entry: {}", e)))?;

            if entry.size() > security.max_entry_size {
                return Err(ConvertError::Load(format!(
                    "ZIP entry '{}' exceeds maximum size: {} bytes (max: {} bytes)",
                    entry.name(),
                    entry.size(),
                    security.max_entry_size
                )));
            }
        }

        let xml_content = {
            let mut workbook_file = match archive.by_name("xl/workbook.xml") {
                Ok(file) => file,
                Err(_) => return Ok(Self::default()),
            };
            let mut buf = Vec::new();
            workbook_file
                .read_to_end(&mut buf)
                .map_err(|e| ConvertError::Load(format!("Failed to read workbook.xml: {}", e)))?;
            buf
        };

        Ok(Self {
            active_tab: parse_active_tab(&xml_content)?,
        })
    }
}

/// workbook.xmlから`activeTab`属性を読み取る
///
/// 最初の`workbookView`要素のみを対象とし、属性がない場合は0を返します。
fn parse_active_tab(xml_content: &[u8]) -> Result<usize, ConvertError> {
    let mut reader = Reader::from_reader(xml_content);
    reader.trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            // workbookViewは通常自己終了タグ（Event::Empty）
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"workbookView" => {
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| {
                        ConvertError::Load(format!("XML attribute error: {}", e))
                    })?;
                    if attr.key.local_name().as_ref() == b"activeTab" {
                        let value = std::str::from_utf8(&attr.value)
                            .map_err(|e| ConvertError::Load(format!("UTF-8 error: {}", e)))?;
                        return Ok(value.trim().parse().unwrap_or(0));
                    }
                }
                return Ok(0);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(0)
}
