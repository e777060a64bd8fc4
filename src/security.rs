//! Security Module
//!
//! 入力ワークブックに対する制限を定義するモジュール。
//! 巨大ファイルやZIP bomb、パストラバーサルを含むアーカイブを解析前に拒否します。

/// セキュリティ設定
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB
    pub max_input_file_size: u64,
    /// ZIPアーカイブ内の最大エントリ数
    /// デフォルト: 10000
    pub max_file_count: usize,
    /// 単一エントリの最大展開サイズ（バイト）
    /// デフォルト: 100MB
    pub max_entry_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648,
            max_file_count: 10_000,
            max_entry_size: 104_857_600,
        }
    }
}

/// ZIPエントリ名を検証
///
/// 絶対パス、ドライブレター付きパス、`..`セグメント、バックスラッシュを含む
/// エントリ名を拒否します。
///
/// # 戻り値
///
/// * `Ok(())` - エントリ名が安全な場合
/// * `Err(String)` - 拒否理由
pub(crate) fn validate_entry_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("empty entry name".to_string());
    }

    if name.contains('\\') {
        return Err(format!("backslash in entry name: {}", name));
    }

    if name.starts_with('/') {
        return Err(format!("absolute entry name: {}", name));
    }

    let mut chars = name.chars();
    if let (Some(drive), Some(':')) = (chars.next(), chars.next()) {
        if drive.is_ascii_alphabetic() {
            return Err(format!("drive-qualified entry name: {}", name));
        }
    }

    if name.split('/').any(|segment| segment == "..") {
        return Err(format!("path traversal in entry name: {}", name));
    }

    Ok(())
}
