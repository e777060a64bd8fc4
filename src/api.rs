//! Public API Types
//!
//! 公開APIで使用する列挙型と既定値を定義するモジュール。

/// 既定で優先するシート名
pub const DEFAULT_SHEET_NAME: &str = "Fortress Framework";

/// ヘッダー行を識別するマーカー文字列の既定値
pub const DEFAULT_HEADER_MARKER: &str = "Item Number";

/// ヘッダー行を探索する行数の既定値（1行目から数える）
pub const DEFAULT_HEADER_SCAN_ROWS: u32 = 4;

/// マーカーが見つからない場合に使用するヘッダー行の既定値
pub const DEFAULT_FALLBACK_HEADER_ROW: u32 = 2;

/// 末端項目と判定するために必要な区切り文字（`.`）の最小数の既定値
pub const DEFAULT_MIN_ITEM_SEPARATORS: usize = 2;

/// シート選択方式
///
/// 抽出対象のワークシートを1つ選択する方法を指定します。
///
/// # 使用例
///
/// ```rust
/// use fortressjson::{ExtractorBuilder, SheetSelector};
///
/// // 2番目のシートを厳密に指定
/// let builder = ExtractorBuilder::new()
///     .with_sheet_selector(SheetSelector::Index(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 指定名のシートがあればそれを、なければアクティブシートを使用（既定）
    PreferredOrActive(String),

    /// ワークブックのアクティブシートを使用
    Active,

    /// 名前で指定（存在しない場合はエラー）
    Name(String),

    /// インデックスで指定（0始まり、範囲外の場合はエラー）
    Index(usize),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::PreferredOrActive(DEFAULT_SHEET_NAME.to_string())
    }
}
