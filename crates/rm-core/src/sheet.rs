//! 原始表格模型（檔案讀取層與計算核心之間的邊界）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 物料編號欄位的標準標籤
pub const RM_CODE_LABEL: &str = "RM Code";

/// 物料名稱欄位的標準標籤
pub const RM_NAME_LABEL: &str = "RM Name";

/// 最小訂購量欄位的標準標籤
pub const MIN_ORDER_QTY_LABEL: &str = "Min Order Qty";

/// 最大訂購量欄位的標準標籤
pub const MAX_ORDER_QTY_LABEL: &str = "Max Order Qty";

/// 原始表格
///
/// 所有儲存格都保留為去除前後空白的字串，空字串代表缺值。
/// 消耗表有兩列表頭（月份、工廠），主檔只有一列。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSheet {
    /// 表頭列
    pub header_rows: Vec<Vec<String>>,

    /// 資料列
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    /// 創建新的原始表格
    pub fn new(header_rows: Vec<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self { header_rows, rows }
    }

    /// 從字串切片建立（測試與示例用）
    pub fn from_strs(header_rows: &[&[&str]], rows: &[&[&str]]) -> Self {
        let convert = |lines: &[&[&str]]| -> Vec<Vec<String>> {
            lines
                .iter()
                .map(|line| line.iter().map(|cell| cell.trim().to_string()).collect())
                .collect()
        };
        Self::new(convert(header_rows), convert(rows))
    }

    /// 欄位數（取表頭與資料列中最寬者）
    pub fn width(&self) -> usize {
        self.header_rows
            .iter()
            .chain(self.rows.iter())
            .map(|r| r.len())
            .max()
            .unwrap_or(0)
    }

    /// 是否沒有任何資料列
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 尋找標籤所在欄位（搜尋所有表頭列）
    pub fn find_column(&self, label: &str) -> Option<usize> {
        let wanted = normalize_label(label);
        self.header_rows.iter().find_map(|header| {
            header
                .iter()
                .position(|cell| normalize_label(cell) == wanted)
        })
    }

    /// 讀取儲存格，超出範圍視為空
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

/// 標籤正規化：去除空白、底線、連字號並轉小寫
///
/// `RM Code`、`rm_code`、`RMCode` 皆視為同一標籤。
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// 數量儲存格的解析結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedQuantity {
    /// 空儲存格
    Empty,
    /// 有效的非負數量
    Value(Decimal),
    /// 非數值或負數
    Malformed,
}

/// 解析數量儲存格
///
/// 支援一般小數與科學記號（試算表常見輸出），負數視為格式錯誤。
pub fn parse_quantity(raw: &str) -> ParsedQuantity {
    let text = raw.trim();
    if text.is_empty() {
        return ParsedQuantity::Empty;
    }

    let cleaned = text.replace(',', "");
    let parsed = Decimal::from_str(&cleaned).or_else(|_| Decimal::from_scientific(&cleaned));

    match parsed {
        Ok(value) if value >= Decimal::ZERO => ParsedQuantity::Value(value.normalize()),
        _ => ParsedQuantity::Malformed,
    }
}
