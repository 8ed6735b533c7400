//! 資料品質異常（不中斷計算，只回報給呼叫端）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 輸入表種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    /// 物料主檔
    Master,
    /// 物料消耗表
    Consumption,
    /// 成品產量表
    FgProduction,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Master => "RM Master",
            TableKind::Consumption => "RM Consumption",
            TableKind::FgProduction => "FG Production",
        };
        f.write_str(name)
    }
}

/// 嚴重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}

/// 資料異常
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataAnomaly {
    /// 非數值儲存格，視為缺值
    MalformedCell {
        table: TableKind,
        rm_code: String,
        column: String,
        value: String,
    },

    /// 無法辨識的月份標籤，歸入 Unknown 季節
    UnrecognizedMonth { label: String },

    /// 同一月份標籤出現在多個期間（跨年資料，統計時合併）
    RepeatedMonth { label: String, periods: usize },

    /// 物料編號為空的資料列，整列略過
    MissingRmCode { table: TableKind, row: usize },

    /// 月份與工廠表頭皆空白的欄位（`column` 從 0 起算），整欄略過
    UnlabeledColumn { table: TableKind, column: usize },

    /// 加總或換算超出數值範圍，該筆結果略過
    QuantityOverflow { rm_code: String, context: String },

    /// 主檔物料編號重複，保留第一筆
    DuplicateMasterEntry { rm_code: String },

    /// 主檔無法使用，所有物料名稱留空
    MasterJoinSkipped { reason: String },
}

impl DataAnomaly {
    /// 異常的嚴重程度
    pub fn severity(&self) -> WarningSeverity {
        match self {
            DataAnomaly::RepeatedMonth { .. } => WarningSeverity::Info,
            DataAnomaly::UnrecognizedMonth { .. } => WarningSeverity::Info,
            DataAnomaly::MalformedCell { .. } => WarningSeverity::Warning,
            DataAnomaly::MissingRmCode { .. } => WarningSeverity::Warning,
            DataAnomaly::UnlabeledColumn { .. } => WarningSeverity::Warning,
            DataAnomaly::QuantityOverflow { .. } => WarningSeverity::Warning,
            DataAnomaly::DuplicateMasterEntry { .. } => WarningSeverity::Warning,
            DataAnomaly::MasterJoinSkipped { .. } => WarningSeverity::Error,
        }
    }

    /// 相關物料編號（如有）
    pub fn rm_code(&self) -> Option<&str> {
        match self {
            DataAnomaly::MalformedCell { rm_code, .. } => Some(rm_code),
            DataAnomaly::DuplicateMasterEntry { rm_code } => Some(rm_code),
            DataAnomaly::QuantityOverflow { rm_code, .. } => Some(rm_code),
            _ => None,
        }
    }
}

impl fmt::Display for DataAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataAnomaly::MalformedCell {
                table,
                rm_code,
                column,
                value,
            } => write!(
                f,
                "{} 表物料 {} 欄位 {} 的值 {:?} 非數值，視為缺值",
                table, rm_code, column, value
            ),
            DataAnomaly::UnrecognizedMonth { label } => {
                write!(f, "無法辨識的月份 {:?}，歸入 Unknown 季節", label)
            }
            DataAnomaly::RepeatedMonth { label, periods } => {
                write!(f, "月份 {} 出現於 {} 個期間，已合併統計", label, periods)
            }
            DataAnomaly::MissingRmCode { table, row } => {
                write!(f, "{} 表第 {} 列缺少物料編號，已略過", table, row + 1)
            }
            DataAnomaly::UnlabeledColumn { table, column } => {
                write!(f, "{} 表第 {} 欄沒有月份與工廠表頭，已略過", table, column + 1)
            }
            DataAnomaly::QuantityOverflow { rm_code, context } => {
                write!(f, "物料 {} 的 {} 超出數值範圍，已略過", rm_code, context)
            }
            DataAnomaly::DuplicateMasterEntry { rm_code } => {
                write!(f, "主檔物料 {} 重複，保留第一筆", rm_code)
            }
            DataAnomaly::MasterJoinSkipped { reason } => {
                write!(f, "略過主檔關聯，物料名稱留空: {}", reason)
            }
        }
    }
}
