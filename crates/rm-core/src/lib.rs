//! # RM Core
//!
//! 原物料季節性安全庫存的核心資料模型與類型定義

pub mod anomaly;
pub mod config;
pub mod consumption;
pub mod master;
pub mod season;
pub mod sheet;
pub mod summary;

// Re-export 主要類型
pub use anomaly::{DataAnomaly, TableKind, WarningSeverity};
pub use config::{SafetyStockConfig, DAYS_PER_MONTH, DEFAULT_LEAD_TIME_DAYS, PRESENTATION_DP};
pub use consumption::{CellKey, CellValue, ConsumptionCells, ConsumptionTable, MonthPeriod};
pub use master::{RmMaster, RmMasterEntry};
pub use season::{parse_month, Season, SeasonCalendar};
pub use sheet::{parse_quantity, ParsedQuantity, RawSheet};
pub use summary::{round_for_output, MonthlyTotal, OutputRow, SeasonalSummary};

/// 結構性錯誤（中止該表的處理）
#[derive(Debug, thiserror::Error)]
pub enum RmError {
    #[error("{table} 表缺少物料編號欄位 (RM Code)")]
    MissingKeyColumn { table: TableKind },

    #[error("{table} 表沒有表頭")]
    EmptySheet { table: TableKind },

    #[error("無效的配置: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RmError>;
