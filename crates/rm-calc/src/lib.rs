//! # RM Calculation Engine
//!
//! 季節性安全庫存計算引擎

pub mod aggregation;
pub mod calculator;
pub mod master_join;
pub mod normalizer;
pub mod safety_stock;

// Re-export 主要類型
pub use aggregation::{SeasonalAggregate, SeasonalAggregator};
pub use calculator::SeasonalStockCalculator;
pub use master_join::{LoadedMaster, MasterJoiner};
pub use normalizer::{ConsumptionNormalizer, IngestedConsumption};
pub use safety_stock::{SafetyStockCalculator, StockThresholds};

use rm_core::{DataAnomaly, OutputRow, WarningSeverity};

/// 安全庫存計算結果
#[derive(Debug, Clone)]
pub struct CalcResult {
    /// 本次計算的識別碼（僅用於日誌關聯）
    pub run_id: uuid::Uuid,

    /// 輸出列（依物料編號、季節排序）
    pub rows: Vec<OutputRow>,

    /// 警告信息
    pub warnings: Vec<CalcWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl CalcResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4(),
            rows: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: CalcWarning) {
        self.warnings.push(warning);
    }

    /// 所有資料異常
    pub fn anomalies(&self) -> impl Iterator<Item = &DataAnomaly> {
        self.warnings.iter().map(|w| &w.anomaly)
    }

    /// 是否有 Error 等級的警告
    pub fn has_errors(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Error)
    }
}

/// 計算警告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcWarning {
    pub rm_code: Option<String>,
    pub anomaly: DataAnomaly,
    pub severity: WarningSeverity,
}

impl CalcWarning {
    pub fn new(anomaly: DataAnomaly) -> Self {
        Self {
            rm_code: anomaly.rm_code().map(str::to_string),
            severity: anomaly.severity(),
            anomaly,
        }
    }

    pub fn message(&self) -> String {
        self.anomaly.to_string()
    }
}

impl From<DataAnomaly> for CalcWarning {
    fn from(anomaly: DataAnomaly) -> Self {
        Self::new(anomaly)
    }
}
