//! 計算結果模型：月度合計、季節摘要、輸出列

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::PRESENTATION_DP;
use crate::consumption::MonthPeriod;
use crate::season::Season;

/// 四捨五入到輸出精度（兩位小數，固定顯示位數）
pub fn round_for_output(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(PRESENTATION_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRESENTATION_DP);
    rounded
}

/// 月度合計（單一物料、單一月份期間，所有工廠有值儲存格之和）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub rm_code: String,
    pub month: MonthPeriod,
    pub total: Decimal,
}

impl MonthlyTotal {
    pub fn new(rm_code: String, month: MonthPeriod, total: Decimal) -> Self {
        Self {
            rm_code,
            month,
            total,
        }
    }
}

/// 季節摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalSummary {
    /// 物料編號
    pub rm_code: String,

    /// 季節
    pub season: Season,

    /// 平均月用量（兩位小數）
    pub avg_monthly_usage: Decimal,

    /// 最大月用量（兩位小數）
    pub max_usage: Decimal,

    /// 安全庫存（兩位小數）
    pub safety_stock: Decimal,

    /// 再訂購點（兩位小數）
    pub reorder_level: Decimal,

    /// 納入此季節的月份期間
    pub months: Vec<MonthPeriod>,
}

/// 輸出列（季節摘要 + 物料名稱）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "RM Code")]
    pub rm_code: String,

    #[serde(rename = "Season")]
    pub season: Season,

    #[serde(rename = "Avg Monthly Usage")]
    pub avg_monthly_usage: Decimal,

    #[serde(rename = "Max Usage")]
    pub max_usage: Decimal,

    #[serde(rename = "Safety Stock")]
    pub safety_stock: Decimal,

    #[serde(rename = "Reorder Level")]
    pub reorder_level: Decimal,

    /// 主檔中無此物料時為 `None`
    #[serde(rename = "RM Name")]
    pub rm_name: Option<String>,
}

impl OutputRow {
    pub fn from_summary(summary: SeasonalSummary, rm_name: Option<String>) -> Self {
        Self {
            rm_code: summary.rm_code,
            season: summary.season,
            avg_monthly_usage: summary.avg_monthly_usage,
            max_usage: summary.max_usage,
            safety_stock: summary.safety_stock,
            reorder_level: summary.reorder_level,
            rm_name,
        }
    }
}
