//! 安全庫存與再訂購點計算

use rm_core::{round_for_output, SeasonalSummary, DAYS_PER_MONTH};
use rust_decimal::Decimal;

use crate::aggregation::SeasonalAggregate;

/// 庫存門檻
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockThresholds {
    /// 安全庫存
    pub safety_stock: Decimal,
    /// 再訂購點
    pub reorder_level: Decimal,
}

/// 安全庫存計算器
pub struct SafetyStockCalculator;

impl SafetyStockCalculator {
    /// 月用量換算日用量（固定 30 天月）
    pub fn daily_rate(monthly_usage: Decimal) -> Decimal {
        monthly_usage / Decimal::from(DAYS_PER_MONTH)
    }

    /// 計算安全庫存與再訂購點
    ///
    /// - 安全庫存 = 平均月用量 / 30 × 提前期
    /// - 再訂購點 = 最大月用量 / 30 × 提前期
    ///
    /// 輸入應為未四捨五入的平均與最大值，結果四捨五入到兩位小數。
    /// 乘上提前期後超出數值範圍時回傳 `None`。
    pub fn compute(average: Decimal, max: Decimal, lead_time_days: u32) -> Option<StockThresholds> {
        let lead_time = Decimal::from(lead_time_days);
        Some(StockThresholds {
            safety_stock: round_for_output(Self::daily_rate(average).checked_mul(lead_time)?),
            reorder_level: round_for_output(Self::daily_rate(max).checked_mul(lead_time)?),
        })
    }

    /// 由季節彙總產生季節摘要
    pub fn summarize(aggregate: SeasonalAggregate, lead_time_days: u32) -> Option<SeasonalSummary> {
        let thresholds = Self::compute(aggregate.average, aggregate.max, lead_time_days)?;

        Some(SeasonalSummary {
            rm_code: aggregate.rm_code,
            season: aggregate.season,
            avg_monthly_usage: round_for_output(aggregate.average),
            max_usage: round_for_output(aggregate.max),
            safety_stock: thresholds.safety_stock,
            reorder_level: thresholds.reorder_level,
            months: aggregate.months,
        })
    }
}
