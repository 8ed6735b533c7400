//! 安全庫存計算配置

use serde::{Deserialize, Serialize};

use crate::season::SeasonCalendar;

/// 月份換算日用量的固定天數（簡化的 30 天月）
pub const DAYS_PER_MONTH: u32 = 30;

/// 輸出數值保留的小數位數
pub const PRESENTATION_DP: u32 = 2;

/// 預設補貨提前期（天）
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 8;

/// 安全庫存計算參數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyStockConfig {
    /// 補貨提前期（天），線性放大安全庫存與再訂購點
    pub lead_time_days: u32,

    /// 月份 → 季節對照表
    pub season_calendar: SeasonCalendar,
}

impl SafetyStockConfig {
    /// 創建新的配置
    pub fn new(lead_time_days: u32) -> Self {
        Self {
            lead_time_days,
            season_calendar: SeasonCalendar::default(),
        }
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 建構器模式：設置季節日曆
    ///
    /// # 範例
    /// ```
    /// # use rm_core::{parse_month, SafetyStockConfig, Season, SeasonCalendar};
    /// let june = parse_month("Jun").unwrap();
    /// let calendar = SeasonCalendar::default()
    ///     .with_season(june, Season::Summer)
    ///     .unwrap();
    /// let config = SafetyStockConfig::default().with_season_calendar(calendar);
    /// assert_eq!(config.season_calendar.classify("Jun"), Season::Summer);
    /// ```
    pub fn with_season_calendar(mut self, calendar: SeasonCalendar) -> Self {
        self.season_calendar = calendar;
        self
    }
}

impl Default for SafetyStockConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LEAD_TIME_DAYS)
    }
}
