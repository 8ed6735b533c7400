//! 季節性安全庫存主計算器

use rayon::prelude::*;
use rm_core::{
    ConsumptionCells, ConsumptionTable, DataAnomaly, RawSheet, RmMaster, SafetyStockConfig,
    SeasonalSummary,
};
use uuid::Uuid;

use crate::aggregation::SeasonalAggregator;
use crate::master_join::MasterJoiner;
use crate::normalizer::ConsumptionNormalizer;
use crate::safety_stock::SafetyStockCalculator;
use crate::{CalcResult, CalcWarning};

/// 季節性安全庫存計算器
///
/// 資料流：消耗表 → 正規化 → 季節彙總 → 安全庫存 → 主檔關聯。
/// 各物料互不相依，以 rayon 平行計算，輸出順序固定為物料編號順序。
pub struct SeasonalStockCalculator {
    config: SafetyStockConfig,
}

impl SeasonalStockCalculator {
    /// 創建新的計算器
    pub fn new(config: SafetyStockConfig) -> Self {
        Self { config }
    }

    /// 主計算入口（原始表格）
    ///
    /// 消耗表缺少物料編號欄位時中止並回傳錯誤；
    /// 主檔無法使用時降級為不關聯，物料名稱全部留空。
    pub fn calculate(
        &self,
        consumption: &RawSheet,
        master: &RawSheet,
    ) -> rm_core::Result<CalcResult> {
        let run_id = Uuid::new_v4();
        tracing::info!(
            %run_id,
            "開始安全庫存計算：消耗表 {} 列，主檔 {} 列，提前期 {} 天",
            consumption.rows.len(),
            master.rows.len(),
            self.config.lead_time_days
        );

        let start_time = std::time::Instant::now();

        // Step 1: 解析消耗表
        tracing::debug!("Step 1: 解析消耗表");
        let ingested = ConsumptionNormalizer::ingest(consumption).map_err(|e| {
            tracing::error!(%run_id, "消耗表無法處理: {}", e);
            e
        })?;
        tracing::debug!("物料數量: {}", ingested.table.rm_count());

        // Step 2: 載入主檔（失敗不中止）
        tracing::debug!("Step 2: 載入主檔");
        let mut anomalies = ingested.anomalies;
        let master = match MasterJoiner::load(master) {
            Ok(loaded) => {
                anomalies.extend(loaded.anomalies);
                Some(loaded.master)
            }
            Err(e) => {
                anomalies.push(DataAnomaly::MasterJoinSkipped {
                    reason: e.to_string(),
                });
                None
            }
        };

        // Step 3: 逐物料計算並關聯
        let mut result = self.calculate_tables(&ingested.table, master.as_ref());
        result.run_id = run_id;

        let mut warnings: Vec<CalcWarning> = anomalies.into_iter().map(CalcWarning::new).collect();
        warnings.append(&mut result.warnings);
        for warning in &warnings {
            tracing::warn!(%run_id, "{}", warning.message());
        }
        result.warnings = warnings;
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(%run_id, "安全庫存計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "輸出 {} 列，警告 {} 筆",
            result.rows.len(),
            result.warnings.len()
        );

        Ok(result)
    }

    /// 主計算入口（已解析的表）
    pub fn calculate_tables(
        &self,
        table: &ConsumptionTable,
        master: Option<&RmMaster>,
    ) -> CalcResult {
        tracing::debug!("Step 3: 逐物料計算季節摘要");
        let rms: Vec<(&String, &ConsumptionCells)> = table.iter().collect();
        let per_rm: Vec<(Vec<SeasonalSummary>, Vec<DataAnomaly>)> = rms
            .into_par_iter()
            .map(|(rm_code, cells)| {
                let mut anomalies = Vec::new();
                let summaries = self.calculate_rm(rm_code, cells, &mut anomalies);
                (summaries, anomalies)
            })
            .collect();

        let mut result = CalcResult::empty();
        let mut summaries = Vec::new();
        for (rm_summaries, anomalies) in per_rm {
            summaries.extend(rm_summaries);
            for anomaly in anomalies {
                result.add_warning(CalcWarning::new(anomaly));
            }
        }

        tracing::debug!("Step 4: 主檔關聯");
        result.rows = MasterJoiner::join(summaries, master);
        result
    }

    /// 單物料計算
    ///
    /// 數值溢位的月份或季節記錄於 `anomalies` 並略過，不影響其他季節。
    pub fn calculate_rm(
        &self,
        rm_code: &str,
        cells: &ConsumptionCells,
        anomalies: &mut Vec<DataAnomaly>,
    ) -> Vec<SeasonalSummary> {
        let totals = ConsumptionNormalizer::normalize_rm(rm_code, cells, anomalies);
        let aggregates =
            SeasonalAggregator::aggregate(&totals, &self.config.season_calendar, anomalies);

        tracing::debug!(
            "物料 {}: 月度合計 {} 筆，季節 {} 個",
            rm_code,
            totals.len(),
            aggregates.len()
        );

        let mut summaries = Vec::with_capacity(aggregates.len());
        for aggregate in aggregates {
            let season = aggregate.season;
            match SafetyStockCalculator::summarize(aggregate, self.config.lead_time_days) {
                Some(summary) => summaries.push(summary),
                None => anomalies.push(DataAnomaly::QuantityOverflow {
                    rm_code: rm_code.to_string(),
                    context: format!("{} 安全庫存", season),
                }),
            }
        }
        summaries
    }
}

impl Default for SeasonalStockCalculator {
    fn default() -> Self {
        Self::new(SafetyStockConfig::default())
    }
}
