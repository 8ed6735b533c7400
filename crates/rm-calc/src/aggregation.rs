//! 季節彙總

use rm_core::{DataAnomaly, MonthPeriod, MonthlyTotal, Season, SeasonCalendar};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// 季節彙總結果（保留完整精度，輸出前才四捨五入）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonalAggregate {
    /// 物料編號
    pub rm_code: String,
    /// 季節
    pub season: Season,
    /// 平均月用量
    pub average: Decimal,
    /// 最大月用量
    pub max: Decimal,
    /// 納入的月份期間
    pub months: Vec<MonthPeriod>,
}

impl SeasonalAggregate {
    /// 觀測筆數
    pub fn observations(&self) -> usize {
        self.months.len()
    }
}

/// 季節彙總計算器
pub struct SeasonalAggregator;

impl SeasonalAggregator {
    /// 依 (物料, 季節) 分組並計算平均與最大值
    ///
    /// 沒有任何月份的季節不產生結果；同名月份的多個期間一併納入統計。
    /// 季節加總溢位時該季節記錄異常並略過。
    pub fn aggregate(
        totals: &[MonthlyTotal],
        calendar: &SeasonCalendar,
        anomalies: &mut Vec<DataAnomaly>,
    ) -> Vec<SeasonalAggregate> {
        let mut groups: BTreeMap<(&str, Season), Vec<&MonthlyTotal>> = BTreeMap::new();

        for total in totals {
            let season = calendar.classify(&total.month.label);
            groups
                .entry((total.rm_code.as_str(), season))
                .or_default()
                .push(total);
        }

        groups
            .into_iter()
            .filter_map(|((rm_code, season), members)| {
                let aggregate = Self::summarize_group(rm_code, season, &members);
                if aggregate.is_none() && !members.is_empty() {
                    anomalies.push(DataAnomaly::QuantityOverflow {
                        rm_code: rm_code.to_string(),
                        context: format!("{} 季節加總", season),
                    });
                }
                aggregate
            })
            .collect()
    }

    fn summarize_group(
        rm_code: &str,
        season: Season,
        members: &[&MonthlyTotal],
    ) -> Option<SeasonalAggregate> {
        let max = members.iter().map(|t| t.total).max()?;
        let sum = members
            .iter()
            .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.total))?;
        let average = sum / Decimal::from(members.len());

        Some(SeasonalAggregate {
            rm_code: rm_code.to_string(),
            season,
            average,
            max,
            months: members.iter().map(|t| t.month.clone()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn total(rm_code: &str, index: usize, label: &str, value: i64) -> MonthlyTotal {
        MonthlyTotal::new(
            rm_code.to_string(),
            MonthPeriod::new(index, label),
            Decimal::from(value),
        )
    }

    #[test]
    fn test_winter_average_and_max() {
        let totals = vec![total("RM001", 0, "Jan", 100), total("RM001", 1, "Feb", 200)];

        let aggregates = SeasonalAggregator::aggregate(&totals, &SeasonCalendar::default(), &mut Vec::new());

        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].season, Season::Winter);
        assert_eq!(aggregates[0].average, Decimal::from(150));
        assert_eq!(aggregates[0].max, Decimal::from(200));
        assert_eq!(aggregates[0].observations(), 2);
    }

    #[test]
    fn test_empty_seasons_not_emitted() {
        let totals = vec![total("RM001", 0, "Jul", 10), total("RM001", 1, "Aug", 20)];

        let aggregates = SeasonalAggregator::aggregate(&totals, &SeasonCalendar::default(), &mut Vec::new());

        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].season, Season::Monsoon);
    }

    #[test]
    fn test_seasons_ordered_per_rm() {
        let totals = vec![
            total("RM001", 0, "Jul", 10),
            total("RM001", 1, "Total", 99),
            total("RM001", 2, "Apr", 30),
            total("RM001", 3, "Dec", 5),
        ];

        let aggregates = SeasonalAggregator::aggregate(&totals, &SeasonCalendar::default(), &mut Vec::new());
        let seasons: Vec<_> = aggregates.iter().map(|a| a.season).collect();

        assert_eq!(
            seasons,
            vec![Season::Winter, Season::Summer, Season::Monsoon, Season::Unknown]
        );
    }

    #[test]
    fn test_multi_year_months_pooled() {
        let totals = vec![
            total("RM001", 0, "Jan", 100),
            total("RM001", 12, "Jan", 300),
        ];

        let aggregates = SeasonalAggregator::aggregate(&totals, &SeasonCalendar::default(), &mut Vec::new());

        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].average, Decimal::from(200));
        assert_eq!(aggregates[0].max, Decimal::from(300));
        assert_eq!(aggregates[0].observations(), 2);
    }

    #[test]
    fn test_average_keeps_full_precision() {
        let totals = vec![
            total("RM001", 0, "Mar", 10),
            total("RM001", 1, "Apr", 10),
            total("RM001", 2, "May", 11),
        ];

        let aggregates = SeasonalAggregator::aggregate(&totals, &SeasonCalendar::default(), &mut Vec::new());

        let expected = Decimal::from(31) / Decimal::from(3);
        assert_eq!(aggregates[0].average, expected);
        assert!(aggregates[0].average > Decimal::from_str("10.33").unwrap());
    }

    #[test]
    fn test_rm_codes_are_grouped_separately() {
        let totals = vec![total("RM001", 0, "Jan", 100), total("RM002", 0, "Jan", 1)];

        let aggregates = SeasonalAggregator::aggregate(&totals, &SeasonCalendar::default(), &mut Vec::new());

        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].rm_code, "RM001");
        assert_eq!(aggregates[1].rm_code, "RM002");
    }

    #[test]
    fn test_season_sum_overflow_drops_group() {
        let huge = |index: usize, label: &str| {
            MonthlyTotal::new("RM001".to_string(), MonthPeriod::new(index, label), Decimal::MAX)
        };
        let totals = vec![huge(0, "Jan"), huge(1, "Feb"), total("RM001", 2, "Jul", 30)];
        let mut anomalies = Vec::new();

        let aggregates =
            SeasonalAggregator::aggregate(&totals, &SeasonCalendar::default(), &mut anomalies);

        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].season, Season::Monsoon);
        assert_eq!(
            anomalies,
            vec![DataAnomaly::QuantityOverflow {
                rm_code: "RM001".to_string(),
                context: "Winter 季節加總".to_string(),
            }]
        );
    }
}
