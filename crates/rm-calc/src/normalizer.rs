//! 消耗表正規化：原始表格 → 型別化消耗表 → 月度合計

use rm_core::sheet::RM_CODE_LABEL;
use rm_core::{
    parse_month, parse_quantity, CellKey, CellValue, ConsumptionCells, ConsumptionTable,
    DataAnomaly, MonthPeriod, MonthlyTotal, ParsedQuantity, RawSheet, RmError, TableKind,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// 解析後的消耗表與過程中發現的異常
#[derive(Debug, Clone)]
pub struct IngestedConsumption {
    pub table: ConsumptionTable,
    pub anomalies: Vec<DataAnomaly>,
}

/// 資料欄位（已解析月份期間與工廠）
#[derive(Debug, Clone)]
struct DataColumn {
    col: usize,
    key: CellKey,
}

impl DataColumn {
    fn display_name(&self) -> String {
        format!("{} / {}", self.key.month.label, self.key.plant)
    }
}

/// 消耗表正規化器
pub struct ConsumptionNormalizer;

impl ConsumptionNormalizer {
    /// 解析原始消耗表
    ///
    /// 第一列表頭為月份（空白沿用左側標籤，對應合併儲存格），
    /// 第二列表頭為工廠。找不到 `RM Code` 欄位時回傳 `MissingKeyColumn`。
    pub fn ingest(sheet: &RawSheet) -> rm_core::Result<IngestedConsumption> {
        let month_row = sheet.header_rows.first().ok_or(RmError::EmptySheet {
            table: TableKind::Consumption,
        })?;
        let plant_row = sheet.header_rows.get(1);

        let key_col = sheet
            .find_column(RM_CODE_LABEL)
            .ok_or(RmError::MissingKeyColumn {
                table: TableKind::Consumption,
            })?;

        let mut anomalies = Vec::new();
        let columns = Self::resolve_columns(sheet, key_col, month_row, plant_row, &mut anomalies);
        Self::inspect_periods(&columns, &mut anomalies);

        let mut table = ConsumptionTable::new();
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let rm_code = row.get(key_col).map(|s| s.trim()).unwrap_or("");
            if rm_code.is_empty() {
                if row.iter().any(|cell| !cell.trim().is_empty()) {
                    anomalies.push(DataAnomaly::MissingRmCode {
                        table: TableKind::Consumption,
                        row: row_idx,
                    });
                }
                continue;
            }

            table.ensure_rm(rm_code);
            for column in &columns {
                let raw = sheet.cell(row_idx, column.col);
                let value = match parse_quantity(raw) {
                    ParsedQuantity::Value(q) => CellValue::Present(q),
                    ParsedQuantity::Empty => CellValue::Absent,
                    ParsedQuantity::Malformed => {
                        anomalies.push(DataAnomaly::MalformedCell {
                            table: TableKind::Consumption,
                            rm_code: rm_code.to_string(),
                            column: column.display_name(),
                            value: raw.to_string(),
                        });
                        CellValue::Absent
                    }
                };
                if !table.insert(rm_code, column.key.clone(), value) {
                    anomalies.push(DataAnomaly::QuantityOverflow {
                        rm_code: rm_code.to_string(),
                        context: format!("重複列欄位 {}", column.display_name()),
                    });
                }
            }
        }

        Ok(IngestedConsumption { table, anomalies })
    }

    /// 將表頭解析為資料欄位
    ///
    /// 月份表頭空白時，只有工廠表頭有標籤才沿用左側月份；
    /// 兩者皆空白的欄位（含超出表頭寬度的欄位）不納入計算，有資料時記錄異常。
    fn resolve_columns(
        sheet: &RawSheet,
        key_col: usize,
        month_row: &[String],
        plant_row: Option<&Vec<String>>,
        anomalies: &mut Vec<DataAnomaly>,
    ) -> Vec<DataColumn> {
        let mut columns = Vec::new();
        let mut current: Option<MonthPeriod> = None;
        let mut next_index = 0;

        for col in 0..sheet.width() {
            if col == key_col {
                continue;
            }

            let header = month_row.get(col).map(|s| s.trim()).unwrap_or("");
            let plant = plant_row
                .and_then(|r| r.get(col))
                .map(|s| s.trim())
                .unwrap_or("");

            let period = if header.is_empty() {
                // 合併儲存格：沿用左側月份
                match &current {
                    Some(period) if !plant.is_empty() => period.clone(),
                    _ => {
                        let has_data = (0..sheet.rows.len())
                            .any(|row| !sheet.cell(row, col).trim().is_empty());
                        if has_data {
                            anomalies.push(DataAnomaly::UnlabeledColumn {
                                table: TableKind::Consumption,
                                column: col,
                            });
                        }
                        continue;
                    }
                }
            } else {
                match &current {
                    Some(period) if period.label == header => period.clone(),
                    _ => {
                        let period = MonthPeriod::new(next_index, header);
                        next_index += 1;
                        period
                    }
                }
            };
            current = Some(period.clone());

            columns.push(DataColumn {
                col,
                key: CellKey::new(period, plant),
            });
        }

        columns
    }

    /// 檢查月份期間：無法辨識的標籤、跨期重複的月份
    fn inspect_periods(columns: &[DataColumn], anomalies: &mut Vec<DataAnomaly>) {
        let mut periods: BTreeMap<String, (String, Vec<usize>)> = BTreeMap::new();

        for column in columns {
            let label = &column.key.month.label;
            let canonical = match parse_month(label) {
                Some(month) => month.name().to_string(),
                None => label.to_lowercase(),
            };
            let entry = periods
                .entry(canonical)
                .or_insert_with(|| (label.clone(), Vec::new()));
            if !entry.1.contains(&column.key.month.index) {
                entry.1.push(column.key.month.index);
            }
        }

        for (first_label, indices) in periods.values() {
            if parse_month(first_label).is_none() {
                anomalies.push(DataAnomaly::UnrecognizedMonth {
                    label: first_label.clone(),
                });
            }
            if indices.len() > 1 {
                anomalies.push(DataAnomaly::RepeatedMonth {
                    label: first_label.clone(),
                    periods: indices.len(),
                });
            }
        }
    }

    /// 計算整張表的月度合計（依物料編號排序）
    pub fn normalize(table: &ConsumptionTable, anomalies: &mut Vec<DataAnomaly>) -> Vec<MonthlyTotal> {
        table
            .iter()
            .flat_map(|(rm_code, cells)| Self::normalize_rm(rm_code, cells, anomalies))
            .collect()
    }

    /// 計算單一物料的月度合計
    ///
    /// 只加總有值的儲存格；某月份所有工廠皆缺值時不產生合計。
    /// 合計溢位的月份記錄異常並略過。
    pub fn normalize_rm(
        rm_code: &str,
        cells: &ConsumptionCells,
        anomalies: &mut Vec<DataAnomaly>,
    ) -> Vec<MonthlyTotal> {
        let mut totals: BTreeMap<&MonthPeriod, MonthSum> = BTreeMap::new();

        for (key, value) in cells {
            let slot = totals.entry(&key.month).or_insert(MonthSum::Absent);
            if let Some(quantity) = value.quantity() {
                *slot = match *slot {
                    MonthSum::Absent => MonthSum::Total(quantity),
                    MonthSum::Total(sum) => sum
                        .checked_add(quantity)
                        .map_or(MonthSum::Overflow, MonthSum::Total),
                    MonthSum::Overflow => MonthSum::Overflow,
                };
            }
        }

        let mut result = Vec::new();
        for (month, sum) in totals {
            match sum {
                MonthSum::Absent => {}
                MonthSum::Total(total) => {
                    result.push(MonthlyTotal::new(rm_code.to_string(), month.clone(), total))
                }
                MonthSum::Overflow => anomalies.push(DataAnomaly::QuantityOverflow {
                    rm_code: rm_code.to_string(),
                    context: format!("{} 月度合計", month.label),
                }),
            }
        }
        result
    }
}

/// 月份加總狀態
#[derive(Debug, Clone, Copy)]
enum MonthSum {
    Absent,
    Total(Decimal),
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sheet() -> RawSheet {
        RawSheet::from_strs(
            &[
                &["", "Jan", "", "Feb", ""],
                &["RM Code", "Plant A", "Plant B", "Plant A", "Plant B"],
            ],
            &[
                &["RM001", "100", "", "200", "50"],
                &["RM002", "", "", "", ""],
                &["RM003", "10", "x", "", "5"],
            ],
        )
    }

    #[test]
    fn test_ingest_merged_month_headers() {
        let ingested = ConsumptionNormalizer::ingest(&sample_sheet()).unwrap();
        let cells = ingested.table.cells("RM001").unwrap();

        let jan = MonthPeriod::new(0, "Jan");
        assert_eq!(
            cells.get(&CellKey::new(jan.clone(), "Plant A")),
            Some(&CellValue::Present(Decimal::from(100)))
        );
        assert_eq!(
            cells.get(&CellKey::new(jan, "Plant B")),
            Some(&CellValue::Absent)
        );
        assert_eq!(ingested.table.rm_count(), 3);
    }

    #[test]
    fn test_missing_key_column() {
        let sheet = RawSheet::from_strs(
            &[&["Jan", "Feb"], &["Plant A", "Plant A"]],
            &[&["1", "2"]],
        );

        let result = ConsumptionNormalizer::ingest(&sheet);
        assert!(matches!(
            result,
            Err(RmError::MissingKeyColumn {
                table: TableKind::Consumption
            })
        ));
    }

    #[test]
    fn test_empty_sheet() {
        let result = ConsumptionNormalizer::ingest(&RawSheet::default());
        assert!(matches!(result, Err(RmError::EmptySheet { .. })));
    }

    #[test]
    fn test_absent_cells_not_counted_as_zero() {
        let ingested = ConsumptionNormalizer::ingest(&sample_sheet()).unwrap();
        let totals = ConsumptionNormalizer::normalize(&ingested.table, &mut Vec::new());

        let rm001: Vec<_> = totals.iter().filter(|t| t.rm_code == "RM001").collect();
        assert_eq!(rm001.len(), 2);
        assert_eq!(rm001[0].month.label, "Jan");
        assert_eq!(rm001[0].total, Decimal::from(100));
        assert_eq!(rm001[1].month.label, "Feb");
        assert_eq!(rm001[1].total, Decimal::from(250));
    }

    #[test]
    fn test_all_absent_month_emits_nothing() {
        let ingested = ConsumptionNormalizer::ingest(&sample_sheet()).unwrap();
        let totals = ConsumptionNormalizer::normalize(&ingested.table, &mut Vec::new());

        assert!(totals.iter().all(|t| t.rm_code != "RM002"));
    }

    #[test]
    fn test_malformed_cell_is_absent_and_reported() {
        let ingested = ConsumptionNormalizer::ingest(&sample_sheet()).unwrap();
        let totals = ConsumptionNormalizer::normalize(&ingested.table, &mut Vec::new());

        let rm003: Vec<_> = totals.iter().filter(|t| t.rm_code == "RM003").collect();
        assert_eq!(rm003.len(), 2);
        assert_eq!(rm003[0].total, Decimal::from(10));
        assert_eq!(rm003[1].total, Decimal::from(5));

        assert_eq!(ingested.anomalies.len(), 1);
        match &ingested.anomalies[0] {
            DataAnomaly::MalformedCell {
                rm_code, column, value, ..
            } => {
                assert_eq!(rm_code, "RM003");
                assert_eq!(column, "Jan / Plant B");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected anomaly: {:?}", other),
        }
    }

    #[test]
    fn test_repeated_month_creates_separate_periods() {
        let sheet = RawSheet::from_strs(
            &[
                &["RM Code", "Jan", "Feb", "Jan"],
                &["", "Plant A", "Plant A", "Plant A"],
            ],
            &[&["RM001", "100", "200", "300"]],
        );

        let ingested = ConsumptionNormalizer::ingest(&sheet).unwrap();
        let totals = ConsumptionNormalizer::normalize(&ingested.table, &mut Vec::new());

        assert_eq!(totals.len(), 3);
        let januaries: Vec<_> = totals.iter().filter(|t| t.month.label == "Jan").collect();
        assert_eq!(januaries.len(), 2);
        assert_ne!(januaries[0].month.index, januaries[1].month.index);

        assert!(ingested.anomalies.contains(&DataAnomaly::RepeatedMonth {
            label: "Jan".to_string(),
            periods: 2,
        }));
    }

    #[test]
    fn test_unrecognized_month_reported_once() {
        let sheet = RawSheet::from_strs(
            &[&["RM Code", "Total", ""], &["", "Plant A", "Plant B"]],
            &[&["RM001", "1", "2"], &["RM002", "3", ""]],
        );

        let ingested = ConsumptionNormalizer::ingest(&sheet).unwrap();
        let unrecognized: Vec<_> = ingested
            .anomalies
            .iter()
            .filter(|a| matches!(a, DataAnomaly::UnrecognizedMonth { .. }))
            .collect();
        assert_eq!(unrecognized.len(), 1);
    }

    #[test]
    fn test_row_without_rm_code_skipped() {
        let sheet = RawSheet::from_strs(
            &[&["RM Code", "Jan"], &["", "Plant A"]],
            &[&["", "10"], &["", ""], &["RM001", "5"]],
        );

        let ingested = ConsumptionNormalizer::ingest(&sheet).unwrap();
        assert_eq!(ingested.table.rm_count(), 1);
        assert_eq!(
            ingested.anomalies,
            vec![DataAnomaly::MissingRmCode {
                table: TableKind::Consumption,
                row: 0
            }]
        );
    }

    #[test]
    fn test_single_header_row() {
        let sheet = RawSheet::from_strs(
            &[&["RM Code", "Jan", "Feb"]],
            &[&["RM001", "7", "8"]],
        );

        let ingested = ConsumptionNormalizer::ingest(&sheet).unwrap();
        let totals = ConsumptionNormalizer::normalize(&ingested.table, &mut Vec::new());

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].total, Decimal::from(7));
    }

    #[test]
    fn test_column_wider_than_header_is_skipped() {
        let sheet = RawSheet::from_strs(
            &[&["RM Code", "Jan"], &["", "Plant A"]],
            &[&["RM001", "10", "99"]],
        );

        let ingested = ConsumptionNormalizer::ingest(&sheet).unwrap();
        let totals = ConsumptionNormalizer::normalize(&ingested.table, &mut Vec::new());

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total, Decimal::from(10));
        assert_eq!(
            ingested.anomalies,
            vec![DataAnomaly::UnlabeledColumn {
                table: TableKind::Consumption,
                column: 2
            }]
        );
    }

    #[test]
    fn test_blank_unlabeled_column_is_silent() {
        let sheet = RawSheet::from_strs(
            &[&["RM Code", "Jan", ""], &["", "Plant A", ""]],
            &[&["RM001", "10", ""]],
        );

        let ingested = ConsumptionNormalizer::ingest(&sheet).unwrap();

        assert!(ingested.anomalies.is_empty());
        assert_eq!(ingested.table.cells("RM001").unwrap().len(), 1);
    }

    #[test]
    fn test_monthly_total_overflow_is_dropped() {
        let sheet = RawSheet::from_strs(
            &[&["RM Code", "Jan", "", "Feb"], &["", "Plant A", "Plant B", "Plant A"]],
            &[&["RM001", "5e28", "5e28", "7"]],
        );

        let ingested = ConsumptionNormalizer::ingest(&sheet).unwrap();
        let mut anomalies = Vec::new();
        let totals = ConsumptionNormalizer::normalize(&ingested.table, &mut anomalies);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].month.label, "Feb");
        assert_eq!(totals[0].total, Decimal::from(7));
        assert!(matches!(
            anomalies.as_slice(),
            [DataAnomaly::QuantityOverflow { rm_code, .. }] if rm_code == "RM001"
        ));
    }

    #[test]
    fn test_duplicate_row_overflow_is_reported() {
        let sheet = RawSheet::from_strs(
            &[&["RM Code", "Jan"], &["", "Plant A"]],
            &[&["RM001", "5e28"], &["RM001", "5e28"]],
        );

        let ingested = ConsumptionNormalizer::ingest(&sheet).unwrap();

        assert_eq!(ingested.anomalies.len(), 1);
        assert!(matches!(
            &ingested.anomalies[0],
            DataAnomaly::QuantityOverflow { rm_code, .. } if rm_code == "RM001"
        ));
    }
}
