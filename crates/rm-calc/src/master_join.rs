//! 物料主檔載入與關聯

use rm_core::sheet::{MAX_ORDER_QTY_LABEL, MIN_ORDER_QTY_LABEL, RM_CODE_LABEL, RM_NAME_LABEL};
use rm_core::{
    parse_quantity, DataAnomaly, OutputRow, ParsedQuantity, RawSheet, RmError, RmMaster,
    RmMasterEntry, SeasonalSummary, TableKind,
};
use rust_decimal::Decimal;

/// 載入後的主檔與過程中發現的異常
#[derive(Debug, Clone)]
pub struct LoadedMaster {
    pub master: RmMaster,
    pub anomalies: Vec<DataAnomaly>,
}

/// 主檔關聯器
pub struct MasterJoiner;

impl MasterJoiner {
    /// 從原始表格載入主檔
    ///
    /// 找不到 `RM Code` 欄位時回傳 `MissingKeyColumn`；
    /// `RM Name` 與訂購量欄位缺少時視為空值。
    pub fn load(sheet: &RawSheet) -> rm_core::Result<LoadedMaster> {
        if sheet.header_rows.is_empty() {
            return Err(RmError::EmptySheet {
                table: TableKind::Master,
            });
        }

        let key_col = sheet
            .find_column(RM_CODE_LABEL)
            .ok_or(RmError::MissingKeyColumn {
                table: TableKind::Master,
            })?;
        let name_col = sheet.find_column(RM_NAME_LABEL);
        let min_col = sheet.find_column(MIN_ORDER_QTY_LABEL);
        let max_col = sheet.find_column(MAX_ORDER_QTY_LABEL);

        let mut master = RmMaster::new();
        let mut anomalies = Vec::new();

        for row_idx in 0..sheet.rows.len() {
            let rm_code = sheet.cell(row_idx, key_col);
            if rm_code.is_empty() {
                if sheet.rows[row_idx].iter().any(|cell| !cell.trim().is_empty()) {
                    anomalies.push(DataAnomaly::MissingRmCode {
                        table: TableKind::Master,
                        row: row_idx,
                    });
                }
                continue;
            }

            let rm_name = name_col
                .map(|col| sheet.cell(row_idx, col).to_string())
                .unwrap_or_default();
            let mut bound = |col: Option<usize>, label: &str| -> Option<Decimal> {
                let raw = sheet.cell(row_idx, col?);
                match parse_quantity(raw) {
                    ParsedQuantity::Value(q) => Some(q),
                    ParsedQuantity::Empty => None,
                    ParsedQuantity::Malformed => {
                        anomalies.push(DataAnomaly::MalformedCell {
                            table: TableKind::Master,
                            rm_code: rm_code.to_string(),
                            column: label.to_string(),
                            value: raw.to_string(),
                        });
                        None
                    }
                }
            };
            let min_order_qty = bound(min_col, MIN_ORDER_QTY_LABEL);
            let max_order_qty = bound(max_col, MAX_ORDER_QTY_LABEL);

            let entry = RmMasterEntry::new(rm_code.to_string(), rm_name)
                .with_order_bounds(min_order_qty, max_order_qty);
            if !master.insert(entry) {
                anomalies.push(DataAnomaly::DuplicateMasterEntry {
                    rm_code: rm_code.to_string(),
                });
            }
        }

        Ok(LoadedMaster { master, anomalies })
    }

    /// 左關聯：以物料編號附加物料名稱
    ///
    /// 主檔不存在（`None`）或找不到物料時名稱留空，資料列照常輸出。
    pub fn join(summaries: Vec<SeasonalSummary>, master: Option<&RmMaster>) -> Vec<OutputRow> {
        summaries
            .into_iter()
            .map(|summary| {
                let rm_name = master
                    .and_then(|m| m.get(&summary.rm_code))
                    .map(|entry| entry.rm_name.clone())
                    .filter(|name| !name.is_empty());
                OutputRow::from_summary(summary, rm_name)
            })
            .collect()
    }
}
