//! 物料消耗模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 月份期間
///
/// 表頭中同一月份標籤的一段連續欄位為一個期間。
/// 跨年資料中同名月份會出現多次，以 `index` 區分。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    /// 期間在表頭中的順序
    pub index: usize,

    /// 月份標籤（原樣保留）
    pub label: String,
}

impl MonthPeriod {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }
}

/// 消耗儲存格的複合鍵（月份, 工廠）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellKey {
    pub month: MonthPeriod,
    pub plant: String,
}

impl CellKey {
    pub fn new(month: MonthPeriod, plant: impl Into<String>) -> Self {
        Self {
            month,
            plant: plant.into(),
        }
    }
}

/// 儲存格值：有值或缺值，缺值絕不當作零
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Present(Decimal),
    Absent,
}

impl CellValue {
    /// 有值時回傳數量
    pub fn quantity(&self) -> Option<Decimal> {
        match self {
            CellValue::Present(q) => Some(*q),
            CellValue::Absent => None,
        }
    }

    /// 合併同一鍵的兩個值（重複的物料列），相加溢位時回傳 `None`
    pub fn merge(self, other: CellValue) -> Option<CellValue> {
        match (self, other) {
            (CellValue::Present(a), CellValue::Present(b)) => a.checked_add(b).map(CellValue::Present),
            (CellValue::Present(a), CellValue::Absent) => Some(CellValue::Present(a)),
            (CellValue::Absent, other) => Some(other),
        }
    }
}

/// 單一物料的消耗矩陣
pub type ConsumptionCells = BTreeMap<CellKey, CellValue>;

/// 消耗表（已解析為型別化的複合鍵結構）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionTable {
    rows: BTreeMap<String, ConsumptionCells>,
}

impl ConsumptionTable {
    /// 創建空的消耗表
    pub fn new() -> Self {
        Self::default()
    }

    /// 寫入儲存格
    ///
    /// 同一物料同一鍵重複出現時（物料列重複），有值的部分相加。
    /// 相加溢位時保留原值並回傳 `false`。
    pub fn insert(&mut self, rm_code: impl Into<String>, key: CellKey, value: CellValue) -> bool {
        let cells = self.rows.entry(rm_code.into()).or_default();
        let merged = match cells.get(&key) {
            Some(existing) => existing.merge(value),
            None => Some(value),
        };
        match merged {
            Some(merged) => {
                cells.insert(key, merged);
                true
            }
            None => false,
        }
    }

    /// 建構器模式：寫入有值儲存格
    pub fn with_quantity(
        mut self,
        rm_code: &str,
        month: MonthPeriod,
        plant: &str,
        quantity: Decimal,
    ) -> Self {
        self.insert(rm_code, CellKey::new(month, plant), CellValue::Present(quantity));
        self
    }

    /// 確保物料存在（即使所有儲存格皆缺值）
    pub fn ensure_rm(&mut self, rm_code: impl Into<String>) {
        self.rows.entry(rm_code.into()).or_default();
    }

    /// 取得物料的消耗矩陣
    pub fn cells(&self, rm_code: &str) -> Option<&ConsumptionCells> {
        self.rows.get(rm_code)
    }

    /// 依物料編號排序迭代
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConsumptionCells)> {
        self.rows.iter()
    }

    /// 物料數量
    pub fn rm_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_cell_values() {
        let a = CellValue::Present(Decimal::from(10));
        let b = CellValue::Present(Decimal::from(5));

        assert_eq!(a.merge(b), Some(CellValue::Present(Decimal::from(15))));
        assert_eq!(a.merge(CellValue::Absent), Some(a));
        assert_eq!(CellValue::Absent.merge(a), Some(a));
        assert_eq!(CellValue::Absent.merge(CellValue::Absent), Some(CellValue::Absent));
    }

    #[test]
    fn test_merge_overflow_keeps_existing_value() {
        let jan = MonthPeriod::new(0, "Jan");
        let key = CellKey::new(jan, "A");
        let mut table = ConsumptionTable::new();

        assert!(table.insert("RM001", key.clone(), CellValue::Present(Decimal::MAX)));
        assert!(!table.insert("RM001", key.clone(), CellValue::Present(Decimal::ONE)));

        assert_eq!(
            table.cells("RM001").unwrap().get(&key),
            Some(&CellValue::Present(Decimal::MAX))
        );
    }

    #[test]
    fn test_duplicate_rows_are_summed() {
        let jan = MonthPeriod::new(0, "Jan");
        let mut table = ConsumptionTable::new();
        table.insert("RM001", CellKey::new(jan.clone(), "A"), CellValue::Present(Decimal::from(40)));
        table.insert("RM001", CellKey::new(jan.clone(), "A"), CellValue::Absent);
        table.insert("RM001", CellKey::new(jan.clone(), "A"), CellValue::Present(Decimal::from(2)));

        let cells = table.cells("RM001").unwrap();
        assert_eq!(
            cells.get(&CellKey::new(jan, "A")),
            Some(&CellValue::Present(Decimal::from(42)))
        );
    }

    #[test]
    fn test_rm_codes_are_ordered() {
        let jan = MonthPeriod::new(0, "Jan");
        let table = ConsumptionTable::new()
            .with_quantity("RM-B", jan.clone(), "A", Decimal::ONE)
            .with_quantity("RM-A", jan, "A", Decimal::ONE);

        let codes: Vec<_> = table.iter().map(|(code, _)| code.as_str()).collect();
        assert_eq!(codes, vec!["RM-A", "RM-B"]);
        assert_eq!(table.rm_count(), 2);
    }
}
