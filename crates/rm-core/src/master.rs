//! 物料主檔模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 物料主檔項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RmMasterEntry {
    /// 物料編號（唯一鍵）
    pub rm_code: String,

    /// 物料名稱
    pub rm_name: String,

    /// 最小訂購量（核心不使用，僅保留）
    pub min_order_qty: Option<Decimal>,

    /// 最大訂購量（核心不使用，僅保留）
    pub max_order_qty: Option<Decimal>,
}

impl RmMasterEntry {
    /// 創建新的主檔項目
    pub fn new(rm_code: String, rm_name: String) -> Self {
        Self {
            rm_code,
            rm_name,
            min_order_qty: None,
            max_order_qty: None,
        }
    }

    /// 建構器模式：設置訂購量上下限
    pub fn with_order_bounds(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_order_qty = min;
        self.max_order_qty = max;
        self
    }
}

/// 物料主檔（唯讀查詢表）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RmMaster {
    entries: BTreeMap<String, RmMasterEntry>,
}

impl RmMaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入項目；物料編號已存在時保留原項目並回傳 false
    pub fn insert(&mut self, entry: RmMasterEntry) -> bool {
        if self.entries.contains_key(&entry.rm_code) {
            return false;
        }
        self.entries.insert(entry.rm_code.clone(), entry);
        true
    }

    pub fn get(&self, rm_code: &str) -> Option<&RmMasterEntry> {
        self.entries.get(rm_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<RmMasterEntry> for RmMaster {
    fn from_iter<I: IntoIterator<Item = RmMasterEntry>>(iter: I) -> Self {
        let mut master = RmMaster::new();
        for entry in iter {
            master.insert(entry);
        }
        master
    }
}
