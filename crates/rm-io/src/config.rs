//! 配置檔載入（JSON）

use rm_core::SafetyStockConfig;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{IoError, Result};

/// 從 JSON 檔載入配置，未指定的欄位使用預設值
///
/// ```json
/// { "lead_time_days": 10, "season_calendar": { "Jan": "Winter", ... } }
/// ```
pub fn load_config(path: &Path) -> Result<SafetyStockConfig> {
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }

    let reader = BufReader::new(File::open(path)?);
    let config: SafetyStockConfig = serde_json::from_reader(reader)?;

    tracing::debug!("載入配置 {}: 提前期 {} 天", path.display(), config.lead_time_days);

    Ok(config)
}
