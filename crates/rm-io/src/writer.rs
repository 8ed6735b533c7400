//! 輸出表寫出（CSV）

use csv::WriterBuilder;
use rm_core::OutputRow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// 輸出表欄位
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "RM Code",
    "Season",
    "Avg Monthly Usage",
    "Max Usage",
    "Safety Stock",
    "Reorder Level",
    "RM Name",
];

/// 寫出 CSV（無資料列時仍輸出表頭）
pub fn write_output_csv<W: Write>(rows: &[OutputRow], writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// 寫出 CSV 檔案
pub fn write_output_file(rows: &[OutputRow], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_output_csv(rows, file)?;
    tracing::info!("輸出 {} 列至 {}", rows.len(), path.display());
    Ok(())
}
