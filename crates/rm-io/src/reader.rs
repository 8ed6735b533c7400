//! 表格讀取：Excel / CSV → RawSheet

use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use rm_core::RawSheet;
use std::fs::File;
use std::path::Path;

use crate::error::{IoError, Result};

/// 主檔表頭列數
pub const MASTER_HEADER_ROWS: usize = 1;

/// 消耗表 / 產量表表頭列數（月份、工廠）
pub const MATRIX_HEADER_ROWS: usize = 2;

/// 表格讀取器
pub trait SheetReader {
    /// 讀取檔案為原始表格，前 `header_rows` 列為表頭
    fn read_sheet(&self, path: &Path, header_rows: usize) -> Result<RawSheet>;
}

/// CSV 讀取器
pub struct CsvSheetReader;

impl SheetReader for CsvSheetReader {
    fn read_sheet(&self, path: &Path, header_rows: usize) -> Result<RawSheet> {
        check_exists(path)?;

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允許行長度不一致
            .from_reader(file);

        let mut lines = Vec::new();
        for record in reader.records() {
            let record = record?;
            lines.push(record.iter().map(|v| v.trim().to_string()).collect());
        }

        split_headers(lines, header_rows)
    }
}

/// Excel 讀取器（.xlsx / .xls / .ods），讀取第一張工作表
pub struct ExcelSheetReader;

impl SheetReader for ExcelSheetReader {
    fn read_sheet(&self, path: &Path, header_rows: usize) -> Result<RawSheet> {
        check_exists(path)?;

        let mut workbook =
            open_workbook_auto(path).map_err(|e| IoError::ExcelParse(e.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IoError::ExcelParse("Excel 檔案無工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|_| IoError::SheetNotFound(sheet_name.clone()))?;

        let lines: Vec<Vec<String>> = range
            .rows()
            .enumerate()
            .map(|(idx, row)| {
                row.iter()
                    .map(|cell| {
                        if idx < header_rows {
                            header_text(cell)
                        } else {
                            cell.to_string().trim().to_string()
                        }
                    })
                    .collect()
            })
            .collect();

        split_headers(lines, header_rows)
    }
}

/// 表頭儲存格文字：日期格式的月份表頭轉為月份縮寫（如 `Jan`）
fn header_text(cell: &Data) -> String {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(datetime) => datetime.format("%b").to_string(),
            None => cell.to_string().trim().to_string(),
        },
        _ => cell.to_string().trim().to_string(),
    }
}

/// 通用讀取器（依副檔名選擇）
#[derive(Default)]
pub struct UniversalSheetReader;

impl SheetReader for UniversalSheetReader {
    fn read_sheet(&self, path: &Path, header_rows: usize) -> Result<RawSheet> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvSheetReader.read_sheet(path, header_rows),
            "xlsx" | "xlsm" | "xls" | "ods" => ExcelSheetReader.read_sheet(path, header_rows),
            _ => Err(IoError::UnsupportedFormat(ext)),
        }
    }
}

/// 讀取物料主檔
pub fn read_master(path: &Path) -> Result<RawSheet> {
    UniversalSheetReader.read_sheet(path, MASTER_HEADER_ROWS)
}

/// 讀取物料消耗表
pub fn read_consumption(path: &Path) -> Result<RawSheet> {
    UniversalSheetReader.read_sheet(path, MATRIX_HEADER_ROWS)
}

/// 讀取成品產量表
pub fn read_fg_production(path: &Path) -> Result<RawSheet> {
    UniversalSheetReader.read_sheet(path, MATRIX_HEADER_ROWS)
}

fn check_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// 切分表頭與資料列，略過完全空白的資料列
fn split_headers(lines: Vec<Vec<String>>, header_rows: usize) -> Result<RawSheet> {
    if lines.len() < header_rows {
        return Err(IoError::MissingHeader {
            expected: header_rows,
            actual: lines.len(),
        });
    }

    let mut lines = lines.into_iter();
    let headers: Vec<Vec<String>> = lines.by_ref().take(header_rows).collect();
    let rows: Vec<Vec<String>> = lines
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    tracing::debug!("讀取表格：表頭 {} 列，資料 {} 列", headers.len(), rows.len());

    Ok(RawSheet::new(headers, rows))
}
