//! 檔案讀寫錯誤類型

use thiserror::Error;

/// 檔案讀寫錯誤
#[derive(Error, Debug)]
pub enum IoError {
    #[error("檔案不存在: {0}")]
    FileNotFound(String),

    #[error("檔案格式不支援: {0}（僅支援 .xlsx/.xls/.ods/.csv）")]
    UnsupportedFormat(String),

    #[error("Excel 解析失敗: {0}")]
    ExcelParse(String),

    #[error("找不到工作表: {0}")]
    SheetNotFound(String),

    #[error("表頭列數不足: 需要 {expected} 列，實際 {actual} 列")]
    MissingHeader { expected: usize, actual: usize },

    #[error("CSV 讀寫失敗: {0}")]
    Csv(#[from] csv::Error),

    #[error("配置檔解析失敗: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IoError>;
