//! # RM IO
//!
//! 檔案讀寫：試算表讀入、輸出表寫出、配置檔載入

pub mod config;
pub mod error;
pub mod reader;
pub mod writer;

// Re-export 主要類型
pub use config::load_config;
pub use error::{IoError, Result};
pub use reader::{
    read_consumption, read_fg_production, read_master, CsvSheetReader, ExcelSheetReader,
    SheetReader, UniversalSheetReader,
};
pub use writer::{write_output_csv, write_output_file, OUTPUT_COLUMNS};
