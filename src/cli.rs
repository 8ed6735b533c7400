//! 命令列參數

use clap::Parser;
use std::path::PathBuf;

/// 由歷史消耗資料計算季節性原物料安全庫存與再訂購點
#[derive(Debug, Parser)]
#[command(name = "rm-safety-stock", version)]
pub struct Cli {
    /// 物料主檔（.xlsx / .xls / .csv）
    #[arg(long)]
    pub master: PathBuf,

    /// 物料消耗表，兩列表頭：月份、工廠
    #[arg(long)]
    pub consumption: PathBuf,

    /// 成品產量表（目前僅檢查可讀取）
    #[arg(long)]
    pub fg_production: Option<PathBuf>,

    /// JSON 配置檔
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 補貨提前期（天），覆寫配置檔
    #[arg(long)]
    pub lead_time_days: Option<u32>,

    /// 輸出 CSV 路徑，未指定時寫到標準輸出
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// 輸出 debug 日誌
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
