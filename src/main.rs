//! 季節性原物料安全庫存計算（命令列）

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use rm_calc::SeasonalStockCalculator;
use rm_core::{SafetyStockConfig, WarningSeverity};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.verbose { "debug" } else { "info" });

    let mut config = match &cli.config {
        Some(path) => rm_io::load_config(path)
            .with_context(|| format!("無法載入配置檔 {}", path.display()))?,
        None => SafetyStockConfig::default(),
    };
    if let Some(days) = cli.lead_time_days {
        config = config.with_lead_time_days(days);
    }

    let master = rm_io::read_master(&cli.master)
        .with_context(|| format!("無法讀取物料主檔 {}", cli.master.display()))?;
    let consumption = rm_io::read_consumption(&cli.consumption)
        .with_context(|| format!("無法讀取消耗表 {}", cli.consumption.display()))?;

    if let Some(path) = &cli.fg_production {
        let fg = rm_io::read_fg_production(path)
            .with_context(|| format!("無法讀取成品產量表 {}", path.display()))?;
        tracing::info!("成品產量表 {} 列（未納入計算）", fg.rows.len());
    }

    let calculator = SeasonalStockCalculator::new(config);
    let result = calculator
        .calculate(&consumption, &master)
        .context("安全庫存計算失敗")?;

    match &cli.output {
        Some(path) => rm_io::write_output_file(&result.rows, path)
            .with_context(|| format!("無法寫出 {}", path.display()))?,
        None => rm_io::write_output_csv(&result.rows, std::io::stdout().lock())
            .context("無法寫出至標準輸出")?,
    }

    let count = |severity: WarningSeverity| {
        result
            .warnings
            .iter()
            .filter(|w| w.severity == severity)
            .count()
    };
    tracing::info!(
        "完成：{} 列，警告 info={} warning={} error={}",
        result.rows.len(),
        count(WarningSeverity::Info),
        count(WarningSeverity::Warning),
        count(WarningSeverity::Error)
    );

    Ok(())
}
