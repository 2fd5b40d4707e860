// ==========================================
// 数据中心成本估算 - 费率文件刷新（带外步骤）
// ==========================================
// 职责: 重新生成 electricity_rates.csv / water_costs.csv
// 红线: 不在请求路径上执行; 失败即报错, 不静默降级
// ==========================================

use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;
use serde::Serialize;
use tracing::{info, instrument};

use crate::domain::types::CapacityTier;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::rate_importer::rate_file_paths;
use crate::importer::water_tariff::annual_water_cost;

pub const ELECTRICITY_SOURCE: &str = "Current Year Rates";
pub const WATER_SOURCE: &str = "Denver Water 2025 Rates";

/// 当前电价（美分 / kWh）
pub fn current_rate_cents_per_kwh(capacity: CapacityTier) -> f64 {
    match capacity {
        CapacityTier::Mw5 => 12.5,
        CapacityTier::Mw20 => 8.8,
        CapacityTier::Mw100 => 6.5,
    }
}

/// 美分/kWh → USD/MWh
pub fn cents_per_kwh_to_usd_per_mwh(cents: f64) -> f64 {
    (cents * 10.0 * 100.0).round() / 100.0
}

#[derive(Debug, Serialize)]
struct RateRow<'a> {
    year: i32,
    capacity: &'a str,
    value: f64,
    source: &'a str,
}

/// 刷新结果
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub year: i32,
    pub electricity_file: PathBuf,
    pub water_file: PathBuf,
    pub rows_written: usize,
}

/// 重新生成费率文件
///
/// # 参数
/// - data_dir: 数据目录（不存在时创建）
/// - year: 写入文件的费率年份
#[instrument(skip(data_dir), fields(data_dir = %data_dir.display()))]
pub fn refresh_rate_tables(data_dir: &Path, year: i32) -> ImportResult<RefreshReport> {
    fs::create_dir_all(data_dir).map_err(|e| {
        ImportError::FileWriteError(format!("{}: {}", data_dir.display(), e))
    })?;

    let (electricity_file, water_file) = rate_file_paths(data_dir);

    let electricity_rows: Vec<RateRow> = CapacityTier::ALL
        .iter()
        .map(|capacity| RateRow {
            year,
            capacity: capacity.to_key(),
            value: cents_per_kwh_to_usd_per_mwh(current_rate_cents_per_kwh(*capacity)),
            source: ELECTRICITY_SOURCE,
        })
        .collect();
    write_rows(&electricity_file, &electricity_rows)?;
    info!(file = %electricity_file.display(), rows = electricity_rows.len(), "电价文件已写入");

    let water_rows: Vec<RateRow> = CapacityTier::ALL
        .iter()
        .map(|capacity| RateRow {
            year,
            capacity: capacity.to_key(),
            value: annual_water_cost(*capacity),
            source: WATER_SOURCE,
        })
        .collect();
    write_rows(&water_file, &water_rows)?;
    info!(file = %water_file.display(), rows = water_rows.len(), "水费文件已写入");

    Ok(RefreshReport {
        year,
        electricity_file,
        water_file,
        rows_written: electricity_rows.len() + water_rows.len(),
    })
}

fn write_rows(path: &Path, rows: &[RateRow]) -> ImportResult<()> {
    let to_write_error =
        |e: csv::Error| ImportError::FileWriteError(format!("{}: {}", path.display(), e));

    let mut writer = Writer::from_path(path).map_err(to_write_error)?;
    for row in rows {
        writer.serialize(row).map_err(to_write_error)?;
    }
    writer
        .flush()
        .map_err(|e| ImportError::FileWriteError(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::rate_importer::RateImporter;
    use crate::repository::rate_source::RateSource;
    use tempfile::TempDir;

    #[test]
    fn test_cents_conversion() {
        assert_eq!(cents_per_kwh_to_usd_per_mwh(12.5), 125.0);
        assert_eq!(cents_per_kwh_to_usd_per_mwh(8.8), 88.0);
        assert_eq!(cents_per_kwh_to_usd_per_mwh(6.5), 65.0);
    }

    #[test]
    fn test_refresh_then_load() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");

        let report = refresh_rate_tables(&data_dir, 2025).unwrap();
        assert_eq!(report.rows_written, 6);
        assert!(report.electricity_file.exists());
        assert!(report.water_file.exists());

        let table = RateImporter::new()
            .load_rate_table(&data_dir, Some(2025))
            .unwrap();
        assert_eq!(table.electricity_rate(CapacityTier::Mw5).unwrap(), 125.0);
        assert_eq!(table.electricity_rate(CapacityTier::Mw20).unwrap(), 88.0);
        assert_eq!(table.electricity_rate(CapacityTier::Mw100).unwrap(), 65.0);
        assert_eq!(table.water_cost(CapacityTier::Mw20).unwrap(), 6148.0);
    }

    #[test]
    fn test_refreshed_year_is_checked() {
        let dir = TempDir::new().unwrap();
        refresh_rate_tables(dir.path(), 2024).unwrap();

        let result = RateImporter::new().load_rate_table(dir.path(), Some(2025));
        assert!(matches!(result, Err(ImportError::StaleData { .. })));
    }
}
