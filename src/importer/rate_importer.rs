// ==========================================
// 数据中心成本估算 - 费率文件导入
// ==========================================
// 职责: 平面费率文件 → 只读 RateTable
// 格式: 必需列 {capacity, value}; 可选列 year; 其余列忽略
// 红线: 缺失/畸形/过期一律在启动期失败, 不在请求路径上重试
// ==========================================

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::domain::types::CapacityTier;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, FileParser, RawRecord};
use crate::repository::rate_source::{RateTable, ELECTRICITY_CATEGORY, WATER_CATEGORY};

pub const ELECTRICITY_FILE: &str = "electricity_rates.csv";
pub const WATER_FILE: &str = "water_costs.csv";

pub const COL_CAPACITY: &str = "capacity";
pub const COL_VALUE: &str = "value";
pub const COL_YEAR: &str = "year";

/// 单个类别的加载结果
#[derive(Debug, Clone, PartialEq)]
pub struct RateFile {
    pub values: BTreeMap<CapacityTier, f64>,
    /// 被采纳行中出现的最大年份
    pub latest_year: Option<i32>,
}

// ==========================================
// RateImporter - 费率导入器
// ==========================================
pub struct RateImporter<P: FileParser = CsvParser> {
    parser: P,
}

impl RateImporter<CsvParser> {
    pub fn new() -> Self {
        Self { parser: CsvParser }
    }
}

impl Default for RateImporter<CsvParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: FileParser> RateImporter<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// 从数据目录加载电价与水费
    ///
    /// # 参数
    /// - data_dir: 数据目录
    /// - expected_year: 期望的费率年份（None 表示不校验时效, 同一容量取最新年份）
    #[instrument(skip(self, data_dir), fields(data_dir = %data_dir.as_ref().display()))]
    pub fn load_rate_table<D: AsRef<Path>>(
        &self,
        data_dir: D,
        expected_year: Option<i32>,
    ) -> ImportResult<RateTable> {
        let dir = data_dir.as_ref();

        let electricity =
            self.load_rate_file(&dir.join(ELECTRICITY_FILE), ELECTRICITY_CATEGORY, expected_year)?;
        let water = self.load_rate_file(&dir.join(WATER_FILE), WATER_CATEGORY, expected_year)?;

        let rate_year = expected_year.or(electricity.latest_year.max(water.latest_year));
        let table = RateTable::new(electricity.values, water.values, rate_year)?;

        info!(rate_year = ?rate_year, "费率表加载完成");
        Ok(table)
    }

    /// 加载单个费率文件
    pub fn load_rate_file(
        &self,
        path: &Path,
        category: &str,
        expected_year: Option<i32>,
    ) -> ImportResult<RateFile> {
        let file_name = path.display().to_string();
        let (headers, records) = self.parser.parse_to_raw_records(path)?;

        for column in [COL_CAPACITY, COL_VALUE] {
            if !headers.iter().any(|h| h == column) {
                return Err(ImportError::MissingColumn {
                    file: file_name.clone(),
                    column: column.to_string(),
                });
            }
        }

        // capacity → (year, value, row)
        let mut accepted: BTreeMap<CapacityTier, (Option<i32>, f64, usize)> = BTreeMap::new();

        for record in &records {
            let capacity = parse_capacity(record)?;
            let value = parse_value(record)?;
            let year = parse_year(record)?;

            if let (Some(expected), Some(row_year)) = (expected_year, year) {
                if expected != row_year {
                    debug!(row = record.row, row_year, expected, "跳过非目标年份费率");
                    continue;
                }
            }

            match accepted.get(&capacity) {
                Some((existing_year, _, _)) if *existing_year == year => {
                    return Err(ImportError::DuplicateCapacity {
                        file: file_name.clone(),
                        row: record.row,
                        capacity: capacity.to_key().to_string(),
                    });
                }
                Some((existing_year, _, _)) if *existing_year > year => {}
                _ => {
                    accepted.insert(capacity, (year, value, record.row));
                }
            }
        }

        if let Some(year) = expected_year {
            for capacity in CapacityTier::ALL {
                if !accepted.contains_key(&capacity) {
                    return Err(ImportError::StaleData {
                        category: category.to_string(),
                        capacity: capacity.to_key().to_string(),
                        year,
                    });
                }
            }
        }

        let latest_year = accepted.values().filter_map(|(year, _, _)| *year).max();
        let values = accepted
            .into_iter()
            .map(|(capacity, (_, value, _))| (capacity, value))
            .collect();

        info!(file = %file_name, category, rows = records.len(), "费率文件解析完成");
        Ok(RateFile {
            values,
            latest_year,
        })
    }
}

/// 数据目录下的费率文件路径
pub fn rate_file_paths(data_dir: &Path) -> (PathBuf, PathBuf) {
    (data_dir.join(ELECTRICITY_FILE), data_dir.join(WATER_FILE))
}

fn parse_capacity(record: &RawRecord) -> ImportResult<CapacityTier> {
    let raw = record.get(COL_CAPACITY).unwrap_or("");
    CapacityTier::from_str(raw).ok_or_else(|| ImportError::UnknownCapacity {
        row: record.row,
        value: raw.to_string(),
    })
}

fn parse_value(record: &RawRecord) -> ImportResult<f64> {
    let raw = record.get(COL_VALUE).unwrap_or("");
    let value = raw
        .parse::<f64>()
        .map_err(|e| ImportError::TypeConversionError {
            row: record.row,
            field: COL_VALUE.to_string(),
            message: format!("'{}': {}", raw, e),
        })?;

    if !value.is_finite() || value < 0.0 {
        return Err(ImportError::NegativeValue {
            row: record.row,
            field: COL_VALUE.to_string(),
            value,
        });
    }
    Ok(value)
}

fn parse_year(record: &RawRecord) -> ImportResult<Option<i32>> {
    match record.get(COL_YEAR) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|e| ImportError::TypeConversionError {
                row: record.row,
                field: COL_YEAR.to_string(),
                message: format!("'{}': {}", raw, e),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::rate_source::RateSource;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    fn write_water(dir: &TempDir) {
        write(dir, WATER_FILE, "capacity,value\n5MW,2041\n20MW,6148\n100MW,35240\n");
    }

    #[test]
    fn test_load_rate_table() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            ELECTRICITY_FILE,
            "capacity,value,source\n5MW,125,Current Year Rates\n20MW,88,Current Year Rates\n100MW,65,Current Year Rates\n",
        );
        write_water(&dir);

        let table = RateImporter::new().load_rate_table(dir.path(), None).unwrap();
        assert_eq!(table.electricity_rate(CapacityTier::Mw5).unwrap(), 125.0);
        assert_eq!(table.water_cost(CapacityTier::Mw20).unwrap(), 6148.0);
        assert_eq!(table.rate_year(), None);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        write_water(&dir);

        let result = RateImporter::new().load_rate_table(dir.path(), None);
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_missing_column() {
        let dir = TempDir::new().unwrap();
        write(&dir, ELECTRICITY_FILE, "capacity,rate\n5MW,125\n");

        let result = RateImporter::new().load_rate_file(
            &dir.path().join(ELECTRICITY_FILE),
            ELECTRICITY_CATEGORY,
            None,
        );
        match result {
            Err(ImportError::MissingColumn { column, .. }) => assert_eq!(column, "value"),
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_value_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, ELECTRICITY_FILE, "capacity,value\n5MW,-3\n");

        let result = RateImporter::new().load_rate_file(
            &dir.path().join(ELECTRICITY_FILE),
            ELECTRICITY_CATEGORY,
            None,
        );
        assert!(matches!(result, Err(ImportError::NegativeValue { row: 2, .. })));
    }

    #[test]
    fn test_unknown_capacity_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, ELECTRICITY_FILE, "capacity,value\n50MW,100\n");

        let result = RateImporter::new().load_rate_file(
            &dir.path().join(ELECTRICITY_FILE),
            ELECTRICITY_CATEGORY,
            None,
        );
        assert!(matches!(result, Err(ImportError::UnknownCapacity { .. })));
    }

    #[test]
    fn test_duplicate_capacity_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, ELECTRICITY_FILE, "capacity,value\n5MW,125\n5 MW,126\n");

        let result = RateImporter::new().load_rate_file(
            &dir.path().join(ELECTRICITY_FILE),
            ELECTRICITY_CATEGORY,
            None,
        );
        assert!(matches!(
            result,
            Err(ImportError::DuplicateCapacity { row: 3, .. })
        ));
    }

    #[test]
    fn test_missing_tier_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, ELECTRICITY_FILE, "capacity,value\n5MW,125\n20MW,88\n");
        write_water(&dir);

        let result = RateImporter::new().load_rate_table(dir.path(), None);
        assert!(matches!(result, Err(ImportError::Repository(_))));
    }

    #[test]
    fn test_expected_year_filters_rows() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            ELECTRICITY_FILE,
            "year,capacity,value\n2024,5MW,120\n2025,5MW,125\n2025,20MW,88\n2025,100MW,65\n",
        );
        write(
            &dir,
            WATER_FILE,
            "year,capacity,value\n2025,5MW,2041\n2025,20MW,6148\n2025,100MW,35240\n",
        );

        let table = RateImporter::new()
            .load_rate_table(dir.path(), Some(2025))
            .unwrap();
        assert_eq!(table.electricity_rate(CapacityTier::Mw5).unwrap(), 125.0);
        assert_eq!(table.rate_year(), Some(2025));
    }

    #[test]
    fn test_stale_year_is_error() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            ELECTRICITY_FILE,
            "year,capacity,value\n2024,5MW,125\n2024,20MW,88\n2024,100MW,65\n",
        );
        write_water(&dir);

        let result = RateImporter::new().load_rate_table(dir.path(), Some(2025));
        match result {
            Err(ImportError::StaleData {
                category,
                capacity,
                year,
            }) => {
                assert_eq!(category, "electricity");
                assert_eq!(capacity, "5MW");
                assert_eq!(year, 2025);
            }
            other => panic!("Expected StaleData, got {:?}", other),
        }
    }

    #[test]
    fn test_latest_year_wins_without_expected_year() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            ELECTRICITY_FILE,
            "year,capacity,value\n2025,5MW,125\n2024,5MW,120\n2025,20MW,88\n2025,100MW,65\n",
        );
        write_water(&dir);

        let table = RateImporter::new().load_rate_table(dir.path(), None).unwrap();
        assert_eq!(table.electricity_rate(CapacityTier::Mw5).unwrap(), 125.0);
        assert_eq!(table.rate_year(), Some(2025));
    }
}
