// ==========================================
// RateImporter 集成测试
// ==========================================
// 测试目标: 费率文件 → RateTable, 以及解析器注入
// ==========================================


use std::collections::HashMap;
use std::fs;
use std::path::Path;

use datacenter_cost::domain::types::CapacityTier;
use datacenter_cost::importer::{
    FileParser, ImportError, ImportResult, RateImporter, RawRecord, ELECTRICITY_FILE,
};
use datacenter_cost::repository::RateSource;
use test_helpers::{create_rate_dir, FIXTURE_ELECTRICITY, FIXTURE_WATER};

#[test]
fn test_fixture_files_load_with_year() {
    let dir = create_rate_dir(2025);
    let table = RateImporter::new()
        .load_rate_table(dir.path(), Some(2025))
        .unwrap();

    for (capacity, rate) in FIXTURE_ELECTRICITY {
        assert_eq!(table.electricity_rate(capacity).unwrap(), rate);
    }
    for (capacity, cost) in FIXTURE_WATER {
        assert_eq!(table.water_cost(capacity).unwrap(), cost);
    }
    assert_eq!(table.rate_year(), Some(2025));
}

#[test]
fn test_without_expected_year_any_year_is_accepted() {
    let dir = create_rate_dir(2019);
    let table = RateImporter::new().load_rate_table(dir.path(), None).unwrap();
    assert_eq!(table.rate_year(), Some(2019));
}

#[test]
fn test_blank_rows_and_extra_columns_are_tolerated() {
    let dir = create_rate_dir(2025);
    fs::write(
        dir.path().join(ELECTRICITY_FILE),
        "Capacity,Value,Notes\n5MW,125,small\n\n20 MW,88,\n100mw,65,large\n",
    )
    .unwrap();

    let table = RateImporter::new().load_rate_table(dir.path(), None).unwrap();
    assert_eq!(table.electricity_rate(CapacityTier::Mw20).unwrap(), 88.0);
    assert_eq!(table.electricity_rate(CapacityTier::Mw100).unwrap(), 65.0);
}

#[test]
fn test_non_numeric_value_reports_row() {
    let dir = create_rate_dir(2025);
    fs::write(
        dir.path().join(ELECTRICITY_FILE),
        "capacity,value\n5MW,125\n20MW,cheap\n100MW,65\n",
    )
    .unwrap();

    let result = RateImporter::new().load_rate_table(dir.path(), None);
    match result {
        Err(ImportError::TypeConversionError { row, field, .. }) => {
            assert_eq!(row, 3);
            assert_eq!(field, "value");
        }
        other => panic!("Expected TypeConversionError, got {:?}", other),
    }
}

/// 内存解析器: 不读磁盘, 直接返回预置行
struct InMemoryParser {
    rows: Vec<(&'static str, &'static str)>,
}

impl FileParser for InMemoryParser {
    fn parse_to_raw_records(&self, _path: &Path) -> ImportResult<(Vec<String>, Vec<RawRecord>)> {
        let headers = vec!["capacity".to_string(), "value".to_string()];
        let records = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, (capacity, value))| {
                let mut fields = HashMap::new();
                fields.insert("capacity".to_string(), capacity.to_string());
                fields.insert("value".to_string(), value.to_string());
                RawRecord { row: i + 2, fields }
            })
            .collect();
        Ok((headers, records))
    }
}

#[test]
fn test_custom_parser_is_used() {
    let importer = RateImporter::with_parser(InMemoryParser {
        rows: vec![("5MW", "1"), ("20MW", "2"), ("100MW", "3")],
    });

    let table = importer
        .load_rate_table(Path::new("/nonexistent"), None)
        .unwrap();
    assert_eq!(table.electricity_rate(CapacityTier::Mw20).unwrap(), 2.0);
    assert_eq!(table.water_cost(CapacityTier::Mw100).unwrap(), 3.0);
    assert_eq!(table.rate_year(), None);
}
