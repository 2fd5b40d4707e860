// ==========================================
// 数据中心成本估算 - 导入层
// ==========================================
// 职责: 平面费率文件的读取与带外刷新
// 支持: CSV
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod rate_importer;
pub mod rate_refresh;
pub mod water_tariff;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, FileParser, RawRecord};
pub use rate_importer::{RateFile, RateImporter, ELECTRICITY_FILE, WATER_FILE};
pub use rate_refresh::{refresh_rate_tables, RefreshReport};
pub use water_tariff::annual_water_cost;
