// ==========================================
// 数据中心成本估算 - 数据仓储层
// ==========================================
// 红线: Repository 不含计算逻辑
// ==========================================
// 职责: 提供基线表与费率表的只读访问
// ==========================================

pub mod cost_tables;
pub mod error;
pub mod rate_source;

// 重导出核心仓储
pub use cost_tables::CostTables;
pub use error::{RepositoryError, RepositoryResult};
pub use rate_source::{RateSource, RateTable};
