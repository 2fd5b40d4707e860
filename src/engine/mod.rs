// ==========================================
// 数据中心成本估算 - 引擎层
// ==========================================
// 职责: 纯计算（建设成本 / 运维排程 / 图表适配）
// 红线: 引擎不做 I/O, 依赖全部显式注入
// ==========================================

pub mod chart_adapter;
pub mod cost_model;
pub mod error;

// 重导出核心引擎
pub use chart_adapter::ChartAdapter;
pub use cost_model::{
    compound, required_land_acres, validate_inflation_rate, validate_start_year, CostModel,
    CostModelSettings, LandPolicy, OmBaseline,
};
pub use error::{CostModelError, CostModelResult};
