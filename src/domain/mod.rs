// ==========================================
// 数据中心成本估算 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、图表序列
// 红线: 不含数据访问逻辑,不含计算逻辑
// ==========================================

pub mod chart;
pub mod cost;
pub mod types;

// 重导出核心类型
pub use chart::{
    AreaSeries, BarOrientation, BarPoint, ChartSet, ConstructionChart, CumulativeChart,
    DonutSlice, OmForecastChart,
};
pub use cost::{
    format_component_label, ComputationResult, ConstructionBreakdown, CostLineItem, OmSchedule,
    OmYear, ProjectInput, FORECAST_YEARS, LAND_ACQUISITION_KEY,
};
pub use types::{CapacityTier, RatingClass};
