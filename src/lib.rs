// ==========================================
// 数据中心成本估算 - 核心库
// ==========================================
// 系统定位: 假设分析计算器（建设成本 + 十年运维）
// 技术栈: Rust + 平面 CSV 费率文件
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 类型与结果结构
pub mod domain;

// 数据仓储层 - 基线表与费率源
pub mod repository;

// 导入层 - 费率文件读取与刷新
pub mod importer;

// 引擎层 - 成本计算与图表适配
pub mod engine;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 估算入口
pub mod api;

// 应用层 - 启动期组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CapacityTier, RatingClass};

// 领域结构
pub use domain::{
    ChartSet, ComputationResult, ConstructionBreakdown, CostLineItem, OmSchedule, OmYear,
    ProjectInput,
};

// 仓储
pub use repository::{CostTables, RateSource, RateTable};

// 引擎
pub use engine::{ChartAdapter, CostModel, CostModelSettings, LandPolicy};

// API
pub use api::{ApiError, ApiResult, CostReport, EstimatorApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Datacenter Cost Estimator";
