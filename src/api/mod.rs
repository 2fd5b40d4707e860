// ==========================================
// 数据中心成本估算 - API 层
// ==========================================
// 职责: 对外入口, 供 App Shell 调用
// ==========================================

pub mod error;
pub mod estimator_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use estimator_api::{CostReport, EstimatorApi};
pub use validator::{ProjectForm, ProjectInputValidator, DEFAULT_PROJECT_NAME};
