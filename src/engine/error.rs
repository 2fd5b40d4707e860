// ==========================================
// 数据中心成本估算 - 引擎层错误类型
// ==========================================

use thiserror::Error;

use crate::repository::error::RepositoryError;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostModelError {
    /// 通胀率超出 [-1, 1] 或非有限数
    #[error("通胀率超出允许范围 [-1, 1]: {rate}")]
    InvalidInflationRate { rate: f64 },

    /// 起始年份过大, 十年标签无法表示
    #[error("起始年份超出范围: {year}")]
    InvalidStartYear { year: i32 },

    /// 模型参数非法（启动期配置错误）
    #[error("模型参数非法: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// 图表汇总与独立计算的总额不一致（程序缺陷）
    #[error("图表数据不一致: chart={chart}, expected={expected}, actual={actual}")]
    ChartConsistency {
        chart: String,
        expected: f64,
        actual: f64,
    },
}

/// Result 类型别名
pub type CostModelResult<T> = Result<T, CostModelError>;
