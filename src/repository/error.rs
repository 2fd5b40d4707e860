// ==========================================
// 数据中心成本估算 - 仓储层错误类型
// ==========================================
// 说明: 仓储层错误均属于配置错误（基线表/费率表缺失或畸形）
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    // ===== 基线表错误 =====
    #[error("基线缺失: table={table}, key={key}")]
    MissingBaseline { table: String, key: String },

    #[error("基线表为空: table={table}, key={key}")]
    EmptyBaseline { table: String, key: String },

    #[error("基线金额非法: table={table}, item={item}, value={value}")]
    InvalidBaselineAmount {
        table: String,
        item: String,
        value: f64,
    },

    // ===== 费率表错误 =====
    #[error("费率缺失: category={category}, capacity={capacity}")]
    MissingRate { category: String, capacity: String },

    #[error("费率非法: category={category}, capacity={capacity}, value={value}")]
    InvalidRate {
        category: String,
        capacity: String,
        value: f64,
    },
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
