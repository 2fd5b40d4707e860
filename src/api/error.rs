// ==========================================
// 数据中心成本估算 - API层错误类型
// ==========================================
// 职责: 把各层错误归入两类对外口径
// - ConfigurationError: 启动期致命, 面向运维
// - ValidationError: 计算前拒绝, 面向用户
// ==========================================

use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::error::CostModelError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("配置错误: {0}")]
    ConfigurationError(String),

    #[error("输入校验失败: {0}")]
    ValidationError(String),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 是否应直接展示给用户
    pub fn is_user_facing(&self) -> bool {
        matches!(self, ApiError::ValidationError(_))
    }
}

// ==========================================
// 从 RepositoryError 转换
// 基线/费率缺失都是部署问题
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::ConfigurationError(err.to_string())
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            ImportError::Other(e) => ApiError::Other(e),
            other => ApiError::ConfigurationError(other.to_string()),
        }
    }
}

// ==========================================
// 从 CostModelError 转换
// ==========================================
impl From<CostModelError> for ApiError {
    fn from(err: CostModelError) -> Self {
        match err {
            CostModelError::InvalidInflationRate { .. }
            | CostModelError::InvalidStartYear { .. } => {
                ApiError::ValidationError(err.to_string())
            }
            CostModelError::InvalidSettings(msg) => ApiError::ConfigurationError(msg),
            CostModelError::Repository(e) => e.into(),
            CostModelError::ChartConsistency { .. } => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigurationError(err.to_string())
    }
}

/// API层Result类型
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflation_error_is_user_facing() {
        let err: ApiError = CostModelError::InvalidInflationRate { rate: 2.0 }.into();
        assert!(matches!(err, ApiError::ValidationError(_)));
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_start_year_error_is_user_facing() {
        let err: ApiError = CostModelError::InvalidStartYear { year: i32::MAX }.into();
        assert!(matches!(err, ApiError::ValidationError(_)));
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_repository_error_is_configuration() {
        let err: ApiError = CostModelError::Repository(RepositoryError::MissingRate {
            category: "water".to_string(),
            capacity: "20MW".to_string(),
        })
        .into();
        assert!(matches!(err, ApiError::ConfigurationError(_)));
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_import_error_is_configuration() {
        let err: ApiError = ImportError::FileNotFound("rates.csv".to_string()).into();
        assert!(matches!(err, ApiError::ConfigurationError(msg) if msg.contains("rates.csv")));
    }

    #[test]
    fn test_chart_consistency_is_internal() {
        let err: ApiError = CostModelError::ChartConsistency {
            chart: "cumulative".to_string(),
            expected: 1.0,
            actual: 2.0,
        }
        .into();
        assert!(matches!(err, ApiError::InternalError(_)));
    }
}
