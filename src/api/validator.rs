// ==========================================
// 数据中心成本估算 - 表单输入校验器
// ==========================================
// 职责: 原始表单文本 → ProjectInput
// 规则: 未填项取默认值; 无法识别的容量/等级直接拒绝
// 规则: 通胀率按界面口径截断到 [0, max]
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::config::EstimatorConfig;
use crate::domain::cost::ProjectInput;
use crate::domain::types::{CapacityTier, RatingClass};

pub const DEFAULT_PROJECT_NAME: &str = "New Data Center";

/// 表单允许的起始年份范围
pub const MIN_START_YEAR: i32 = 1900;
pub const MAX_START_YEAR: i32 = 9999;

/// 原始表单（全部为可选文本）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectForm {
    pub name: Option<String>,
    pub capacity: Option<String>,
    pub rating: Option<String>,
    pub inflation: Option<String>,
    pub start_year: Option<String>,
}

// ==========================================
// ProjectInputValidator
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectInputValidator {
    default_inflation_rate: f64,
    max_inflation_rate: f64,
}

impl ProjectInputValidator {
    pub fn new(default_inflation_rate: f64, max_inflation_rate: f64) -> Self {
        Self {
            default_inflation_rate,
            max_inflation_rate,
        }
    }

    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(config.default_inflation_rate, config.max_inflation_rate)
    }

    /// 校验并构建 ProjectInput
    ///
    /// # 参数
    /// - form: 原始表单
    /// - current_year: 未填写起始年份时使用
    pub fn validate(&self, form: &ProjectForm, current_year: i32) -> ApiResult<ProjectInput> {
        let project_name = non_blank(&form.name)
            .unwrap_or(DEFAULT_PROJECT_NAME)
            .to_string();

        let capacity = match non_blank(&form.capacity) {
            Some(raw) => parse_capacity(raw)?,
            None => CapacityTier::Mw5,
        };

        let rating = match non_blank(&form.rating) {
            Some(raw) => parse_rating(raw)?,
            None => RatingClass::TierIII,
        };

        let inflation_rate = match non_blank(&form.inflation) {
            Some(raw) => self.clamp_inflation(parse_inflation(raw)?),
            None => self.default_inflation_rate,
        };

        let start_year = match non_blank(&form.start_year) {
            Some(raw) => parse_start_year(raw)?,
            None => current_year,
        };

        debug!(
            %capacity,
            %rating,
            inflation_rate,
            start_year,
            "表单校验通过"
        );

        Ok(ProjectInput {
            project_name,
            capacity,
            rating,
            inflation_rate,
            start_year,
        })
    }

    /// 截断到界面允许的范围 [0, max]
    pub fn clamp_inflation(&self, rate: f64) -> f64 {
        rate.clamp(0.0, self.max_inflation_rate)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn parse_capacity(raw: &str) -> ApiResult<CapacityTier> {
    CapacityTier::from_str(raw).ok_or_else(|| {
        ApiError::ValidationError(format!(
            "无法识别的容量: '{}'（可选: 5MW, 20MW, 100MW）",
            raw
        ))
    })
}

pub fn parse_rating(raw: &str) -> ApiResult<RatingClass> {
    RatingClass::from_str(raw).ok_or_else(|| {
        ApiError::ValidationError(format!(
            "无法识别的等级: '{}'（可选: Tier III, Tier IV）",
            raw
        ))
    })
}

/// 解析通胀率（非有限数拒绝）
pub fn parse_inflation(raw: &str) -> ApiResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(rate) if rate.is_finite() => Ok(rate),
        _ => Err(ApiError::ValidationError(format!(
            "通胀率必须为小数: '{}'",
            raw
        ))),
    }
}

fn parse_start_year(raw: &str) -> ApiResult<i32> {
    match raw.trim().parse::<i32>() {
        Ok(year) if (MIN_START_YEAR..=MAX_START_YEAR).contains(&year) => Ok(year),
        _ => Err(ApiError::ValidationError(format!(
            "起始年份非法: '{}'（范围 {}..={}）",
            raw, MIN_START_YEAR, MAX_START_YEAR
        ))),
    }
}
