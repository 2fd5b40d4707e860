// ==========================================
// 数据中心成本估算 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、校验
// 存储: 可选 JSON 文件（缺省时全部取默认值）
// 优先级: 环境变量 > 配置文件 > 默认值
// ==========================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::engine::cost_model::{
    CostModelSettings, LandPolicy, DEFAULT_HOURS_PER_YEAR, DEFAULT_LAND_PRICE_PER_ACRE_USD,
    DEFAULT_LAND_PROPORTION, DEFAULT_UTILIZATION_FACTOR,
};

/// 应用数据目录名
pub const APP_DIR_NAME: &str = "datacenter-cost";

/// 非文件来源的 JSON 在错误中的标识
const INLINE_SOURCE: &str = "<inline>";

// ==========================================
// 配置错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("配置文件格式错误: {path}: {message}")]
    ParseFailed { path: String, message: String },

    #[error("配置项非法: {key}={value}")]
    InvalidValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// LandPolicyKind - 土地计价方式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandPolicyKind {
    #[default]
    Proportion,
    Acreage,
}

impl LandPolicyKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "proportion" => Some(LandPolicyKind::Proportion),
            "acreage" => Some(LandPolicyKind::Acreage),
            _ => None,
        }
    }
}

// ==========================================
// EstimatorConfig - 估算配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// 费率文件目录（None 时使用默认目录）
    pub data_dir: Option<PathBuf>,
    pub land_policy: LandPolicyKind,
    pub land_proportion: f64,
    pub land_price_per_acre_usd: f64,
    pub utilization_factor: f64,
    pub hours_per_year: f64,
    /// 期望的费率年份（None 不做时效校验）
    pub rate_year: Option<i32>,
    pub default_inflation_rate: f64,
    /// 界面允许的最大通胀率
    pub max_inflation_rate: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            land_policy: LandPolicyKind::Proportion,
            land_proportion: DEFAULT_LAND_PROPORTION,
            land_price_per_acre_usd: DEFAULT_LAND_PRICE_PER_ACRE_USD,
            utilization_factor: DEFAULT_UTILIZATION_FACTOR,
            hours_per_year: DEFAULT_HOURS_PER_YEAR,
            rate_year: None,
            default_inflation_rate: 0.03,
            max_inflation_rate: 0.10,
        }
    }
}

impl EstimatorConfig {
    /// 实际使用的数据目录
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// 转换为引擎参数
    pub fn model_settings(&self) -> CostModelSettings {
        let land_policy = match self.land_policy {
            LandPolicyKind::Proportion => LandPolicy::ProportionOfBaseline {
                ratio: self.land_proportion,
            },
            LandPolicyKind::Acreage => LandPolicy::Acreage {
                price_per_acre_usd: self.land_price_per_acre_usd,
            },
        };

        CostModelSettings {
            land_policy,
            utilization_factor: self.utilization_factor,
            hours_per_year: self.hours_per_year,
        }
    }

    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |key: &str, value: f64| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        if !(self.land_proportion.is_finite() && self.land_proportion >= 0.0) {
            return Err(invalid(config_keys::LAND_PROPORTION, self.land_proportion));
        }
        if !(self.land_price_per_acre_usd.is_finite() && self.land_price_per_acre_usd >= 0.0) {
            return Err(invalid(
                config_keys::LAND_PRICE_PER_ACRE_USD,
                self.land_price_per_acre_usd,
            ));
        }
        if !(self.utilization_factor > 0.0 && self.utilization_factor <= 1.0) {
            return Err(invalid(config_keys::UTILIZATION_FACTOR, self.utilization_factor));
        }
        if !(self.hours_per_year.is_finite() && self.hours_per_year > 0.0) {
            return Err(invalid(config_keys::HOURS_PER_YEAR, self.hours_per_year));
        }
        if !(0.0..=1.0).contains(&self.max_inflation_rate) {
            return Err(invalid(config_keys::MAX_INFLATION_RATE, self.max_inflation_rate));
        }
        if !(0.0..=self.max_inflation_rate).contains(&self.default_inflation_rate) {
            return Err(invalid(
                config_keys::DEFAULT_INFLATION_RATE,
                self.default_inflation_rate,
            ));
        }
        Ok(())
    }

    /// 应用覆写（lookup 按环境变量名取值）
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(dir) = non_empty(env_keys::DATA_DIR) {
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = non_empty(env_keys::RATE_YEAR) {
            let year = raw.parse::<i32>().map_err(|_| ConfigError::InvalidValue {
                key: env_keys::RATE_YEAR.to_string(),
                value: raw.clone(),
            })?;
            self.rate_year = Some(year);
        }

        if let Some(raw) = non_empty(env_keys::LAND_POLICY) {
            self.land_policy =
                LandPolicyKind::from_str(&raw).ok_or_else(|| ConfigError::InvalidValue {
                    key: env_keys::LAND_POLICY.to_string(),
                    value: raw.clone(),
                })?;
        }

        Ok(())
    }
}

// ==========================================
// ConfigManager - 配置加载入口
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - path: JSON 配置文件路径（None 时使用默认值）
    ///
    /// # 流程
    /// 1. 读取文件（未知键仅告警）
    /// 2. 应用环境变量覆写
    /// 3. 校验
    pub fn load(path: Option<&Path>) -> ConfigResult<EstimatorConfig> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                info!("未指定配置文件, 使用默认配置");
                EstimatorConfig::default()
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;

        info!(
            data_dir = %config.resolved_data_dir().display(),
            land_policy = ?config.land_policy,
            rate_year = ?config.rate_year,
            "配置加载完成"
        );
        Ok(config)
    }

    /// 从 JSON 文件读取（不含覆写与校验）
    pub fn from_file(path: &Path) -> ConfigResult<EstimatorConfig> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let config = Self::parse_json(&content, &path_str)?;

        info!(path = %path_str, "配置文件已读取");
        Ok(config)
    }

    /// 解析 JSON 文本
    pub fn from_json_str(content: &str) -> ConfigResult<EstimatorConfig> {
        Self::parse_json(content, INLINE_SOURCE)
    }

    fn parse_json(content: &str, source: &str) -> ConfigResult<EstimatorConfig> {
        let parse_failed = |e: serde_json::Error| ConfigError::ParseFailed {
            path: source.to_string(),
            message: e.to_string(),
        };

        let value: serde_json::Value = serde_json::from_str(content).map_err(parse_failed)?;

        if let Some(object) = value.as_object() {
            for key in object.keys() {
                if !config_keys::ALL.contains(&key.as_str()) {
                    warn!(key = %key, source, "忽略未知配置项");
                }
            }
        }

        serde_json::from_value(value).map_err(parse_failed)
    }
}

/// 默认数据目录
///
/// # 返回
/// - 环境变量 DATACENTER_COST_DATA_DIR（非空时）
/// - 用户数据目录/datacenter-cost
/// - ./data（无法获取用户数据目录时）
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(env_keys::DATA_DIR) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::data_dir() {
        Some(dir) => dir.join(APP_DIR_NAME),
        None => PathBuf::from("./data"),
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const DATA_DIR: &str = "data_dir";

    // 土地
    pub const LAND_POLICY: &str = "land_policy";
    pub const LAND_PROPORTION: &str = "land_proportion";
    pub const LAND_PRICE_PER_ACRE_USD: &str = "land_price_per_acre_usd";

    // 电费
    pub const UTILIZATION_FACTOR: &str = "utilization_factor";
    pub const HOURS_PER_YEAR: &str = "hours_per_year";

    // 费率时效
    pub const RATE_YEAR: &str = "rate_year";

    // 通胀
    pub const DEFAULT_INFLATION_RATE: &str = "default_inflation_rate";
    pub const MAX_INFLATION_RATE: &str = "max_inflation_rate";

    pub const ALL: [&str; 9] = [
        DATA_DIR,
        LAND_POLICY,
        LAND_PROPORTION,
        LAND_PRICE_PER_ACRE_USD,
        UTILIZATION_FACTOR,
        HOURS_PER_YEAR,
        RATE_YEAR,
        DEFAULT_INFLATION_RATE,
        MAX_INFLATION_RATE,
    ];
}

/// 环境变量名
pub mod env_keys {
    pub const DATA_DIR: &str = "DATACENTER_COST_DATA_DIR";
    pub const RATE_YEAR: &str = "DATACENTER_COST_RATE_YEAR";
    pub const LAND_POLICY: &str = "DATACENTER_COST_LAND_POLICY";
}
