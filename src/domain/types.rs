// ==========================================
// 数据中心成本估算 - 领域类型定义
// ==========================================
// 容量档位 (CapacityTier) 与 可靠性等级 (RatingClass)
// 红线: 枚举域封闭, 所有基线表必须对枚举全覆盖
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 容量档位 (Capacity Tier)
// ==========================================
// 所有基线成本的缩放参照点
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CapacityTier {
    #[serde(rename = "5MW")]
    Mw5, // 5 MW
    #[serde(rename = "20MW")]
    Mw20, // 20 MW
    #[serde(rename = "100MW")]
    Mw100, // 100 MW
}

impl CapacityTier {
    /// 全部档位（按容量升序）
    pub const ALL: [CapacityTier; 3] = [CapacityTier::Mw5, CapacityTier::Mw20, CapacityTier::Mw100];

    /// 装机容量（MW）
    pub fn megawatts(&self) -> f64 {
        match self {
            CapacityTier::Mw5 => 5.0,
            CapacityTier::Mw20 => 20.0,
            CapacityTier::Mw100 => 100.0,
        }
    }

    /// 从字符串解析容量档位
    ///
    /// 接受 "5MW" / "20 MW" / "100mw" / "20"（前后空白忽略，大小写不敏感）
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let digits = normalized.strip_suffix("MW").unwrap_or(&normalized);

        match digits {
            "5" => Some(CapacityTier::Mw5),
            "20" => Some(CapacityTier::Mw20),
            "100" => Some(CapacityTier::Mw100),
            _ => None,
        }
    }

    /// 转换为平面文件中的键
    pub fn to_key(&self) -> &'static str {
        match self {
            CapacityTier::Mw5 => "5MW",
            CapacityTier::Mw20 => "20MW",
            CapacityTier::Mw100 => "100MW",
        }
    }
}

impl fmt::Display for CapacityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityTier::Mw5 => write!(f, "5 MW"),
            CapacityTier::Mw20 => write!(f, "20 MW"),
            CapacityTier::Mw100 => write!(f, "100 MW"),
        }
    }
}

// ==========================================
// 可靠性等级 (Rating Class)
// ==========================================
// 决定使用哪张建设成本基线表
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingClass {
    #[serde(rename = "Tier III")]
    TierIII,
    #[serde(rename = "Tier IV")]
    TierIV,
}

impl RatingClass {
    pub const ALL: [RatingClass; 2] = [RatingClass::TierIII, RatingClass::TierIV];

    /// 从字符串解析等级
    ///
    /// 接受 "Tier III" / "tierIII" / "TIER_IV" / "III" / "4" 等写法
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let level = normalized.strip_prefix("TIER").unwrap_or(&normalized);

        match level {
            "III" | "3" => Some(RatingClass::TierIII),
            "IV" | "4" => Some(RatingClass::TierIV),
            _ => None,
        }
    }
}

impl fmt::Display for RatingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingClass::TierIII => write!(f, "Tier III"),
            RatingClass::TierIV => write!(f, "Tier IV"),
        }
    }
}
