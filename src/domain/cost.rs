// ==========================================
// 数据中心成本估算 - 成本领域模型
// ==========================================
// 职责: 成本条目、建设成本明细、运维排程、输入与结果
// 红线: 结果按请求重新计算, 不持久化, 不原地修改
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::{CapacityTier, RatingClass};

/// 运维预测年数
pub const FORECAST_YEARS: u32 = 10;

/// 土地购置条目键
pub const LAND_ACQUISITION_KEY: &str = "land_acquisition";

/// 组件键 → 展示名称
///
/// "power_infrastructure" → "Power infrastructure"
pub fn format_component_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

// ==========================================
// CostLineItem - 成本条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub name: String,         // 组件键 (snake_case)
    pub base_amount_usd: f64, // 金额 (USD), >= 0
}

impl CostLineItem {
    pub fn new(name: impl Into<String>, base_amount_usd: f64) -> Self {
        Self {
            name: name.into(),
            base_amount_usd,
        }
    }

    /// 展示名称
    pub fn label(&self) -> String {
        format_component_label(&self.name)
    }
}

// ==========================================
// ConstructionBreakdown - 建设成本明细
// ==========================================
// 不变量: total = 基线条目之和 + 土地条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionBreakdown {
    pub rating: RatingClass,
    pub capacity: CapacityTier,
    /// 有序条目, 最后一项为土地购置
    pub items: Vec<CostLineItem>,
    /// 基线条目之和（不含土地）
    pub baseline_total_usd: f64,
    pub land_acquisition_usd: f64,
    pub total_usd: f64,
}

impl ConstructionBreakdown {
    /// 土地购置条目
    pub fn land_item(&self) -> Option<&CostLineItem> {
        self.items.iter().find(|item| item.name == LAND_ACQUISITION_KEY)
    }
}

// ==========================================
// OmYear / OmSchedule - 运维排程
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmYear {
    pub year_index: u32,    // 1..=10
    pub calendar_year: i32, // 仅用于展示
    pub electricity_cost_usd: f64,
    pub water_cost_usd: f64,
    pub other_cost_usd: f64,
    pub total_usd: f64,
    /// 截至本年的累计运维成本
    pub cumulative_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmSchedule {
    pub capacity: CapacityTier,
    pub inflation_rate: f64,
    pub years: Vec<OmYear>,
    /// 第一年"其他"成本构成（已按容量取基线）
    pub other_line_items: Vec<CostLineItem>,
}

impl OmSchedule {
    pub fn first_year(&self) -> Option<&OmYear> {
        self.years.first()
    }

    pub fn electricity_total_usd(&self) -> f64 {
        self.years.iter().map(|y| y.electricity_cost_usd).sum()
    }

    pub fn water_total_usd(&self) -> f64 {
        self.years.iter().map(|y| y.water_cost_usd).sum()
    }

    pub fn other_total_usd(&self) -> f64 {
        self.years.iter().map(|y| y.other_cost_usd).sum()
    }

    /// 全部年份运维总额
    pub fn total_usd(&self) -> f64 {
        self.years.last().map(|y| y.cumulative_usd).unwrap_or(0.0)
    }
}

// ==========================================
// ProjectInput - 项目输入
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    /// 仅用于展示, 不影响成本
    pub project_name: String,
    pub capacity: CapacityTier,
    pub rating: RatingClass,
    pub inflation_rate: f64,
    /// 预测第一年对应的日历年, 仅用于标注
    pub start_year: i32,
}

// ==========================================
// ComputationResult - 计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    pub construction_breakdown: ConstructionBreakdown,
    pub om_schedule: OmSchedule,
    /// 建设总额 + 十年运维总额
    pub cumulative_ten_year_total_usd: f64,
}
