// ==========================================
// 数据中心成本估算 - 图表数据结构
// ==========================================
// 职责: 定义交给外部渲染层的图表序列
// 说明: 数值单位均为 USD, 标题以百万美元呈现
// ==========================================

use serde::{Deserialize, Serialize};

/// 柱状图方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarOrientation {
    Horizontal,
    Vertical,
}

/// 柱状图数据点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
    /// 柱外文字, 如 "$17M"
    pub text: String,
}

/// 建设成本横向柱状图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionChart {
    pub heading: String,
    pub title: String,
    pub orientation: BarOrientation,
    pub x_axis_title: String,
    pub y_axis_title: String,
    /// 保持明细的自然顺序
    pub bars: Vec<BarPoint>,
}

/// 堆叠面积图的一条序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// 十年运维堆叠面积图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmForecastChart {
    pub heading: String,
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    /// 日历年
    pub years: Vec<i32>,
    pub series: Vec<AreaSeries>,
}

/// 环形图切片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSlice {
    pub label: String,
    pub value: f64,
}

/// 十年总拥有成本环形图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeChart {
    pub heading: String,
    pub title: String,
    /// 中心空洞比例
    pub hole: f64,
    pub slices: Vec<DonutSlice>,
}

impl CumulativeChart {
    pub fn slice_total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// 三张图的集合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub construction_chart: ConstructionChart,
    pub operations_chart: OmForecastChart,
    pub cumulative_chart: CumulativeChart,
}
