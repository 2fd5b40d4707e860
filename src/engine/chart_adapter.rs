// ==========================================
// 数据中心成本估算 - 图表适配器
// ==========================================
// 职责: ComputationResult → 三张图表的数据序列
// 红线: 不重新计算成本, 只做聚合与重命名
// 红线: 展示汇总必须与独立计算的总额一致
// ==========================================

use tracing::{debug, instrument};

use crate::domain::chart::{
    AreaSeries, BarOrientation, BarPoint, ChartSet, ConstructionChart, CumulativeChart,
    DonutSlice, OmForecastChart,
};
use crate::domain::cost::{ComputationResult, ConstructionBreakdown, OmSchedule};
use crate::engine::error::{CostModelError, CostModelResult};

/// 汇总一致性容差（相对）
pub const CONSISTENCY_TOLERANCE: f64 = 1e-6;

/// 环形图中心空洞比例
pub const DONUT_HOLE: f64 = 0.5;

pub const SERIES_ELECTRICITY: &str = "Electricity";
pub const SERIES_WATER: &str = "Water";
pub const SERIES_OTHER: &str = "Other";
pub const SLICE_CONSTRUCTION: &str = "Construction";

const COST_AXIS_TITLE: &str = "Cost (USD)";

/// USD → 百万美元（取整, 仅用于标题）
fn millions(value_usd: f64) -> String {
    format!("{:.0}", value_usd / 1_000_000.0)
}

fn within_tolerance(expected: f64, actual: f64) -> bool {
    let scale = expected.abs().max(actual.abs()).max(1.0);
    (expected - actual).abs() <= CONSISTENCY_TOLERANCE * scale
}

fn ensure_consistent(chart: &str, expected: f64, actual: f64) -> CostModelResult<()> {
    if within_tolerance(expected, actual) {
        Ok(())
    } else {
        Err(CostModelError::ChartConsistency {
            chart: chart.to_string(),
            expected,
            actual,
        })
    }
}

// ==========================================
// ChartAdapter
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ChartAdapter;

impl ChartAdapter {
    pub fn new() -> Self {
        Self
    }

    /// 生成三张图
    ///
    /// # 参数
    /// - project_name: 仅用于标题
    /// - result: 成本计算结果
    #[instrument(skip(self, result))]
    pub fn build_charts(
        &self,
        project_name: &str,
        result: &ComputationResult,
    ) -> CostModelResult<ChartSet> {
        let construction_chart =
            self.construction_chart(project_name, &result.construction_breakdown)?;
        let operations_chart = self.operations_chart(project_name, &result.om_schedule)?;
        let cumulative_chart = self.cumulative_chart(project_name, result)?;

        debug!(
            bars = construction_chart.bars.len(),
            series = operations_chart.series.len(),
            slices = cumulative_chart.slices.len(),
            "图表数据生成完成"
        );

        Ok(ChartSet {
            construction_chart,
            operations_chart,
            cumulative_chart,
        })
    }

    /// 建设成本横向柱状图（保持明细顺序, 不按金额重排）
    pub fn construction_chart(
        &self,
        project_name: &str,
        breakdown: &ConstructionBreakdown,
    ) -> CostModelResult<ConstructionChart> {
        let bars: Vec<BarPoint> = breakdown
            .items
            .iter()
            .map(|item| BarPoint {
                label: item.label(),
                value: item.base_amount_usd,
                text: format!("${}M", millions(item.base_amount_usd)),
            })
            .collect();

        let bar_total: f64 = bars.iter().map(|b| b.value).sum();
        ensure_consistent("construction", breakdown.total_usd, bar_total)?;

        Ok(ConstructionChart {
            heading: format!("{}: Construction Cost Breakdown", project_name),
            title: format!(
                "Total Construction Cost: ${} Million (USD)",
                millions(breakdown.total_usd)
            ),
            orientation: BarOrientation::Horizontal,
            x_axis_title: COST_AXIS_TITLE.to_string(),
            y_axis_title: String::new(),
            bars,
        })
    }

    /// 十年运维堆叠面积图
    pub fn operations_chart(
        &self,
        project_name: &str,
        schedule: &OmSchedule,
    ) -> CostModelResult<OmForecastChart> {
        let years: Vec<i32> = schedule.years.iter().map(|y| y.calendar_year).collect();

        let series = vec![
            AreaSeries {
                name: SERIES_ELECTRICITY.to_string(),
                values: schedule.years.iter().map(|y| y.electricity_cost_usd).collect(),
            },
            AreaSeries {
                name: SERIES_WATER.to_string(),
                values: schedule.years.iter().map(|y| y.water_cost_usd).collect(),
            },
            AreaSeries {
                name: SERIES_OTHER.to_string(),
                values: schedule.years.iter().map(|y| y.other_cost_usd).collect(),
            },
        ];

        let stacked_total: f64 = series.iter().flat_map(|s| s.values.iter()).sum();
        ensure_consistent("operations", schedule.total_usd(), stacked_total)?;

        let first_year_total = schedule.first_year().map(|y| y.total_usd).unwrap_or(0.0);

        Ok(OmForecastChart {
            heading: format!("{}: 10-Year O&M Cost Forecast", project_name),
            title: format!(
                "First Year Operations and Maintenance Cost: ${}M",
                millions(first_year_total)
            ),
            x_axis_title: "Year".to_string(),
            y_axis_title: COST_AXIS_TITLE.to_string(),
            years,
            series,
        })
    }

    /// 十年总拥有成本环形图
    pub fn cumulative_chart(
        &self,
        project_name: &str,
        result: &ComputationResult,
    ) -> CostModelResult<CumulativeChart> {
        let schedule = &result.om_schedule;
        let slices = vec![
            DonutSlice {
                label: SLICE_CONSTRUCTION.to_string(),
                value: result.construction_breakdown.total_usd,
            },
            DonutSlice {
                label: SERIES_ELECTRICITY.to_string(),
                value: schedule.electricity_total_usd(),
            },
            DonutSlice {
                label: SERIES_WATER.to_string(),
                value: schedule.water_total_usd(),
            },
            DonutSlice {
                label: SERIES_OTHER.to_string(),
                value: schedule.other_total_usd(),
            },
        ];

        let chart = CumulativeChart {
            heading: format!("{}: 10-Year Cumulative Costs", project_name),
            title: format!(
                "Total 10 Year Cost of Ownership: ${}M",
                millions(result.cumulative_ten_year_total_usd)
            ),
            hole: DONUT_HOLE,
            slices,
        };

        ensure_consistent(
            "cumulative",
            result.cumulative_ten_year_total_usd,
            chart.slice_total(),
        )?;
        Ok(chart)
    }
}
