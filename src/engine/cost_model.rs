// ==========================================
// 数据中心成本估算 - 成本计算引擎
// ==========================================
// 职责: 建设成本明细 + 十年运维排程
// 输入: 等级/容量/通胀率 + 注入的基线表与费率源
// 输出: ConstructionBreakdown / OmSchedule / ComputationResult
// 红线: 纯计算, 无 I/O, 无全局状态, 相同输入得到相同结果
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::cost::{
    ComputationResult, ConstructionBreakdown, CostLineItem, OmSchedule, OmYear, ProjectInput,
    FORECAST_YEARS, LAND_ACQUISITION_KEY,
};
use crate::domain::types::{CapacityTier, RatingClass};
use crate::engine::error::{CostModelError, CostModelResult};
use crate::repository::cost_tables::CostTables;
use crate::repository::rate_source::RateSource;

/// 默认土地购置比例（占基线总额）
pub const DEFAULT_LAND_PROPORTION: f64 = 0.05;
/// 默认土地单价（USD / 英亩）
pub const DEFAULT_LAND_PRICE_PER_ACRE_USD: f64 = 1_000_000.0;
/// 默认负载率
pub const DEFAULT_UTILIZATION_FACTOR: f64 = 0.90;
/// 每年小时数
pub const DEFAULT_HOURS_PER_YEAR: f64 = 8_760.0;

/// 通胀率硬边界
pub const MIN_INFLATION_RATE: f64 = -1.0;
pub const MAX_INFLATION_RATE: f64 = 1.0;

// ==========================================
// LandPolicy - 土地购置计价策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LandPolicy {
    /// 基线总额 × 比例
    ProportionOfBaseline { ratio: f64 },
    /// 所需英亩数 × 单价
    Acreage { price_per_acre_usd: f64 },
}

impl Default for LandPolicy {
    fn default() -> Self {
        LandPolicy::ProportionOfBaseline {
            ratio: DEFAULT_LAND_PROPORTION,
        }
    }
}

/// 各容量所需土地（英亩）
pub fn required_land_acres(capacity: CapacityTier) -> f64 {
    match capacity {
        CapacityTier::Mw5 => 4.0,
        CapacityTier::Mw20 => 15.0,
        CapacityTier::Mw100 => 35.0,
    }
}

// ==========================================
// CostModelSettings - 模型参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostModelSettings {
    pub land_policy: LandPolicy,
    pub utilization_factor: f64,
    pub hours_per_year: f64,
}

impl Default for CostModelSettings {
    fn default() -> Self {
        Self {
            land_policy: LandPolicy::default(),
            utilization_factor: DEFAULT_UTILIZATION_FACTOR,
            hours_per_year: DEFAULT_HOURS_PER_YEAR,
        }
    }
}

impl CostModelSettings {
    pub fn validate(&self) -> CostModelResult<()> {
        match self.land_policy {
            LandPolicy::ProportionOfBaseline { ratio } if !(ratio.is_finite() && ratio >= 0.0) => {
                return Err(CostModelError::InvalidSettings(format!(
                    "土地比例必须为非负数: {}",
                    ratio
                )));
            }
            LandPolicy::Acreage { price_per_acre_usd }
                if !(price_per_acre_usd.is_finite() && price_per_acre_usd >= 0.0) =>
            {
                return Err(CostModelError::InvalidSettings(format!(
                    "土地单价必须为非负数: {}",
                    price_per_acre_usd
                )));
            }
            _ => {}
        }

        if !(self.utilization_factor > 0.0 && self.utilization_factor <= 1.0) {
            return Err(CostModelError::InvalidSettings(format!(
                "负载率必须在 (0, 1] 内: {}",
                self.utilization_factor
            )));
        }

        if !(self.hours_per_year.is_finite() && self.hours_per_year > 0.0) {
            return Err(CostModelError::InvalidSettings(format!(
                "年小时数必须为正数: {}",
                self.hours_per_year
            )));
        }

        Ok(())
    }
}

/// 第一年运维基线
#[derive(Debug, Clone, PartialEq)]
pub struct OmBaseline {
    pub electricity_usd: f64,
    pub water_usd: f64,
    pub other_usd: f64,
    pub other_items: Vec<CostLineItem>,
}

/// 校验通胀率（NaN 同样拒绝）
pub fn validate_inflation_rate(rate: f64) -> CostModelResult<()> {
    if (MIN_INFLATION_RATE..=MAX_INFLATION_RATE).contains(&rate) {
        Ok(())
    } else {
        Err(CostModelError::InvalidInflationRate { rate })
    }
}

/// 校验起始年份: 预测期最后一年须仍可表示
pub fn validate_start_year(start_year: i32) -> CostModelResult<()> {
    match start_year.checked_add(FORECAST_YEARS as i32 - 1) {
        Some(_) => Ok(()),
        None => Err(CostModelError::InvalidStartYear { year: start_year }),
    }
}

/// 复利: baseline × (1 + rate)^(year_index - 1)
pub fn compound(baseline: f64, rate: f64, year_index: u32) -> f64 {
    baseline * (1.0 + rate).powi(year_index as i32 - 1)
}

// ==========================================
// CostModel - 成本计算引擎
// ==========================================
pub struct CostModel {
    tables: Arc<CostTables>,
    rates: Arc<dyn RateSource>,
    settings: CostModelSettings,
}

impl CostModel {
    /// 创建成本计算引擎
    ///
    /// # 参数
    /// - tables: 已校验覆盖的基线表
    /// - rates: 启动期加载的只读费率源
    /// - settings: 模型参数（非法时返回 InvalidSettings）
    pub fn new(
        tables: Arc<CostTables>,
        rates: Arc<dyn RateSource>,
        settings: CostModelSettings,
    ) -> CostModelResult<Self> {
        settings.validate()?;
        Ok(Self {
            tables,
            rates,
            settings,
        })
    }

    pub fn settings(&self) -> &CostModelSettings {
        &self.settings
    }

    // ==========================================
    // 建设成本
    // ==========================================

    /// 计算建设成本明细
    ///
    /// 顺序: 基线条目（表内顺序）+ 土地购置（追加在末尾）
    #[instrument(skip(self))]
    pub fn compute_construction_breakdown(
        &self,
        rating: RatingClass,
        capacity: CapacityTier,
    ) -> CostModelResult<ConstructionBreakdown> {
        let baseline = self.tables.construction_baseline(rating, capacity)?;

        let mut items: Vec<CostLineItem> = baseline.to_vec();
        let baseline_total_usd: f64 = items.iter().map(|i| i.base_amount_usd).sum();

        let land_acquisition_usd = self.land_acquisition_cost(capacity, baseline_total_usd);
        items.push(CostLineItem::new(LAND_ACQUISITION_KEY, land_acquisition_usd));

        let total_usd: f64 = items.iter().map(|i| i.base_amount_usd).sum();

        debug!(baseline_total_usd, land_acquisition_usd, total_usd, "建设成本计算完成");
        Ok(ConstructionBreakdown {
            rating,
            capacity,
            items,
            baseline_total_usd,
            land_acquisition_usd,
            total_usd,
        })
    }

    /// 土地购置成本（随容量变化, 不为负）
    pub fn land_acquisition_cost(&self, capacity: CapacityTier, baseline_total_usd: f64) -> f64 {
        let cost = match self.settings.land_policy {
            LandPolicy::ProportionOfBaseline { ratio } => baseline_total_usd * ratio,
            LandPolicy::Acreage { price_per_acre_usd } => {
                required_land_acres(capacity) * price_per_acre_usd
            }
        };
        cost.max(0.0)
    }

    // ==========================================
    // 运维成本
    // ==========================================

    /// 第一年运维基线
    ///
    /// - 电费 = 电价(USD/MWh) × MW × 年小时数 × 负载率
    /// - 水费 = 年度水费 × MW
    /// - 其他 = 运维基线条目之和
    pub fn om_baseline(&self, capacity: CapacityTier) -> CostModelResult<OmBaseline> {
        let mw = capacity.megawatts();

        let rate = self.rates.electricity_rate(capacity)?;
        let electricity_usd =
            rate * mw * self.settings.hours_per_year * self.settings.utilization_factor;

        let water_usd = self.rates.water_cost(capacity)? * mw;

        let other_items = self.tables.om_baseline(capacity)?.to_vec();
        let other_usd: f64 = other_items.iter().map(|i| i.base_amount_usd).sum();

        Ok(OmBaseline {
            electricity_usd,
            water_usd,
            other_usd,
            other_items,
        })
    }

    /// 计算十年运维排程
    ///
    /// 三条成本流各自独立复利, 不先求和再复利
    #[instrument(skip(self))]
    pub fn compute_om_schedule(
        &self,
        capacity: CapacityTier,
        inflation_rate: f64,
        start_year: i32,
    ) -> CostModelResult<OmSchedule> {
        validate_inflation_rate(inflation_rate)?;
        validate_start_year(start_year)?;

        let baseline = self.om_baseline(capacity)?;

        let mut cumulative_usd = 0.0;
        let years = (1..=FORECAST_YEARS)
            .map(|year_index| {
                let electricity_cost_usd =
                    compound(baseline.electricity_usd, inflation_rate, year_index);
                let water_cost_usd = compound(baseline.water_usd, inflation_rate, year_index);
                let other_cost_usd = compound(baseline.other_usd, inflation_rate, year_index);
                let total_usd = electricity_cost_usd + water_cost_usd + other_cost_usd;
                cumulative_usd += total_usd;

                OmYear {
                    year_index,
                    calendar_year: start_year + (year_index as i32 - 1),
                    electricity_cost_usd,
                    water_cost_usd,
                    other_cost_usd,
                    total_usd,
                    cumulative_usd,
                }
            })
            .collect();

        Ok(OmSchedule {
            capacity,
            inflation_rate,
            years,
            other_line_items: baseline.other_items,
        })
    }

    // ==========================================
    // 整体计算
    // ==========================================

    /// 计算完整结果（先校验, 再计算）
    pub fn compute(&self, input: &ProjectInput) -> CostModelResult<ComputationResult> {
        validate_inflation_rate(input.inflation_rate)?;

        let construction_breakdown =
            self.compute_construction_breakdown(input.rating, input.capacity)?;
        let om_schedule =
            self.compute_om_schedule(input.capacity, input.inflation_rate, input.start_year)?;

        let cumulative_ten_year_total_usd = construction_breakdown.total_usd
            + om_schedule.electricity_total_usd()
            + om_schedule.water_total_usd()
            + om_schedule.other_total_usd();

        Ok(ComputationResult {
            construction_breakdown,
            om_schedule,
            cumulative_ten_year_total_usd,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::rate_source::RateTable;

    fn fixture_rates() -> Arc<dyn RateSource> {
        let table = RateTable::from_entries(
            &[
                (CapacityTier::Mw5, 125.0),
                (CapacityTier::Mw20, 88.0),
                (CapacityTier::Mw100, 65.0),
            ],
            &[
                (CapacityTier::Mw5, 2_041.0),
                (CapacityTier::Mw20, 6_148.0),
                (CapacityTier::Mw100, 35_240.0),
            ],
        )
        .unwrap();
        Arc::new(table)
    }

    fn model_with(settings: CostModelSettings) -> CostModel {
        let tables = Arc::new(CostTables::builtin().unwrap());
        CostModel::new(tables, fixture_rates(), settings).unwrap()
    }

    #[test]
    fn test_compound_year_one_is_baseline() {
        assert_eq!(compound(100.0, 0.05, 1), 100.0);
        assert_eq!(compound(100.0, 0.0, 10), 100.0);
        assert!((compound(100.0, 0.1, 3) - 121.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_inflation_rate_bounds() {
        assert!(validate_inflation_rate(-1.0).is_ok());
        assert!(validate_inflation_rate(1.0).is_ok());
        assert!(validate_inflation_rate(0.03).is_ok());
        assert!(validate_inflation_rate(1.5).is_err());
        assert!(validate_inflation_rate(-1.5).is_err());
        assert!(validate_inflation_rate(f64::NAN).is_err());
        assert!(validate_inflation_rate(f64::INFINITY).is_err());
    }

    #[test]
    fn test_construction_breakdown_appends_land_last() {
        let model = model_with(CostModelSettings::default());
        let breakdown = model
            .compute_construction_breakdown(RatingClass::TierIII, CapacityTier::Mw5)
            .unwrap();

        assert_eq!(breakdown.items.len(), 6);
        assert_eq!(breakdown.items[0].name, "site_preparation");
        assert_eq!(breakdown.items.last().unwrap().name, LAND_ACQUISITION_KEY);
        assert_eq!(breakdown.baseline_total_usd, 45_000_000.0);
        assert_eq!(breakdown.land_acquisition_usd, 2_250_000.0);
        assert_eq!(breakdown.total_usd, 47_250_000.0);
    }

    #[test]
    fn test_acreage_land_policy() {
        let model = model_with(CostModelSettings {
            land_policy: LandPolicy::Acreage {
                price_per_acre_usd: DEFAULT_LAND_PRICE_PER_ACRE_USD,
            },
            ..CostModelSettings::default()
        });
        let breakdown = model
            .compute_construction_breakdown(RatingClass::TierIV, CapacityTier::Mw20)
            .unwrap();

        assert_eq!(breakdown.land_acquisition_usd, 15_000_000.0);
        assert_eq!(breakdown.total_usd, 215_280_000.0 + 15_000_000.0);
    }

    #[test]
    fn test_om_baseline_values() {
        let model = model_with(CostModelSettings::default());
        let baseline = model.om_baseline(CapacityTier::Mw20).unwrap();

        assert!((baseline.electricity_usd - 88.0 * 20.0 * 8_760.0 * 0.9).abs() < 1e-6);
        assert_eq!(baseline.water_usd, 6_148.0 * 20.0);
        assert_eq!(baseline.other_usd, 9_100_000.0);
        assert_eq!(baseline.other_items.len(), 3);
    }

    #[test]
    fn test_om_schedule_calendar_years_and_cumulative() {
        let model = model_with(CostModelSettings::default());
        let schedule = model
            .compute_om_schedule(CapacityTier::Mw5, 0.02, 2025)
            .unwrap();

        assert_eq!(schedule.years.len(), FORECAST_YEARS as usize);
        assert_eq!(schedule.years[0].calendar_year, 2025);
        assert_eq!(schedule.years[9].calendar_year, 2034);

        let mut running = 0.0;
        for year in &schedule.years {
            running += year.total_usd;
            assert_eq!(year.cumulative_usd, running);
        }
    }

    #[test]
    fn test_om_schedule_rejects_out_of_range_inflation() {
        let model = model_with(CostModelSettings::default());
        let result = model.compute_om_schedule(CapacityTier::Mw5, 1.5, 2025);
        assert_eq!(
            result.unwrap_err(),
            CostModelError::InvalidInflationRate { rate: 1.5 }
        );
    }

    #[test]
    fn test_om_schedule_rejects_unrepresentable_start_year() {
        let model = model_with(CostModelSettings::default());
        let result = model.compute_om_schedule(CapacityTier::Mw5, 0.0, i32::MAX);
        assert_eq!(
            result.unwrap_err(),
            CostModelError::InvalidStartYear { year: i32::MAX }
        );

        let last_ok = i32::MAX - (FORECAST_YEARS as i32 - 1);
        let schedule = model
            .compute_om_schedule(CapacityTier::Mw5, 0.0, last_ok)
            .unwrap();
        assert_eq!(schedule.years[9].calendar_year, i32::MAX);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let tables = Arc::new(CostTables::builtin().unwrap());
        let result = CostModel::new(
            tables,
            fixture_rates(),
            CostModelSettings {
                utilization_factor: 1.5,
                ..CostModelSettings::default()
            },
        );
        assert!(matches!(result, Err(CostModelError::InvalidSettings(_))));

        let tables = Arc::new(CostTables::builtin().unwrap());
        let result = CostModel::new(
            tables,
            fixture_rates(),
            CostModelSettings {
                land_policy: LandPolicy::ProportionOfBaseline { ratio: -0.1 },
                ..CostModelSettings::default()
            },
        );
        assert!(matches!(result, Err(CostModelError::InvalidSettings(_))));
    }
}
