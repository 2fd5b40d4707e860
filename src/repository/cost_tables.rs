// ==========================================
// 数据中心成本估算 - 成本基线表
// ==========================================
// 职责: 持有不可变的建设/运维基线数据
// 红线: 加载时校验枚举全覆盖, 缺项立即失败, 不做静默默认
// ==========================================

use std::collections::BTreeMap;

use crate::domain::cost::CostLineItem;
use crate::domain::types::{CapacityTier, RatingClass};
use crate::repository::error::{RepositoryError, RepositoryResult};

const CONSTRUCTION_TABLE: &str = "construction_baseline";
const OM_TABLE: &str = "om_baseline";

// ==========================================
// 内置建设成本基线 (USD)
// ==========================================
// 每个 (等级, 容量) 组合一张显式表, 不做跨容量插值
const TIER_III_5MW: &[(&str, f64)] = &[
    ("site_preparation", 2_000_000.0),
    ("building_shell", 9_500_000.0),
    ("power_infrastructure", 17_000_000.0),
    ("cooling_infrastructure", 11_500_000.0),
    ("fit_out", 5_000_000.0),
];

const TIER_III_20MW: &[(&str, f64)] = &[
    ("site_preparation", 7_360_000.0),
    ("building_shell", 34_960_000.0),
    ("power_infrastructure", 62_560_000.0),
    ("cooling_infrastructure", 42_320_000.0),
    ("fit_out", 18_400_000.0),
];

const TIER_III_100MW: &[(&str, f64)] = &[
    ("site_preparation", 34_000_000.0),
    ("building_shell", 161_500_000.0),
    ("power_infrastructure", 289_000_000.0),
    ("cooling_infrastructure", 195_500_000.0),
    ("fit_out", 85_000_000.0),
];

const TIER_IV_5MW: &[(&str, f64)] = &[
    ("site_preparation", 2_250_000.0),
    ("building_shell", 11_500_000.0),
    ("power_infrastructure", 23_000_000.0),
    ("cooling_infrastructure", 15_500_000.0),
    ("fit_out", 6_250_000.0),
];

const TIER_IV_20MW: &[(&str, f64)] = &[
    ("site_preparation", 8_280_000.0),
    ("building_shell", 42_320_000.0),
    ("power_infrastructure", 84_640_000.0),
    ("cooling_infrastructure", 57_040_000.0),
    ("fit_out", 23_000_000.0),
];

const TIER_IV_100MW: &[(&str, f64)] = &[
    ("site_preparation", 38_250_000.0),
    ("building_shell", 195_500_000.0),
    ("power_infrastructure", 391_000_000.0),
    ("cooling_infrastructure", 263_500_000.0),
    ("fit_out", 106_250_000.0),
];

// ==========================================
// 内置年度运维基线 (USD, 不含电费/水费)
// ==========================================
const OM_5MW: &[(&str, f64)] = &[
    ("staffing", 1_800_000.0),
    ("maintenance_contracts", 950_000.0),
    ("insurance", 400_000.0),
];

const OM_20MW: &[(&str, f64)] = &[
    ("staffing", 4_200_000.0),
    ("maintenance_contracts", 3_400_000.0),
    ("insurance", 1_500_000.0),
];

const OM_100MW: &[(&str, f64)] = &[
    ("staffing", 11_500_000.0),
    ("maintenance_contracts", 15_000_000.0),
    ("insurance", 6_800_000.0),
];

fn to_items(rows: &[(&str, f64)]) -> Vec<CostLineItem> {
    rows.iter()
        .map(|(name, amount)| CostLineItem::new(*name, *amount))
        .collect()
}

// ==========================================
// CostTables - 成本基线表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CostTables {
    construction: BTreeMap<(RatingClass, CapacityTier), Vec<CostLineItem>>,
    om: BTreeMap<CapacityTier, Vec<CostLineItem>>,
}

impl CostTables {
    /// 内置基线表（已校验覆盖）
    pub fn builtin() -> RepositoryResult<Self> {
        let mut construction = BTreeMap::new();
        construction.insert((RatingClass::TierIII, CapacityTier::Mw5), to_items(TIER_III_5MW));
        construction.insert((RatingClass::TierIII, CapacityTier::Mw20), to_items(TIER_III_20MW));
        construction.insert((RatingClass::TierIII, CapacityTier::Mw100), to_items(TIER_III_100MW));
        construction.insert((RatingClass::TierIV, CapacityTier::Mw5), to_items(TIER_IV_5MW));
        construction.insert((RatingClass::TierIV, CapacityTier::Mw20), to_items(TIER_IV_20MW));
        construction.insert((RatingClass::TierIV, CapacityTier::Mw100), to_items(TIER_IV_100MW));

        let mut om = BTreeMap::new();
        om.insert(CapacityTier::Mw5, to_items(OM_5MW));
        om.insert(CapacityTier::Mw20, to_items(OM_20MW));
        om.insert(CapacityTier::Mw100, to_items(OM_100MW));

        Self::from_parts(construction, om)
    }

    /// 从显式映射构建（测试夹具/外部基线）
    pub fn from_parts(
        construction: BTreeMap<(RatingClass, CapacityTier), Vec<CostLineItem>>,
        om: BTreeMap<CapacityTier, Vec<CostLineItem>>,
    ) -> RepositoryResult<Self> {
        let tables = Self { construction, om };
        tables.verify_coverage()?;
        Ok(tables)
    }

    /// 校验枚举全覆盖 + 金额合法
    pub fn verify_coverage(&self) -> RepositoryResult<()> {
        for rating in RatingClass::ALL {
            for capacity in CapacityTier::ALL {
                let key = format!("{}/{}", rating, capacity.to_key());
                let items = self.construction.get(&(rating, capacity)).ok_or_else(|| {
                    RepositoryError::MissingBaseline {
                        table: CONSTRUCTION_TABLE.to_string(),
                        key: key.clone(),
                    }
                })?;
                check_items(CONSTRUCTION_TABLE, &key, items)?;
            }
        }

        for capacity in CapacityTier::ALL {
            let key = capacity.to_key().to_string();
            let items = self
                .om
                .get(&capacity)
                .ok_or_else(|| RepositoryError::MissingBaseline {
                    table: OM_TABLE.to_string(),
                    key: key.clone(),
                })?;
            check_items(OM_TABLE, &key, items)?;
        }

        Ok(())
    }

    /// 建设成本基线（有序）
    pub fn construction_baseline(
        &self,
        rating: RatingClass,
        capacity: CapacityTier,
    ) -> RepositoryResult<&[CostLineItem]> {
        self.construction
            .get(&(rating, capacity))
            .map(|items| items.as_slice())
            .ok_or_else(|| RepositoryError::MissingBaseline {
                table: CONSTRUCTION_TABLE.to_string(),
                key: format!("{}/{}", rating, capacity.to_key()),
            })
    }

    /// 运维基线（不含电费/水费, 有序）
    pub fn om_baseline(&self, capacity: CapacityTier) -> RepositoryResult<&[CostLineItem]> {
        self.om
            .get(&capacity)
            .map(|items| items.as_slice())
            .ok_or_else(|| RepositoryError::MissingBaseline {
                table: OM_TABLE.to_string(),
                key: capacity.to_key().to_string(),
            })
    }
}

fn check_items(table: &str, key: &str, items: &[CostLineItem]) -> RepositoryResult<()> {
    if items.is_empty() {
        return Err(RepositoryError::EmptyBaseline {
            table: table.to_string(),
            key: key.to_string(),
        });
    }

    for item in items {
        if !item.base_amount_usd.is_finite() || item.base_amount_usd < 0.0 {
            return Err(RepositoryError::InvalidBaselineAmount {
                table: table.to_string(),
                item: item.name.clone(),
                value: item.base_amount_usd,
            });
        }
    }

    Ok(())
}
