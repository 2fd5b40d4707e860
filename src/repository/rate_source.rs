// ==========================================
// 数据中心成本估算 - 费率数据源
// ==========================================
// 职责: 按容量提供电价与水费基线
// 生命周期: 启动时加载一次, 之后只读（可并发读取）
// ==========================================

use std::collections::BTreeMap;

use crate::domain::types::CapacityTier;
use crate::repository::error::{RepositoryError, RepositoryResult};

pub const ELECTRICITY_CATEGORY: &str = "electricity";
pub const WATER_CATEGORY: &str = "water";

// ==========================================
// Trait: RateSource
// ==========================================
// 实现者: RateTable（平面文件加载 / 测试夹具）
pub trait RateSource: Send + Sync {
    /// 电价（USD / MWh）
    fn electricity_rate(&self, capacity: CapacityTier) -> RepositoryResult<f64>;

    /// 年度水费（USD）
    fn water_cost(&self, capacity: CapacityTier) -> RepositoryResult<f64>;
}

// ==========================================
// RateTable - 只读内存费率表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    electricity: BTreeMap<CapacityTier, f64>,
    water: BTreeMap<CapacityTier, f64>,
    /// 数据所属年份（文件未携带时为 None）
    rate_year: Option<i32>,
}

impl RateTable {
    /// 构建费率表
    ///
    /// 校验: 每个容量档位都必须有电价和水费, 且为有限非负数
    pub fn new(
        electricity: BTreeMap<CapacityTier, f64>,
        water: BTreeMap<CapacityTier, f64>,
        rate_year: Option<i32>,
    ) -> RepositoryResult<Self> {
        check_category(ELECTRICITY_CATEGORY, &electricity)?;
        check_category(WATER_CATEGORY, &water)?;

        Ok(Self {
            electricity,
            water,
            rate_year,
        })
    }

    /// 由 (档位, 值) 列表构建, 便于测试夹具
    pub fn from_entries(
        electricity: &[(CapacityTier, f64)],
        water: &[(CapacityTier, f64)],
    ) -> RepositoryResult<Self> {
        Self::new(
            electricity.iter().copied().collect(),
            water.iter().copied().collect(),
            None,
        )
    }

    pub fn rate_year(&self) -> Option<i32> {
        self.rate_year
    }
}

impl RateSource for RateTable {
    fn electricity_rate(&self, capacity: CapacityTier) -> RepositoryResult<f64> {
        lookup(ELECTRICITY_CATEGORY, &self.electricity, capacity)
    }

    fn water_cost(&self, capacity: CapacityTier) -> RepositoryResult<f64> {
        lookup(WATER_CATEGORY, &self.water, capacity)
    }
}

fn lookup(
    category: &str,
    table: &BTreeMap<CapacityTier, f64>,
    capacity: CapacityTier,
) -> RepositoryResult<f64> {
    table
        .get(&capacity)
        .copied()
        .ok_or_else(|| RepositoryError::MissingRate {
            category: category.to_string(),
            capacity: capacity.to_key().to_string(),
        })
}

fn check_category(category: &str, table: &BTreeMap<CapacityTier, f64>) -> RepositoryResult<()> {
    for capacity in CapacityTier::ALL {
        let value = lookup(category, table, capacity)?;
        if !value.is_finite() || value < 0.0 {
            return Err(RepositoryError::InvalidRate {
                category: category.to_string(),
                capacity: capacity.to_key().to_string(),
                value,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(values: [f64; 3]) -> Vec<(CapacityTier, f64)> {
        CapacityTier::ALL.iter().copied().zip(values).collect()
    }

    #[test]
    fn test_rate_table_lookup() {
        let table =
            RateTable::from_entries(&full([125.0, 88.0, 65.0]), &full([2041.0, 6148.0, 35240.0]))
                .unwrap();

        assert_eq!(table.electricity_rate(CapacityTier::Mw20).unwrap(), 88.0);
        assert_eq!(table.water_cost(CapacityTier::Mw100).unwrap(), 35240.0);
        assert_eq!(table.rate_year(), None);
    }

    #[test]
    fn test_rate_table_missing_tier() {
        let electricity = vec![(CapacityTier::Mw5, 125.0), (CapacityTier::Mw20, 88.0)];
        let result = RateTable::from_entries(&electricity, &full([1.0, 2.0, 3.0]));

        match result {
            Err(RepositoryError::MissingRate { category, capacity }) => {
                assert_eq!(category, "electricity");
                assert_eq!(capacity, "100MW");
            }
            other => panic!("Expected MissingRate, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_table_negative_value() {
        let result = RateTable::from_entries(&full([125.0, 88.0, 65.0]), &full([1.0, -2.0, 3.0]));
        assert!(matches!(result, Err(RepositoryError::InvalidRate { .. })));
    }
}
