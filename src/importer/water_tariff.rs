// ==========================================
// 数据中心成本估算 - 水费计算
// ==========================================
// 依据: 2025 年丹佛水务费率
// 年度水费 = 日用水量 × 365 / 1000 × 原水单价 + 月度管径费 × 12
// ==========================================

use crate::domain::types::CapacityTier;

/// 原水单价（USD / 千加仑）
pub const RAW_WATER_USD_PER_1000_GALLONS: f64 = 1.04;

/// 各容量用水画像（管径与其月度固定费成对给出）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterProfile {
    pub usage_gallons_per_day: f64,
    pub pipe_size_in: u32,
    pub monthly_pipe_charge_usd: f64,
}

/// 容量 → 用水画像
pub fn water_profile(capacity: CapacityTier) -> WaterProfile {
    match capacity {
        CapacityTier::Mw5 => WaterProfile {
            usage_gallons_per_day: 2_500.0,
            pipe_size_in: 2,
            monthly_pipe_charge_usd: 91.0,
        },
        CapacityTier::Mw20 => WaterProfile {
            usage_gallons_per_day: 10_000.0,
            pipe_size_in: 3,
            monthly_pipe_charge_usd: 196.0,
        },
        CapacityTier::Mw100 => WaterProfile {
            usage_gallons_per_day: 50_000.0,
            pipe_size_in: 8,
            monthly_pipe_charge_usd: 1_355.0,
        },
    }
}

impl WaterProfile {
    /// 年度水费（USD, 取整到美元）
    pub fn annual_cost(&self) -> f64 {
        let annual_gallons = self.usage_gallons_per_day * 365.0;
        let raw_water_cost = annual_gallons / 1_000.0 * RAW_WATER_USD_PER_1000_GALLONS;
        let pipe_charge = self.monthly_pipe_charge_usd * 12.0;

        (raw_water_cost + pipe_charge).round()
    }
}

/// 计算年度水费（USD, 取整到美元）
pub fn annual_water_cost(capacity: CapacityTier) -> f64 {
    water_profile(capacity).annual_cost()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_water_cost() {
        assert_eq!(annual_water_cost(CapacityTier::Mw5), 2_041.0);
        assert_eq!(annual_water_cost(CapacityTier::Mw20), 6_148.0);
        assert_eq!(annual_water_cost(CapacityTier::Mw100), 35_240.0);
    }

    #[test]
    fn test_pipe_charge_comes_from_profile() {
        let mut profile = water_profile(CapacityTier::Mw5);
        let base = profile.annual_cost();

        profile.monthly_pipe_charge_usd += 10.0;
        assert_eq!(profile.annual_cost(), base + 120.0);

        for capacity in CapacityTier::ALL {
            assert!(water_profile(capacity).monthly_pipe_charge_usd > 0.0);
        }
    }
}
