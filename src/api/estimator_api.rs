// ==========================================
// 数据中心成本估算 - 估算 API（唯一入口）
// ==========================================
// 职责: ProjectInput → CostReport（计算结果 + 图表序列）
// 流程: 校验 → 建设成本 → 运维排程 → 图表
// 红线: 每次请求重新计算, 不缓存, 不修改共享状态
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::domain::chart::ChartSet;
use crate::domain::cost::{ComputationResult, ProjectInput};
use crate::engine::chart_adapter::ChartAdapter;
use crate::engine::cost_model::{validate_inflation_rate, CostModel};

/// 单次估算的完整输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub project_name: String,
    pub result: ComputationResult,
    pub charts: ChartSet,
}

// ==========================================
// EstimatorApi
// ==========================================
pub struct EstimatorApi {
    cost_model: Arc<CostModel>,
    chart_adapter: ChartAdapter,
}

impl EstimatorApi {
    pub fn new(cost_model: Arc<CostModel>) -> Self {
        Self {
            cost_model,
            chart_adapter: ChartAdapter::new(),
        }
    }

    /// 计算数据中心成本
    ///
    /// # 参数
    /// - input: 已解析的项目输入
    ///
    /// # 返回
    /// - Ok(CostReport)
    /// - Err(ApiError::ValidationError): 通胀率越界, 未做任何计算
    /// - Err(ApiError::ConfigurationError): 基线/费率缺失
    pub fn compute_datacenter_costs(&self, input: &ProjectInput) -> ApiResult<CostReport> {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "compute_datacenter_costs",
            %request_id,
            capacity = %input.capacity,
            rating = %input.rating,
            inflation_rate = input.inflation_rate
        );
        let _guard = span.enter();

        if let Err(e) = validate_inflation_rate(input.inflation_rate) {
            warn!(error = %e, "输入校验失败");
            return Err(e.into());
        }

        let result = self.cost_model.compute(input)?;
        let charts = self
            .chart_adapter
            .build_charts(&input.project_name, &result)?;

        info!(
            construction_total_usd = result.construction_breakdown.total_usd,
            ten_year_total_usd = result.cumulative_ten_year_total_usd,
            "成本估算完成"
        );

        Ok(CostReport {
            project_name: input.project_name.clone(),
            result,
            charts,
        })
    }
}
