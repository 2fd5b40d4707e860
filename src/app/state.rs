// ==========================================
// 数据中心成本估算 - 应用状态
// ==========================================
// 职责: 启动期组装全部依赖, 之后只读
// 启动顺序: 配置 → 费率表（失败即退出）→ 基线表校验 → 引擎 → API
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::estimator_api::EstimatorApi;
use crate::api::validator::ProjectInputValidator;
use crate::config::EstimatorConfig;
use crate::engine::cost_model::CostModel;
use crate::importer::rate_importer::RateImporter;
use crate::repository::cost_tables::CostTables;
use crate::repository::rate_source::RateSource;

/// 应用状态
///
/// 包含估算 API 与启动期确定的配置
pub struct AppState {
    /// 费率文件目录
    pub data_dir: PathBuf,

    /// 生效配置
    pub config: EstimatorConfig,

    /// 表单校验器
    pub validator: ProjectInputValidator,

    /// 估算 API
    pub estimator_api: Arc<EstimatorApi>,
}

impl AppState {
    /// 按配置初始化
    ///
    /// # 返回
    /// - Ok(AppState)
    /// - Err(ApiError::ConfigurationError): 费率文件缺失/畸形/过期, 或基线表不完整
    pub fn initialize(config: EstimatorConfig) -> ApiResult<Self> {
        let data_dir = config.resolved_data_dir();
        info!(data_dir = %data_dir.display(), "初始化AppState");

        let rate_table = RateImporter::new()
            .load_rate_table(&data_dir, config.rate_year)
            .map_err(|e| {
                error!(error = %e, data_dir = %data_dir.display(), "费率表加载失败");
                ApiError::from(e)
            })?;

        Self::with_rate_source(config, data_dir, Arc::new(rate_table))
    }

    /// 使用已构建的费率源初始化（测试夹具可直接注入）
    pub fn with_rate_source(
        config: EstimatorConfig,
        data_dir: PathBuf,
        rates: Arc<dyn RateSource>,
    ) -> ApiResult<Self> {
        let tables = CostTables::builtin().map_err(|e| {
            error!(error = %e, "基线表校验失败");
            ApiError::from(e)
        })?;

        let cost_model = CostModel::new(Arc::new(tables), rates, config.model_settings())?;
        let estimator_api = Arc::new(EstimatorApi::new(Arc::new(cost_model)));
        let validator = ProjectInputValidator::from_config(&config);

        info!("AppState初始化成功");
        Ok(Self {
            data_dir,
            config,
            validator,
            estimator_api,
        })
    }
}
