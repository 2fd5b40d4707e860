// ==========================================
// 数据中心成本估算 - 配置层
// ==========================================
// 职责: 估算配置管理, 支持文件 + 环境变量覆写
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, default_data_dir, env_keys, ConfigError, ConfigManager, ConfigResult,
    EstimatorConfig, LandPolicyKind,
};
