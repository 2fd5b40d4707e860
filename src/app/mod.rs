// ==========================================
// 数据中心成本估算 - 应用层
// ==========================================
// 职责: 启动期依赖组装, 供 App Shell 使用
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
