// ==========================================
// 数据中心成本估算 - 导入模块错误类型
// ==========================================
// 说明: 费率文件缺失/畸形/过期均为启动期致命配置错误
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

use crate::repository::error::RepositoryError;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("列缺失 (文件 {file}): {column}")]
    MissingColumn { file: String, column: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("无法识别的容量 (行 {row}): {value}")]
    UnknownCapacity { row: usize, value: String },

    #[error("数值范围错误 (行 {row}, 字段 {field}): 值 {value} 必须为非负有限数")]
    NegativeValue { row: usize, field: String, value: f64 },

    // ===== 数据质量错误 =====
    #[error("容量重复 (文件 {file}, 行 {row}): {capacity}")]
    DuplicateCapacity {
        file: String,
        row: usize,
        capacity: String,
    },

    #[error("数据过期: {category} 缺少 {capacity} 在 {year} 年的费率")]
    StaleData {
        category: String,
        capacity: String,
        year: i32,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
