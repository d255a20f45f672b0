// ==========================================
// 轧线排程校验系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 定位: 规则校验开始前的输入失败 (读文件/解析/字段映射)
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.xlsx/.xls 目录与 .json 提交文件）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    // ===== 字段映射错误 =====
    #[error("字段映射失败 (行 {row}, 字段 {field}): {message}")]
    FieldMappingError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("日期格式错误 (行 {row}, 字段 {field}): 期望 YYYY-MM-DD，实际 {value}")]
    DateFormatError {
        row: usize,
        field: String,
        value: String,
    },

    // ===== 目录质量错误 =====
    #[error("重复订单号 (行 {row}): {order_code}")]
    DuplicateOrder { row: usize, order_code: String },

    #[error("未知产品代码 (行 {row}): {product_code}")]
    UnknownProductCode { row: usize, product_code: String },

    // ===== 配置错误 =====
    #[error("配置读取失败 ({path}): {message}")]
    ConfigReadError { path: String, message: String },

    // ===== 通用错误 =====
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

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
