// ==========================================
// 轧线排程校验系统 - 导入层
// ==========================================
// 职责: 订单目录与排程提交文件的读取解析
// 红线: 导入失败发生在任何规则校验之前, 以 ImportError 报出
// ==========================================

pub mod error;
pub mod order_loader;
pub mod submission_loader;

// 重导出核心接口
pub use error::{ImportError, ImportResult};
pub use order_loader::load_order_catalog;
pub use submission_loader::load_submission;
