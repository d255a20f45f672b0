// ==========================================
// 轧线排程校验系统 - 核心库
// ==========================================
// 技术栈: Rust + serde + chrono
// 系统定位: 排程提交文件的离线规则校验 (全量通过/首错拒绝)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 校验规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 产线配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Composition, DateWindow, EntryKind, ProductType, TuneKind};

// 领域实体
pub use domain::{Order, OrderCatalog, ScheduleEntry, SubmissionDoc};

// 引擎
pub use engine::{
    DateRangeChecker, LineState, QuantityReconciler, ScheduleRuleEngine, ValidationError,
    ValidationResult, Verdict,
};

// 配置
pub use config::{PlantConfig, WidthLimit};

// 导入
pub use importer::{load_order_catalog, load_submission, ImportError, ImportResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "轧线排程校验系统";
