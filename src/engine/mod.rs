// ==========================================
// 轧线排程校验系统 - 引擎层
// ==========================================
// 职责: 排程规则校验 (日期检查 / 单遍规则扫描 / 产量对账)
// 红线: 首错即止, 所有违规携带定位上下文
// ==========================================

pub mod date_range;
pub mod error;
pub mod line_state;
pub mod quantity;
pub mod rule_engine;

// 重导出核心引擎
pub use date_range::DateRangeChecker;
pub use error::{ValidationError, ValidationResult, Verdict};
pub use line_state::LineState;
pub use quantity::QuantityReconciler;
pub use rule_engine::ScheduleRuleEngine;
