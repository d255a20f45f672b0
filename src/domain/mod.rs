// ==========================================
// 轧线排程校验系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与封闭集类型
// 红线: 不含文件访问逻辑, 不含引擎逻辑
// ==========================================

pub mod order;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use order::{Order, OrderCatalog};
pub use schedule::{ScheduleEntry, SubmissionDoc};
pub use types::{Composition, DateWindow, EntryKind, ProductType, TuneKind};
