// ==========================================
// 轧线排程校验系统 - 配置层
// ==========================================
// 职责: 产线固定表与校验参数
// ==========================================

pub mod plant_config;

pub use plant_config::{PlantConfig, WidthLimit};
