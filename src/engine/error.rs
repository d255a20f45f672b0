// ==========================================
// 轧线排程校验系统 - 校验错误与裁定结果
// ==========================================
// 工具: thiserror 派生宏
// 红线: 规则违规以 Result 提前返回传播, 不用异常控制流
// 红线: 每个违规携带定位上下文 (日期/产线/订单号)
// ==========================================

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// 排程规则违规 (首错即止)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    // ===== 日期检查 =====
    #[error("{date}: 日期格式错误，应为 YYYY-MM-DD")]
    DateFormat { date: String },

    #[error("{date}: 排程日期超出有效区间（{start} 至 {end}）")]
    DateRange {
        date: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("{date}, {prev}: 日期顺序错误")]
    DateOrder { date: String, prev: String },

    #[error("日期覆盖不完整，缺少 {missing}")]
    DateCoverage { missing: NaiveDate },

    // ===== 结构检查 =====
    #[error("{date},{line}: 排程项字段应恰为 order_code / product_code / hours / mfg_width")]
    Schema { date: String, line: String },

    #[error("{date},{line}: \"{field}\" 字段类型错误，应为{expected}")]
    FieldType {
        date: String,
        line: String,
        field: String,
        expected: String,
    },

    #[error("{date}, {line}: 无效的产线编号")]
    InvalidLine { date: String, line: String },

    #[error("{date},{line}: 排程序列不可为空")]
    EmptySchedule { date: String, line: String },

    #[error("{date},{line},{order_code}: 无效的 \"order_code\"")]
    UnknownOrder {
        date: String,
        line: String,
        order_code: String,
    },

    #[error("{date},{line},{order_code}: \"order_code\" 与 \"product_code\" 不匹配")]
    ProductCodeMismatch {
        date: String,
        line: String,
        order_code: String,
    },

    #[error("{date},{line},{order_code}: \"{field}\" 不可为负数")]
    NegativeValue {
        date: String,
        line: String,
        order_code: String,
        field: String,
    },

    // ===== 调机时序检查 =====
    #[error("{date},{line},{order_code}: 开机前应先调机（tune_8 或 tune_48）")]
    MissingTune {
        date: String,
        line: String,
        order_code: String,
    },

    #[error("{date},{line},{code}: \"{prev_code}\" 之后不可紧接 \"{code}\"")]
    TuneSequence {
        date: String,
        line: String,
        prev_code: String,
        code: String,
    },

    #[error("{date},{line},{code}: 调机时数超出上限（{hours} > {limit}）")]
    TuneOverflow {
        date: String,
        line: String,
        code: String,
        hours: u32,
        limit: u32,
    },

    #[error("{date},{line},{order_code}: 产品类型变更，应先完成 48 小时调机（tune_48）")]
    TypeChangeTune {
        date: String,
        line: String,
        order_code: String,
    },

    #[error("{date},{line},{order_code}: 成分切换至 0%，应先完成 {required_hours} 小时调机（{required_code}）")]
    CompositionTune {
        date: String,
        line: String,
        order_code: String,
        required_code: String,
        required_hours: u32,
    },

    #[error("{date},{line},{order_code}: \"mfg_width\" 变更，应先完成 {required_hours} 小时调机（{required_code}）")]
    WidthChangeTune {
        date: String,
        line: String,
        order_code: String,
        required_code: String,
        required_hours: u32,
    },

    // ===== 产线兼容性检查 =====
    #[error("{date},{line},{order_code}: 产品类型 \"{product_type}\" 与产线 \"{line}\" 不匹配")]
    TypeLineMismatch {
        date: String,
        line: String,
        order_code: String,
        product_type: String,
    },

    #[error("{date},{line},{order_code}: {detail}")]
    WidthConstraint {
        date: String,
        line: String,
        order_code: String,
        detail: String,
    },

    #[error("{date},{line},{order_code}: MS 材质仅允许排于 C1 产线")]
    MaterialLine {
        date: String,
        line: String,
        order_code: String,
    },

    #[error("{date},{line},{order_code}: 含 K 标记的产品仅允许排于 K 线")]
    KLine {
        date: String,
        line: String,
        order_code: String,
    },

    #[error("{date},{line},{order_code}: 排程日期超出订单交期区间（{not_before} 至 {not_after}）")]
    ScheduleWindow {
        date: String,
        line: String,
        order_code: String,
        not_before: NaiveDate,
        not_after: NaiveDate,
    },

    // ===== 日汇总检查 =====
    #[error("{date},{line}: 每日工时应恰为 24 小时（实际 {hours}）")]
    DailyHours {
        date: String,
        line: String,
        hours: u64,
    },

    #[error("{date}: 部分产线缺少排程")]
    LineCoverage { date: String },

    #[error("{date}: 开机产线数应介于 {min} 与 {max} 之间（实际 {count}）")]
    OpenLineCount {
        date: String,
        count: usize,
        min: usize,
        max: usize,
    },

    // ===== 全局对账检查 =====
    #[error("订单覆盖不完整，未排入订单: {missing:?}")]
    OrderCoverage { missing: Vec<String> },

    #[error("订单 {order_code} 产量不符（应为 {expected}，实际 {actual}）")]
    QuantityMismatch {
        order_code: String,
        expected: u64,
        actual: u64,
    },
}

/// Result 类型别名
pub type ValidationResult<T> = Result<T, ValidationError>;

// ==========================================
// Verdict - 校验裁定
// ==========================================
// 对外输出: 通过与否 + 单条诊断信息
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub pass: bool,
    pub message: String,
}

impl Verdict {
    pub fn passed() -> Self {
        Self {
            pass: true,
            message: "排程提交文件校验通过。".to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            pass: false,
            message: message.into(),
        }
    }
}

impl From<ValidationResult<()>> for Verdict {
    fn from(result: ValidationResult<()>) -> Self {
        match result {
            Ok(()) => Verdict::passed(),
            Err(e) => Verdict::failed(e.to_string()),
        }
    }
}
